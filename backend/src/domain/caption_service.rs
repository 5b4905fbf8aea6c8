//! Caption suggestions for the upload form.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use crate::domain::ports::{CaptionCommand, CaptionGenerator};
use crate::domain::{Error, normalise_tags};

/// Caption returned when the generator fails.
pub const CAPTION_FALLBACK: &str = "Error generating description. Please try again.";

/// Service implementing [`CaptionCommand`].
///
/// Generator failures never reach the caller: they are logged and replaced
/// by [`CAPTION_FALLBACK`].
#[derive(Clone)]
pub struct CaptionService<G> {
    generator: Arc<G>,
}

impl<G> CaptionService<G> {
    /// Create a new service.
    pub fn new(generator: Arc<G>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl<G> CaptionCommand for CaptionService<G>
where
    G: CaptionGenerator,
{
    async fn generate_caption(&self, title: &str, tags: &[String]) -> Result<String, Error> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::invalid_request("title must not be empty")
                .with_details(json!({ "field": "title", "code": "empty_title" })));
        }
        let tags = normalise_tags(tags);
        match self.generator.generate(title, &tags).await {
            Ok(caption) => Ok(caption),
            Err(err) => {
                warn!(error = %err, "caption generation failed");
                Ok(CAPTION_FALLBACK.to_owned())
            }
        }
    }
}
