//! Driving port for caption suggestions.

use async_trait::async_trait;

use crate::domain::Error;

/// Domain use-case port for suggesting a caption while uploading.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptionCommand: Send + Sync {
    /// Suggest a caption for the given title and tags.
    async fn generate_caption(&self, title: &str, tags: &[String]) -> Result<String, Error>;
}
