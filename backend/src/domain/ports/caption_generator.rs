//! Port for caption generation backends.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by caption generators.
    pub enum CaptionGeneratorError {
        /// The backend is not configured.
        Unavailable { message: String } => "caption generator unavailable: {message}",
        /// Generation failed.
        Generation { message: String } => "caption generation failed: {message}",
    }
}

/// Produces a short caption for a piece of art.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptionGenerator: Send + Sync {
    /// Write a caption for `title` tagged with `tags`.
    async fn generate(&self, title: &str, tags: &[String]) -> Result<String, CaptionGeneratorError>;
}
