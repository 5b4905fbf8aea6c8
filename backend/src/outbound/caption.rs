//! Offline caption generator.
//!
//! Produces a two-sentence caption from fixed templates so uploads can be
//! captioned without a text-generation service. The template is chosen from
//! the title so the same input always yields the same caption.

use async_trait::async_trait;

use crate::domain::ports::{CaptionGenerator, CaptionGeneratorError};

const OPENERS: &[&str] = &[
    "\"{title}\" hums with electric light",
    "\"{title}\" flickers out of the static",
    "Step inside \"{title}\", where the neon never sleeps",
];

const CLOSERS: &[&str] = &[
    "A {tags} signal pulsing from the edge of tomorrow.",
    "Wired for {tags}, built for the after-hours crowd.",
    "Tune in: {tags} frequencies, amplified.",
];

const UNTAGGED: &str = "mystery";

/// Template-based [`CaptionGenerator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateCaptionGenerator;

impl TemplateCaptionGenerator {
    fn pick<'a>(options: &[&'a str], seed: usize) -> Option<&'a str> {
        options.get(seed % options.len().max(1)).copied()
    }

    fn compose(title: &str, tags: &[String]) -> Option<String> {
        let seed = title.bytes().map(usize::from).sum::<usize>();
        let tag_phrase = if tags.is_empty() {
            UNTAGGED.to_owned()
        } else {
            tags.iter()
                .map(|tag| format!("#{tag}"))
                .collect::<Vec<_>>()
                .join(" ")
        };
        let opener = Self::pick(OPENERS, seed)?.replace("{title}", title);
        let closer =
            Self::pick(CLOSERS, seed / OPENERS.len().max(1))?.replace("{tags}", &tag_phrase);
        Some(format!("{opener}. {closer}"))
    }
}

#[async_trait]
impl CaptionGenerator for TemplateCaptionGenerator {
    async fn generate(
        &self,
        title: &str,
        tags: &[String],
    ) -> Result<String, CaptionGeneratorError> {
        Self::compose(title, tags)
            .ok_or_else(|| CaptionGeneratorError::unavailable("no caption templates configured"))
    }
}
