//! Posts published by artists and the comments attached to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CommentId, PostId, User, UserId};

/// Validation errors raised while building post values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostValidationError {
    /// Post title was blank.
    #[error("title must not be empty")]
    EmptyTitle,
    /// Media URL was blank.
    #[error("media url must not be empty")]
    EmptyMediaUrl,
    /// Comment text was blank.
    #[error("comment text must not be empty")]
    EmptyComment,
}

impl PostValidationError {
    /// Field name reported in error details.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::EmptyMediaUrl => "mediaUrl",
            Self::EmptyComment => "text",
        }
    }

    /// Machine-readable code reported in error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::EmptyMediaUrl => "empty_media_url",
            Self::EmptyComment => "empty_comment",
        }
    }
}

/// Kind of media attached to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Still image.
    Image,
    /// Video clip.
    Video,
}

/// Immutable comment owned by a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment identifier.
    pub id: CommentId,
    /// Author identifier.
    pub user_id: UserId,
    /// Author handle at the time of writing.
    pub username: String,
    /// Comment body.
    pub text: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Published artwork.
///
/// `fan_count` is a denormalised copy of the artist's aggregate count; fan
/// toggles rewrite it on every stored post of that artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Post identifier.
    pub id: PostId,
    /// Owning artist.
    pub artist_id: UserId,
    /// Artist handle at publication time.
    pub artist_name: String,
    /// Artist avatar at publication time.
    pub artist_avatar: String,
    /// Title shown on the card.
    pub title: String,
    /// Media location.
    pub media_url: String,
    /// Media kind.
    pub media_type: MediaType,
    /// Normalised tags.
    pub tags: Vec<String>,
    /// Publication timestamp.
    pub created_at: DateTime<Utc>,
    /// Artist fan count copy.
    pub fan_count: u64,
    /// Comments, oldest first.
    pub comments: Vec<Comment>,
}

impl Post {
    /// Publish a draft on behalf of `author`.
    ///
    /// The post starts with no comments and snapshots the author's current
    /// fan count.
    pub fn publish(id: PostId, draft: NewPost, author: &User, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            artist_id: author.id().clone(),
            artist_name: author.username().to_string(),
            artist_avatar: author.avatar_url().to_owned(),
            title: draft.title,
            media_url: draft.media_url,
            media_type: draft.media_type,
            tags: draft.tags,
            created_at,
            fan_count: author.fan_count(),
            comments: Vec::new(),
        }
    }
}

/// Validated fields supplied when creating a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    title: String,
    media_url: String,
    media_type: MediaType,
    tags: Vec<String>,
}

impl NewPost {
    /// Validate draft fields, trimming the title and normalising tags.
    ///
    /// # Examples
    /// ```
    /// use faceexpo::domain::{MediaType, NewPost};
    ///
    /// let draft = NewPost::new(
    ///     "Neon Dreams",
    ///     "https://picsum.photos/800/600",
    ///     MediaType::Image,
    ///     ["neon", " ", "art "],
    /// )
    /// .expect("valid draft");
    /// assert_eq!(draft.tags(), ["neon", "art"]);
    /// ```
    pub fn new<I, S>(
        title: impl Into<String>,
        media_url: impl Into<String>,
        media_type: MediaType,
        tags: I,
    ) -> Result<Self, PostValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(PostValidationError::EmptyTitle);
        }
        let media_url = media_url.into().trim().to_owned();
        if media_url.is_empty() {
            return Err(PostValidationError::EmptyMediaUrl);
        }
        Ok(Self {
            title,
            media_url,
            media_type,
            tags: normalise_tags(tags),
        })
    }

    /// Draft title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Normalised tags.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Trim tags, drop blanks and duplicates while keeping first-seen order.
pub fn normalise_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !out.iter().any(|seen| seen == tag) {
            out.push(tag.to_owned());
        }
    }
    out
}

/// Split a comma-separated tag string as typed into the upload form.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    normalise_tags(raw.split(','))
}

/// Non-empty comment body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentText(String);

impl CommentText {
    /// Validate a comment body.
    pub fn new(raw: impl Into<String>) -> Result<Self, PostValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PostValidationError::EmptyComment);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for CommentText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<CommentText> for String {
    fn from(value: CommentText) -> Self {
        value.0
    }
}
