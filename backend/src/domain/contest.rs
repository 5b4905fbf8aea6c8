//! Karaoke contest entries, categories and vote outcomes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{EntryId, UserId};

/// Contest category an entry competes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContestCategory {
    /// Vocal performance category.
    BestInShow,
    /// Comedy category.
    FunniestVideo,
}

impl ContestCategory {
    /// Wire name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BestInShow => "BEST_IN_SHOW",
            Self::FunniestVideo => "FUNNIEST_VIDEO",
        }
    }
}

impl fmt::Display for ContestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown contest category: {0}")]
pub struct ParseContestCategoryError(String);

impl FromStr for ContestCategory {
    type Err = ParseContestCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BEST_IN_SHOW" => Ok(Self::BestInShow),
            "FUNNIEST_VIDEO" => Ok(Self::FunniestVideo),
            other => Err(ParseContestCategoryError(other.to_owned())),
        }
    }
}

/// Video submitted to the contest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestEntry {
    /// Entry identifier.
    pub id: EntryId,
    /// Submitting user.
    pub user_id: UserId,
    /// Submitter handle.
    pub username: String,
    /// Submitter avatar.
    pub user_avatar: String,
    /// Video location.
    pub video_url: String,
    /// Optional still frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Category the entry competes in.
    pub category: ContestCategory,
    /// Vote tally.
    pub votes: u64,
    /// Entry title.
    pub title: String,
}

/// Result of casting a vote.
///
/// `accepted` is `false` when the voter had already voted for the entry; the
/// tally is then returned unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteOutcome {
    /// Whether this call recorded a new vote.
    pub accepted: bool,
    /// Vote tally after the call.
    pub votes: u64,
}

/// Clip bounds in seconds as chosen in the trimming UI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipSelection {
    /// Full length of the source video.
    pub duration_secs: f64,
    /// Clip start.
    pub start_secs: f64,
    /// Clip end.
    pub end_secs: f64,
}

/// Fields supplied when entering the contest.
#[derive(Debug, Clone, PartialEq)]
pub struct ContestSubmission {
    /// Category being entered.
    pub category: ContestCategory,
    /// Optional title; a default is derived from the category when absent.
    pub title: Option<String>,
    /// Uploaded video location.
    pub video_url: Option<String>,
    /// Selected clip, validated before the entry is stored.
    pub clip: Option<ClipSelection>,
}

impl ContestSubmission {
    /// Submission carrying only a category.
    pub fn new(category: ContestCategory) -> Self {
        Self {
            category,
            title: None,
            video_url: None,
            clip: None,
        }
    }

    /// Title to store, trimmed, falling back to a per-category default.
    pub fn resolved_title(&self, username: &str) -> String {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .map_or_else(
                || match self.category {
                    ContestCategory::BestInShow => format!("{username} live on stage"),
                    ContestCategory::FunniestVideo => format!("{username} goes off-key"),
                },
                str::to_owned,
            )
    }
}
