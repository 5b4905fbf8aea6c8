//! Driving port for fan toggling.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, UserId};

/// Result of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FanToggleOutcome {
    /// Whether the viewer is a fan after the toggle.
    pub is_fanned: bool,
    /// The artist's aggregate fan count after the toggle.
    pub new_fan_count: u64,
}

/// Domain use-case port for becoming or ceasing to be a fan.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FanCommand: Send + Sync {
    /// Flip the viewer's fan status for `artist_id` and reconcile every
    /// stored copy of the artist's fan count.
    async fn toggle_fan(
        &self,
        viewer_id: &UserId,
        artist_id: &UserId,
    ) -> Result<FanToggleOutcome, Error>;
}
