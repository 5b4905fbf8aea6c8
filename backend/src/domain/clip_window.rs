//! Clip window selection for contest uploads.
//!
//! A [`ClipWindow`] holds two instants inside a video, `start <= end`, and
//! keeps `end - start` between [`MIN_CLIP`] and [`MAX_CLIP`] through every
//! handle drag. Positions arrive from the UI as seconds (`f64`) and are
//! stored as [`Duration`] so bounds checks are exact.
//!
//! ## Invariants
//! - `0 <= start <= end <= duration`
//! - `MIN_CLIP <= end - start <= MAX_CLIP`

use std::time::Duration;

use super::ClipSelection;

/// Shortest clip that may be submitted.
pub const MIN_CLIP: Duration = Duration::from_secs(1);
/// Longest clip that may be submitted.
pub const MAX_CLIP: Duration = Duration::from_secs(30);
/// How far before `end` the preview seeks while the end handle moves.
pub const END_SEEK_LEAD: Duration = Duration::from_millis(100);

/// Errors raised when constructing a window.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClipWindowError {
    /// A position was NaN or infinite.
    #[error("clip position must be a finite number of seconds")]
    NonFinite,
    /// A position was negative.
    #[error("clip position must not be negative")]
    Negative,
    /// The source video cannot hold a minimum-length clip.
    #[error("video must be at least {min:?} long, got {duration:?}")]
    VideoTooShort {
        /// Source duration.
        duration: Duration,
        /// Required minimum.
        min: Duration,
    },
    /// Start or end lies beyond the video.
    #[error("clip bounds must lie within the video")]
    OutOfBounds,
    /// End precedes start.
    #[error("clip start must not be after clip end")]
    Inverted,
    /// Window is shorter than the minimum.
    #[error("clip must be at least {min:?} long")]
    TooShort {
        /// Required minimum.
        min: Duration,
    },
    /// Window is longer than the maximum.
    #[error("clip must be at most {max:?} long")]
    TooLong {
        /// Allowed maximum.
        max: Duration,
    },
}

/// Why a drag was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragRejection {
    /// The handle position was not a finite number.
    NonFinite,
    /// The video end leaves no room for a minimum-length clip.
    BelowMinimum,
}

/// Result of moving a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// The window changed (possibly pulling the opposite handle).
    Applied,
    /// The window is unchanged.
    Rejected(DragRejection),
}

impl DragOutcome {
    /// True when the drag changed the window.
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

fn secs(value: f64) -> Result<Duration, ClipWindowError> {
    if !value.is_finite() {
        return Err(ClipWindowError::NonFinite);
    }
    if value < 0.0 {
        return Err(ClipWindowError::Negative);
    }
    Duration::try_from_secs_f64(value).map_err(|_| ClipWindowError::OutOfBounds)
}

/// Selected portion of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipWindow {
    duration: Duration,
    start: Duration,
    end: Duration,
}

impl ClipWindow {
    /// Default window for a freshly loaded video: from zero up to
    /// `min(duration, MAX_CLIP)`.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use faceexpo::domain::ClipWindow;
    ///
    /// let window = ClipWindow::load(Duration::from_secs(60)).expect("long enough");
    /// assert_eq!(window.end(), Duration::from_secs(30));
    /// assert!(ClipWindow::load(Duration::from_millis(500)).is_err());
    /// ```
    pub fn load(duration: Duration) -> Result<Self, ClipWindowError> {
        if duration < MIN_CLIP {
            return Err(ClipWindowError::VideoTooShort {
                duration,
                min: MIN_CLIP,
            });
        }
        Ok(Self {
            duration,
            start: Duration::ZERO,
            end: duration.min(MAX_CLIP),
        })
    }

    /// [`ClipWindow::load`] for a duration reported in seconds.
    pub fn load_secs(duration_secs: f64) -> Result<Self, ClipWindowError> {
        Self::load(secs(duration_secs)?)
    }

    /// Build a window from arbitrary bounds, clamping them onto the
    /// invariants instead of rejecting them.
    pub fn from_bounds(
        duration_secs: f64,
        start_secs: f64,
        end_secs: f64,
    ) -> Result<Self, ClipWindowError> {
        let mut window = Self::load_secs(duration_secs)?;
        let start = window.clamp(start_secs).ok_or(ClipWindowError::NonFinite)?;
        let end = window
            .clamp(end_secs)
            .ok_or(ClipWindowError::NonFinite)?
            .max(start);

        let mut end = if end - start > MAX_CLIP {
            start + MAX_CLIP
        } else {
            end
        };
        let mut start = start;
        if end - start < MIN_CLIP {
            end = (start + MIN_CLIP).min(window.duration);
            start = start.min(end.saturating_sub(MIN_CLIP));
        }
        window.start = start;
        window.end = end;
        Ok(window)
    }

    /// Strictly validate bounds, as submitted with a contest entry.
    pub fn try_new(
        duration_secs: f64,
        start_secs: f64,
        end_secs: f64,
    ) -> Result<Self, ClipWindowError> {
        let duration = secs(duration_secs)?;
        if duration < MIN_CLIP {
            return Err(ClipWindowError::VideoTooShort {
                duration,
                min: MIN_CLIP,
            });
        }
        let start = secs(start_secs)?;
        let end = secs(end_secs)?;
        if end > duration || start > duration {
            return Err(ClipWindowError::OutOfBounds);
        }
        if start > end {
            return Err(ClipWindowError::Inverted);
        }
        let length = end - start;
        if length < MIN_CLIP {
            return Err(ClipWindowError::TooShort { min: MIN_CLIP });
        }
        if length > MAX_CLIP {
            return Err(ClipWindowError::TooLong { max: MAX_CLIP });
        }
        Ok(Self {
            duration,
            start,
            end,
        })
    }

    /// Validate a selection received over the wire.
    pub fn try_from_selection(selection: &ClipSelection) -> Result<Self, ClipWindowError> {
        Self::try_new(
            selection.duration_secs,
            selection.start_secs,
            selection.end_secs,
        )
    }

    /// Source video length.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Clip start.
    pub fn start(&self) -> Duration {
        self.start
    }

    /// Clip end.
    pub fn end(&self) -> Duration {
        self.end
    }

    /// Clip length.
    pub fn length(&self) -> Duration {
        self.end - self.start
    }

    /// Selection in seconds for transport.
    pub fn selection(&self) -> ClipSelection {
        ClipSelection {
            duration_secs: self.duration.as_secs_f64(),
            start_secs: self.start.as_secs_f64(),
            end_secs: self.end.as_secs_f64(),
        }
    }

    fn clamp(&self, position_secs: f64) -> Option<Duration> {
        if !position_secs.is_finite() {
            return None;
        }
        let bounded = position_secs.clamp(0.0, self.duration.as_secs_f64());
        Some(
            Duration::try_from_secs_f64(bounded)
                .unwrap_or(self.duration)
                .min(self.duration),
        )
    }

    /// Move the start handle.
    ///
    /// Pulls `end` forward when the window would drop below [`MIN_CLIP`] and
    /// back when it would exceed [`MAX_CLIP`]. Rejected when the video end
    /// leaves no room for a minimum-length clip after `start`.
    pub fn drag_start(&mut self, position_secs: f64) -> DragOutcome {
        let Some(start) = self.clamp(position_secs) else {
            return DragOutcome::Rejected(DragRejection::NonFinite);
        };
        let mut end = self.end;
        if start + MIN_CLIP >= end {
            end = (start + MIN_CLIP).min(self.duration);
            if end.saturating_sub(start) < MIN_CLIP {
                return DragOutcome::Rejected(DragRejection::BelowMinimum);
            }
        }
        if end - start > MAX_CLIP {
            end = start + MAX_CLIP;
        }
        self.start = start;
        self.end = end;
        DragOutcome::Applied
    }

    /// Move the end handle.
    ///
    /// Mirror image of [`ClipWindow::drag_start`]: `start` is pulled back
    /// (floored at zero) or forward to keep the window within bounds.
    pub fn drag_end(&mut self, position_secs: f64) -> DragOutcome {
        let Some(end) = self.clamp(position_secs) else {
            return DragOutcome::Rejected(DragRejection::NonFinite);
        };
        let mut start = self.start;
        if end <= start + MIN_CLIP {
            start = end.saturating_sub(MIN_CLIP);
            if end.saturating_sub(start) < MIN_CLIP {
                return DragOutcome::Rejected(DragRejection::BelowMinimum);
            }
        }
        if end - start > MAX_CLIP {
            start = end - MAX_CLIP;
        }
        self.start = start;
        self.end = end;
        DragOutcome::Applied
    }
}

/// Outcome of a playback time update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUpdate {
    /// Playhead is still inside the window.
    Continued,
    /// Playhead reached the end and snapped back to the start.
    Looped {
        /// Whether playback should carry on from the start.
        resume: bool,
    },
}

/// Looping preview of a clip window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipPreview {
    window: ClipWindow,
    position: Duration,
    playing: bool,
}

impl ClipPreview {
    /// Start a preview that autoplays from the window start.
    pub fn new(window: ClipWindow) -> Self {
        Self {
            position: window.start(),
            window,
            playing: true,
        }
    }

    /// Current window.
    pub fn window(&self) -> &ClipWindow {
        &self.window
    }

    /// Current playhead.
    pub fn position(&self) -> Duration {
        self.position
    }

    /// Whether playback is running.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Flip between playing and paused, returning the new state.
    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Stop playback, e.g. when autoplay is refused.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Record a playhead update from the player.
    pub fn on_time_update(&mut self, position: Duration) -> TimeUpdate {
        if position >= self.window.end() {
            self.position = self.window.start();
            return TimeUpdate::Looped {
                resume: self.playing,
            };
        }
        self.position = position;
        TimeUpdate::Continued
    }

    /// Move the start handle and seek to the new start.
    pub fn drag_start(&mut self, position_secs: f64) -> DragOutcome {
        let outcome = self.window.drag_start(position_secs);
        if outcome.is_applied() {
            self.position = self.window.start();
        }
        outcome
    }

    /// Move the end handle and seek just before the new end.
    pub fn drag_end(&mut self, position_secs: f64) -> DragOutcome {
        let outcome = self.window.drag_end(position_secs);
        if outcome.is_applied() {
            self.position = self
                .window
                .start()
                .max(self.window.end().saturating_sub(END_SEEK_LEAD));
        }
        outcome
    }
}

/// Render a position as `m:ss`.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use faceexpo::domain::format_clock;
///
/// assert_eq!(format_clock(Duration::from_secs_f64(75.9)), "1:15");
/// ```
pub fn format_clock(position: Duration) -> String {
    let total = position.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}
