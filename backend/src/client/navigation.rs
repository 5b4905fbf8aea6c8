//! Cancellation of in-flight fetches when the user navigates.
//!
//! Every navigation mints a fresh [`CancellationToken`] and cancels the one
//! before it. Fetches race against the token they were started with, so a
//! response that arrives after the user left the view is discarded instead
//! of being applied to state.

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::ClientError;
use crate::domain::Error;

/// Views a client can navigate between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// The home feed.
    Feed,
    /// An artist's profile page.
    Profile(crate::domain::UserId),
    /// The contest page.
    Contest,
    /// Settings for the logged-in user.
    Settings,
    /// The upload form.
    Upload,
}

/// Owner of the current navigation's token.
#[derive(Debug, Default)]
pub struct Navigator {
    current: Mutex<(Option<View>, CancellationToken)>,
}

impl Navigator {
    /// Create a navigator with an initial live token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `view`, cancelling every fetch tied to the previous one.
    pub fn navigate(&self, view: View) -> CancellationToken {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        current.1.cancel();
        debug!(?view, "navigated; previous fetches cancelled");
        let token = CancellationToken::new();
        *current = (Some(view), token.clone());
        token
    }

    /// Token for the current view.
    pub fn token(&self) -> CancellationToken {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .1
            .clone()
    }

    /// The view most recently navigated to.
    pub fn view(&self) -> Option<View> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .0
            .clone()
    }
}

/// Run `fetch` unless `token` is cancelled first.
///
/// A result that completes after cancellation is dropped, so callers only
/// apply state when this returns `Ok`.
pub async fn guarded<T, F>(token: &CancellationToken, fetch: F) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, Error>>,
{
    if token.is_cancelled() {
        return Err(ClientError::Cancelled);
    }
    let result = select! {
        biased;
        () = token.cancelled() => return Err(ClientError::Cancelled),
        result = fetch => result,
    };
    if token.is_cancelled() {
        return Err(ClientError::Cancelled);
    }
    result.map_err(ClientError::from)
}
