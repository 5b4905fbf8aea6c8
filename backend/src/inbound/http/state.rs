//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever see driving
//! ports, so they can be exercised against mocks without any storage.

use std::sync::Arc;

use crate::domain::ports::{
    CaptionCommand, ContestCommand, ContestQuery, FanCommand, FeedQuery, LoginService,
    PostCommand, UserProfileCommand, UserProfileQuery,
};
use crate::wiring::ServicePorts;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// See [`ServicePorts::login`].
    pub login: Arc<dyn LoginService>,
    /// See [`ServicePorts::profile`].
    pub profile: Arc<dyn UserProfileQuery>,
    /// See [`ServicePorts::profile_command`].
    pub profile_command: Arc<dyn UserProfileCommand>,
    /// See [`ServicePorts::feed`].
    pub feed: Arc<dyn FeedQuery>,
    /// See [`ServicePorts::posts`].
    pub posts: Arc<dyn PostCommand>,
    /// See [`ServicePorts::fans`].
    pub fans: Arc<dyn FanCommand>,
    /// See [`ServicePorts::contest`].
    pub contest: Arc<dyn ContestQuery>,
    /// See [`ServicePorts::contest_command`].
    pub contest_command: Arc<dyn ContestCommand>,
    /// See [`ServicePorts::captions`].
    pub captions: Arc<dyn CaptionCommand>,
}

impl From<ServicePorts> for HttpState {
    fn from(ports: ServicePorts) -> Self {
        let ServicePorts {
            login,
            profile,
            profile_command,
            feed,
            posts,
            fans,
            contest,
            contest_command,
            captions,
        } = ports;
        Self {
            login,
            profile,
            profile_command,
            feed,
            posts,
            fans,
            contest,
            contest_command,
            captions,
        }
    }
}
