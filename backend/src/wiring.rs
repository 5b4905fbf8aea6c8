//! Composition root: driven adapters in, driving ports out.
//!
//! Both the HTTP adapter and the in-process client consume the same
//! [`ServicePorts`] bundle, so they always see one set of services over one
//! store.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    CaptionCommand, ContestCommand, ContestQuery, FanCommand, FeedQuery, LoginService,
    PostCommand, UserProfileCommand, UserProfileQuery,
};
use crate::domain::{AccountService, CaptionService, ContestService, FanService, FeedService};
use crate::outbound::caption::TemplateCaptionGenerator;
use crate::outbound::memory::{
    MemoryContestRepository, MemoryPostRepository, MemoryStore, MemoryUserRepository,
    MemoryVoteRepository,
};

/// Every driving port the application exposes.
#[derive(Clone)]
pub struct ServicePorts {
    /// Username login and first-login account creation.
    pub login: Arc<dyn LoginService>,
    /// Profile lookups.
    pub profile: Arc<dyn UserProfileQuery>,
    /// Settings saves.
    pub profile_command: Arc<dyn UserProfileCommand>,
    /// Feed and per-artist post listings.
    pub feed: Arc<dyn FeedQuery>,
    /// Publishing posts and comments.
    pub posts: Arc<dyn PostCommand>,
    /// Fan toggles.
    pub fans: Arc<dyn FanCommand>,
    /// Contest entries and the caller's votes.
    pub contest: Arc<dyn ContestQuery>,
    /// Contest submissions and votes.
    pub contest_command: Arc<dyn ContestCommand>,
    /// Caption suggestions.
    pub captions: Arc<dyn CaptionCommand>,
}

impl ServicePorts {
    /// Wire the domain services over a shared in-memory store.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use faceexpo::outbound::memory::MemoryStore;
    /// use faceexpo::wiring::ServicePorts;
    /// use mockable::DefaultClock;
    ///
    /// let ports = ServicePorts::in_memory(Arc::new(MemoryStore::new()), Arc::new(DefaultClock));
    /// let _feed = ports.feed.clone();
    /// ```
    pub fn in_memory(store: Arc<MemoryStore>, clock: Arc<dyn Clock>) -> Self {
        let users = Arc::new(MemoryUserRepository::new(store.clone()));
        let posts = Arc::new(MemoryPostRepository::new(store.clone()));
        let entries = Arc::new(MemoryContestRepository::new(store.clone()));
        let votes = Arc::new(MemoryVoteRepository::new(store));

        let accounts = Arc::new(AccountService::new(users.clone(), clock.clone()));
        let feed = Arc::new(FeedService::new(posts.clone(), users.clone(), clock));
        let contest = Arc::new(ContestService::new(entries, votes, users.clone()));

        Self {
            login: accounts.clone(),
            profile: accounts.clone(),
            profile_command: accounts,
            feed: feed.clone(),
            posts: feed,
            fans: Arc::new(FanService::new(users, posts)),
            contest: contest.clone(),
            contest_command: contest,
            captions: Arc::new(CaptionService::new(Arc::new(TemplateCaptionGenerator))),
        }
    }
}
