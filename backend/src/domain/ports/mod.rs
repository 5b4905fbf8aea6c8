//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`CaptionGenerator`]) are implemented by
//! outbound adapters. Driving ports (`*Query`, `*Command`, [`LoginService`])
//! are implemented by domain services and called by inbound adapters and the
//! client layer.

mod macros;
pub(crate) use macros::define_port_error;

mod caption_command;
mod caption_generator;
mod contest_command;
mod contest_query;
mod contest_repository;
mod fan_command;
mod feed_query;
mod login_service;
mod post_command;
mod post_repository;
mod user_profile_command;
mod user_profile_query;
mod user_repository;
mod vote_repository;

#[cfg(test)]
pub use caption_command::MockCaptionCommand;
pub use caption_command::CaptionCommand;
#[cfg(test)]
pub use caption_generator::MockCaptionGenerator;
pub use caption_generator::{CaptionGenerator, CaptionGeneratorError};
#[cfg(test)]
pub use contest_command::MockContestCommand;
pub use contest_command::ContestCommand;
#[cfg(test)]
pub use contest_query::MockContestQuery;
pub use contest_query::ContestQuery;
#[cfg(test)]
pub use contest_repository::MockContestRepository;
pub use contest_repository::{ContestRepository, ContestRepositoryError};
#[cfg(test)]
pub use fan_command::MockFanCommand;
pub use fan_command::{FanCommand, FanToggleOutcome};
#[cfg(test)]
pub use feed_query::MockFeedQuery;
pub use feed_query::FeedQuery;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use post_command::MockPostCommand;
pub use post_command::PostCommand;
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostRepository, PostRepositoryError};
#[cfg(test)]
pub use user_profile_command::MockUserProfileCommand;
pub use user_profile_command::UserProfileCommand;
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use vote_repository::MockVoteRepository;
pub use vote_repository::{VoteRepository, VoteRepositoryError};
