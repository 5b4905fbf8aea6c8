//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Error, User, UserId, UserProfileUpdate, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the username.
        Duplicate { username: String } => "username already taken: {username}",
        /// Update targeted a user that does not exist.
        Missing { id: String } => "user not found: {id}",
        /// Stored values rejected the update.
        Rejected { message: String } => "user update rejected: {message}",
    }
}

impl From<UserRepositoryError> for Error {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserRepositoryError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserRepositoryError::Duplicate { username } => {
                Error::conflict(format!("username already taken: {username}"))
            }
            UserRepositoryError::Missing { id } => {
                Error::not_found(format!("user not found: {id}"))
            }
            UserRepositoryError::Rejected { message } => Error::invalid_request(message),
        }
    }
}

/// Storage for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user whose username matches case-insensitively.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Insert a new user.
    ///
    /// Fails with [`UserRepositoryError::Duplicate`] when the username is
    /// already taken (case-insensitively).
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Apply settings changes to one user and return the stored record.
    ///
    /// Only the username, avatar and bio change, in a single write, so
    /// counts and fanned artists written concurrently survive. Fails with
    /// [`UserRepositoryError::Missing`] for unknown ids and
    /// [`UserRepositoryError::Duplicate`] when a rename collides.
    async fn update_profile(
        &self,
        id: &UserId,
        update: UserProfileUpdate,
    ) -> Result<User, UserRepositoryError>;

    /// Set whether `viewer_id` fans `artist_id`, adjusting the viewer's
    /// following count and the artist's fan count in a single write.
    ///
    /// Setting the state the viewer is already in changes nothing. Returns
    /// the artist's stored fan count.
    async fn set_fan(
        &self,
        viewer_id: &UserId,
        artist_id: &UserId,
        fanned: bool,
    ) -> Result<u64, UserRepositoryError>;
}
