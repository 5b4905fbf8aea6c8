//! Port for client-local key/value persistence.
//!
//! Browser-style storage: string keys, string values, synchronous access.
//! Adapters live in [`crate::outbound::local_store`].

use crate::domain::ports::define_port_error;

define_port_error! {
    /// Errors raised by local storage adapters.
    pub enum LocalStoreError {
        /// The backing medium could not be read.
        Read { key: String, message: String } =>
            "failed to read local key {key}: {message}",
        /// The backing medium rejected a write.
        Write { key: String, message: String } =>
            "failed to write local key {key}: {message}",
    }
}

/// Synchronous key/value storage owned by one client.
#[cfg_attr(test, mockall::automock)]
pub trait LocalStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, LocalStoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), LocalStoreError>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), LocalStoreError>;
}
