//! Outbound adapters implementing driven ports.
//!
//! - **memory**: the in-memory data service standing in for a database
//! - **caption**: template-based caption generator
//! - **local_store**: client-side key/value storage (memory or directory)
//!
//! Adapters translate between domain types and their storage shape. They
//! contain no business rules.

pub mod caption;
pub mod local_store;
pub mod memory;
