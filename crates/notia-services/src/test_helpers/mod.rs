//! Test helpers for service unit tests
//!
//! This module provides in-memory mock implementations of the store traits
//! and the storage backend for isolated testing without a database or object
//! store.

pub mod mock_storage;
pub mod mock_stores;

pub use mock_storage::MockStorage;
pub use mock_stores::MockRecordStore;
