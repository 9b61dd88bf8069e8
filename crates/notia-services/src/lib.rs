//! Notia Services Layer
//!
//! This crate is the **business service layer**: it hosts the upload
//! aggregator, the folder membership resolver, and the upload lifecycle
//! (deletion) coordinator, and re-exports the storage facade so that
//! presentation code depends on a single service surface. Keep business logic
//! and coordination here; screens stay thin.

pub mod aggregate;
pub mod folders;
pub mod lifecycle;
pub mod test_helpers;

pub use aggregate::UploadAggregator;
pub use folders::FolderService;
pub use lifecycle::UploadLifecycleService;
pub use notia_storage::{
    create_storage, Storage, StorageBackend, StorageError, StorageResult,
};
