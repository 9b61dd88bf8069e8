//! Database repositories for the data access layer
//!
//! This module contains all repository implementations for database
//! operations. Each repository is responsible for a specific domain entity and
//! provides owner-scoped queries.
//
// Store traits implemented by repositories and test mocks
pub mod traits;
//
// Upload + derived-artifact repository
pub mod upload;
//
// Folder + association repository
pub mod folder;

pub use folder::FolderRepository;
pub use upload::UploadRepository;
