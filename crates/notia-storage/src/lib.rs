//! Notia Storage Library
//!
//! This crate provides the object-storage abstraction and implementations for
//! Notia. It includes the Storage trait and implementations for S3 and the
//! local filesystem.
//!
//! # Storage key format
//!
//! Storage keys are owner-scoped. All backends use the same key layout for
//! consistency: `uploads/{owner_id}/{blob_name}`, where `blob_name` is the
//! trailing path segment of an upload's `file_url`.
//!
//! Keys must not contain `..` or a leading `/`. Key generation is centralized
//! in the `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{blob_name_from_url, generate_storage_key};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use notia_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
