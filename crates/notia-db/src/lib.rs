//! Notia database layer
//!
//! Repositories over PostgreSQL plus the store traits they implement. Services
//! depend on the traits (`UploadStore`, `FolderStore`); production wiring
//! injects the sqlx-backed repositories, tests inject in-memory mocks.

pub mod db;

pub use db::traits::{FolderStore, UploadStore};
pub use db::{FolderRepository, UploadRepository};
