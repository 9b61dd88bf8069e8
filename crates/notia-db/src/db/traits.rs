//! Store traits for owner-scoped record access.
//!
//! Every method takes the owner id first and filters by it; a row that exists
//! under another owner is indistinguishable from a missing row. Artifact
//! fetches order by `created_at` ascending so "first record wins" selection is
//! deterministic insertion order.

use async_trait::async_trait;
use notia_core::models::{
    DocumentText, Folder, KeyPoint, Summary, Transcription, Upload, UploadFolder,
};
use notia_core::AppError;
use uuid::Uuid;

/// Owner-scoped access to uploads and their derived artifacts.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Fetch one upload by id; `None` when absent or owned by someone else.
    async fn get_upload(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Upload>, AppError>;

    /// All uploads for the owner, newest-created first.
    async fn list_uploads(&self, owner_id: Uuid) -> Result<Vec<Upload>, AppError>;

    async fn transcriptions_for(
        &self,
        owner_id: Uuid,
        upload_ids: &[Uuid],
    ) -> Result<Vec<Transcription>, AppError>;

    async fn document_texts_for(
        &self,
        owner_id: Uuid,
        upload_ids: &[Uuid],
    ) -> Result<Vec<DocumentText>, AppError>;

    async fn summaries_for(
        &self,
        owner_id: Uuid,
        upload_ids: &[Uuid],
    ) -> Result<Vec<Summary>, AppError>;

    async fn key_points_for(
        &self,
        owner_id: Uuid,
        upload_ids: &[Uuid],
    ) -> Result<Vec<KeyPoint>, AppError>;

    /// Delete the upload and every dependent record (artifacts, folder
    /// associations) in one atomic store operation. Ownership is enforced by
    /// the deletion predicate itself, not a separate pre-check. Returns the
    /// number of upload rows removed (0 = absent or not owned).
    async fn delete_upload(&self, owner_id: Uuid, id: Uuid) -> Result<u64, AppError>;
}

/// Owner-scoped access to folders and upload-folder associations.
#[async_trait]
pub trait FolderStore: Send + Sync {
    async fn create_folder(
        &self,
        owner_id: Uuid,
        name: String,
        description: Option<String>,
        color: String,
    ) -> Result<Folder, AppError>;

    async fn get_folder(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Folder>, AppError>;

    async fn list_folders(&self, owner_id: Uuid) -> Result<Vec<Folder>, AppError>;

    /// Delete a folder. Associations pointing at it are removed; the uploads
    /// themselves survive (and may become unorganized again).
    async fn delete_folder(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError>;

    /// Associate an upload with a folder. Returns `Ok(true)` when a new
    /// association was inserted and `Ok(false)` when the pair already existed.
    /// Implementations over stores that reject duplicates outright map the
    /// uniqueness violation to `AppError::AssignmentConflict` instead.
    async fn assign(
        &self,
        owner_id: Uuid,
        upload_id: Uuid,
        folder_id: Uuid,
    ) -> Result<bool, AppError>;

    /// All associations whose `upload_id` is in the given set (owner-scoped
    /// through the uploads they reference).
    async fn associations_for(
        &self,
        owner_id: Uuid,
        upload_ids: &[Uuid],
    ) -> Result<Vec<UploadFolder>, AppError>;

    /// Count uploads assigned to a folder.
    async fn count_uploads_in_folder(
        &self,
        owner_id: Uuid,
        folder_id: Uuid,
    ) -> Result<i64, AppError>;
}
