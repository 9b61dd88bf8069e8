//! Upload lifecycle operations: deletion of the storage blob and the related
//! record set.
//!
//! Keeps screen logic thin and allows unit testing without a live backend.

use notia_core::AppError;
use notia_db::UploadStore;
use notia_storage::Storage;
use std::sync::Arc;
use uuid::Uuid;

/// Coordinates upload deletion across object storage and the record store.
///
/// Two phases, strictly ordered, not transactional across the pair:
/// blob removal first (failure tolerated), then the record set (failure
/// fatal). A stray blob is an acceptable residual cost; an undeletable
/// database row is not.
#[derive(Clone)]
pub struct UploadLifecycleService {
    uploads: Arc<dyn UploadStore>,
    storage: Arc<dyn Storage>,
}

impl UploadLifecycleService {
    pub fn new(uploads: Arc<dyn UploadStore>, storage: Arc<dyn Storage>) -> Self {
        Self { uploads, storage }
    }

    /// Delete an upload: its blob, its artifacts, and its associations.
    ///
    /// Ownership is enforced by the record store's deletion predicate; the
    /// initial fetch only derives the blob key. After success the upload and
    /// everything referencing it are unreachable by owner-scoped queries.
    #[tracing::instrument(skip(self), fields(upload_id = %upload_id, operation = "delete_upload"))]
    pub async fn delete_upload(&self, owner_id: Uuid, upload_id: Uuid) -> Result<(), AppError> {
        let upload = self
            .uploads
            .get_upload(owner_id, upload_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Upload not found".to_string()))?;

        // Phase 1: blob removal, owner-namespaced key derived from file_url.
        let storage_key = upload.storage_key();
        match self.storage.delete(&storage_key).await {
            Ok(_) => {
                tracing::debug!(storage_key = %storage_key, "Deleted blob from storage");
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    storage_key = %storage_key,
                    "Failed to delete blob from storage, continuing with record deletion"
                );
            }
        }

        // Phase 2: record set removal. Never starts before phase 1 resolves.
        let rows_affected = self
            .uploads
            .delete_upload(owner_id, upload_id)
            .await
            .map_err(|e| AppError::RecordDeletionFailed {
                message: format!("upload {}", upload_id),
                source: anyhow::Error::new(e),
            })?;

        if rows_affected == 0 {
            // The row vanished between the fetch and the delete.
            return Err(AppError::NotFound("Upload not found".to_string()));
        }

        tracing::info!(upload_id = %upload_id, "Upload deleted");

        Ok(())
    }
}
