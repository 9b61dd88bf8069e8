//! Folder membership: the unorganized-uploads computation, assignment, and
//! folder CRUD.

use notia_core::models::{CreateFolderRequest, Folder, FolderResponse, Upload, UploadView};
use notia_core::validation::validate_folder_color;
use notia_core::AppError;
use notia_db::{FolderStore, UploadStore};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::aggregate::assemble_view;

/// Service for folder membership and organization.
///
/// The unorganized view is always re-derived from the store; no client-side
/// cache is trusted as source of truth, so a fresh call after a mutation
/// reflects the latest committed state.
#[derive(Clone)]
pub struct FolderService {
    uploads: Arc<dyn UploadStore>,
    folders: Arc<dyn FolderStore>,
}

impl FolderService {
    pub fn new(uploads: Arc<dyn UploadStore>, folders: Arc<dyn FolderStore>) -> Self {
        Self { uploads, folders }
    }

    /// Uploads with zero folder associations, newest-created first.
    ///
    /// Set-difference over two fetches: an upload with three associations and
    /// one with a single association are both organized and excluded
    /// identically.
    #[tracing::instrument(skip(self), fields(operation = "list_unorganized"))]
    pub async fn list_unorganized(&self, owner_id: Uuid) -> Result<Vec<UploadView>, AppError> {
        let uploads = self.uploads.list_uploads(owner_id).await?;
        if uploads.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = uploads.iter().map(|u| u.id).collect();

        let transcriptions = self.uploads.transcriptions_for(owner_id, &ids).await?;
        let document_texts = self.uploads.document_texts_for(owner_id, &ids).await?;
        let summaries = self.uploads.summaries_for(owner_id, &ids).await?;
        let key_points = self.uploads.key_points_for(owner_id, &ids).await?;

        let associations = self.folders.associations_for(owner_id, &ids).await?;
        let organized: HashSet<Uuid> = associations.iter().map(|a| a.upload_id).collect();

        let views = uploads
            .into_iter()
            .filter(|u| !organized.contains(&u.id))
            .map(|u: Upload| {
                assemble_view(u, &transcriptions, &document_texts, &summaries, &key_points)
            })
            .collect();

        Ok(views)
    }

    /// Assign an upload to a folder.
    ///
    /// Assignment is idempotent: repeating it for the same pair succeeds
    /// without inserting a second association. A store that reports the
    /// duplicate as a conflict is treated as already-satisfied.
    #[tracing::instrument(skip(self), fields(upload_id = %upload_id, folder_id = %folder_id, operation = "assign"))]
    pub async fn assign_to_folder(
        &self,
        owner_id: Uuid,
        upload_id: Uuid,
        folder_id: Uuid,
    ) -> Result<(), AppError> {
        match self.folders.assign(owner_id, upload_id, folder_id).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                tracing::debug!(
                    upload_id = %upload_id,
                    folder_id = %folder_id,
                    "Upload already assigned to folder"
                );
                Ok(())
            }
            Err(AppError::AssignmentConflict(_)) => {
                tracing::debug!(
                    upload_id = %upload_id,
                    folder_id = %folder_id,
                    "Assignment conflict treated as already satisfied"
                );
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Create a folder after validating the request.
    #[tracing::instrument(skip(self, request), fields(operation = "create_folder"))]
    pub async fn create_folder(
        &self,
        owner_id: Uuid,
        request: CreateFolderRequest,
    ) -> Result<Folder, AppError> {
        request.validate()?;
        validate_folder_color(&request.color)?;

        self.folders
            .create_folder(owner_id, request.name, request.description, request.color)
            .await
    }

    /// List the owner's folders with their upload counts.
    #[tracing::instrument(skip(self), fields(operation = "list_folders"))]
    pub async fn list_folders(&self, owner_id: Uuid) -> Result<Vec<FolderResponse>, AppError> {
        let folders = self.folders.list_folders(owner_id).await?;

        let mut responses = Vec::with_capacity(folders.len());
        for folder in folders {
            let count = self
                .folders
                .count_uploads_in_folder(owner_id, folder.id)
                .await?;
            responses.push(folder.to_response_with_count(Some(count)));
        }

        Ok(responses)
    }

    pub async fn get_folder(&self, owner_id: Uuid, id: Uuid) -> Result<Folder, AppError> {
        self.folders
            .get_folder(owner_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Folder not found".to_string()))
    }

    /// Delete a folder. Its associations are removed with it; the uploads
    /// themselves survive and may become unorganized again.
    #[tracing::instrument(skip(self), fields(folder_id = %id, operation = "delete_folder"))]
    pub async fn delete_folder(&self, owner_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let deleted = self.folders.delete_folder(owner_id, id).await?;
        if !deleted {
            return Err(AppError::NotFound("Folder not found".to_string()));
        }
        Ok(())
    }
}
