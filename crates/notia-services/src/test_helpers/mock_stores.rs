//! Mock record-store implementation for testing
//!
//! Implements both store traits over in-memory maps, allowing service tests
//! without database dependencies. Cascading deletion mirrors the repository's
//! compensating sequence: removing an upload removes its artifacts and folder
//! associations.

use async_trait::async_trait;
use chrono::Utc;
use notia_core::models::{
    DocumentText, Folder, KeyPoint, Summary, Transcription, Upload, UploadFolder,
};
use notia_core::AppError;
use notia_db::{FolderStore, UploadStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Default)]
struct RecordState {
    uploads: HashMap<(Uuid, Uuid), Upload>,
    transcriptions: Vec<Transcription>,
    document_texts: Vec<DocumentText>,
    summaries: Vec<Summary>,
    key_points: Vec<KeyPoint>,
    folders: HashMap<(Uuid, Uuid), Folder>,
    associations: Vec<UploadFolder>,
}

/// Mock record store for testing without a database
#[derive(Clone, Default)]
pub struct MockRecordStore {
    state: Arc<Mutex<RecordState>>,
    fail_delete_upload: Arc<AtomicBool>,
    assign_rejects_duplicates: Arc<AtomicBool>,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_upload(&self, upload: Upload) {
        self.state
            .lock()
            .unwrap()
            .uploads
            .insert((upload.owner_id, upload.id), upload);
    }

    pub fn add_transcription(&self, transcription: Transcription) {
        self.state.lock().unwrap().transcriptions.push(transcription);
    }

    pub fn add_document_text(&self, document_text: DocumentText) {
        self.state.lock().unwrap().document_texts.push(document_text);
    }

    pub fn add_summary(&self, summary: Summary) {
        self.state.lock().unwrap().summaries.push(summary);
    }

    pub fn add_key_point(&self, key_point: KeyPoint) {
        self.state.lock().unwrap().key_points.push(key_point);
    }

    pub fn add_folder(&self, folder: Folder) {
        self.state
            .lock()
            .unwrap()
            .folders
            .insert((folder.owner_id, folder.id), folder);
    }

    /// Make the next `delete_upload` calls fail, simulating a record-layer
    /// outage.
    pub fn set_fail_delete_upload(&self, fail: bool) {
        self.fail_delete_upload.store(fail, Ordering::SeqCst);
    }

    /// Surface duplicate assignments as `AssignmentConflict` instead of the
    /// default insert-if-absent behavior.
    pub fn set_assign_rejects_duplicates(&self, reject: bool) {
        self.assign_rejects_duplicates.store(reject, Ordering::SeqCst);
    }

    /// Number of association rows for an upload.
    pub fn association_count(&self, upload_id: Uuid) -> usize {
        self.state
            .lock()
            .unwrap()
            .associations
            .iter()
            .filter(|a| a.upload_id == upload_id)
            .count()
    }

    /// Number of artifact rows (of any type) for an upload.
    pub fn artifact_count(&self, upload_id: Uuid) -> usize {
        let state = self.state.lock().unwrap();
        state
            .transcriptions
            .iter()
            .filter(|t| t.upload_id == upload_id)
            .count()
            + state
                .document_texts
                .iter()
                .filter(|d| d.upload_id == upload_id)
                .count()
            + state
                .summaries
                .iter()
                .filter(|s| s.upload_id == upload_id)
                .count()
            + state
                .key_points
                .iter()
                .filter(|k| k.upload_id == upload_id)
                .count()
    }
}

#[async_trait]
impl UploadStore for MockRecordStore {
    async fn get_upload(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Upload>, AppError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .uploads
            .get(&(owner_id, id))
            .cloned())
    }

    async fn list_uploads(&self, owner_id: Uuid) -> Result<Vec<Upload>, AppError> {
        let state = self.state.lock().unwrap();
        let mut uploads: Vec<Upload> = state
            .uploads
            .values()
            .filter(|u| u.owner_id == owner_id)
            .cloned()
            .collect();
        uploads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(uploads)
    }

    async fn transcriptions_for(
        &self,
        owner_id: Uuid,
        upload_ids: &[Uuid],
    ) -> Result<Vec<Transcription>, AppError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .transcriptions
            .iter()
            .filter(|t| t.owner_id == owner_id && upload_ids.contains(&t.upload_id))
            .cloned()
            .collect())
    }

    async fn document_texts_for(
        &self,
        owner_id: Uuid,
        upload_ids: &[Uuid],
    ) -> Result<Vec<DocumentText>, AppError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .document_texts
            .iter()
            .filter(|d| d.owner_id == owner_id && upload_ids.contains(&d.upload_id))
            .cloned()
            .collect())
    }

    async fn summaries_for(
        &self,
        owner_id: Uuid,
        upload_ids: &[Uuid],
    ) -> Result<Vec<Summary>, AppError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .summaries
            .iter()
            .filter(|s| s.owner_id == owner_id && upload_ids.contains(&s.upload_id))
            .cloned()
            .collect())
    }

    async fn key_points_for(
        &self,
        owner_id: Uuid,
        upload_ids: &[Uuid],
    ) -> Result<Vec<KeyPoint>, AppError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .key_points
            .iter()
            .filter(|k| k.owner_id == owner_id && upload_ids.contains(&k.upload_id))
            .cloned()
            .collect())
    }

    async fn delete_upload(&self, owner_id: Uuid, id: Uuid) -> Result<u64, AppError> {
        if self.fail_delete_upload.load(Ordering::SeqCst) {
            return Err(AppError::Internal(
                "simulated record deletion failure".to_string(),
            ));
        }

        let mut state = self.state.lock().unwrap();
        if state.uploads.remove(&(owner_id, id)).is_none() {
            return Ok(0);
        }

        state.transcriptions.retain(|t| t.upload_id != id);
        state.document_texts.retain(|d| d.upload_id != id);
        state.summaries.retain(|s| s.upload_id != id);
        state.key_points.retain(|k| k.upload_id != id);
        state.associations.retain(|a| a.upload_id != id);

        Ok(1)
    }
}

#[async_trait]
impl FolderStore for MockRecordStore {
    async fn create_folder(
        &self,
        owner_id: Uuid,
        name: String,
        description: Option<String>,
        color: String,
    ) -> Result<Folder, AppError> {
        let now = Utc::now();
        let folder = Folder {
            id: Uuid::new_v4(),
            owner_id,
            name,
            description,
            color,
            created_at: now,
            updated_at: now,
        };
        self.add_folder(folder.clone());
        Ok(folder)
    }

    async fn get_folder(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Folder>, AppError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .folders
            .get(&(owner_id, id))
            .cloned())
    }

    async fn list_folders(&self, owner_id: Uuid) -> Result<Vec<Folder>, AppError> {
        let state = self.state.lock().unwrap();
        let mut folders: Vec<Folder> = state
            .folders
            .values()
            .filter(|f| f.owner_id == owner_id)
            .cloned()
            .collect();
        folders.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(folders)
    }

    async fn delete_folder(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut state = self.state.lock().unwrap();
        if state.folders.remove(&(owner_id, id)).is_none() {
            return Ok(false);
        }
        state.associations.retain(|a| a.folder_id != id);
        Ok(true)
    }

    async fn assign(
        &self,
        owner_id: Uuid,
        upload_id: Uuid,
        folder_id: Uuid,
    ) -> Result<bool, AppError> {
        let mut state = self.state.lock().unwrap();

        if !state.uploads.contains_key(&(owner_id, upload_id)) {
            return Err(AppError::NotFound("Upload not found".to_string()));
        }
        if !state.folders.contains_key(&(owner_id, folder_id)) {
            return Err(AppError::NotFound("Folder not found".to_string()));
        }

        let duplicate = state
            .associations
            .iter()
            .any(|a| a.upload_id == upload_id && a.folder_id == folder_id);
        if duplicate {
            if self.assign_rejects_duplicates.load(Ordering::SeqCst) {
                return Err(AppError::AssignmentConflict(format!(
                    "upload {} already assigned to folder {}",
                    upload_id, folder_id
                )));
            }
            return Ok(false);
        }

        state.associations.push(UploadFolder {
            id: Uuid::new_v4(),
            upload_id,
            folder_id,
            created_at: Utc::now(),
        });

        Ok(true)
    }

    async fn associations_for(
        &self,
        owner_id: Uuid,
        upload_ids: &[Uuid],
    ) -> Result<Vec<UploadFolder>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .associations
            .iter()
            .filter(|a| {
                upload_ids.contains(&a.upload_id)
                    && state.uploads.contains_key(&(owner_id, a.upload_id))
            })
            .cloned()
            .collect())
    }

    async fn count_uploads_in_folder(
        &self,
        owner_id: Uuid,
        folder_id: Uuid,
    ) -> Result<i64, AppError> {
        let state = self.state.lock().unwrap();
        if !state.folders.contains_key(&(owner_id, folder_id)) {
            return Ok(0);
        }
        Ok(state
            .associations
            .iter()
            .filter(|a| a.folder_id == folder_id)
            .count() as i64)
    }
}
