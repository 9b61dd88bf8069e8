//! Mock storage implementation for testing
//!
//! In-memory blob map with failure injection for the delete path, so deletion
//! coordinator tests can exercise the tolerate-storage-failure branch.

use async_trait::async_trait;
use notia_storage::{keys, Storage, StorageBackend, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Mock storage backend for testing without an object store
#[derive(Clone, Default)]
pub struct MockStorage {
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    deleted_keys: Arc<Mutex<Vec<String>>>,
    fail_delete: Arc<AtomicBool>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a blob under an already-generated key.
    pub fn put_blob(&self, key: &str, data: Vec<u8>) {
        self.blobs.lock().unwrap().insert(key.to_string(), data);
    }

    /// Make subsequent `delete` calls fail, simulating a storage outage.
    pub fn set_fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    /// Keys passed to successful `delete` calls, in order.
    pub fn deleted_keys(&self) -> Vec<String> {
        self.deleted_keys.lock().unwrap().clone()
    }

    pub fn blob_count(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn upload(
        &self,
        owner_id: Uuid,
        blob_name: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<(String, String)> {
        let key = keys::generate_storage_key(owner_id, blob_name);
        self.blobs.lock().unwrap().insert(key.clone(), data);
        let url = format!("mock://storage/{}", key);
        Ok((key, url))
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        self.blobs
            .lock()
            .unwrap()
            .get(storage_key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(StorageError::DeleteFailed(
                "simulated storage failure".to_string(),
            ));
        }
        self.blobs.lock().unwrap().remove(storage_key);
        self.deleted_keys
            .lock()
            .unwrap()
            .push(storage_key.to_string());
        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Ok(self.blobs.lock().unwrap().contains_key(storage_key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
