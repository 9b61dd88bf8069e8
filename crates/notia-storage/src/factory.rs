#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use notia_core::ServiceConfig;
use std::sync::Arc;

/// Create a storage backend based on configuration
pub async fn create_storage(config: &ServiceConfig) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let bucket = config
                .s3_bucket
                .clone()
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;
            let region = config
                .s3_region
                .clone()
                .ok_or_else(|| StorageError::ConfigError("S3_REGION not configured".to_string()))?;
            let endpoint = config.s3_endpoint.clone();

            let storage = S3Storage::new(bucket, region, endpoint).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config.local_storage_path.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let base_url = config.local_storage_base_url.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_BASE_URL not configured".to_string())
            })?;

            let storage = LocalStorage::new(base_path, base_url).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use notia_core::config::BaseConfig;

    fn local_config(path: String) -> ServiceConfig {
        ServiceConfig {
            base: BaseConfig {
                environment: "test".to_string(),
                db_max_connections: 5,
                db_timeout_seconds: 5,
            },
            database_url: "postgres://localhost/notia".to_string(),
            storage_backend: StorageBackend::Local,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            local_storage_path: Some(path),
            local_storage_base_url: Some("http://localhost:3000/uploads".to_string()),
            max_audio_size_bytes: 1024,
            max_document_size_bytes: 1024,
            audio_allowed_extensions: vec!["m4a".to_string()],
            document_allowed_extensions: vec!["pdf".to_string()],
        }
    }

    #[tokio::test]
    async fn builds_local_backend_from_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = local_config(dir.path().to_string_lossy().into_owned());

        let storage = create_storage(&config).await.expect("create storage");
        assert_eq!(storage.backend_type(), StorageBackend::Local);
    }

    #[tokio::test]
    async fn missing_local_path_is_a_config_error() {
        let mut config = local_config("/tmp/unused".to_string());
        config.local_storage_path = None;

        let err = match create_storage(&config).await {
            Ok(_) => panic!("expected config error"),
            Err(e) => e,
        };
        assert!(matches!(err, StorageError::ConfigError(_)));
    }
}
