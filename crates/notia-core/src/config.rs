//! Configuration module
//!
//! This module provides configuration structures for library consumers,
//! including database, storage, and upload-validation settings.

use std::env;
use std::str::FromStr;

use crate::storage_types::StorageBackend;

// Common constants
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_AUDIO_SIZE_MB: usize = 200;
const MAX_DOCUMENT_SIZE_MB: usize = 50;

/// Base configuration shared by all consumers
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub environment: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
}

/// Library service configuration
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub base: BaseConfig,
    pub database_url: String,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Upload validation configuration
    pub max_audio_size_bytes: usize,
    pub max_document_size_bytes: usize,
    pub audio_allowed_extensions: Vec<String>,
    pub document_allowed_extensions: Vec<String>,
}

impl ServiceConfig {
    /// Read configuration from the environment. `.env` files are honored when
    /// present (ignored when absent).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let storage_backend = env::var("STORAGE_BACKEND")
            .ok()
            .map(|s| StorageBackend::from_str(&s))
            .transpose()?
            .unwrap_or(StorageBackend::Local);

        let max_audio_size_mb = env::var("MAX_AUDIO_SIZE_MB")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(MAX_AUDIO_SIZE_MB);

        let max_document_size_mb = env::var("MAX_DOCUMENT_SIZE_MB")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(MAX_DOCUMENT_SIZE_MB);

        let audio_allowed_extensions = env::var("AUDIO_ALLOWED_EXTENSIONS")
            .unwrap_or_else(|_| "mp3,m4a,wav,ogg,webm".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let document_allowed_extensions = env::var("DOCUMENT_ALLOWED_EXTENSIONS")
            .unwrap_or_else(|_| "pdf,txt,md,docx".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(ServiceConfig {
            base: BaseConfig {
                environment,
                db_max_connections: env::var("DB_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse::<u32>().ok())
                    .unwrap_or(MAX_CONNECTIONS),
                db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(CONNECTION_TIMEOUT_SECS),
            },
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            max_audio_size_bytes: max_audio_size_mb * 1024 * 1024,
            max_document_size_bytes: max_document_size_mb * 1024 * 1024,
            audio_allowed_extensions,
            document_allowed_extensions,
        })
    }

    /// Check if the configuration is for production
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Validate backend-specific settings before constructing clients.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    anyhow::bail!("S3_BUCKET must be set for the s3 storage backend");
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    anyhow::bail!("LOCAL_STORAGE_PATH must be set for the local storage backend");
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_requires_bucket_for_s3() {
        let config = ServiceConfig {
            base: BaseConfig {
                environment: "test".to_string(),
                db_max_connections: MAX_CONNECTIONS,
                db_timeout_seconds: CONNECTION_TIMEOUT_SECS,
            },
            database_url: "postgres://localhost/notia".to_string(),
            storage_backend: StorageBackend::S3,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            local_storage_path: None,
            local_storage_base_url: None,
            max_audio_size_bytes: 1,
            max_document_size_bytes: 1,
            audio_allowed_extensions: vec![],
            document_allowed_extensions: vec![],
        };
        assert!(config.validate().is_err());
    }
}
