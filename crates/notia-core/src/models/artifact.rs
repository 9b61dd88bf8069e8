//! Derived artifacts written asynchronously by the enrichment pipeline.
//!
//! This core only reads these records; inserting them is the pipeline's job.
//! Artifact queries order by `created_at` ascending so "first record wins"
//! selection is deterministic insertion order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Transcription of an audio upload, with optional timestamp and
/// speaker-diarization side data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Transcription {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub upload_id: Uuid,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diarization: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}

/// Extracted text of a document upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct DocumentText {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub upload_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Summary of an upload. At most one is meaningfully consumed even if
/// more rows exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Summary {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub upload_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A ranked key point. `importance_level` is constrained to [1,5].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct KeyPoint {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub upload_id: Uuid,
    pub text: String,
    pub importance_level: i32,
    pub created_at: DateTime<Utc>,
}
