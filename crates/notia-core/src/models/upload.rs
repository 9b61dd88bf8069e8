use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

use super::artifact::KeyPoint;

/// Upload kind enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "file_type", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Audio,
    Document,
}

/// Enrichment status written by the out-of-process pipeline.
/// This core only ever reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "upload_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Uploaded,
    Processing,
    Completed,
    Error,
}

/// A user-submitted audio or document file plus its processing status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Upload {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub file_name: String,
    pub file_type: FileType,
    pub file_size: i64,
    pub status: UploadStatus,
    pub created_at: DateTime<Utc>,
    /// Duration in seconds; audio only.
    pub duration: Option<f64>,
    pub generated_name: Option<String>,
    /// Opaque locator; its trailing path segment is the object-store blob name.
    pub file_url: String,
}

impl Upload {
    /// Blob name inside the owner's storage namespace: the trailing,
    /// non-empty path segment of `file_url`.
    pub fn blob_name(&self) -> &str {
        self.file_url
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or(self.file_url.as_str())
    }

    /// Owner-namespaced object-store key for this upload's blob.
    pub fn storage_key(&self) -> String {
        format!("uploads/{}/{}", self.owner_id, self.blob_name())
    }

    /// Display name: the generated name when the pipeline produced one,
    /// the original file name otherwise.
    pub fn display_name(&self) -> &str {
        self.generated_name.as_deref().unwrap_or(&self.file_name)
    }

    pub fn is_audio(&self) -> bool {
        self.file_type == FileType::Audio
    }
}

/// Primary content resolved for an upload. Absence of any artifact is an
/// explicit sentinel, never an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum PrimaryContent {
    /// First transcription record's text (audio uploads).
    Transcript(String),
    /// First document-text record's text (document uploads).
    ExtractedText(String),
    /// No artifact row exists yet for this upload.
    Missing,
}

impl PrimaryContent {
    pub fn text(&self) -> Option<&str> {
        match self {
            PrimaryContent::Transcript(text) | PrimaryContent::ExtractedText(text) => Some(text),
            PrimaryContent::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, PrimaryContent::Missing)
    }
}

/// Presentation-ready aggregate of an upload and its derived artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadView {
    pub upload: Upload,
    pub content: PrimaryContent,
    /// First summary record's text; `None` means no summary exists yet.
    pub summary: Option<String>,
    /// Sorted by `importance_level` descending; ties keep insertion order.
    pub key_points: Vec<KeyPoint>,
}

impl UploadView {
    pub fn id(&self) -> Uuid {
        self.upload.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn upload_with_url(url: &str) -> Upload {
        Upload {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            file_name: "standup.m4a".to_string(),
            file_type: FileType::Audio,
            file_size: 1024,
            status: UploadStatus::Completed,
            created_at: Utc::now(),
            duration: Some(61.5),
            generated_name: None,
            file_url: url.to_string(),
        }
    }

    #[test]
    fn blob_name_is_trailing_segment() {
        let upload = upload_with_url("https://blob.example.com/store/abc123.m4a");
        assert_eq!(upload.blob_name(), "abc123.m4a");
    }

    #[test]
    fn blob_name_ignores_trailing_slash() {
        let upload = upload_with_url("https://blob.example.com/store/abc123.m4a/");
        assert_eq!(upload.blob_name(), "abc123.m4a");
    }

    #[test]
    fn storage_key_is_owner_namespaced() {
        let upload = upload_with_url("https://blob.example.com/store/abc123.m4a");
        assert_eq!(
            upload.storage_key(),
            format!("uploads/{}/abc123.m4a", upload.owner_id)
        );
    }

    #[test]
    fn primary_content_distinguishes_missing_from_empty() {
        assert_eq!(PrimaryContent::Transcript(String::new()).text(), Some(""));
        assert!(PrimaryContent::Missing.text().is_none());
    }
}
