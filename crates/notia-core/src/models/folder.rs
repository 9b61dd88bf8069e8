use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Folder model for organizing uploads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Folder {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Association between an upload and a folder.
///
/// An upload with zero associations is "unorganized"; one with any number of
/// associations (one or many) is organized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct UploadFolder {
    pub id: Uuid,
    pub upload_id: Uuid,
    pub folder_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for creating a new folder
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFolderRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Folder name must be between 1 and 255 characters"
    ))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 1024, message = "Folder description is too long"))]
    pub description: Option<String>,
    pub color: String,
}

/// Folder response with the number of uploads assigned to it
#[derive(Debug, Serialize)]
pub struct FolderResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub upload_count: Option<i64>,
}

impl From<Folder> for FolderResponse {
    fn from(folder: Folder) -> Self {
        FolderResponse {
            id: folder.id,
            name: folder.name,
            description: folder.description,
            color: folder.color,
            created_at: folder.created_at,
            updated_at: folder.updated_at,
            upload_count: None,
        }
    }
}

impl Folder {
    /// Create a folder response with the assigned-upload count
    pub fn to_response_with_count(self, upload_count: Option<i64>) -> FolderResponse {
        FolderResponse {
            id: self.id,
            name: self.name,
            description: self.description,
            color: self.color,
            created_at: self.created_at,
            updated_at: self.updated_at,
            upload_count,
        }
    }
}
