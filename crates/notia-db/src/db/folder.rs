use async_trait::async_trait;
use notia_core::models::{Folder, UploadFolder};
use notia_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use super::traits::FolderStore;

/// Repository for managing folders and upload-folder associations
#[derive(Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderStore for FolderRepository {
    /// Create a new folder
    #[tracing::instrument(skip(self), fields(db.table = "folders", db.operation = "insert"))]
    async fn create_folder(
        &self,
        owner_id: Uuid,
        name: String,
        description: Option<String>,
        color: String,
    ) -> Result<Folder, AppError> {
        let folder = sqlx::query_as::<Postgres, Folder>(
            r#"
            INSERT INTO folders (owner_id, name, description, color)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_id, name, description, color, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(&name)
        .bind(&description)
        .bind(&color)
        .fetch_one(&self.pool)
        .await?;

        Ok(folder)
    }

    /// Get folder by ID (owner-scoped)
    #[tracing::instrument(skip(self), fields(db.table = "folders", db.operation = "select", db.record_id = %id))]
    async fn get_folder(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Folder>, AppError> {
        let folder = sqlx::query_as::<Postgres, Folder>(
            r#"
            SELECT id, owner_id, name, description, color, created_at, updated_at
            FROM folders
            WHERE owner_id = $1 AND id = $2
            "#,
        )
        .bind(owner_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(folder)
    }

    /// List folders for an owner
    #[tracing::instrument(skip(self), fields(db.table = "folders", db.operation = "select"))]
    async fn list_folders(&self, owner_id: Uuid) -> Result<Vec<Folder>, AppError> {
        let folders = sqlx::query_as::<Postgres, Folder>(
            r#"
            SELECT id, owner_id, name, description, color, created_at, updated_at
            FROM folders
            WHERE owner_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(folders)
    }

    /// Delete a folder; its associations go with it, the uploads stay.
    #[tracing::instrument(skip(self), fields(db.table = "folders", db.operation = "delete", db.record_id = %id))]
    async fn delete_folder(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM upload_folders uf
            USING folders f
            WHERE uf.folder_id = f.id AND f.owner_id = $1 AND f.id = $2
            "#,
        )
        .bind(owner_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let rows_affected = sqlx::query("DELETE FROM folders WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(rows_affected > 0)
    }

    /// Associate an upload with a folder
    ///
    /// Duplicate pairs are absorbed by `ON CONFLICT DO NOTHING`, so repeating
    /// an assignment is not an error. Returns whether a new row was inserted.
    #[tracing::instrument(skip(self), fields(db.table = "upload_folders", db.operation = "insert"))]
    async fn assign(
        &self,
        owner_id: Uuid,
        upload_id: Uuid,
        folder_id: Uuid,
    ) -> Result<bool, AppError> {
        // Validate both endpoints exist and belong to the owner
        let upload_exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM uploads WHERE owner_id = $1 AND id = $2)",
        )
        .bind(owner_id)
        .bind(upload_id)
        .fetch_one(&self.pool)
        .await?;

        if !upload_exists {
            return Err(AppError::NotFound("Upload not found".to_string()));
        }

        let folder_exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM folders WHERE owner_id = $1 AND id = $2)",
        )
        .bind(owner_id)
        .bind(folder_id)
        .fetch_one(&self.pool)
        .await?;

        if !folder_exists {
            return Err(AppError::NotFound("Folder not found".to_string()));
        }

        let rows_affected = sqlx::query(
            r#"
            INSERT INTO upload_folders (upload_id, folder_id)
            VALUES ($1, $2)
            ON CONFLICT (upload_id, folder_id) DO NOTHING
            "#,
        )
        .bind(upload_id)
        .bind(folder_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows_affected > 0)
    }

    /// Fetch associations for a set of upload ids
    #[tracing::instrument(skip(self, upload_ids), fields(db.table = "upload_folders", db.operation = "select"))]
    async fn associations_for(
        &self,
        owner_id: Uuid,
        upload_ids: &[Uuid],
    ) -> Result<Vec<UploadFolder>, AppError> {
        let rows = sqlx::query_as::<Postgres, UploadFolder>(
            r#"
            SELECT uf.id, uf.upload_id, uf.folder_id, uf.created_at
            FROM upload_folders uf
            JOIN uploads u ON u.id = uf.upload_id
            WHERE u.owner_id = $1 AND uf.upload_id = ANY($2)
            "#,
        )
        .bind(owner_id)
        .bind(upload_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Count uploads assigned to a folder
    #[tracing::instrument(skip(self), fields(db.table = "upload_folders", db.operation = "select"))]
    async fn count_uploads_in_folder(
        &self,
        owner_id: Uuid,
        folder_id: Uuid,
    ) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM upload_folders uf
            JOIN folders f ON f.id = uf.folder_id
            WHERE f.owner_id = $1 AND uf.folder_id = $2
            "#,
        )
        .bind(owner_id)
        .bind(folder_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
