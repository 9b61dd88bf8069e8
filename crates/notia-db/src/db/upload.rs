use async_trait::async_trait;
use notia_core::models::{DocumentText, KeyPoint, Summary, Transcription, Upload};
use notia_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use super::traits::UploadStore;

/// Repository for uploads and their derived artifacts
///
/// Artifact rows (transcriptions, document texts, summaries, key points) are
/// written by the out-of-process enrichment pipeline; this repository only
/// reads them, and removes them together with their upload.
#[derive(Clone)]
pub struct UploadRepository {
    pool: PgPool,
}

impl UploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UploadStore for UploadRepository {
    /// Get upload by ID (owner-scoped)
    #[tracing::instrument(skip(self), fields(db.table = "uploads", db.operation = "select", db.record_id = %id))]
    async fn get_upload(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Upload>, AppError> {
        let upload = sqlx::query_as::<Postgres, Upload>(
            r#"
            SELECT id, owner_id, file_name, file_type, file_size, status, created_at,
                   duration, generated_name, file_url
            FROM uploads
            WHERE owner_id = $1 AND id = $2
            "#,
        )
        .bind(owner_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(upload)
    }

    /// List all uploads for an owner, newest-created first
    #[tracing::instrument(skip(self), fields(db.table = "uploads", db.operation = "select"))]
    async fn list_uploads(&self, owner_id: Uuid) -> Result<Vec<Upload>, AppError> {
        let uploads = sqlx::query_as::<Postgres, Upload>(
            r#"
            SELECT id, owner_id, file_name, file_type, file_size, status, created_at,
                   duration, generated_name, file_url
            FROM uploads
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(uploads)
    }

    #[tracing::instrument(skip(self, upload_ids), fields(db.table = "transcriptions", db.operation = "select"))]
    async fn transcriptions_for(
        &self,
        owner_id: Uuid,
        upload_ids: &[Uuid],
    ) -> Result<Vec<Transcription>, AppError> {
        let rows = sqlx::query_as::<Postgres, Transcription>(
            r#"
            SELECT id, owner_id, upload_id, text, timestamps, diarization, created_at
            FROM transcriptions
            WHERE owner_id = $1 AND upload_id = ANY($2)
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner_id)
        .bind(upload_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(skip(self, upload_ids), fields(db.table = "document_texts", db.operation = "select"))]
    async fn document_texts_for(
        &self,
        owner_id: Uuid,
        upload_ids: &[Uuid],
    ) -> Result<Vec<DocumentText>, AppError> {
        let rows = sqlx::query_as::<Postgres, DocumentText>(
            r#"
            SELECT id, owner_id, upload_id, text, created_at
            FROM document_texts
            WHERE owner_id = $1 AND upload_id = ANY($2)
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner_id)
        .bind(upload_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(skip(self, upload_ids), fields(db.table = "summaries", db.operation = "select"))]
    async fn summaries_for(
        &self,
        owner_id: Uuid,
        upload_ids: &[Uuid],
    ) -> Result<Vec<Summary>, AppError> {
        let rows = sqlx::query_as::<Postgres, Summary>(
            r#"
            SELECT id, owner_id, upload_id, text, created_at
            FROM summaries
            WHERE owner_id = $1 AND upload_id = ANY($2)
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner_id)
        .bind(upload_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[tracing::instrument(skip(self, upload_ids), fields(db.table = "key_points", db.operation = "select"))]
    async fn key_points_for(
        &self,
        owner_id: Uuid,
        upload_ids: &[Uuid],
    ) -> Result<Vec<KeyPoint>, AppError> {
        let rows = sqlx::query_as::<Postgres, KeyPoint>(
            r#"
            SELECT id, owner_id, upload_id, text, importance_level, created_at
            FROM key_points
            WHERE owner_id = $1 AND upload_id = ANY($2)
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner_id)
        .bind(upload_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Delete an upload and its dependent records in one transaction.
    ///
    /// Dependent deletes are explicit rather than relying on schema-level
    /// cascade configuration. Ownership is enforced by each predicate; there
    /// is no check-then-delete window.
    #[tracing::instrument(skip(self), fields(db.table = "uploads", db.operation = "delete", db.record_id = %id))]
    async fn delete_upload(&self, owner_id: Uuid, id: Uuid) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM transcriptions WHERE owner_id = $1 AND upload_id = $2")
            .bind(owner_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM document_texts WHERE owner_id = $1 AND upload_id = $2")
            .bind(owner_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM summaries WHERE owner_id = $1 AND upload_id = $2")
            .bind(owner_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM key_points WHERE owner_id = $1 AND upload_id = $2")
            .bind(owner_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        // Associations carry no owner column; scope through the upload row.
        sqlx::query(
            r#"
            DELETE FROM upload_folders uf
            USING uploads u
            WHERE uf.upload_id = u.id AND u.owner_id = $1 AND u.id = $2
            "#,
        )
        .bind(owner_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let rows_affected = sqlx::query("DELETE FROM uploads WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(rows_affected)
    }
}
