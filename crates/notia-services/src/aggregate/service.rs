//! Upload aggregation: one upload plus its derived artifacts as a single
//! presentation-ready view.

use notia_core::models::{
    DocumentText, FileType, KeyPoint, PrimaryContent, Summary, Transcription, Upload, UploadView,
};
use notia_core::AppError;
use notia_db::UploadStore;
use std::sync::Arc;
use uuid::Uuid;

/// Service assembling `UploadView`s from the record store.
///
/// The view is a pure derivation: repeated calls with no intervening writes
/// return identical content, and nothing here mutates storage.
#[derive(Clone)]
pub struct UploadAggregator {
    uploads: Arc<dyn UploadStore>,
}

impl UploadAggregator {
    pub fn new(uploads: Arc<dyn UploadStore>) -> Self {
        Self { uploads }
    }

    /// Fetch an upload and all four artifact collections in one logical read.
    ///
    /// Returns `NotFound` when no row matches both id and owner; a row owned
    /// by someone else produces the same error as a missing id.
    #[tracing::instrument(skip(self), fields(upload_id = %upload_id, operation = "aggregate"))]
    pub async fn aggregate(
        &self,
        owner_id: Uuid,
        upload_id: Uuid,
    ) -> Result<UploadView, AppError> {
        let upload = self
            .uploads
            .get_upload(owner_id, upload_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Upload not found".to_string()))?;

        let ids = [upload_id];
        let transcriptions = self.uploads.transcriptions_for(owner_id, &ids).await?;
        let document_texts = self.uploads.document_texts_for(owner_id, &ids).await?;
        let summaries = self.uploads.summaries_for(owner_id, &ids).await?;
        let key_points = self.uploads.key_points_for(owner_id, &ids).await?;

        Ok(assemble_view(
            upload,
            &transcriptions,
            &document_texts,
            &summaries,
            &key_points,
        ))
    }
}

/// Build a view from an upload and artifact slices (which may span several
/// uploads; rows for other uploads are skipped).
///
/// Selection rules: the first matching transcription (audio) or document text
/// (document) wins; absence is the explicit `Missing` sentinel. The first
/// summary wins. Key points are sorted by `importance_level` descending with a
/// stable sort, so equal importance keeps insertion order.
pub(crate) fn assemble_view(
    upload: Upload,
    transcriptions: &[Transcription],
    document_texts: &[DocumentText],
    summaries: &[Summary],
    key_points: &[KeyPoint],
) -> UploadView {
    let content = match upload.file_type {
        FileType::Audio => transcriptions
            .iter()
            .find(|t| t.upload_id == upload.id)
            .map(|t| PrimaryContent::Transcript(t.text.clone()))
            .unwrap_or(PrimaryContent::Missing),
        FileType::Document => document_texts
            .iter()
            .find(|d| d.upload_id == upload.id)
            .map(|d| PrimaryContent::ExtractedText(d.text.clone()))
            .unwrap_or(PrimaryContent::Missing),
    };

    let summary = summaries
        .iter()
        .find(|s| s.upload_id == upload.id)
        .map(|s| s.text.clone());

    let mut key_points: Vec<KeyPoint> = key_points
        .iter()
        .filter(|k| k.upload_id == upload.id)
        .cloned()
        .collect();
    key_points.sort_by(|a, b| b.importance_level.cmp(&a.importance_level));

    UploadView {
        upload,
        content,
        summary,
        key_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use notia_core::models::UploadStatus;

    fn upload(file_type: FileType) -> Upload {
        Upload {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            file_name: "note.m4a".to_string(),
            file_type,
            file_size: 10,
            status: UploadStatus::Completed,
            created_at: Utc::now(),
            duration: None,
            generated_name: None,
            file_url: "https://blob.example.com/note.m4a".to_string(),
        }
    }

    fn key_point(upload_id: Uuid, text: &str, importance_level: i32) -> KeyPoint {
        KeyPoint {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            upload_id,
            text: text.to_string(),
            importance_level,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn missing_artifacts_yield_sentinel_not_empty_string() {
        let view = assemble_view(upload(FileType::Audio), &[], &[], &[], &[]);
        assert_eq!(view.content, PrimaryContent::Missing);
        assert!(view.summary.is_none());
        assert!(view.key_points.is_empty());
    }

    #[test]
    fn audio_content_comes_from_first_transcription() {
        let u = upload(FileType::Audio);
        let mk = |text: &str| Transcription {
            id: Uuid::new_v4(),
            owner_id: u.owner_id,
            upload_id: u.id,
            text: text.to_string(),
            timestamps: None,
            diarization: None,
            created_at: Utc::now(),
        };
        let view = assemble_view(u.clone(), &[mk("first"), mk("second")], &[], &[], &[]);
        assert_eq!(view.content, PrimaryContent::Transcript("first".to_string()));
    }

    #[test]
    fn document_content_ignores_transcriptions() {
        let u = upload(FileType::Document);
        let other = Transcription {
            id: Uuid::new_v4(),
            owner_id: u.owner_id,
            upload_id: u.id,
            text: "spurious".to_string(),
            timestamps: None,
            diarization: None,
            created_at: Utc::now(),
        };
        let view = assemble_view(u, &[other], &[], &[], &[]);
        assert_eq!(view.content, PrimaryContent::Missing);
    }

    #[test]
    fn key_points_sorted_by_importance_descending() {
        let u = upload(FileType::Audio);
        let points = vec![key_point(u.id, "minor", 3), key_point(u.id, "major", 5)];
        let view = assemble_view(u, &[], &[], &[], &points);
        let levels: Vec<i32> = view.key_points.iter().map(|k| k.importance_level).collect();
        assert_eq!(levels, vec![5, 3]);
    }

    #[test]
    fn equal_importance_keeps_insertion_order() {
        let u = upload(FileType::Audio);
        let points = vec![
            key_point(u.id, "a", 4),
            key_point(u.id, "b", 4),
            key_point(u.id, "c", 5),
            key_point(u.id, "d", 4),
        ];
        let view = assemble_view(u, &[], &[], &[], &points);
        let texts: Vec<&str> = view.key_points.iter().map(|k| k.text.as_str()).collect();
        assert_eq!(texts, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn other_uploads_artifacts_are_skipped() {
        let u = upload(FileType::Audio);
        let foreign = key_point(Uuid::new_v4(), "foreign", 5);
        let view = assemble_view(u, &[], &[], &[], &[foreign]);
        assert!(view.key_points.is_empty());
    }
}
