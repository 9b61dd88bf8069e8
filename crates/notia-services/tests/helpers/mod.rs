//! Shared fixtures for service tests.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use notia_core::models::{
    DocumentText, FileType, KeyPoint, Summary, Transcription, Upload, UploadStatus,
};
use uuid::Uuid;

/// Initialize tracing for tests; safe to call repeatedly.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "notia=debug".into()))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

/// Build an upload created `age_minutes` ago. The blob name embedded in
/// `file_url` is `{id}.bin`.
pub fn upload_fixture(owner_id: Uuid, file_type: FileType, age_minutes: i64) -> Upload {
    let id = Uuid::new_v4();
    Upload {
        id,
        owner_id,
        file_name: match file_type {
            FileType::Audio => "recording.m4a".to_string(),
            FileType::Document => "notes.pdf".to_string(),
        },
        file_type,
        file_size: 2048,
        status: UploadStatus::Completed,
        created_at: Utc::now() - Duration::minutes(age_minutes),
        duration: match file_type {
            FileType::Audio => Some(42.0),
            FileType::Document => None,
        },
        generated_name: None,
        file_url: format!("https://blob.test/store/{}.bin", id),
    }
}

pub fn transcription_fixture(owner_id: Uuid, upload_id: Uuid, text: &str) -> Transcription {
    Transcription {
        id: Uuid::new_v4(),
        owner_id,
        upload_id,
        text: text.to_string(),
        timestamps: None,
        diarization: None,
        created_at: Utc::now(),
    }
}

pub fn document_text_fixture(owner_id: Uuid, upload_id: Uuid, text: &str) -> DocumentText {
    DocumentText {
        id: Uuid::new_v4(),
        owner_id,
        upload_id,
        text: text.to_string(),
        created_at: Utc::now(),
    }
}

pub fn summary_fixture(owner_id: Uuid, upload_id: Uuid, text: &str) -> Summary {
    Summary {
        id: Uuid::new_v4(),
        owner_id,
        upload_id,
        text: text.to_string(),
        created_at: Utc::now(),
    }
}

pub fn key_point_fixture(
    owner_id: Uuid,
    upload_id: Uuid,
    text: &str,
    importance_level: i32,
) -> KeyPoint {
    KeyPoint {
        id: Uuid::new_v4(),
        owner_id,
        upload_id,
        text: text.to_string(),
        importance_level,
        created_at: Utc::now(),
    }
}
