use async_trait::async_trait;
use chrono::Utc;
use notia_core::models::{FileType, Upload, UploadStatus};
use notia_playback::{
    AudioEngine, EngineHandle, PlaybackCoordinator, PlaybackError, PlaybackPhase,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Counting engine: tracks how many handles are live and which uploads were
/// acquired, with failure injection.
#[derive(Clone, Default)]
struct MockEngine {
    live_handles: Arc<AtomicUsize>,
    acquired: Arc<Mutex<Vec<Uuid>>>,
    fail_acquire: Arc<AtomicBool>,
}

impl MockEngine {
    fn live(&self) -> usize {
        self.live_handles.load(Ordering::SeqCst)
    }

    fn acquired(&self) -> Vec<Uuid> {
        self.acquired.lock().unwrap().clone()
    }

    fn set_fail_acquire(&self, fail: bool) {
        self.fail_acquire.store(fail, Ordering::SeqCst);
    }
}

struct MockHandle {
    live_handles: Arc<AtomicUsize>,
    paused: AtomicBool,
}

#[async_trait]
impl AudioEngine for MockEngine {
    async fn acquire(
        &self,
        upload_id: Uuid,
        _source_url: &str,
    ) -> Result<Box<dyn EngineHandle>, PlaybackError> {
        if self.fail_acquire.load(Ordering::SeqCst) {
            return Err(PlaybackError::Engine("codec unavailable".to_string()));
        }
        self.acquired.lock().unwrap().push(upload_id);
        self.live_handles.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockHandle {
            live_handles: self.live_handles.clone(),
            paused: AtomicBool::new(false),
        }))
    }
}

#[async_trait]
impl EngineHandle for MockHandle {
    async fn pause(&self) -> Result<(), PlaybackError> {
        self.paused.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn resume(&self) -> Result<(), PlaybackError> {
        self.paused.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn release(self: Box<Self>) {
        self.live_handles.fetch_sub(1, Ordering::SeqCst);
    }
}

fn audio_upload() -> Upload {
    let id = Uuid::new_v4();
    Upload {
        id,
        owner_id: Uuid::new_v4(),
        file_name: "take.m4a".to_string(),
        file_type: FileType::Audio,
        file_size: 4096,
        status: UploadStatus::Completed,
        created_at: Utc::now(),
        duration: Some(12.0),
        generated_name: None,
        file_url: format!("https://blob.test/store/{}.m4a", id),
    }
}

fn document_upload() -> Upload {
    Upload {
        file_type: FileType::Document,
        duration: None,
        ..audio_upload()
    }
}

fn coordinator() -> (MockEngine, PlaybackCoordinator) {
    let engine = MockEngine::default();
    let coordinator = PlaybackCoordinator::new(Arc::new(engine.clone()));
    (engine, coordinator)
}

#[tokio::test]
async fn play_transitions_to_playing() {
    let (engine, coordinator) = coordinator();
    let upload = audio_upload();

    coordinator.play(&upload).await.expect("play");

    let snapshot = coordinator.snapshot();
    assert_eq!(snapshot.active_upload_id, Some(upload.id));
    assert_eq!(snapshot.phase, PlaybackPhase::Playing);
    assert_eq!(engine.live(), 1);
}

#[tokio::test]
async fn switching_tracks_leaves_exactly_one_handle_for_the_new_track() {
    let (engine, coordinator) = coordinator();
    let a = audio_upload();
    let b = audio_upload();

    coordinator.play(&a).await.expect("play a");
    coordinator.play(&b).await.expect("play b");

    assert_eq!(engine.live(), 1);
    assert_eq!(engine.acquired(), vec![a.id, b.id]);
    assert_eq!(coordinator.snapshot().active_upload_id, Some(b.id));
    assert_eq!(coordinator.snapshot().phase, PlaybackPhase::Playing);
}

#[tokio::test]
async fn replaying_the_active_track_is_coalesced() {
    let (engine, coordinator) = coordinator();
    let upload = audio_upload();

    coordinator.play(&upload).await.expect("first play");
    coordinator.play(&upload).await.expect("second play");

    // No duplicate acquisition for the already-active upload.
    assert_eq!(engine.acquired().len(), 1);
    assert_eq!(engine.live(), 1);
}

#[tokio::test]
async fn play_resumes_a_paused_track_without_reacquiring() {
    let (engine, coordinator) = coordinator();
    let upload = audio_upload();

    coordinator.play(&upload).await.expect("play");
    coordinator.toggle_playback().await.expect("pause");
    assert_eq!(coordinator.snapshot().phase, PlaybackPhase::Paused);

    coordinator.play(&upload).await.expect("resume");
    assert_eq!(coordinator.snapshot().phase, PlaybackPhase::Playing);
    assert_eq!(engine.acquired().len(), 1);
}

#[tokio::test]
async fn toggle_with_no_active_upload_is_a_noop() {
    let (_engine, coordinator) = coordinator();

    coordinator.toggle_playback().await.expect("toggle");

    let snapshot = coordinator.snapshot();
    assert_eq!(snapshot.active_upload_id, None);
    assert_eq!(snapshot.phase, PlaybackPhase::Idle);
}

#[tokio::test]
async fn toggle_flips_between_playing_and_paused() {
    let (_engine, coordinator) = coordinator();
    let upload = audio_upload();

    coordinator.play(&upload).await.expect("play");
    coordinator.toggle_playback().await.expect("pause");
    assert_eq!(coordinator.snapshot().phase, PlaybackPhase::Paused);
    coordinator.toggle_playback().await.expect("resume");
    assert_eq!(coordinator.snapshot().phase, PlaybackPhase::Playing);
}

#[tokio::test]
async fn acquisition_failure_resolves_to_idle_with_no_silent_fallback() {
    let (engine, coordinator) = coordinator();
    let a = audio_upload();
    let b = audio_upload();

    coordinator.play(&a).await.expect("play a");
    engine.set_fail_acquire(true);

    let err = coordinator.play(&b).await.unwrap_err();
    assert!(matches!(err, PlaybackError::AcquisitionFailed(_)));

    // Terminal phase, nothing active, no live handle; the previous track was
    // not restored.
    let snapshot = coordinator.snapshot();
    assert_eq!(snapshot.phase, PlaybackPhase::Idle);
    assert_eq!(snapshot.active_upload_id, None);
    assert_eq!(engine.live(), 0);
}

#[tokio::test]
async fn document_uploads_are_not_playable() {
    let (engine, coordinator) = coordinator();

    let err = coordinator.play(&document_upload()).await.unwrap_err();
    assert!(matches!(err, PlaybackError::NotPlayable(_)));
    assert_eq!(engine.live(), 0);
    assert_eq!(coordinator.snapshot().phase, PlaybackPhase::Idle);
}

#[tokio::test]
async fn stop_releases_the_handle_and_clears_state() {
    let (engine, coordinator) = coordinator();
    let upload = audio_upload();

    coordinator.play(&upload).await.expect("play");
    coordinator.stop().await;

    let snapshot = coordinator.snapshot();
    assert_eq!(snapshot.active_upload_id, None);
    assert_eq!(snapshot.phase, PlaybackPhase::Idle);
    assert_eq!(engine.live(), 0);
}

#[tokio::test]
async fn all_observers_see_the_same_snapshots() {
    let (_engine, coordinator) = coordinator();
    let coordinator = Arc::new(coordinator);
    let upload = audio_upload();

    let mut screen_a = coordinator.subscribe();
    let mut screen_b = coordinator.subscribe();

    coordinator.play(&upload).await.expect("play");

    screen_a.changed().await.expect("a changed");
    screen_b.changed().await.expect("b changed");
    let seen_a = *screen_a.borrow_and_update();
    let seen_b = *screen_b.borrow_and_update();

    assert_eq!(seen_a, seen_b);
    assert_eq!(seen_a.active_upload_id, Some(upload.id));
    assert_eq!(seen_a.phase, PlaybackPhase::Playing);
}

#[tokio::test]
async fn serialized_requests_from_concurrent_screens_keep_one_handle() {
    let (engine, coordinator) = coordinator();
    let coordinator = Arc::new(coordinator);
    let a = audio_upload();
    let b = audio_upload();

    let mut tasks = Vec::new();
    for upload in [a.clone(), b.clone(), a.clone(), b.clone()] {
        let coordinator = coordinator.clone();
        tasks.push(tokio::spawn(async move {
            let _ = coordinator.play(&upload).await;
        }));
    }
    for task in tasks {
        task.await.expect("join");
    }

    assert_eq!(engine.live(), 1);
    let snapshot = coordinator.snapshot();
    assert!(snapshot.active_upload_id == Some(a.id) || snapshot.active_upload_id == Some(b.id));
    assert_eq!(snapshot.phase, PlaybackPhase::Playing);
}
