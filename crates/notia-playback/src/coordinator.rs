//! The process-wide playback coordinator.

use crate::error::PlaybackError;
use crate::traits::{AudioEngine, EngineHandle};
use notia_core::models::Upload;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use uuid::Uuid;

/// Playback phase of the single shared player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackPhase {
    Idle,
    Loading,
    Playing,
    Paused,
}

/// The observable playback state. Every screen subscribed to the coordinator
/// sees the same snapshot; there are no per-screen copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub active_upload_id: Option<Uuid>,
    pub phase: PlaybackPhase,
}

impl PlaybackSnapshot {
    fn idle() -> Self {
        Self {
            active_upload_id: None,
            phase: PlaybackPhase::Idle,
        }
    }
}

struct Inner {
    active_upload_id: Option<Uuid>,
    phase: PlaybackPhase,
    handle: Option<Box<dyn EngineHandle>>,
}

/// Single shared state machine governing which (if any) audio upload is
/// currently loading, playing, or paused.
///
/// Construct one instance per process and inject the same `Arc` into every
/// screen. All operations serialize on one async mutex, which is what makes a
/// track switch release the old engine handle strictly before acquiring the
/// new one: there is no interleaving where two handles are live.
pub struct PlaybackCoordinator {
    engine: Arc<dyn AudioEngine>,
    inner: Mutex<Inner>,
    state_tx: watch::Sender<PlaybackSnapshot>,
}

impl PlaybackCoordinator {
    pub fn new(engine: Arc<dyn AudioEngine>) -> Self {
        let (state_tx, _) = watch::channel(PlaybackSnapshot::idle());
        Self {
            engine,
            inner: Mutex::new(Inner {
                active_upload_id: None,
                phase: PlaybackPhase::Idle,
                handle: None,
            }),
            state_tx,
        }
    }

    /// Subscribe to state changes. All receivers observe the same sequence of
    /// snapshots.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.state_tx.subscribe()
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        *self.state_tx.borrow()
    }

    fn publish(&self, inner: &Inner) {
        self.state_tx.send_replace(PlaybackSnapshot {
            active_upload_id: inner.active_upload_id,
            phase: inner.phase,
        });
    }

    /// Start or resume playback of `upload`.
    ///
    /// Resumes when the upload is already active and paused; coalesces when it
    /// is already loading or playing (no duplicate acquisition). A different
    /// active upload is stopped first, then the new one goes through
    /// `Loading -> Playing`. On acquisition failure the coordinator resolves
    /// to `Idle` with no active upload; the previous track is not silently
    /// restored.
    #[tracing::instrument(skip(self, upload), fields(upload_id = %upload.id))]
    pub async fn play(&self, upload: &Upload) -> Result<(), PlaybackError> {
        if !upload.is_audio() {
            return Err(PlaybackError::NotPlayable(format!(
                "upload {} is not an audio file",
                upload.id
            )));
        }

        let mut inner = self.inner.lock().await;

        if inner.active_upload_id == Some(upload.id) {
            match inner.phase {
                PlaybackPhase::Playing => return Ok(()),
                PlaybackPhase::Loading => {
                    // Coalesced: an acquisition for this upload is already done
                    // or in flight behind this same lock.
                    tracing::debug!("play request coalesced while loading");
                    return Ok(());
                }
                PlaybackPhase::Paused => {
                    if let Some(handle) = inner.handle.as_ref() {
                        handle.resume().await?;
                        inner.phase = PlaybackPhase::Playing;
                        self.publish(&inner);
                        return Ok(());
                    }
                    // Paused without a handle should not happen; fall through
                    // to a fresh acquisition.
                }
                PlaybackPhase::Idle => {}
            }
        }

        // Switch: the current handle is released before the new acquisition,
        // so at most one engine handle is live at any time.
        if let Some(handle) = inner.handle.take() {
            handle.release().await;
        }

        inner.active_upload_id = Some(upload.id);
        inner.phase = PlaybackPhase::Loading;
        self.publish(&inner);

        match self.engine.acquire(upload.id, &upload.file_url).await {
            Ok(handle) => {
                inner.handle = Some(handle);
                inner.phase = PlaybackPhase::Playing;
                self.publish(&inner);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Engine acquisition failed");
                inner.active_upload_id = None;
                inner.phase = PlaybackPhase::Idle;
                self.publish(&inner);
                Err(PlaybackError::AcquisitionFailed(e.to_string()))
            }
        }
    }

    /// Toggle between playing and paused for the active upload.
    ///
    /// A no-op when nothing is active or while a track is still loading.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_playback(&self) -> Result<(), PlaybackError> {
        let mut inner = self.inner.lock().await;

        if inner.active_upload_id.is_none() {
            return Ok(());
        }

        match inner.phase {
            PlaybackPhase::Playing => {
                if let Some(handle) = inner.handle.as_ref() {
                    handle.pause().await?;
                }
                inner.phase = PlaybackPhase::Paused;
                self.publish(&inner);
            }
            PlaybackPhase::Paused => {
                if let Some(handle) = inner.handle.as_ref() {
                    handle.resume().await?;
                }
                inner.phase = PlaybackPhase::Playing;
                self.publish(&inner);
            }
            PlaybackPhase::Loading | PlaybackPhase::Idle => {}
        }

        Ok(())
    }

    /// Stop playback and release the engine handle. Used by screen unmount
    /// cleanup; always lands in `Idle`.
    #[tracing::instrument(skip(self))]
    pub async fn stop(&self) {
        let mut inner = self.inner.lock().await;

        if let Some(handle) = inner.handle.take() {
            handle.release().await;
        }

        inner.active_upload_id = None;
        inner.phase = PlaybackPhase::Idle;
        self.publish(&inner);
    }
}
