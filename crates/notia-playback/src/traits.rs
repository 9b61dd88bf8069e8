//! Audio engine abstraction
//!
//! The engine is an external player primitive. Acquiring a handle loads the
//! media; the handle controls pause/resume and is consumed on release, so a
//! released handle cannot be used again.

use crate::error::PlaybackError;
use async_trait::async_trait;
use uuid::Uuid;

/// Factory for engine handles. One handle at most is live at any time; the
/// coordinator enforces this by releasing the current handle before acquiring
/// a new one.
#[async_trait]
pub trait AudioEngine: Send + Sync {
    /// Load `source_url` and start playing. Returns once media is ready.
    async fn acquire(
        &self,
        upload_id: Uuid,
        source_url: &str,
    ) -> Result<Box<dyn EngineHandle>, PlaybackError>;
}

/// A live playback handle for one loaded track.
#[async_trait]
pub trait EngineHandle: Send + Sync {
    async fn pause(&self) -> Result<(), PlaybackError>;

    async fn resume(&self) -> Result<(), PlaybackError>;

    /// Stop playback and free the underlying resources. Consumes the handle.
    async fn release(self: Box<Self>);
}
