use thiserror::Error;

/// Playback operation errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The engine could not start the requested upload. The coordinator has
    /// already returned to `Idle`; the previous track stays stopped.
    #[error("Playback acquisition failed: {0}")]
    AcquisitionFailed(String),

    /// The upload is not an audio file.
    #[error("Upload is not playable: {0}")]
    NotPlayable(String),

    /// Engine-side failure on an already-acquired handle.
    #[error("Engine error: {0}")]
    Engine(String),
}
