//! Notia Playback Library
//!
//! The global audio-playback coordinator: a single shared state machine
//! tracking at most one active playable upload, exposed to all screens. The
//! coordinator mediates access to one underlying engine handle and guarantees
//! that every observer sees the same `(active_upload_id, phase)` pair.
//!
//! The audio engine itself (codec decoding, output devices) is an external
//! primitive injected through the [`AudioEngine`] trait.

pub mod coordinator;
pub mod error;
pub mod traits;

pub use coordinator::{PlaybackCoordinator, PlaybackPhase, PlaybackSnapshot};
pub use error::PlaybackError;
pub use traits::{AudioEngine, EngineHandle};
