//! Motif Animation Core (engine-agnostic)
//!
//! Per-entity clip playback on top of a host animation graph:
//! - [`ClipIndex`] resolves clips to motion identities by name suffix and by exact name.
//! - [`CrossFadeController`] drives a two-slot mixer and cross-fades from the previous clip
//!   to a newly requested one, one step per [`tick`](CrossFadeController::tick).
//!
//! The engine is reached only through the [`GraphHost`] / [`BlendGraph`] traits.
//! [`HeadlessHost`] implements them in memory.

pub mod clip;
pub mod clip_index;
pub mod config;
pub mod controller;
pub mod crossfade;
pub mod error;
pub mod graph;
pub mod headless;
pub mod ids;
pub mod motion;

// Re-exports for consumers (adapters)
pub use clip::{ClipRef, ClipResource};
pub use clip_index::ClipIndex;
pub use config::{ControllerConfig, DEFAULT_FADE_SECONDS};
pub use controller::{CrossFadeController, SlotKind, CURRENT_INPUT, PREVIOUS_INPUT};
pub use crossfade::{advance, FadePhase, FadeState, SlotWeights};
pub use error::PlaybackError;
pub use graph::{BlendGraph, GraphHost, MixerHandle, PlayableHandle, TargetHandle, UpdateMode};
pub use headless::{HeadlessGraph, HeadlessHost};
pub use motion::MotionSet;

/// Playback result type
pub type Result<T> = core::result::Result<T, PlaybackError>;
