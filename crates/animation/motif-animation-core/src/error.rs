//! Error types for clip lookup and cross-fade playback.

use serde::{Deserialize, Serialize};

use crate::controller::SlotKind;

/// Errors surfaced by [`ClipIndex`](crate::ClipIndex) and
/// [`CrossFadeController`](crate::CrossFadeController).
///
/// Lifecycle misuse (ticking or shutting down a controller that was already shut down) is not
/// represented here: it panics, the same way an out-of-bounds slice index does.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlaybackError {
    /// Identity ordinal past the end of the identifier list.
    #[error("Motion index {index} is out of range (identity table has {len} entries)")]
    IdentityOutOfRange { index: usize, len: usize },

    /// No clip registered under this name.
    #[error("Clip not found: {name}")]
    ClipNotFound { name: String },

    /// A slot accessor was used before a clip was bound to that slot.
    #[error("No clip bound to the {slot} slot")]
    SlotUnbound { slot: SlotKind },

    /// Controller configuration rejected.
    #[error("Invalid controller config: {reason}")]
    InvalidConfig { reason: String },
}

impl PlaybackError {
    /// Lookup misses can be handled by the caller (fall back to another clip, log, ...).
    /// Everything else indicates a broken caller contract.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ClipNotFound { .. })
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::IdentityOutOfRange { .. } | Self::SlotUnbound { .. } => "programming",
            Self::ClipNotFound { .. } => "lookup",
            Self::InvalidConfig { .. } => "config",
        }
    }
}

impl From<serde_json::Error> for PlaybackError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig {
            reason: err.to_string(),
        }
    }
}
