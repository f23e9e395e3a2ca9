//! Clip resources as seen by the playback layer.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

/// A named, fixed-duration animation clip owned by the host asset system.
///
/// Immutable once constructed. The index and controller only hold shared references
/// ([`ClipRef`]); the sampled data stays on the host side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipResource {
    pub name: String,
    /// Length in seconds, never negative.
    #[serde(deserialize_with = "non_negative_seconds")]
    pub duration: f32,
    #[serde(default)]
    pub is_looping: bool,
}

fn non_negative_seconds<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(f32::deserialize(deserializer)?.max(0.0))
}

/// Shared, non-owning handle to a host clip.
pub type ClipRef = Arc<ClipResource>;

impl ClipResource {
    pub fn new(name: impl Into<String>, duration: f32, is_looping: bool) -> Self {
        Self {
            name: name.into(),
            duration: duration.max(0.0),
            is_looping,
        }
    }

    /// Convenience for building a [`ClipRef`] directly.
    #[inline]
    pub fn shared(name: impl Into<String>, duration: f32, is_looping: bool) -> ClipRef {
        Arc::new(Self::new(name, duration, is_looping))
    }
}
