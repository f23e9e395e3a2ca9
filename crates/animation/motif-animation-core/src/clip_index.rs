//! Identity- and name-keyed clip lookup.
//!
//! Clips are resolved to a motion identity by suffix: a clip named `"Hero_Walk"` fills the
//! `"Walk"` slot. Resolution happens once at build time; afterwards identity queries are a
//! plain vector index.

use hashbrown::HashMap;
use log::{debug, trace};

use crate::clip::ClipRef;
use crate::error::PlaybackError;
use crate::motion::MotionSet;
use crate::Result;

/// Lookup table from motion identity (ordinal) and clip name to a host clip.
#[derive(Debug, Clone, Default)]
pub struct ClipIndex {
    identifiers: Vec<String>,
    by_identity: Vec<Option<ClipRef>>,
    by_name: HashMap<String, ClipRef>,
    /// Names aligned with `by_identity`, so name queries by ordinal need no clip access.
    cached_names: Vec<Option<String>>,
}

impl ClipIndex {
    /// Build the index from an unordered clip collection and an ordered identifier list.
    ///
    /// Each clip is assigned to the first identifier (in declaration order) that is a suffix
    /// of its name. Slots are overwritten without an emptiness check, so when several clips
    /// resolve to the same identifier the last one in `clips` order wins.
    pub fn build<I, S>(clips: &[ClipRef], identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identifiers: Vec<String> = identifiers.into_iter().map(Into::into).collect();
        let mut by_identity: Vec<Option<ClipRef>> = vec![None; identifiers.len()];
        let mut by_name = HashMap::with_capacity(clips.len());

        for clip in clips {
            by_name.insert(clip.name.clone(), clip.clone());

            if let Some(slot) = identifiers
                .iter()
                .position(|ident| clip.name.ends_with(ident.as_str()))
            {
                trace!("clip '{}' -> identity '{}'", clip.name, identifiers[slot]);
                by_identity[slot] = Some(clip.clone());
            }
        }

        let cached_names = by_identity
            .iter()
            .map(|c| c.as_ref().map(|c| c.name.clone()))
            .collect();

        debug!(
            "clip index built: {} clips, {}/{} identities resolved",
            by_name.len(),
            by_identity.iter().filter(|c| c.is_some()).count(),
            identifiers.len()
        );

        Self {
            identifiers,
            by_identity,
            by_name,
            cached_names,
        }
    }

    /// Build with the identifiers of a [`MotionSet`].
    pub fn from_motions<M: MotionSet>(clips: &[ClipRef]) -> Self {
        Self::build(clips, M::NAMES.iter().copied())
    }

    /// Clip resolved for identity `index`; `Ok(None)` when no clip matched that identity.
    pub fn get_clip(&self, index: usize) -> Result<Option<&ClipRef>> {
        self.by_identity
            .get(index)
            .map(Option::as_ref)
            .ok_or(PlaybackError::IdentityOutOfRange {
                index,
                len: self.by_identity.len(),
            })
    }

    /// Typed variant of [`get_clip`](Self::get_clip).
    #[inline]
    pub fn motion_clip<M: MotionSet>(&self, motion: M) -> Result<Option<&ClipRef>> {
        self.get_clip(motion.index())
    }

    /// Cached clip name for identity `index`.
    pub fn clip_name(&self, index: usize) -> Result<Option<&str>> {
        self.cached_names
            .get(index)
            .map(Option::as_deref)
            .ok_or(PlaybackError::IdentityOutOfRange {
                index,
                len: self.cached_names.len(),
            })
    }

    pub fn get_clip_by_name(&self, name: &str) -> Result<&ClipRef> {
        self.by_name
            .get(name)
            .ok_or_else(|| PlaybackError::ClipNotFound {
                name: name.to_string(),
            })
    }

    #[inline]
    pub fn exists(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Register a clip by name.
    ///
    /// Only the name map is updated. Identity lookups ([`get_clip`](Self::get_clip),
    /// [`clip_name`](Self::clip_name)) keep returning what was resolved at build time, even
    /// when `clip` would match an identifier.
    pub fn add_clip(&mut self, clip: ClipRef) {
        self.by_name.insert(clip.name.clone(), clip);
    }

    /// Number of identity slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_identity.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_identity.is_empty()
    }

    #[inline]
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Number of distinct clip names known to the index.
    #[inline]
    pub fn clip_count(&self) -> usize {
        self.by_name.len()
    }
}
