//! Handle allocation for the headless graph.

use crate::graph::{MixerHandle, PlayableHandle};

/// Monotonic allocator for playable and mixer handles within one graph.
/// Handles are never reused, so a stale handle can't alias a newer playable.
#[derive(Default, Debug)]
pub struct HandleAllocator {
    next_playable: u32,
    next_mixer: u32,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_playable(&mut self) -> PlayableHandle {
        let id = PlayableHandle(self.next_playable);
        self.next_playable = self.next_playable.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_mixer(&mut self) -> MixerHandle {
        let id = MixerHandle(self.next_mixer);
        self.next_mixer = self.next_mixer.wrapping_add(1);
        id
    }
}
