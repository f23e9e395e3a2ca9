//! Host blend-graph contract.
//!
//! The controller never touches engine objects directly. Adapters implement [`GraphHost`] and
//! [`BlendGraph`] over their engine's playable API; [`HeadlessHost`](crate::HeadlessHost) is the
//! in-memory implementation used for tests and simulation.

use serde::{Deserialize, Serialize};

use crate::clip::ClipRef;

/// Opaque binding key for the object an output drives (an animator, a skeleton root, ...).
pub type TargetHandle = String;

/// Opaque handle to a clip playable inside one graph.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PlayableHandle(pub u32);

/// Opaque handle to a mixer playable inside one graph.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct MixerHandle(pub u32);

/// How graph time advances.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum UpdateMode {
    /// The engine advances the graph on its own frame clock.
    GameTime,
    /// The graph only advances on [`BlendGraph::evaluate`].
    Manual,
}

/// Factory for graphs, usually the engine or one of its worlds.
pub trait GraphHost {
    type Graph: BlendGraph;

    fn create_graph(&mut self, name: &str) -> Self::Graph;
}

/// One playable graph: clip playables feeding weighted mixer inputs, a mixer feeding an output.
pub trait BlendGraph {
    /// Create a playable sampling `clip`. A playable with no clip is valid but samples nothing.
    fn create_clip_playable(&mut self, clip: Option<ClipRef>) -> PlayableHandle;
    fn destroy_playable(&mut self, playable: PlayableHandle);
    fn is_valid(&self, playable: PlayableHandle) -> bool;

    fn create_mixer(&mut self, input_count: usize) -> MixerHandle;
    /// Connect `playable` to `slot` with weight 0. Replaces nothing: the slot must be free.
    fn connect_input(&mut self, mixer: MixerHandle, slot: usize, playable: PlayableHandle);
    fn disconnect(&mut self, mixer: MixerHandle, slot: usize);
    fn set_input_weight(&mut self, mixer: MixerHandle, slot: usize, weight: f32);
    fn input_weight(&self, mixer: MixerHandle, slot: usize) -> f32;

    /// Create the graph output named `name`, bound to `target`, sourced from `mixer`.
    fn create_output(&mut self, name: &str, target: &str, mixer: MixerHandle);

    fn set_update_mode(&mut self, mode: UpdateMode);
    fn play(&mut self);
    /// Advance connected playables by `dt` seconds and sample the output.
    fn evaluate(&mut self, dt: f32);
    /// Speed multiplier on the root playable.
    fn set_root_speed(&mut self, speed: f32);

    /// Local time of a playable, in seconds.
    fn playable_time(&self, playable: PlayableHandle) -> f64;
    fn set_playable_time(&mut self, playable: PlayableHandle, time: f64);
    fn pause_playable(&mut self, playable: PlayableHandle);
    fn resume_playable(&mut self, playable: PlayableHandle);

    /// Release the graph and everything it owns.
    fn destroy(&mut self);
}
