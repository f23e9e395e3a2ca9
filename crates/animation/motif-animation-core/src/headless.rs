//! In-memory host: a blend graph with no engine behind it.
//!
//! Evaluation only advances playable clocks; there is no pose sampling. Useful for tests,
//! benchmarks and server-side simulation where the weights and clip times are all that matter.

use hashbrown::HashMap;
use log::warn;

use crate::clip::ClipRef;
use crate::graph::{BlendGraph, GraphHost, MixerHandle, PlayableHandle, TargetHandle, UpdateMode};
use crate::ids::HandleAllocator;

/// Creates [`HeadlessGraph`]s and remembers their names.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    created: Vec<String>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all graphs created so far, in creation order.
    pub fn created_graphs(&self) -> &[String] {
        &self.created
    }
}

impl GraphHost for HeadlessHost {
    type Graph = HeadlessGraph;

    fn create_graph(&mut self, name: &str) -> HeadlessGraph {
        self.created.push(name.to_string());
        HeadlessGraph::new(name)
    }
}

#[derive(Debug)]
struct PlayableState {
    clip: Option<ClipRef>,
    time: f64,
    paused: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct MixerInput {
    playable: Option<PlayableHandle>,
    weight: f32,
}

/// Output registered with [`BlendGraph::create_output`].
#[derive(Debug, Clone)]
pub struct HeadlessOutput {
    pub name: String,
    pub target: TargetHandle,
    pub source: MixerHandle,
}

#[derive(Debug)]
pub struct HeadlessGraph {
    name: String,
    ids: HandleAllocator,
    playables: HashMap<PlayableHandle, PlayableState>,
    mixers: HashMap<MixerHandle, Vec<MixerInput>>,
    outputs: Vec<HeadlessOutput>,
    mode: UpdateMode,
    playing: bool,
    root_speed: f32,
    destroyed: bool,
    evaluations: u64,
}

impl HeadlessGraph {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ids: HandleAllocator::new(),
            playables: HashMap::new(),
            mixers: HashMap::new(),
            outputs: Vec::new(),
            mode: UpdateMode::GameTime,
            playing: false,
            root_speed: 1.0,
            destroyed: false,
            evaluations: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Playable currently connected to `slot`, if any.
    pub fn connected(&self, mixer: MixerHandle, slot: usize) -> Option<PlayableHandle> {
        self.mixers
            .get(&mixer)
            .and_then(|inputs| inputs.get(slot))
            .and_then(|input| input.playable)
    }

    pub fn playable_clip(&self, playable: PlayableHandle) -> Option<&ClipRef> {
        self.playables.get(&playable).and_then(|p| p.clip.as_ref())
    }

    pub fn is_playable_paused(&self, playable: PlayableHandle) -> bool {
        self.playables.get(&playable).is_some_and(|p| p.paused)
    }

    /// Number of playables created and not yet destroyed.
    pub fn live_playables(&self) -> usize {
        self.playables.len()
    }

    pub fn outputs(&self) -> &[HeadlessOutput] {
        &self.outputs
    }

    pub fn update_mode(&self) -> UpdateMode {
        self.mode
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn root_speed(&self) -> f32 {
        self.root_speed
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Number of [`BlendGraph::evaluate`] calls so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    fn input_mut(&mut self, mixer: MixerHandle, slot: usize) -> Option<&mut MixerInput> {
        self.mixers.get_mut(&mixer).and_then(|inputs| inputs.get_mut(slot))
    }

    /// Playables reachable from an output, each listed once.
    fn reachable_playables(&self) -> Vec<PlayableHandle> {
        let mut out: Vec<PlayableHandle> = Vec::new();
        for output in &self.outputs {
            if let Some(inputs) = self.mixers.get(&output.source) {
                for p in inputs.iter().filter_map(|i| i.playable) {
                    if !out.contains(&p) {
                        out.push(p);
                    }
                }
            }
        }
        out
    }
}

impl BlendGraph for HeadlessGraph {
    fn create_clip_playable(&mut self, clip: Option<ClipRef>) -> PlayableHandle {
        let handle = self.ids.alloc_playable();
        self.playables.insert(
            handle,
            PlayableState {
                clip,
                time: 0.0,
                paused: false,
            },
        );
        handle
    }

    fn destroy_playable(&mut self, playable: PlayableHandle) {
        if self.playables.remove(&playable).is_none() {
            warn!("graph '{}': destroy of invalid playable {:?}", self.name, playable);
            return;
        }
        for inputs in self.mixers.values_mut() {
            for input in inputs.iter_mut() {
                if input.playable == Some(playable) {
                    *input = MixerInput::default();
                }
            }
        }
    }

    fn is_valid(&self, playable: PlayableHandle) -> bool {
        self.playables.contains_key(&playable)
    }

    fn create_mixer(&mut self, input_count: usize) -> MixerHandle {
        let handle = self.ids.alloc_mixer();
        self.mixers
            .insert(handle, vec![MixerInput::default(); input_count]);
        handle
    }

    fn connect_input(&mut self, mixer: MixerHandle, slot: usize, playable: PlayableHandle) {
        if !self.playables.contains_key(&playable) {
            warn!("graph '{}': connect of invalid playable {:?}", self.name, playable);
            return;
        }
        let name = self.name.clone();
        match self.input_mut(mixer, slot) {
            Some(input) => {
                if input.playable.is_some() {
                    warn!("graph '{name}': slot {slot} already connected, replacing");
                }
                *input = MixerInput {
                    playable: Some(playable),
                    weight: 0.0,
                };
            }
            None => warn!("graph '{name}': no input {slot} on mixer {mixer:?}"),
        }
    }

    fn disconnect(&mut self, mixer: MixerHandle, slot: usize) {
        if let Some(input) = self.input_mut(mixer, slot) {
            input.playable = None;
        }
    }

    fn set_input_weight(&mut self, mixer: MixerHandle, slot: usize, weight: f32) {
        if let Some(input) = self.input_mut(mixer, slot) {
            input.weight = weight;
        }
    }

    fn input_weight(&self, mixer: MixerHandle, slot: usize) -> f32 {
        self.mixers
            .get(&mixer)
            .and_then(|inputs| inputs.get(slot))
            .map_or(0.0, |input| input.weight)
    }

    fn create_output(&mut self, name: &str, target: &str, mixer: MixerHandle) {
        self.outputs.push(HeadlessOutput {
            name: name.to_string(),
            target: target.to_string(),
            source: mixer,
        });
    }

    fn set_update_mode(&mut self, mode: UpdateMode) {
        self.mode = mode;
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn evaluate(&mut self, dt: f32) {
        if self.destroyed {
            warn!("graph '{}': evaluate after destroy", self.name);
            return;
        }
        self.evaluations += 1;
        if !self.playing {
            return;
        }
        let step = f64::from(dt) * f64::from(self.root_speed);
        for handle in self.reachable_playables() {
            if let Some(p) = self.playables.get_mut(&handle) {
                if !p.paused {
                    p.time += step;
                }
            }
        }
    }

    fn set_root_speed(&mut self, speed: f32) {
        self.root_speed = speed;
    }

    fn playable_time(&self, playable: PlayableHandle) -> f64 {
        self.playables.get(&playable).map_or(0.0, |p| p.time)
    }

    fn set_playable_time(&mut self, playable: PlayableHandle, time: f64) {
        if let Some(p) = self.playables.get_mut(&playable) {
            p.time = time;
        }
    }

    fn pause_playable(&mut self, playable: PlayableHandle) {
        if let Some(p) = self.playables.get_mut(&playable) {
            p.paused = true;
        }
    }

    fn resume_playable(&mut self, playable: PlayableHandle) {
        if let Some(p) = self.playables.get_mut(&playable) {
            p.paused = false;
        }
    }

    fn destroy(&mut self) {
        self.playables.clear();
        self.mixers.clear();
        self.outputs.clear();
        self.playing = false;
        self.destroyed = true;
    }
}
