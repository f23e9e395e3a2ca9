//! Two-slot cross-fade playback over a host blend graph.
//!
//! The controller owns one graph with a two-input mixer: input 0 is the current slot, input 1
//! the previous slot. `play` moves the current slot to the previous one and binds the new
//! clip; the next `tick` rewires the mixer and starts a linear fade between the two.
//!
//! Methods:
//! - create, init_play, play / play_default, tick, pause / resume, shutdown
//! - slot accessors (time, length, clip names, ended / looping / playing queries)

use std::fmt;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::clip::ClipRef;
use crate::config::ControllerConfig;
use crate::crossfade::{advance, FadePhase, FadeState, SlotWeights};
use crate::error::PlaybackError;
use crate::graph::{BlendGraph, GraphHost, MixerHandle, PlayableHandle, UpdateMode};
use crate::Result;

/// Mixer input of the current slot.
pub const CURRENT_INPUT: usize = 0;
/// Mixer input of the previous slot.
pub const PREVIOUS_INPUT: usize = 1;

/// Which of the two playback slots an accessor refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    Current,
    Previous,
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => f.write_str("current"),
            Self::Previous => f.write_str("previous"),
        }
    }
}

/// A clip playable held by the controller. `clip` is `None` for the placeholder playable
/// created with the graph.
#[derive(Clone, Debug)]
struct Slot {
    playable: PlayableHandle,
    clip: Option<ClipRef>,
}

#[derive(Debug)]
pub struct CrossFadeController<G: BlendGraph> {
    name: String,
    config: ControllerConfig,
    graph: G,
    mixer: MixerHandle,
    current: Slot,
    previous: Option<Slot>,
    fade: FadeState,
    /// Set by the first `play` of a tick, cleared when the fade is set up.
    requested: bool,
    pending: Option<ClipRef>,
    weights: SlotWeights,
    /// Seconds since the fade in flight was set up; frozen while paused, zero when idle.
    clock: f32,
    paused: bool,
    alive: bool,
}

impl<G: BlendGraph> CrossFadeController<G> {
    /// Create the graph and wire an empty current slot into the mixer at full weight.
    pub fn create<H>(
        host: &mut H,
        name: &str,
        target: &str,
        config: ControllerConfig,
    ) -> Result<Self>
    where
        H: GraphHost<Graph = G>,
    {
        config.validate()?;

        let mut graph = host.create_graph(name);
        let playable = graph.create_clip_playable(None);
        let mixer = graph.create_mixer(2);
        graph.connect_input(mixer, CURRENT_INPUT, playable);
        graph.set_input_weight(mixer, CURRENT_INPUT, 1.0);
        graph.create_output(&config.output_name, target, mixer);
        graph.set_update_mode(UpdateMode::Manual);
        graph.play();

        debug!("controller '{name}' created (target '{target}')");

        Ok(Self {
            name: name.to_string(),
            config,
            graph,
            mixer,
            current: Slot {
                playable,
                clip: None,
            },
            previous: None,
            fade: FadeState::IDLE,
            requested: false,
            pending: None,
            weights: SlotWeights::SETTLED,
            clock: 0.0,
            paused: false,
            alive: true,
        })
    }

    /// Bind `clip` to both slots without blending: current at weight 1, previous at weight 0.
    ///
    /// Any fade in flight is dropped.
    pub fn init_play(&mut self, clip: ClipRef) {
        self.assert_alive("init_play");

        if let Some(prev) = self.previous.take() {
            self.release(prev.playable);
        }
        self.release(self.current.playable);

        let prev = self.graph.create_clip_playable(Some(clip.clone()));
        let cur = self.graph.create_clip_playable(Some(clip.clone()));
        self.graph.disconnect(self.mixer, CURRENT_INPUT);
        self.graph.disconnect(self.mixer, PREVIOUS_INPUT);
        self.graph.connect_input(self.mixer, PREVIOUS_INPUT, prev);
        self.graph.connect_input(self.mixer, CURRENT_INPUT, cur);
        self.apply_weights(SlotWeights::SETTLED);

        self.previous = Some(Slot {
            playable: prev,
            clip: Some(clip.clone()),
        });
        self.current = Slot {
            playable: cur,
            clip: Some(clip.clone()),
        };
        self.fade = FadeState::IDLE;
        self.requested = false;
        self.pending = None;

        self.graph.evaluate(0.0);
        debug!("controller '{}': init_play '{}'", self.name, clip.name);
    }

    /// Request a cross-fade to `clip` over `fade` seconds, starting on the next tick.
    ///
    /// Several calls before that tick capture the previous slot only once: the last call
    /// decides the clip and duration, the slot that was current before the first call becomes
    /// the previous slot. A call while a fade is blending replaces it.
    pub fn play(&mut self, clip: ClipRef, fade: f32) {
        self.assert_alive("play");

        if !self.requested {
            if let Some(old) = self.previous.take() {
                self.release(old.playable);
            }
            self.previous = Some(self.current.clone());
            self.requested = true;
        } else {
            // Transitional playable from an earlier call this tick; never connected.
            self.release(self.current.playable);
        }

        if self.fade.phase == FadePhase::Blending {
            debug!("controller '{}': fade superseded", self.name);
        }

        let playable = self.graph.create_clip_playable(Some(clip.clone()));
        self.current = Slot {
            playable,
            clip: Some(clip.clone()),
        };
        debug!("controller '{}': play '{}' (fade {fade}s)", self.name, clip.name);
        self.pending = Some(clip);
        self.fade = FadeState::requested(fade);
    }

    /// [`play`](Self::play) with the configured default fade.
    pub fn play_default(&mut self, clip: ClipRef) {
        let fade = self.config.default_fade;
        self.play(clip, fade);
    }

    /// Advance one frame: run the fade step, then evaluate the graph with `dt`.
    ///
    /// While paused the fade clock stands still, so a blending fade keeps its weights. A
    /// requested fade is still set up.
    pub fn tick(&mut self, dt: f32) -> SlotWeights {
        self.assert_alive("tick");

        let setup = self.fade.phase == FadePhase::Requested;
        if setup {
            self.clock = 0.0;
            self.connect_fade_slots();
        } else if !self.paused && self.fade.is_active() {
            self.clock += dt;
        }
        if setup || !self.paused {
            let (next, weights) = advance(self.fade, self.clock);
            if self.fade.is_active() && !next.is_active() {
                debug!("controller '{}': fade complete", self.name);
            }
            self.fade = next;
            if !next.is_active() {
                self.clock = 0.0;
            }
            if let Some(w) = weights {
                self.apply_weights(w);
            }
        }

        trace!(
            "controller '{}': t={:.4} phase={} weights=({:.3}, {:.3})",
            self.name,
            self.clock,
            self.fade.phase.name(),
            self.weights.current,
            self.weights.previous
        );

        self.graph.evaluate(dt);
        self.weights
    }

    /// Freeze the fade and stop both slot clocks.
    pub fn pause(&mut self) {
        self.assert_alive("pause");
        if let Some(prev) = &self.previous {
            self.graph.pause_playable(prev.playable);
        }
        self.graph.pause_playable(self.current.playable);
        self.paused = true;
    }

    /// Let the fade clock run again. Slot clocks restart only with
    /// [`ControllerConfig::resume_restarts_slots`].
    pub fn resume(&mut self) {
        self.assert_alive("resume");
        self.paused = false;
        if self.config.resume_restarts_slots {
            if let Some(prev) = &self.previous {
                self.graph.resume_playable(prev.playable);
            }
            self.graph.resume_playable(self.current.playable);
        }
    }

    /// Release the graph. Calling it twice is a bug and panics.
    pub fn shutdown(&mut self) {
        assert!(self.alive, "controller '{}' shut down twice", self.name);
        self.graph.destroy();
        self.alive = false;
        debug!("controller '{}' shut down", self.name);
    }

    /// False once the current clip has ended; otherwise whether it is named `clip_name`.
    pub fn is_playing(&self, clip_name: &str) -> Result<bool> {
        if self.is_ended()? {
            return Ok(false);
        }
        Ok(self.current_clip()?.name == clip_name)
    }

    /// The current slot's local time is strictly past its clip duration.
    pub fn is_ended(&self) -> Result<bool> {
        self.assert_alive("is_ended");
        let clip = self.current_clip()?;
        Ok(self.graph.playable_time(self.current.playable) > f64::from(clip.duration))
    }

    pub fn is_looping(&self) -> Result<bool> {
        Ok(self.current_clip()?.is_looping)
    }

    /// Speed multiplier on the graph root.
    pub fn set_speed(&mut self, speed: f32) {
        self.assert_alive("set_speed");
        self.graph.set_root_speed(speed);
    }

    /// Seek the current slot.
    pub fn set_time(&mut self, time: f32) {
        self.assert_alive("set_time");
        self.graph.set_playable_time(self.current.playable, f64::from(time));
    }

    /// Local time of the current slot.
    pub fn time(&self) -> f32 {
        self.assert_alive("time");
        self.graph.playable_time(self.current.playable) as f32
    }

    /// Local time of the previous slot.
    pub fn prev_time(&self) -> Result<f32> {
        self.assert_alive("prev_time");
        let prev = self.previous_slot()?;
        Ok(self.graph.playable_time(prev.playable) as f32)
    }

    /// Duration of the current clip.
    pub fn length(&self) -> Result<f32> {
        Ok(self.current_clip()?.duration)
    }

    pub fn current_clip_name(&self) -> Result<&str> {
        Ok(self.current_clip()?.name.as_str())
    }

    pub fn prev_clip_name(&self) -> Result<&str> {
        self.previous_slot()?
            .clip
            .as_ref()
            .map(|c| c.name.as_str())
            .ok_or(PlaybackError::SlotUnbound {
                slot: SlotKind::Previous,
            })
    }

    /// Configured duration of the fade in flight, or `-1.0` when none is.
    ///
    /// This is the duration passed to `play`, not the time left.
    pub fn fade_time(&self) -> f32 {
        if self.fade.is_active() {
            self.fade.duration
        } else {
            -1.0
        }
    }

    /// Weights last pushed to the mixer.
    #[inline]
    pub fn weights(&self) -> SlotWeights {
        self.weights
    }

    #[inline]
    pub fn phase(&self) -> FadePhase {
        self.fade.phase
    }

    #[inline]
    pub fn fade_state(&self) -> FadeState {
        self.fade
    }

    /// Clip waiting for its fade setup tick.
    #[inline]
    pub fn pending_clip(&self) -> Option<&ClipRef> {
        self.pending.as_ref()
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    #[inline]
    pub fn graph(&self) -> &G {
        &self.graph
    }

    #[inline]
    pub fn mixer(&self) -> MixerHandle {
        self.mixer
    }

    pub fn playable(&self, slot: SlotKind) -> Option<PlayableHandle> {
        match slot {
            SlotKind::Current => Some(self.current.playable),
            SlotKind::Previous => self.previous.as_ref().map(|s| s.playable),
        }
    }

    /// Clip queries (`is_looping`, `length`, clip names) go through here.
    fn current_clip(&self) -> Result<&ClipRef> {
        self.assert_alive("clip query");
        self.current.clip.as_ref().ok_or(PlaybackError::SlotUnbound {
            slot: SlotKind::Current,
        })
    }

    fn previous_slot(&self) -> Result<&Slot> {
        self.assert_alive("slot query");
        self.previous.as_ref().ok_or(PlaybackError::SlotUnbound {
            slot: SlotKind::Previous,
        })
    }

    /// Rewire both slots for a fade: previous at weight 1, current at weight 0.
    fn connect_fade_slots(&mut self) {
        self.graph.disconnect(self.mixer, CURRENT_INPUT);
        self.graph.disconnect(self.mixer, PREVIOUS_INPUT);
        if let Some(prev) = &self.previous {
            self.graph.connect_input(self.mixer, PREVIOUS_INPUT, prev.playable);
        }
        self.graph.connect_input(self.mixer, CURRENT_INPUT, self.current.playable);
        self.apply_weights(SlotWeights::FADE_START);

        self.requested = false;
        self.pending = None;
    }

    fn apply_weights(&mut self, weights: SlotWeights) {
        self.graph.set_input_weight(self.mixer, PREVIOUS_INPUT, weights.previous);
        self.graph.set_input_weight(self.mixer, CURRENT_INPUT, weights.current);
        self.weights = weights;
    }

    fn release(&mut self, playable: PlayableHandle) {
        if self.graph.is_valid(playable) {
            self.graph.destroy_playable(playable);
        }
    }

    fn assert_alive(&self, op: &str) {
        assert!(self.alive, "{op} on controller '{}' after shutdown", self.name);
    }
}

impl<G: BlendGraph> Drop for CrossFadeController<G> {
    fn drop(&mut self) {
        if self.alive {
            warn!(
                "controller '{}' dropped without shutdown; releasing its graph",
                self.name
            );
            self.graph.destroy();
            self.alive = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::ClipResource;
    use crate::headless::{HeadlessGraph, HeadlessHost};

    fn controller() -> CrossFadeController<HeadlessGraph> {
        let mut host = HeadlessHost::new();
        CrossFadeController::create(&mut host, "Hero", "rig", ControllerConfig::default())
            .unwrap()
    }

    #[test]
    fn create_wires_placeholder_current_slot() {
        let mut ctl = controller();
        let g = ctl.graph();
        assert!(g.is_playing());
        assert_eq!(g.update_mode(), UpdateMode::Manual);
        assert_eq!(g.outputs()[0].name, "output");
        assert_eq!(g.outputs()[0].target, "rig");
        assert_eq!(
            g.connected(ctl.mixer(), CURRENT_INPUT),
            ctl.playable(SlotKind::Current)
        );
        assert_eq!(g.input_weight(ctl.mixer(), CURRENT_INPUT), 1.0);
        assert_eq!(ctl.playable(SlotKind::Previous), None);
        ctl.shutdown();
    }

    #[test]
    fn accessors_fail_fast_before_a_clip_is_bound() {
        let mut ctl = controller();
        assert_eq!(
            ctl.length().unwrap_err(),
            PlaybackError::SlotUnbound {
                slot: SlotKind::Current
            }
        );
        assert!(ctl.current_clip_name().is_err());
        assert!(ctl.is_ended().is_err());
        assert!(ctl.prev_time().is_err());
        assert!(ctl.prev_clip_name().is_err());
        assert_eq!(ctl.time(), 0.0);
        ctl.shutdown();
    }

    #[test]
    fn play_before_init_keeps_placeholder_as_previous() {
        let mut ctl = controller();
        ctl.play(ClipResource::shared("Hero_Walk", 1.0, true), 0.5);
        assert_eq!(ctl.current_clip_name().unwrap(), "Hero_Walk");
        assert_eq!(ctl.prev_time().unwrap(), 0.0);
        assert_eq!(
            ctl.prev_clip_name().unwrap_err(),
            PlaybackError::SlotUnbound {
                slot: SlotKind::Previous
            }
        );
        ctl.shutdown();
    }

    #[test]
    fn drop_without_shutdown_releases_graph() {
        let mut host = HeadlessHost::new();
        let ctl: CrossFadeController<HeadlessGraph> =
            CrossFadeController::create(&mut host, "Leaky", "rig", ControllerConfig::default())
                .unwrap();
        drop(ctl);
        assert_eq!(host.created_graphs().len(), 1);
    }

    #[test]
    fn invalid_config_is_rejected_at_create() {
        let mut host = HeadlessHost::new();
        let cfg = ControllerConfig {
            default_fade: -0.5,
            ..ControllerConfig::default()
        };
        let res: Result<CrossFadeController<HeadlessGraph>> =
            CrossFadeController::create(&mut host, "Hero", "rig", cfg);
        assert!(matches!(res, Err(PlaybackError::InvalidConfig { .. })));
        assert!(host.created_graphs().is_empty());
    }
}
