//! Cross-fade timing as an explicit state machine.
//!
//! A fade moves through `Idle -> Requested -> Blending -> Idle`. [`advance`] is the whole
//! per-tick step: it takes the state and the controller clock and returns the next state plus
//! the slot weights to push into the mixer. It has no side effects, so it can be driven and
//! tested without a graph.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FadePhase {
    /// No fade in flight.
    Idle,
    /// `play` was called; slots are rewired on the next tick.
    Requested,
    /// Weights are interpolating toward the current slot.
    Blending,
}

impl FadePhase {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Requested => "requested",
            Self::Blending => "blending",
        }
    }
}

/// Mixer weights of the two playback slots.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotWeights {
    pub current: f32,
    pub previous: f32,
}

impl SlotWeights {
    /// Only the current slot contributes.
    pub const SETTLED: Self = Self {
        current: 1.0,
        previous: 0.0,
    };

    /// First frame of a fade: only the previous slot contributes.
    pub const FADE_START: Self = Self {
        current: 0.0,
        previous: 1.0,
    };

    /// Weights for a fade with `remaining` (0..=1) of its duration left.
    #[inline]
    pub fn from_remaining(remaining: f32) -> Self {
        Self {
            current: 1.0 - remaining,
            previous: remaining,
        }
    }
}

impl Default for SlotWeights {
    fn default() -> Self {
        Self::SETTLED
    }
}

/// Timing of the fade in flight. Times are on the controller clock, in seconds.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FadeState {
    pub phase: FadePhase,
    /// Configured fade duration.
    pub duration: f32,
    pub start: f32,
    pub deadline: f32,
}

impl FadeState {
    pub const IDLE: Self = Self {
        phase: FadePhase::Idle,
        duration: 0.0,
        start: 0.0,
        deadline: 0.0,
    };

    /// A fade waiting for its setup tick.
    pub fn requested(duration: f32) -> Self {
        Self {
            phase: FadePhase::Requested,
            duration,
            start: 0.0,
            deadline: 0.0,
        }
    }

    /// True while a fade is requested or blending.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase != FadePhase::Idle
    }

    /// Fraction of the fade still ahead at `now`, clamped to `[0, 1]`.
    pub fn remaining_fraction(&self, now: f32) -> f32 {
        match self.phase {
            FadePhase::Idle => 0.0,
            FadePhase::Requested => 1.0,
            FadePhase::Blending => {
                if self.duration <= 0.0 {
                    0.0
                } else {
                    ((self.deadline - now) / self.duration).clamp(0.0, 1.0)
                }
            }
        }
    }
}

impl Default for FadeState {
    fn default() -> Self {
        Self::IDLE
    }
}

/// One fade step at clock time `now`.
///
/// - `Idle`: nothing to do, no weights.
/// - `Requested`: the fade starts now (`deadline = now + duration`) and the blending step
///   below runs in the same call.
/// - `Blending`: before the deadline the previous slot keeps the remaining fraction of the
///   duration as its weight; at or past the deadline the weights settle on the current slot
///   and the state returns to `Idle`.
///
/// A fade with `duration <= 0` settles on the step that sees it blending. Weights always stay
/// within `[0, 1]`.
pub fn advance(state: FadeState, now: f32) -> (FadeState, Option<SlotWeights>) {
    let state = match state.phase {
        FadePhase::Idle => return (state, None),
        FadePhase::Requested => FadeState {
            phase: FadePhase::Blending,
            duration: state.duration,
            start: now,
            deadline: now + state.duration,
        },
        FadePhase::Blending => state,
    };

    let remaining = state.remaining_fraction(now);
    if remaining > 0.0 {
        (state, Some(SlotWeights::from_remaining(remaining)))
    } else {
        (FadeState::IDLE, Some(SlotWeights::SETTLED))
    }
}
