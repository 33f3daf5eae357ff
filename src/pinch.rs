//! Pinch click detection.
//!
//! Turns the continuous thumb-index pinch distance into discrete button
//! press/release transitions, with hysteresis between the press and
//! release thresholds and a consecutive-frame debounce on both edges.

/// A discrete button transition emitted by the pinch detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonTransition {
    Down,
    Up,
}

/// Phase of the pinch state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinchPhase {
    #[default]
    Released,
    Pressed,
}

/// Tunable thresholds for pinch detection.
///
/// Distances are normalized to hand scale (see
/// [`HandLandmarks::pinch_distance`][crate::hand::HandLandmarks::pinch_distance]).
/// Hysteresis requires `release > press`; a distance between the two
/// thresholds never causes a transition, which keeps the machine stable
/// while the fingers hover near the boundary.
#[derive(Debug, Clone, Copy)]
pub struct PinchParams {
    /// Distance below which (strictly) the pinch counts as closed.
    pub press: f32,
    /// Distance above which (strictly) the pinch counts as open.
    pub release: f32,
    /// Consecutive frames the crossing condition must hold before a
    /// transition fires. At least 1.
    pub debounce_frames: u32,
}

impl Default for PinchParams {
    fn default() -> Self {
        Self {
            press: 0.3,
            release: 0.4,
            debounce_frames: 2,
        }
    }
}

/// State machine turning per-frame pinch distances into
/// [`ButtonTransition`]s. One instance (plus one [`PinchState`]) per
/// tracked hand.
#[derive(Debug, Clone, Copy)]
pub struct PinchDetector {
    params: PinchParams,
}

/// Mutable state of one hand's pinch machine.
#[derive(Debug, Default)]
pub struct PinchState {
    phase: PinchPhase,
    /// Consecutive frames the pending transition's condition has held.
    streak: u32,
}

impl PinchState {
    pub fn phase(&self) -> PinchPhase {
        self.phase
    }
}

impl PinchDetector {
    pub fn new(params: PinchParams) -> Self {
        Self { params }
    }

    /// Feeds one frame's pinch distance, or `None` when the hand is absent
    /// or produced no usable pinch input this frame.
    ///
    /// Losing the hand while `Pressed` releases immediately, without
    /// debounce. Exact equality with either threshold does not count as a
    /// crossing.
    pub fn update(&self, state: &mut PinchState, distance: Option<f32>) -> Option<ButtonTransition> {
        let Some(distance) = distance else {
            return match state.phase {
                PinchPhase::Pressed => {
                    *state = PinchState::default();
                    Some(ButtonTransition::Up)
                }
                PinchPhase::Released => {
                    state.streak = 0;
                    None
                }
            };
        };

        let (crossing, transition, next) = match state.phase {
            PinchPhase::Released => (
                distance < self.params.press,
                ButtonTransition::Down,
                PinchPhase::Pressed,
            ),
            PinchPhase::Pressed => (
                distance > self.params.release,
                ButtonTransition::Up,
                PinchPhase::Released,
            ),
        };

        if !crossing {
            state.streak = 0;
            return None;
        }

        state.streak += 1;
        if state.streak < self.params.debounce_frames {
            return None;
        }

        state.phase = next;
        state.streak = 0;
        Some(transition)
    }
}
