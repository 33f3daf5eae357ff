//! The per-frame control loop.
//!
//! [`Controller`] owns all per-hand mutable state and turns each incoming
//! frame into pointer intents: at most one [`PointerIntent::Move`] and at
//! most one button transition per iteration, move first, so a click always
//! lands at the just-updated position.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;

use crate::backend::PointerBackend;
use crate::config::Config;
use crate::hand::{HandLandmarks, LandmarkIdx};
use crate::mapping::{CursorMapper, MapperState};
use crate::pinch::{ButtonTransition, PinchDetector, PinchPhase, PinchState};
use crate::resolution::Resolution;
use crate::smoothing::{Smoother, SmootherState};
use crate::timer::{FpsCounter, Timer};

/// A pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
    Middle,
}

/// A single pointer action, consumed immediately by the injection backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerIntent {
    /// Move the pointer to absolute screen coordinates.
    Move(i32, i32),
    ButtonDown(Button),
    ButtonUp(Button),
}

/// Per-frame source of hand detections.
///
/// This is the seam to the external landmark detector: `Ok(None)` means
/// "no hand this frame". Errors are transient by contract — the loop
/// treats a failed call like a missed detection and carries on.
pub trait FrameSource {
    fn next_frame(&mut self) -> anyhow::Result<Option<HandLandmarks>>;
}

/// Sequences smoothing, mapping and pinch detection for one tracked hand.
pub struct Controller {
    control_landmark: LandmarkIdx,
    smoother: Smoother,
    smoother_state: SmootherState,
    mapper: CursorMapper,
    mapper_state: MapperState,
    pinch: PinchDetector,
    pinch_state: PinchState,
}

impl Controller {
    /// Validates `config` and builds a controller for a screen of the
    /// given size.
    pub fn new(config: &Config, screen: Resolution) -> anyhow::Result<Self> {
        config.validate()?;

        let mapper = CursorMapper::new(config.mode, config.region, config.sensitivity, screen);
        Ok(Self {
            control_landmark: config.control_landmark,
            smoother: Smoother::new(config.smoothing, config.miss_threshold),
            smoother_state: SmootherState::default(),
            mapper_state: mapper.initial_state(),
            mapper,
            pinch: PinchDetector::new(config.pinch),
            pinch_state: PinchState::default(),
        })
    }

    /// Runs one control-loop iteration on a frame's detection result.
    ///
    /// Returns the intents to dispatch, in order. A frame without a hand
    /// produces no `Move`, but a fail-safe release still fires if the hand
    /// vanished while the button was held.
    pub fn step(&mut self, frame: Option<&HandLandmarks>) -> Vec<PointerIntent> {
        let raw = frame.map(|hand| hand.position_2d(self.control_landmark));
        let smoothed = self.smoother.filter(&mut self.smoother_state, raw);

        let mut intents = Vec::with_capacity(2);
        match smoothed {
            Some(point) => {
                let (x, y) = self.mapper.map(&mut self.mapper_state, point);
                intents.push(PointerIntent::Move(x, y));
            }
            None => self.mapper_state.interrupt(),
        }

        let distance = frame.and_then(HandLandmarks::pinch_distance);
        if let Some(transition) = self.pinch.update(&mut self.pinch_state, distance) {
            intents.push(match transition {
                ButtonTransition::Down => PointerIntent::ButtonDown(Button::Left),
                ButtonTransition::Up => PointerIntent::ButtonUp(Button::Left),
            });
        }

        intents
    }

    /// Releases the button if the pinch machine currently holds it.
    ///
    /// This is the fail-safe used on shutdown and teardown paths; the OS
    /// pointer must never be left in a stuck-down state.
    pub fn release_if_pressed(&mut self) -> Option<PointerIntent> {
        match self.pinch_state.phase() {
            PinchPhase::Pressed => self
                .pinch
                .update(&mut self.pinch_state, None)
                .map(|_| PointerIntent::ButtonUp(Button::Left)),
            PinchPhase::Released => None,
        }
    }

    /// Drives the loop until `stop` is observed, dispatching intents to
    /// `backend`.
    ///
    /// A failing source call is treated as a missed detection for that
    /// iteration. A failing backend call is fatal and propagated, but the
    /// fail-safe release is attempted first; the same release runs when
    /// `stop` ends the loop.
    pub fn run(
        &mut self,
        source: &mut dyn FrameSource,
        backend: &mut dyn PointerBackend,
        stop: &AtomicBool,
    ) -> anyhow::Result<()> {
        let mut fps = FpsCounter::new("control loop");
        let t_detect = Timer::new("detect");

        while !stop.load(Ordering::Relaxed) {
            let frame = match t_detect.time(|| source.next_frame()) {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!("landmark source failed, treating as missed frame: {e:#}");
                    None
                }
            };

            for intent in self.step(frame.as_ref()) {
                if let Err(e) = backend.dispatch(&intent) {
                    if let Some(up) = self.release_if_pressed() {
                        let _ = backend.dispatch(&up);
                    }
                    return Err(e).with_context(|| format!("dispatching {intent:?}"));
                }
            }

            fps.tick_with([&t_detect]);
        }

        log::info!("stop requested, shutting down");
        if let Some(up) = self.release_if_pressed() {
            backend
                .dispatch(&up)
                .context("fail-safe release on shutdown")?;
        }
        Ok(())
    }
}
