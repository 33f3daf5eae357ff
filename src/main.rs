//! Synthetic-hand demo.
//!
//! Drives the control loop from a scripted hand that sweeps a circle and
//! pinches periodically, standing in for the camera + landmark model. By
//! default intents are only logged; set `AIRMOUSE_INJECT=1` to drive the
//! real pointer.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread;
use std::time::Duration;

use airmouse::backend::{EnigoBackend, TraceBackend};
use airmouse::config::Config;
use airmouse::control::{Controller, FrameSource};
use airmouse::hand::{HandLandmarks, LandmarkIdx, NUM_LANDMARKS};
use airmouse::mapping::ActiveRegion;
use airmouse::resolution::Resolution;
use airmouse::smoothing::Smoothing;

/// How long the demo runs before stopping itself.
const DEMO_DURATION: Duration = Duration::from_secs(30);

/// Scripted stand-in for a live detector: the hand circles the frame
/// center, pinches for a second out of every three, and drops out briefly
/// every few seconds to exercise loss handling.
#[derive(Default)]
struct SyntheticHand {
    frame: u32,
}

impl SyntheticHand {
    fn landmarks(&self) -> HandLandmarks {
        let t = self.frame as f32 * 0.05;
        let x = 0.5 + 0.3 * t.cos();
        let y = 0.5 + 0.3 * t.sin();

        let pinching = (self.frame / 60) % 3 == 1;
        let gap = if pinching { 0.02 } else { 0.15 };

        let mut positions = [[x, y, 0.0]; NUM_LANDMARKS];
        positions[LandmarkIdx::Wrist as usize] = [x, y + 0.2, 0.0];
        positions[LandmarkIdx::ThumbTip as usize] = [x - gap / 2.0, y - 0.1, 0.0];
        positions[LandmarkIdx::IndexFingerTip as usize] = [x + gap / 2.0, y - 0.1, 0.0];
        HandLandmarks::from_positions(positions)
    }
}

impl FrameSource for SyntheticHand {
    fn next_frame(&mut self) -> anyhow::Result<Option<HandLandmarks>> {
        // Camera cadence.
        thread::sleep(Duration::from_millis(16));
        self.frame += 1;

        if self.frame % 300 < 10 {
            return Ok(None);
        }
        Ok(Some(self.landmarks()))
    }
}

fn main() -> anyhow::Result<()> {
    airmouse::init_logger!();

    let config = Config {
        smoothing: Smoothing::ADAPTIVE_WEBCAM,
        region: ActiveRegion::WEBCAM,
        ..Config::default()
    };
    let mut source = SyntheticHand::default();

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = stop.clone();
        thread::spawn(move || {
            thread::sleep(DEMO_DURATION);
            stop.store(true, Ordering::Relaxed);
        });
    }

    if std::env::var_os("AIRMOUSE_INJECT").is_some() {
        let mut backend = EnigoBackend::new()?;
        let screen = match config.screen {
            Some(screen) => screen,
            None => backend.screen_resolution()?,
        };
        log::info!("driving the pointer on a {screen} display");
        Controller::new(&config, screen)?.run(&mut source, &mut backend, &stop)
    } else {
        let screen = config.screen.unwrap_or(Resolution::RES_1080P);
        log::info!("dry run on a virtual {screen} display (set AIRMOUSE_INJECT=1 to inject)");
        Controller::new(&config, screen)?.run(&mut source, &mut TraceBackend, &stop)
    }
}
