//! Loop timing and throughput measurement.

use std::{
    cell::Cell,
    fmt,
    time::{Duration, Instant},
};

use crate::filter::{ema::EmaState, Ema, Filter};

const EMA_ALPHA: f32 = 0.3;

/// Measures and averages the time a repeated operation takes.
///
/// Timings are smoothed with an EMA so the displayed value tracks the
/// recent cost of the operation rather than its all-time mean.
pub struct Timer {
    name: &'static str,
    ema: Ema,
    ema_state: Cell<EmaState>,
    avg_secs: Cell<f32>,
}

impl Timer {
    /// Creates a new timer.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ema: Ema::new(EMA_ALPHA),
            ema_state: Cell::new(EmaState::default()),
            avg_secs: Cell::new(0.0),
        }
    }

    /// Invokes a closure, measuring and recording the time it takes.
    pub fn time<T>(&self, timee: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = timee();

        let mut state = self.ema_state.get();
        let avg = self.ema.filter(&mut state, start.elapsed().as_secs_f32());
        self.ema_state.set(state);
        self.avg_secs.set(avg);

        result
    }
}

/// Displays the smoothed recorded time.
impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.01}ms", self.name, self.avg_secs.get() * 1000.0)
    }
}

/// Logs frames per second with optional extra data.
pub struct FpsCounter {
    name: String,
    frames: u32,
    start: Instant,
}

impl FpsCounter {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            frames: 0,
            start: Instant::now(),
        }
    }

    /// Advances the frame counter by 1 and logs FPS if one second has
    /// passed.
    pub fn tick(&mut self) {
        self.tick_impl(String::new);
    }

    /// Advances the frame counter by 1 and logs FPS and `extra` data if one
    /// second has passed.
    pub fn tick_with<D: fmt::Display, I: IntoIterator<Item = D>>(&mut self, extra: I) {
        self.tick_impl(|| {
            let items = extra
                .into_iter()
                .map(|item| item.to_string())
                .collect::<Vec<_>>();
            if items.is_empty() {
                String::new()
            } else {
                format!(" ({})", items.join(", "))
            }
        });
    }

    fn tick_impl(&mut self, extra: impl FnOnce() -> String) {
        self.frames += 1;
        if self.start.elapsed() > Duration::from_secs(1) {
            log::debug!("{}: {} FPS{}", self.name, self.frames, extra());

            self.frames = 0;
            self.start = Instant::now();
        }
    }
}
