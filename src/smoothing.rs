//! Cursor smoothing with tracking-loss handling.

use nalgebra::Point2;

use crate::filter::{ema::EmaState, Ema, Filter};

/// Smoothing-factor selection for the cursor smoother.
#[derive(Debug, Clone, Copy)]
pub enum Smoothing {
    /// One fixed factor in `(0, 1)` applied to every frame. Closer to 1.0
    /// favors responsiveness, closer to 0.0 favors stability.
    Fixed(f32),
    /// Factor interpolated from the raw control point's per-frame speed:
    /// `min_factor` at or below `low_speed` (suppresses hover jitter),
    /// `max_factor` at or above `high_speed` (keeps deliberate motion
    /// responsive), linear in between. Speeds are in normalized image
    /// units per frame.
    Adaptive {
        min_factor: f32,
        max_factor: f32,
        low_speed: f32,
        high_speed: f32,
    },
}

impl Smoothing {
    /// Adaptive tuning for a hand tracked through a webcam feed: heavy
    /// smoothing while the hand hovers, quick response once it moves
    /// deliberately.
    pub const ADAPTIVE_WEBCAM: Self = Self::Adaptive {
        min_factor: 0.2,
        max_factor: 0.85,
        low_speed: 0.003,
        high_speed: 0.025,
    };
}

/// Per-axis EMA smoother for the control point, with miss tracking.
///
/// Missed frames leave the accumulated position untouched, but once the
/// hand has been missing for more than `miss_threshold` consecutive frames
/// the state resets to uninitialized, so a re-acquisition after a long gap
/// starts from the fresh detection instead of blending with a stale
/// pre-gap position.
#[derive(Debug, Clone, Copy)]
pub struct Smoother {
    smoothing: Smoothing,
    miss_threshold: u32,
}

/// State owned by one smoothed cursor.
///
/// A default state is uninitialized; the first point pushed through it is
/// returned exactly.
#[derive(Debug, Default)]
pub struct SmootherState {
    x: EmaState,
    y: EmaState,
    prev_raw: Option<Point2<f32>>,
    misses: u32,
}

impl Smoother {
    pub fn new(smoothing: Smoothing, miss_threshold: u32) -> Self {
        Self {
            smoothing,
            miss_threshold,
        }
    }

    /// Feeds one frame's raw control point (or `None` when the hand was not
    /// detected) into the smoother, returning the smoothed position.
    ///
    /// Raw coordinates are clamped to `[0, 1]` before blending to guard
    /// against out-of-range detector output. The output is `None` exactly
    /// when the input is.
    pub fn filter(
        &self,
        state: &mut SmootherState,
        raw: Option<Point2<f32>>,
    ) -> Option<Point2<f32>> {
        let raw = match raw {
            Some(point) => clamp_unit(point),
            None => {
                state.misses += 1;
                if state.misses > self.miss_threshold {
                    *state = SmootherState::default();
                }
                return None;
            }
        };

        state.misses = 0;
        let ema = Ema::new(self.alpha_for(state, raw));
        let smoothed = Point2::new(
            ema.filter(&mut state.x, raw.x),
            ema.filter(&mut state.y, raw.y),
        );
        state.prev_raw = Some(raw);
        Some(smoothed)
    }

    fn alpha_for(&self, state: &SmootherState, raw: Point2<f32>) -> f32 {
        match self.smoothing {
            Smoothing::Fixed(alpha) => alpha,
            Smoothing::Adaptive {
                min_factor,
                max_factor,
                low_speed,
                high_speed,
            } => {
                let speed = match state.prev_raw {
                    Some(prev) => (raw - prev).norm(),
                    None => return max_factor,
                };
                if speed <= low_speed {
                    min_factor
                } else if speed >= high_speed {
                    max_factor
                } else {
                    let t = (speed - low_speed) / (high_speed - low_speed);
                    min_factor + t * (max_factor - min_factor)
                }
            }
        }
    }
}

fn clamp_unit(point: Point2<f32>) -> Point2<f32> {
    Point2::new(point.x.clamp(0.0, 1.0), point.y.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn p(x: f32, y: f32) -> Point2<f32> {
        Point2::new(x, y)
    }

    #[test]
    fn first_sample_passes_through() {
        let smoother = Smoother::new(Smoothing::Fixed(0.3), 5);
        let mut state = SmootherState::default();
        assert_eq!(smoother.filter(&mut state, Some(p(0.25, 0.75))), Some(p(0.25, 0.75)));
    }

    #[test]
    fn blends_per_axis() {
        let smoother = Smoother::new(Smoothing::Fixed(0.5), 5);
        let mut state = SmootherState::default();
        smoother.filter(&mut state, Some(p(0.0, 0.0)));
        assert_eq!(smoother.filter(&mut state, Some(p(1.0, 0.5))), Some(p(0.5, 0.25)));
    }

    #[test]
    fn out_of_range_input_is_clamped_before_blending() {
        let smoother = Smoother::new(Smoothing::Fixed(0.5), 5);
        let mut state = SmootherState::default();
        assert_eq!(smoother.filter(&mut state, Some(p(1.5, -0.25))), Some(p(1.0, 0.0)));
    }

    #[test]
    fn short_gap_keeps_blending_with_pre_gap_position() {
        let smoother = Smoother::new(Smoothing::Fixed(0.5), 2);
        let mut state = SmootherState::default();
        smoother.filter(&mut state, Some(p(0.2, 0.2)));

        assert_eq!(smoother.filter(&mut state, None), None);
        assert_eq!(smoother.filter(&mut state, None), None);

        // Two misses do not exceed the threshold of 2, so the next sample
        // still blends with the pre-gap position.
        assert_eq!(smoother.filter(&mut state, Some(p(0.8, 0.8))), Some(p(0.5, 0.5)));
    }

    #[test]
    fn long_gap_resets_to_fresh_detection() {
        let smoother = Smoother::new(Smoothing::Fixed(0.5), 2);
        let mut state = SmootherState::default();
        smoother.filter(&mut state, Some(p(0.2, 0.2)));

        for _ in 0..3 {
            assert_eq!(smoother.filter(&mut state, None), None);
        }

        assert_eq!(smoother.filter(&mut state, Some(p(0.8, 0.8))), Some(p(0.8, 0.8)));
    }

    #[test]
    fn adaptive_alpha_tracks_speed() {
        let smoothing = Smoothing::Adaptive {
            min_factor: 0.2,
            max_factor: 0.8,
            low_speed: 0.01,
            high_speed: 0.05,
        };
        let smoother = Smoother::new(smoothing, 5);

        // Hovering: per-frame travel below the low-speed threshold.
        let mut state = SmootherState::default();
        smoother.filter(&mut state, Some(p(0.5, 0.5)));
        let out = smoother.filter(&mut state, Some(p(0.505, 0.5))).unwrap();
        assert_relative_eq!(out.x, 0.2 * 0.505 + 0.8 * 0.5, max_relative = 1e-5);

        // Deliberate motion: travel above the high-speed threshold.
        let mut state = SmootherState::default();
        smoother.filter(&mut state, Some(p(0.5, 0.5)));
        let out = smoother.filter(&mut state, Some(p(0.6, 0.5))).unwrap();
        assert_relative_eq!(out.x, 0.8 * 0.6 + 0.2 * 0.5, max_relative = 1e-5);

        // Halfway through the band: factor interpolates linearly.
        let mut state = SmootherState::default();
        smoother.filter(&mut state, Some(p(0.5, 0.5)));
        let out = smoother.filter(&mut state, Some(p(0.53, 0.5))).unwrap();
        assert_relative_eq!(out.x, 0.5 * 0.53 + 0.5 * 0.5, max_relative = 1e-4);
    }
}
