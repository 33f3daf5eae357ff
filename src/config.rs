//! Runtime configuration for the control loop.

use anyhow::{bail, Result};

use crate::hand::LandmarkIdx;
use crate::mapping::{ActiveRegion, MappingMode};
use crate::pinch::PinchParams;
use crate::resolution::Resolution;
use crate::smoothing::Smoothing;

/// Everything tunable about the control loop.
///
/// [`Config::default`] is the tuning the crate ships with. Validation
/// happens once, before the loop starts (`Controller::new` calls
/// [`Config::validate`]); a misconfigured threshold relationship is
/// rejected with a descriptive error, never silently fixed up.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Which of the 21 landmarks drives the cursor.
    pub control_landmark: LandmarkIdx,
    /// Smoothing applied to the control landmark.
    pub smoothing: Smoothing,
    /// Consecutive missed frames tolerated before the smoothing state
    /// resets (see [`crate::smoothing::Smoother`]).
    pub miss_threshold: u32,
    /// Pinch press/release thresholds and debounce.
    pub pinch: PinchParams,
    /// Absolute or relative cursor mapping.
    pub mode: MappingMode,
    /// Active region for absolute mapping.
    pub region: ActiveRegion,
    /// Pixels of cursor travel per unit of normalized hand travel
    /// (relative mode only).
    pub sensitivity: f32,
    /// Fixed screen size; `None` queries the injection backend at startup.
    pub screen: Option<Resolution>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            control_landmark: LandmarkIdx::MiddleFingerMcp,
            smoothing: Smoothing::Fixed(0.7),
            miss_threshold: 5,
            pinch: PinchParams::default(),
            mode: MappingMode::Absolute,
            region: ActiveRegion::FULL,
            sensitivity: 1000.0,
            screen: None,
        }
    }
}

impl Config {
    /// Checks parameter ranges and relationships.
    pub fn validate(&self) -> Result<()> {
        match self.smoothing {
            Smoothing::Fixed(alpha) => {
                if !(alpha > 0.0 && alpha < 1.0) {
                    bail!("smoothing factor must be in (0, 1), got {alpha}");
                }
            }
            Smoothing::Adaptive {
                min_factor,
                max_factor,
                low_speed,
                high_speed,
            } => {
                for factor in [min_factor, max_factor] {
                    if !(factor > 0.0 && factor < 1.0) {
                        bail!("adaptive smoothing factors must be in (0, 1), got {factor}");
                    }
                }
                if !(min_factor <= max_factor) {
                    bail!(
                        "adaptive smoothing needs min_factor <= max_factor, \
                         got {min_factor} > {max_factor}"
                    );
                }
                if !(low_speed >= 0.0 && high_speed > low_speed) {
                    bail!(
                        "adaptive smoothing speed band is empty: \
                         low {low_speed}, high {high_speed}"
                    );
                }
            }
        }

        if !(self.pinch.press > 0.0) {
            bail!("pinch press threshold must be positive, got {}", self.pinch.press);
        }
        if !(self.pinch.release > self.pinch.press) {
            bail!(
                "pinch release threshold ({}) must exceed the press threshold ({})",
                self.pinch.release,
                self.pinch.press
            );
        }
        if self.pinch.debounce_frames == 0 {
            bail!("pinch debounce must be at least 1 frame");
        }

        let region = &self.region;
        for (name, margin) in [
            ("left", region.left),
            ("right", region.right),
            ("top", region.top),
            ("bottom", region.bottom),
        ] {
            if !(margin >= 0.0 && margin < 1.0) {
                bail!("active region {name} margin must be in [0, 1), got {margin}");
            }
        }
        if region.left + region.right >= 1.0 || region.top + region.bottom >= 1.0 {
            bail!("active region margins leave no active area");
        }

        if self.mode == MappingMode::Relative && !(self.sensitivity > 0.0) {
            bail!("sensitivity must be positive in relative mode, got {}", self.sensitivity);
        }

        if let Some(screen) = self.screen {
            if screen.width() == 0 || screen.height() == 0 {
                bail!("screen resolution {screen} has a zero dimension");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn adaptive_webcam_tuning_is_valid() {
        let config = Config {
            smoothing: Smoothing::ADAPTIVE_WEBCAM,
            region: ActiveRegion::WEBCAM,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_smoothing() {
        for alpha in [0.0, 1.0, -0.5, 2.0, f32::NAN] {
            let config = Config {
                smoothing: Smoothing::Fixed(alpha),
                ..Config::default()
            };
            assert!(config.validate().is_err(), "accepted alpha {alpha}");
        }
    }

    #[test]
    fn rejects_inverted_pinch_thresholds() {
        let mut config = Config::default();
        config.pinch.press = 0.4;
        config.pinch.release = 0.3;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("must exceed"), "unexpected error: {err}");

        // Equal thresholds are rejected too: no hysteresis gap.
        config.pinch.release = 0.4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_debounce() {
        let mut config = Config::default();
        config.pinch.debounce_frames = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_degenerate_active_region() {
        let config = Config {
            region: ActiveRegion {
                left: 0.6,
                right: 0.4,
                top: 0.0,
                bottom: 0.0,
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_sensitivity_in_relative_mode() {
        let config = Config {
            mode: MappingMode::Relative,
            sensitivity: 0.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_screen_dimension() {
        let config = Config {
            screen: Some(Resolution::new(1920, 0)),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
