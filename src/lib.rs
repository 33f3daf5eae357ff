//! Hand-gesture pointer control.
//!
//! This crate turns a per-frame stream of hand landmark detections (21
//! normalized keypoints, as produced by MediaPipe-style hand landmarkers)
//! into desktop pointer movement and debounced pinch clicks. The vision
//! side is deliberately out of scope: detections enter through the
//! [`control::FrameSource`] trait, and pointer events leave through the
//! [`backend::PointerBackend`] trait, so the core can be driven by any
//! camera/model pipeline and tested without either.
//!
//! The per-frame path is: raw landmarks → [`smoothing::Smoother`] →
//! [`mapping::CursorMapper`] → pointer move; raw landmarks →
//! [`pinch::PinchDetector`] → button press/release. [`control::Controller`]
//! sequences both per iteration (move before button, so a click lands at
//! the just-updated position) and guarantees that a held button is released
//! on hand loss, on shutdown, and on injection failure.
//!
//! # Environment Variables
//!
//! * `RUST_LOG`: overrides the default log filtering set up by
//!   [`init_logger!`].

use log::LevelFilter;

pub mod backend;
pub mod config;
pub mod control;
pub mod filter;
pub mod hand;
pub mod mapping;
pub mod pinch;
pub mod resolution;
pub mod smoothing;
pub mod timer;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = if cfg!(debug_assertions) {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// If `cfg!(debug_assertions)` is enabled, the calling crate and this crate
/// will log at *trace* level. Otherwise, they will log at *debug* level.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
