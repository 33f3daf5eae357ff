//! Camera-space to screen-space cursor mapping.

use nalgebra::{Point2, Vector2};

use crate::resolution::Resolution;

/// How smoothed camera-space points drive the on-screen cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingMode {
    /// The camera frame (or its active region) is rescaled to the full
    /// screen extent; a given hand position always means the same screen
    /// position.
    Absolute,
    /// Per-frame deltas of the smoothed point, scaled by a sensitivity
    /// factor, are accumulated onto a cursor position.
    Relative,
}

/// The sub-rectangle of camera space mapped to the full screen, expressed
/// as margins cut off each side of the frame (fractions of the frame in
/// `[0, 1)`).
///
/// Shrinking the active region lets comfortable hand motion near the frame
/// center cover the whole screen.
#[derive(Debug, Clone, Copy)]
pub struct ActiveRegion {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl ActiveRegion {
    /// The full camera frame: no margins.
    pub const FULL: Self = Self {
        left: 0.0,
        right: 0.0,
        top: 0.0,
        bottom: 0.0,
    };

    /// Margins tuned for a hand held in front of a webcam. The top and left
    /// bands are wider because landmarks get unreliable where the hand
    /// starts leaving the frame.
    pub const WEBCAM: Self = Self {
        left: 0.3,
        right: 0.1,
        top: 0.3,
        bottom: 0.15,
    };

    /// Rescales `point` so the region covers `[0, 1]²`, clamping points
    /// outside the region onto its edge.
    fn apply(&self, point: Point2<f32>) -> Point2<f32> {
        let width = 1.0 - self.left - self.right;
        let height = 1.0 - self.top - self.bottom;
        Point2::new(
            ((point.x - self.left) / width).clamp(0.0, 1.0),
            ((point.y - self.top) / height).clamp(0.0, 1.0),
        )
    }
}

/// Maps smoothed camera-space points to clamped screen coordinates.
///
/// Mapping is deterministic: the same point, prior state and configuration
/// always produce the same output.
#[derive(Debug, Clone, Copy)]
pub struct CursorMapper {
    mode: MappingMode,
    region: ActiveRegion,
    sensitivity: f32,
    screen: Resolution,
}

/// Mutable state owned by one mapped cursor.
#[derive(Debug, Clone, Copy)]
pub struct MapperState {
    /// Previous smoothed point, the anchor for relative deltas.
    anchor: Option<Point2<f32>>,
    /// Accumulated cursor position (relative mode), kept unrounded.
    cursor: Point2<f32>,
}

impl MapperState {
    /// Forgets the relative-mode anchor.
    ///
    /// Called when tracking is lost so that the next acquisition does not
    /// replay the hand's travel during the gap as one large jump. The
    /// accumulated cursor position is kept.
    pub fn interrupt(&mut self) {
        self.anchor = None;
    }
}

impl CursorMapper {
    pub fn new(
        mode: MappingMode,
        region: ActiveRegion,
        sensitivity: f32,
        screen: Resolution,
    ) -> Self {
        Self {
            mode,
            region,
            sensitivity,
            screen,
        }
    }

    /// Returns the state a fresh cursor starts from: no anchor, cursor at
    /// the screen center.
    pub fn initial_state(&self) -> MapperState {
        MapperState {
            anchor: None,
            cursor: Point2::new(
                self.screen.width() as f32 / 2.0,
                self.screen.height() as f32 / 2.0,
            ),
        }
    }

    /// Maps one smoothed point to screen pixels, clamped to
    /// `[0, width-1] x [0, height-1]`.
    pub fn map(&self, state: &mut MapperState, point: Point2<f32>) -> (i32, i32) {
        match self.mode {
            MappingMode::Absolute => {
                let norm = self.region.apply(point);
                self.clamp_to_screen(
                    norm.x * self.screen.width() as f32,
                    norm.y * self.screen.height() as f32,
                )
            }
            MappingMode::Relative => {
                let delta = match state.anchor {
                    Some(anchor) => (point - anchor) * self.sensitivity,
                    None => Vector2::zeros(),
                };
                state.anchor = Some(point);

                let target = state.cursor + delta;
                state.cursor = Point2::new(
                    target.x.clamp(0.0, (self.screen.width() - 1) as f32),
                    target.y.clamp(0.0, (self.screen.height() - 1) as f32),
                );
                (
                    state.cursor.x.round() as i32,
                    state.cursor.y.round() as i32,
                )
            }
        }
    }

    fn clamp_to_screen(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x.round() as i32).clamp(0, self.screen.width() as i32 - 1),
            (y.round() as i32).clamp(0, self.screen.height() as i32 - 1),
        )
    }
}
