//! Hand landmark samples produced by the external detector.

use nalgebra::{Point2, Point3};

/// Number of landmarks in a hand detection.
pub const NUM_LANDMARKS: usize = 21;

/// Reference hand-scale lengths below this are considered degenerate.
const MIN_HAND_SCALE: f32 = 1e-4;

/// Names for the hand landmark indices produced by MediaPipe-style hand
/// landmarkers.
///
/// The numeric value of each variant is its index into a detection's
/// landmark list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandmarkIdx {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// The hand landmarks detected in a single frame.
///
/// Coordinates are normalized image coordinates: `x` and `y` are nominally
/// in `[0.0, 1.0]` (detector noise can push them slightly outside, which
/// downstream consumers clamp), `z` is a relative depth value. A sample is
/// immutable once built; the control loop consumes it synchronously and
/// discards it.
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    positions: [[f32; 3]; NUM_LANDMARKS],
}

impl HandLandmarks {
    /// Creates a sample from 21 landmark positions in detection order.
    pub fn from_positions(positions: [[f32; 3]; NUM_LANDMARKS]) -> Self {
        Self { positions }
    }

    /// Returns a landmark's 3D position.
    pub fn position(&self, index: LandmarkIdx) -> Point3<f32> {
        let [x, y, z] = self.positions[index as usize];
        Point3::new(x, y, z)
    }

    /// Returns a landmark's position in the image plane.
    pub fn position_2d(&self, index: LandmarkIdx) -> Point2<f32> {
        let [x, y, _] = self.positions[index as usize];
        Point2::new(x, y)
    }

    /// Computes the normalized pinch distance: the thumb-tip/index-tip
    /// separation in the image plane, divided by the hand-scale reference
    /// length so the value stays comparable as the hand moves toward or
    /// away from the camera.
    ///
    /// Returns `None` if the reference length is degenerate (malformed
    /// detection); callers treat such a frame as having no usable pinch
    /// input.
    pub fn pinch_distance(&self) -> Option<f32> {
        let scale = self.hand_scale();
        if scale < MIN_HAND_SCALE {
            return None;
        }

        let thumb = self.position_2d(LandmarkIdx::ThumbTip);
        let index = self.position_2d(LandmarkIdx::IndexFingerTip);
        Some((thumb - index).norm() / scale)
    }

    /// The wrist-to-middle-MCP length, used as the hand-size reference.
    fn hand_scale(&self) -> f32 {
        let wrist = self.position_2d(LandmarkIdx::Wrist);
        let middle_mcp = self.position_2d(LandmarkIdx::MiddleFingerMcp);
        (wrist - middle_mcp).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(wrist: [f32; 2], middle_mcp: [f32; 2], thumb: [f32; 2], index: [f32; 2]) -> HandLandmarks {
        let mut positions = [[0.5, 0.5, 0.0]; NUM_LANDMARKS];
        positions[LandmarkIdx::Wrist as usize] = [wrist[0], wrist[1], 0.0];
        positions[LandmarkIdx::MiddleFingerMcp as usize] = [middle_mcp[0], middle_mcp[1], 0.0];
        positions[LandmarkIdx::ThumbTip as usize] = [thumb[0], thumb[1], 0.0];
        positions[LandmarkIdx::IndexFingerTip as usize] = [index[0], index[1], 0.0];
        HandLandmarks::from_positions(positions)
    }

    #[test]
    fn landmark_indices_match_detection_order() {
        assert_eq!(LandmarkIdx::Wrist as usize, 0);
        assert_eq!(LandmarkIdx::ThumbTip as usize, 4);
        assert_eq!(LandmarkIdx::IndexFingerTip as usize, 8);
        assert_eq!(LandmarkIdx::MiddleFingerMcp as usize, 9);
        assert_eq!(LandmarkIdx::PinkyTip as usize, NUM_LANDMARKS - 1);
    }

    #[test]
    fn pinch_distance_is_scale_invariant() {
        // Same pose at two hand sizes.
        let small = sample([0.5, 0.6], [0.5, 0.5], [0.45, 0.4], [0.49, 0.4]);
        let large = sample([0.5, 0.7], [0.5, 0.5], [0.4, 0.3], [0.48, 0.3]);

        let d_small = small.pinch_distance().unwrap();
        let d_large = large.pinch_distance().unwrap();
        approx::assert_relative_eq!(d_small, 0.04 / 0.1, max_relative = 1e-5);
        approx::assert_relative_eq!(d_small, d_large, max_relative = 1e-5);
    }

    #[test]
    fn degenerate_hand_scale_yields_no_distance() {
        let collapsed = sample([0.5, 0.5], [0.5, 0.5], [0.4, 0.4], [0.6, 0.6]);
        assert_eq!(collapsed.pinch_distance(), None);
    }
}
