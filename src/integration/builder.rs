//! Builder for creating Detection objects from detector outputs.

use crate::tracker::{Detection, Pose};

/// Builder for creating `Detection` objects from various detector outputs.
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    id: u32,
    center: Option<[f32; 2]>,
    confidence: Option<f32>,
    pose: Option<Pose>,
}

impl DetectionBuilder {
    /// Create a new detection builder for the given marker identity.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Set the marker center in pixels.
    pub fn center(mut self, x: f32, y: f32) -> Self {
        self.center = Some([x, y]);
        self
    }

    /// Set the marker center from its four corner points.
    pub fn corners(mut self, corners: [[f32; 2]; 4]) -> Self {
        let (sx, sy) = corners
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
        self.center = Some([sx / 4.0, sy / 4.0]);
        self
    }

    /// Set the detector confidence.
    pub fn confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Attach an estimated marker pose.
    pub fn pose(mut self, pose: Pose) -> Self {
        self.pose = Some(pose);
        self
    }

    /// Build the final `Detection`.
    pub fn build(self) -> Detection {
        Detection {
            id: self.id,
            center: self.center,
            confidence: self.confidence,
            pose: self.pose,
        }
    }
}
