//! Marker pose relative to the camera, for overlays only.

use nalgebra::{Matrix3, Vector3};

/// Rigid transform of a marker in camera coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Marker center in meters
    pub translation: Vector3<f64>,
    /// Marker orientation
    pub rotation: Matrix3<f64>,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: Matrix3::identity(),
        }
    }
}

impl Pose {
    /// Pose from a camera-frame translation and rotation.
    pub fn new(translation: Vector3<f64>, rotation: Matrix3<f64>) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Distance from the camera center in meters.
    pub fn distance(&self) -> f64 {
        self.translation.norm()
    }

    /// Yaw, pitch and roll in radians (Z-Y-X convention).
    pub fn yaw_pitch_roll(&self) -> (f64, f64, f64) {
        let r = &self.rotation;
        let yaw = r[(1, 0)].atan2(r[(0, 0)]);
        let (s, c) = yaw.sin_cos();
        let pitch = (-r[(2, 0)]).atan2(r[(0, 0)] * c + r[(1, 0)] * s);
        let roll = (r[(0, 2)] * s - r[(1, 2)] * c).atan2(-r[(0, 1)] * s + r[(1, 1)] * c);
        (yaw, pitch, roll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Rotation3;

    #[test]
    fn test_distance() {
        let pose = Pose::new(Vector3::new(0.3, 0.0, 0.4), Matrix3::identity());
        assert!((pose.distance() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_yaw_pitch_roll_recovers_angles() {
        let (roll, pitch, yaw) = (0.1, -0.2, 0.3);
        let rotation = Rotation3::from_euler_angles(roll, pitch, yaw).into_inner();
        let pose = Pose::new(Vector3::zeros(), rotation);
        let (y, p, r) = pose.yaw_pitch_roll();
        assert!((y - yaw).abs() < 1e-9);
        assert!((p - pitch).abs() < 1e-9);
        assert!((r - roll).abs() < 1e-9);
    }
}
