//! Poses as the host transform hierarchy reports them.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Position plus local Euler angles.
///
/// Angles are in degrees, X = pitch, Y = yaw, Z = roll. The host reports them
/// in `[0, 360)`; [`normalize_angle`] maps them into `(-180, 180]` before any
/// limit comparison.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    #[serde(default)]
    pub euler: Vec3,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        euler: Vec3::ZERO,
    };

    /// A pose with no rotation.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            euler: Vec3::ZERO,
        }
    }

    /// Whether every component is a finite number.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.euler.is_finite()
    }

    /// The same pose moved to `position`.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// The same pose rotated to `euler`.
    pub fn with_euler(mut self, euler: Vec3) -> Self {
        self.euler = euler;
        self
    }

    /// Pitch normalized to `(-180, 180]`.
    pub fn pitch(&self) -> f32 {
        normalize_angle(self.euler.x)
    }

    /// Yaw normalized to `(-180, 180]`.
    pub fn yaw(&self) -> f32 {
        normalize_angle(self.euler.y)
    }
}

/// Map any angle in degrees to `(-180, 180]`.
///
/// 180 stays 180, 181 becomes -179, 359 becomes -1.
pub fn normalize_angle(degrees: f32) -> f32 {
    let wrapped = wrap_angle(degrees);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Map any angle in degrees to `[0, 360)`, the range the host reports.
pub fn wrap_angle(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Euler angles that turn a `+Z`-forward object at `from` to face `to`.
///
/// Returns `(pitch, yaw, 0)` in `[0, 360)`. Positive pitch tilts the forward
/// axis downward. Returns `None` when the two points coincide.
pub fn look_at_euler(from: Vec3, to: Vec3) -> Option<Vec3> {
    let dir = to - from;
    if dir.length_squared() <= f32::EPSILON {
        return None;
    }
    let horizontal = (dir.x * dir.x + dir.z * dir.z).sqrt();
    let yaw = dir.x.atan2(dir.z).to_degrees();
    let pitch = (-dir.y).atan2(horizontal).to_degrees();
    Some(Vec3::new(wrap_angle(pitch), wrap_angle(yaw), 0.0))
}
