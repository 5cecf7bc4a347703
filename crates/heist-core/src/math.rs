#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point or direction in arena space.
///
/// The contest is decided on the ground plane: decision logic compares
/// `planar_distance`, which drops the vertical axis, while positions stay
/// 3D for the movement collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(self, other: Vec3) -> f32 {
        (other - self).length()
    }

    /// Distance with the vertical axis ignored.
    pub fn planar_distance(self, other: Vec3) -> f32 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Direction from `self` to `other` on the ground plane, zero-length safe.
    pub fn planar_direction_to(self, other: Vec3) -> Vec3 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        let len = (dx * dx + dz * dz).sqrt();
        if len <= f32::EPSILON {
            return Vec3::ZERO;
        }
        Vec3::new(dx / len, 0.0, dz / len)
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl core::ops::Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl core::ops::Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl core::ops::Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}
