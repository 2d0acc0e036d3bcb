//! Small vector toolkit for lighting calculations.

use std::ops::{Mul, Sub};

/// A 3-component vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction. The zero vector is returned unchanged.
    #[inline]
    pub fn normalize(self) -> Vec3 {
        let len = self.length();
        if len == 0.0 {
            self
        } else {
            Vec3::new(self.x / len, self.y / len, self.z / len)
        }
    }

    /// Mirror `self` about `normal`: `2 (n·l) n - l`.
    ///
    /// `normal` must be unit length.
    #[inline]
    pub fn reflect(self, normal: Vec3) -> Vec3 {
        normal * (2.0 * normal.dot(self)) - self
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, s: f64) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    #[inline]
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let v = Vec3::new(3.0, 0.0, 4.0).normalize();
        assert!((v.length() - 1.0).abs() < 1e-12);
        assert!((v.x - 0.6).abs() < 1e-12);
        assert_eq!(Vec3::new(0.0, 0.0, 0.0).normalize(), Vec3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_reflect_about_z() {
        // A light straight overhead reflects back onto itself
        let up = Vec3::new(0.0, 0.0, 1.0);
        assert_eq!(up.reflect(up), up);

        let l = Vec3::new(-0.5, -0.5, 0.7).normalize();
        let r = l.reflect(up);
        assert!((r.x + l.x).abs() < 1e-12);
        assert!((r.y + l.y).abs() < 1e-12);
        assert!((r.z - l.z).abs() < 1e-12);
    }
}
