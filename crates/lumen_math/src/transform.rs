// Transform utilities for DMat3
//
// The instance wrappers only need rotations, so these helpers stay on the
// 3x3 matrix type rather than a full affine transform.

use crate::Aabb;
use glam::DMat3;

/// Extension trait for DMat3 with bounding box support.
pub trait Mat3Ext {
    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl Mat3Ext for DMat3 {
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        let corners = aabb.corners();

        let first = *self * corners[0];
        let (min, max) = corners[1..]
            .iter()
            .map(|&corner| *self * corner)
            .fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));

        Aabb::from_points(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point3, Vec3};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_transform_aabb_identity() {
        let aabb = Aabb::from_points(Point3::ZERO, Point3::ONE);
        let transformed = DMat3::IDENTITY.transform_aabb(&aabb);

        assert!((transformed.min() - aabb.min()).length() < 1e-12);
        assert!((transformed.max() - aabb.max()).length() < 1e-12);
    }

    #[test]
    fn test_transform_aabb_rotation_y() {
        // Rotating +X by 90 degrees about Y lands on -Z
        let aabb = Aabb::from_points(Point3::ZERO, Point3::new(2.0, 1.0, 1.0));
        let transformed = DMat3::from_rotation_y(FRAC_PI_2).transform_aabb(&aabb);

        assert!((transformed.min() - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-9);
        assert!((transformed.max() - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_rotation_y_inverse_round_trip() {
        let rotation = DMat3::from_rotation_y(0.7);
        let p = Point3::new(5.0, 3.0, 2.0);

        let back = rotation.transpose() * (rotation * p);
        assert!((back - p).length() < 1e-12);
    }
}
