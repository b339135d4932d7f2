//! Lumen math types.
//!
//! Double-precision vectors come straight from glam; this crate adds the
//! ray tracing primitives built on top of them.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;
mod transform;
mod vec;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::Mat3Ext;
pub use vec::Vec3Ext;

/// Three-component f64 vector used for points, directions, and colors.
pub type Vec3 = DVec3;

/// A position in world or object space.
pub type Point3 = DVec3;

/// Linear RGB color. Components are nominally in [0, 1] but lights exceed 1.
pub type Color = DVec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_unit_vector_idempotent() {
        let vectors = [
            Vec3::new(3.0, -4.0, 12.0),
            Vec3::new(1e-3, 2e-3, -5e-4),
            Vec3::new(-250.0, 1.0, 0.5),
        ];

        for v in vectors {
            let once = v.normalize();
            let twice = once.normalize();
            assert!((once - twice).length() < 1e-12);
            assert!((once.length() - 1.0).abs() < 1e-12);
        }
    }
}
