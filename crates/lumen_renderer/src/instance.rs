//! Instance wrappers that place a shared hittable in the world.
//!
//! Both wrappers move the ray into the object's local space, test the inner
//! hittable there, and move the hit back out. The inner object is shared, so
//! one prototype can be placed many times.

use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable};
use lumen_math::{Aabb, DMat3, Interval, Mat3Ext, Ray, Vec3};
use rand::RngCore;

/// Offsets an object by a fixed vector.
pub struct Translate {
    object: Arc<dyn Hittable>,
    offset: Vec3,
    bbox: Aabb,
}

impl Translate {
    pub fn new(object: Arc<dyn Hittable>, offset: Vec3) -> Self {
        let bbox = object.bounding_box().translate(offset);
        Self { object, offset, bbox }
    }
}

impl Hittable for Translate {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        let offset_ray = Ray::new(ray.origin() - self.offset, ray.direction(), ray.time());

        if !self.object.hit(&offset_ray, ray_t, rec, rng) {
            return false;
        }

        rec.p += self.offset;
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// Rotates an object about the world Y axis.
pub struct RotateY {
    object: Arc<dyn Hittable>,
    /// Object space to world space
    rotation: DMat3,
    /// World space to object space (the transpose, since rotations are orthonormal)
    inverse: DMat3,
    bbox: Aabb,
}

impl RotateY {
    /// Rotate by `angle` degrees, counter-clockwise looking down -Y.
    pub fn new(object: Arc<dyn Hittable>, angle: f64) -> Self {
        let rotation = DMat3::from_rotation_y(angle.to_radians());
        let bbox = rotation.transform_aabb(&object.bounding_box());

        Self {
            object,
            rotation,
            inverse: rotation.transpose(),
            bbox,
        }
    }
}

impl Hittable for RotateY {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        let local_ray = Ray::new(
            self.inverse * ray.origin(),
            self.inverse * ray.direction(),
            ray.time(),
        );

        if !self.object.hit(&local_ray, ray_t, rec, rng) {
            return false;
        }

        // The inner hit already oriented the normal against the local ray,
        // and rotation keeps it against the world ray, so front_face stands
        rec.p = self.rotation * rec.p;
        rec.normal = self.rotation * rec.normal;

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{material::Lambertian, quad::cuboid, Sphere};
    use lumen_math::{Color, Point3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gray() -> Arc<dyn crate::Material> {
        Arc::new(Lambertian::new(Color::splat(0.5)))
    }

    fn cast<'a>(object: &'a dyn Hittable, ray: &Ray) -> Option<HitRecord<'a>> {
        let mut rec = HitRecord::default();
        let mut rng = StdRng::seed_from_u64(0);
        object
            .hit(ray, Interval::new(0.001, f64::INFINITY), &mut rec, &mut rng)
            .then_some(rec)
    }

    #[test]
    fn test_translate_moves_hits() {
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(Point3::ZERO, 1.0, gray()));
        let moved = Translate::new(sphere, Vec3::new(5.0, 0.0, 0.0));

        let ray = Ray::new_simple(Point3::new(5.0, 0.0, 10.0), -Vec3::Z);
        let rec = cast(&moved, &ray).unwrap();
        assert!((rec.t - 9.0).abs() < 1e-12);
        assert!((rec.p - Point3::new(5.0, 0.0, 1.0)).length() < 1e-12);
        assert_eq!(rec.normal, Vec3::Z);

        let old_spot = Ray::new_simple(Point3::new(0.0, 0.0, 10.0), -Vec3::Z);
        assert!(cast(&moved, &old_spot).is_none());

        assert_eq!(moved.bounding_box().x, Interval::new(4.0, 6.0));
    }

    #[test]
    fn test_rotate_y_quarter_turn() {
        // A slab along +X becomes a slab along -Z after 90 degrees
        let slab: Arc<dyn Hittable> = Arc::new(cuboid(Point3::new(2.0, -0.5, -0.5), Point3::new(4.0, 0.5, 0.5), gray()));
        let rotated = RotateY::new(slab, 90.0);

        // Face boxes are padded by 5e-5 on their flat axis
        let bbox = rotated.bounding_box();
        assert!((bbox.z.min + 4.0).abs() < 1e-4);
        assert!((bbox.z.max + 2.0).abs() < 1e-4);
        assert!((bbox.x.min + 0.5).abs() < 1e-4);
        assert!((bbox.x.max - 0.5).abs() < 1e-4);

        let ray = Ray::new_simple(Point3::new(0.0, 0.0, 10.0), -Vec3::Z);
        // The near face is now at z = -2, the ray arrives from +Z
        let rec = cast(&rotated, &ray).unwrap();
        assert!((rec.t - 12.0).abs() < 1e-9);
        assert!((rec.p - Point3::new(0.0, 0.0, -2.0)).length() < 1e-9);
        assert!((rec.normal - Vec3::Z).length() < 1e-9);
        assert!(rec.front_face);

        let along_x = Ray::new_simple(Point3::new(3.0, 0.0, 10.0), -Vec3::Z);
        assert!(cast(&rotated, &along_x).is_none());
    }

    #[test]
    fn test_rotate_y_keeps_back_face() {
        let ball: Arc<dyn Hittable> = Arc::new(Sphere::new(Point3::new(3.0, 0.0, 0.0), 1.0, gray()));
        let rotated = RotateY::new(ball, 37.0);

        // Start inside the rotated sphere
        let center = DMat3::from_rotation_y(37f64.to_radians()) * Point3::new(3.0, 0.0, 0.0);
        let ray = Ray::new_simple(center, Vec3::Y);
        let rec = cast(&rotated, &ray).unwrap();
        assert!(!rec.front_face);
        assert!(rec.normal.dot(ray.direction()) < 0.0);
        assert!((rec.p - (center + Vec3::Y)).length() < 1e-9);
    }

    #[test]
    fn test_rotate_then_translate_composes() {
        let unit: Arc<dyn Hittable> = Arc::new(cuboid(Point3::ZERO, Point3::ONE, gray()));
        let placed = Translate::new(Arc::new(RotateY::new(unit, 180.0)), Vec3::new(10.0, 0.0, 10.0));

        // 180 degrees maps [0,1] to [-1,0] on X and Z
        let bbox = placed.bounding_box();
        assert!((bbox.x.min - 9.0).abs() < 1e-4 && (bbox.x.max - 10.0).abs() < 1e-4);
        assert!((bbox.z.min - 9.0).abs() < 1e-4 && (bbox.z.max - 10.0).abs() < 1e-4);

        let ray = Ray::new_simple(Point3::new(9.5, 0.5, 20.0), -Vec3::Z);
        let rec = cast(&placed, &ray).unwrap();
        assert!((rec.p.z - 10.0).abs() < 1e-9);
    }
}
