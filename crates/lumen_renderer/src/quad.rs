//! Parallelogram primitive and the six-sided box built from it.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable, HittableList},
    Material,
};
use lumen_math::{Aabb, Interval, Point3, Ray, Vec3};
use rand::RngCore;

/// Rays closer than this to parallel with the plane are treated as misses.
const PARALLEL_EPSILON: f64 = 1e-8;

/// A parallelogram spanned by two edge vectors from a corner.
pub struct Quad {
    /// Corner
    q: Point3,
    /// Edge vectors
    u: Vec3,
    v: Vec3,
    /// n / dot(n, n), used to project hit points onto the (u, v) basis
    w: Vec3,
    /// Unit plane normal
    normal: Vec3,
    /// Plane offset: dot(normal, p) = d for every point on the plane
    d: f64,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Quad {
    pub fn new(q: Point3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        let n = u.cross(v);
        let w = n / n.dot(n);
        let normal = n.normalize();
        let d = normal.dot(q);

        // Box of both diagonals, so every corner is covered
        let diagonal1 = Aabb::from_points(q, q + u + v);
        let diagonal2 = Aabb::from_points(q + u, q + v);
        let bbox = Aabb::surrounding(&diagonal1, &diagonal2);

        Self {
            q,
            u,
            v,
            w,
            normal,
            d,
            material,
            bbox,
        }
    }

    /// Planar coordinates of a hit, or `None` if it lies outside the quad.
    fn interior(alpha: f64, beta: f64) -> Option<(f64, f64)> {
        (Interval::UNIT.contains(alpha) && Interval::UNIT.contains(beta)).then_some((alpha, beta))
    }
}

impl Hittable for Quad {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        _rng: &mut dyn RngCore,
    ) -> bool {
        let denom = self.normal.dot(ray.direction());

        // Ray is parallel to the plane
        if denom.abs() < PARALLEL_EPSILON {
            return false;
        }

        let t = (self.d - self.normal.dot(ray.origin())) / denom;
        if !ray_t.contains(t) {
            return false;
        }

        let intersection = ray.at(t);
        let planar_hit = intersection - self.q;
        let alpha = self.w.dot(planar_hit.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar_hit));

        let Some((u, v)) = Self::interior(alpha, beta) else {
            return false;
        };

        rec.t = t;
        rec.p = intersection;
        rec.u = u;
        rec.v = v;
        rec.material = self.material.as_ref();
        rec.set_face_normal(ray, self.normal);

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// The closed box with opposite corners `a` and `b`, as six quads.
pub fn cuboid(a: Point3, b: Point3, material: Arc<dyn Material>) -> HittableList {
    let mut sides = HittableList::new();

    let min = a.min(b);
    let max = a.max(b);

    let dx = Vec3::new(max.x - min.x, 0.0, 0.0);
    let dy = Vec3::new(0.0, max.y - min.y, 0.0);
    let dz = Vec3::new(0.0, 0.0, max.z - min.z);

    let faces = [
        (Point3::new(min.x, min.y, max.z), dx, dy),  // front
        (Point3::new(max.x, min.y, max.z), -dz, dy), // right
        (Point3::new(max.x, min.y, min.z), -dx, dy), // back
        (Point3::new(min.x, min.y, min.z), dz, dy),  // left
        (Point3::new(min.x, max.y, max.z), dx, -dz), // top
        (Point3::new(min.x, min.y, min.z), dx, dz),  // bottom
    ];

    for (corner, u, v) in faces {
        sides.add(Arc::new(Quad::new(corner, u, v, material.clone())));
    }

    sides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gray() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Vec3::splat(0.5)))
    }

    /// Unit square in the z = -1 plane, facing +Z.
    fn unit_square() -> Quad {
        Quad::new(Point3::new(-0.5, -0.5, -1.0), Vec3::X, Vec3::Y, gray())
    }

    fn cast<'a>(object: &'a dyn Hittable, ray: &Ray) -> Option<HitRecord<'a>> {
        let mut rec = HitRecord::default();
        let mut rng = StdRng::seed_from_u64(0);
        object
            .hit(ray, Interval::new(0.001, f64::INFINITY), &mut rec, &mut rng)
            .then_some(rec)
    }

    #[test]
    fn test_quad_hit_center() {
        let quad = unit_square();
        let ray = Ray::new_simple(Point3::ZERO, -Vec3::Z);

        let rec = cast(&quad, &ray).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-12);
        assert!((rec.u - 0.5).abs() < 1e-12);
        assert!((rec.v - 0.5).abs() < 1e-12);
        assert_eq!(rec.normal, Vec3::Z);
        assert!(rec.front_face);
    }

    #[test]
    fn test_quad_uv_resolves_local_basis() {
        // Non-square, non-axis-aligned edges
        let quad = Quad::new(Point3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(1.0, 3.0, 0.0), gray());
        let target = Point3::ZERO + 0.25 * Vec3::new(2.0, 0.0, 0.0) + 0.75 * Vec3::new(1.0, 3.0, 0.0);
        let ray = Ray::new_simple(target + Vec3::Z, -Vec3::Z);

        let rec = cast(&quad, &ray).unwrap();
        assert!((rec.u - 0.25).abs() < 1e-12);
        assert!((rec.v - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_quad_miss_outside() {
        let quad = unit_square();
        let ray = Ray::new_simple(Point3::new(0.6, 0.0, 0.0), -Vec3::Z);
        assert!(cast(&quad, &ray).is_none());
    }

    #[test]
    fn test_quad_parallel_ray_rejected() {
        let quad = unit_square();
        let ray = Ray::new_simple(Point3::new(-2.0, 0.0, -1.0), Vec3::X);
        assert!(cast(&quad, &ray).is_none());
    }

    #[test]
    fn test_quad_back_face() {
        let quad = unit_square();
        let ray = Ray::new_simple(Point3::new(0.0, 0.0, -3.0), Vec3::Z);

        let rec = cast(&quad, &ray).unwrap();
        assert!(!rec.front_face);
        assert_eq!(rec.normal, -Vec3::Z);
    }

    #[test]
    fn test_quad_bbox_is_padded() {
        let bbox = unit_square().bounding_box();
        assert!(bbox.z.size() > 0.0);
        assert!(bbox.z.contains(-1.0));
        assert_eq!(bbox.x, Interval::new(-0.5, 0.5));
    }

    #[test]
    fn test_cuboid_encloses_box() {
        let sides = cuboid(Point3::new(1.0, 2.0, 3.0), Point3::ZERO, gray());
        assert_eq!(sides.len(), 6);

        // Each face is flat on one axis, so the union carries its 5e-5 padding
        let bbox = sides.bounding_box();
        for (axis, extent) in [(bbox.x, 1.0), (bbox.y, 2.0), (bbox.z, 3.0)] {
            assert!((axis.min + 5e-5).abs() < 1e-9, "{axis:?}");
            assert!((axis.max - extent - 5e-5).abs() < 1e-9, "{axis:?}");
        }

        // A ray through the middle enters the front face first
        let ray = Ray::new_simple(Point3::new(0.5, 1.0, 10.0), -Vec3::Z);
        let rec = cast(&sides, &ray).unwrap();
        assert!((rec.t - 7.0).abs() < 1e-12);
        assert_eq!(rec.normal, Vec3::Z);
    }
}
