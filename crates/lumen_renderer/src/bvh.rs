//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree built once over the scene's objects. Each node caches the
//! box around both children, so a ray that misses it skips the whole subtree.

use std::sync::Arc;

use crate::{
    error::{SceneError, SceneResult},
    hittable::{HitRecord, Hittable, HittableList},
};
use lumen_math::{Aabb, Interval, Ray};
use rand::RngCore;

/// BVH node with two children.
///
/// Children are either further nodes or scene objects. A node over a single
/// object holds that object on both sides.
pub struct BvhNode {
    left: Arc<dyn Hittable>,
    right: Arc<dyn Hittable>,
    bbox: Aabb,
}

impl BvhNode {
    /// Build a BVH over the objects of a list.
    pub fn new(list: HittableList) -> SceneResult<Self> {
        Self::from_objects(list.into_objects())
    }

    /// Build a BVH over a set of objects. Fails if there are none.
    pub fn from_objects(mut objects: Vec<Arc<dyn Hittable>>) -> SceneResult<Self> {
        if objects.is_empty() {
            return Err(SceneError::EmptyBvh);
        }

        let node = Self::build(&mut objects);
        log::info!(
            "Built BVH over {} objects, bounds {:?}..{:?}",
            objects.len(),
            node.bbox.min(),
            node.bbox.max()
        );

        Ok(node)
    }

    /// Recursive construction over a non-empty slice.
    ///
    /// Splits at the median along the longest axis of the range's bounds.
    fn build(objects: &mut [Arc<dyn Hittable>]) -> Self {
        let bbox = objects
            .iter()
            .fold(Aabb::EMPTY, |acc, object| Aabb::surrounding(&acc, &object.bounding_box()));

        let axis = bbox.longest_axis();

        let (left, right): (Arc<dyn Hittable>, Arc<dyn Hittable>) = match objects {
            [only] => (only.clone(), only.clone()),
            [first, second] => (first.clone(), second.clone()),
            _ => {
                // Stable sort keeps equal keys in input order, so builds are reproducible
                objects.sort_by(|a, b| {
                    let a_min = a.bounding_box().axis_interval(axis).min;
                    let b_min = b.bounding_box().axis_interval(axis).min;
                    a_min.total_cmp(&b_min)
                });

                let mid = objects.len() / 2;
                let (lower, upper) = objects.split_at_mut(mid);
                (Arc::new(Self::build(lower)), Arc::new(Self::build(upper)))
            }
        };

        Self { left, right, bbox }
    }
}

impl Hittable for BvhNode {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        if !self.bbox.hit(ray, ray_t) {
            return false;
        }

        let hit_left = self.left.hit(ray, ray_t, rec, rng);

        // Single-object leaf: the right child is the same object
        if Arc::ptr_eq(&self.left, &self.right) {
            return hit_left;
        }

        // Only check right up to closest hit
        let right_max = if hit_left { rec.t } else { ray_t.max };
        let hit_right = self.right.hit(ray, Interval::new(ray_t.min, right_max), rec, rng);

        hit_left || hit_right
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{material::Lambertian, sampling::random_vec3, Quad, Sphere};
    use lumen_math::{Color, Point3, Vec3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn gray() -> Arc<dyn crate::Material> {
        Arc::new(Lambertian::new(Color::splat(0.5)))
    }

    fn nearest(object: &dyn Hittable, ray: &Ray, rng: &mut StdRng) -> Option<f64> {
        let mut rec = HitRecord::default();
        object
            .hit(ray, Interval::new(0.001, f64::INFINITY), &mut rec, rng)
            .then_some(rec.t)
    }

    #[test]
    fn test_bvh_empty_is_error() {
        assert!(matches!(BvhNode::new(HittableList::new()), Err(SceneError::EmptyBvh)));
    }

    #[test]
    fn test_bvh_single_sphere() {
        let mut list = HittableList::new();
        list.add(Arc::new(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, gray())));
        let bvh = BvhNode::new(list).unwrap();

        // Should create a node with the same object on both sides
        assert!(Arc::ptr_eq(&bvh.left, &bvh.right));

        let ray = Ray::new_simple(Point3::ZERO, -Vec3::Z);
        let t = nearest(&bvh, &ray, &mut StdRng::seed_from_u64(0)).unwrap();
        assert!((t - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_bvh_multiple_spheres() {
        let objects: Vec<Arc<dyn Hittable>> = (0..10)
            .map(|i| Arc::new(Sphere::new(Point3::new(i as f64, 0.0, -5.0), 0.5, gray())) as Arc<dyn Hittable>)
            .collect();
        let bvh = BvhNode::from_objects(objects).unwrap();

        assert_eq!(bvh.bounding_box().x, Interval::new(-0.5, 9.5));

        // Ray that hits sphere at x=5
        let ray = Ray::new_simple(Point3::new(5.0, 0.0, 0.0), -Vec3::Z);
        let t = nearest(&bvh, &ray, &mut StdRng::seed_from_u64(0)).unwrap();
        assert!((t - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_bvh_matches_linear_scan() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut list = HittableList::new();

        for _ in 0..150 {
            let center = random_vec3(&mut rng, -10.0, 10.0);
            let radius = rng.gen_range(0.1..1.5);
            list.add(Arc::new(Sphere::new(center, radius, gray())));
        }
        for _ in 0..30 {
            let corner = random_vec3(&mut rng, -10.0, 10.0);
            let u = random_vec3(&mut rng, -2.0, 2.0);
            let v = random_vec3(&mut rng, -2.0, 2.0);
            list.add(Arc::new(Quad::new(corner, u, v, gray())));
        }

        let bvh = BvhNode::new(list.clone()).unwrap();
        assert!(bvh.bounding_box().contains_box(&list.bounding_box()));

        let mut hits = 0;
        for _ in 0..2000 {
            let origin = random_vec3(&mut rng, -15.0, 15.0);
            let direction = random_vec3(&mut rng, -1.0, 1.0);
            let ray = Ray::new_simple(origin, direction);

            let expected = nearest(&list, &ray, &mut rng);
            let actual = nearest(&bvh, &ray, &mut rng);
            match (expected, actual) {
                (Some(e), Some(a)) => {
                    hits += 1;
                    assert!((e - a).abs() < 1e-9, "linear {e} vs bvh {a}");
                }
                (None, None) => {}
                other => panic!("linear scan and BVH disagree: {other:?}"),
            }
        }
        assert!(hits > 100);
    }
}
