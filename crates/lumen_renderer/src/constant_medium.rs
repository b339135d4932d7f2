//! Constant-density participating medium (smoke, fog) inside a boundary.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    material::{Isotropic, Material},
    sampling::gen_f64,
    texture::Texture,
};
use lumen_math::{Aabb, Color, Interval, Ray, Vec3};
use rand::RngCore;

/// Gap between the entry point and the search for the exit point.
const EXIT_EPSILON: f64 = 0.0001;

/// A volume of uniform density bounded by a closed convex hittable.
///
/// Rays that enter the boundary scatter at an exponentially distributed
/// distance, or pass straight through if that distance exceeds the chord.
pub struct ConstantMedium {
    boundary: Arc<dyn Hittable>,
    neg_inv_density: f64,
    phase_function: Arc<dyn Material>,
}

impl ConstantMedium {
    /// Medium with a constant albedo. Negative densities are clamped to zero,
    /// which makes the medium fully transparent.
    pub fn new(boundary: Arc<dyn Hittable>, density: f64, albedo: Color) -> Self {
        Self::with_phase(boundary, density, Arc::new(Isotropic::new(albedo)))
    }

    pub fn textured(boundary: Arc<dyn Hittable>, density: f64, texture: Arc<dyn Texture>) -> Self {
        Self::with_phase(boundary, density, Arc::new(Isotropic::textured(texture)))
    }

    fn with_phase(boundary: Arc<dyn Hittable>, density: f64, phase_function: Arc<dyn Material>) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density.max(0.0),
            phase_function,
        }
    }
}

impl Hittable for ConstantMedium {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        let mut rec1 = HitRecord::default();
        let mut rec2 = HitRecord::default();

        if !self.boundary.hit(ray, Interval::UNIVERSE, &mut rec1, rng) {
            return false;
        }

        if !self
            .boundary
            .hit(ray, Interval::new(rec1.t + EXIT_EPSILON, f64::INFINITY), &mut rec2, rng)
        {
            return false;
        }

        let mut t_enter = rec1.t.max(ray_t.min);
        let t_exit = rec2.t.min(ray_t.max);

        if t_enter >= t_exit {
            return false;
        }

        // The ray may start inside the volume
        t_enter = t_enter.max(0.0);

        let ray_length = ray.direction().length();
        let distance_inside_boundary = (t_exit - t_enter) * ray_length;
        // ln(u) < 0 for u in [0, 1), so zero density gives +inf and never a NaN
        let hit_distance = self.neg_inv_density * gen_f64(rng).ln();

        if hit_distance > distance_inside_boundary {
            return false;
        }

        rec.t = t_enter + hit_distance / ray_length;
        rec.p = ray.at(rec.t);

        // Arbitrary: a scattering event inside a volume has no surface
        rec.normal = Vec3::X;
        rec.front_face = true;
        rec.u = gen_f64(rng);
        rec.v = gen_f64(rng);
        rec.material = self.phase_function.as_ref();

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.boundary.bounding_box()
    }
}
