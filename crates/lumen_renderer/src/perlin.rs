//! Gradient (Perlin) noise with turbulence.

use crate::sampling::random_vec3;
use lumen_math::{Point3, Vec3};
use rand::{seq::SliceRandom, RngCore};

const POINT_COUNT: usize = 256;

/// Perlin noise generator.
///
/// Holds a table of random unit gradients and a single permutation shared
/// by all three axes. Construction is the only step that consumes
/// randomness; sampling is pure.
pub struct Perlin {
    gradients: Vec<Vec3>,
    perm: Vec<usize>,
}

impl Perlin {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let gradients = (0..POINT_COUNT)
            .map(|_| random_vec3(rng, -1.0, 1.0).normalize_or(Vec3::X))
            .collect();

        Self {
            gradients,
            perm: Self::generate_perm(rng),
        }
    }

    /// Noise value at `p`, roughly in [-1, 1].
    pub fn noise(&self, p: Point3) -> f64 {
        let u = p.x - p.x.floor();
        let v = p.y - p.y.floor();
        let w = p.z - p.z.floor();

        // Lattice coordinates wrap through the 256-entry tables
        let i = p.x.floor() as i64;
        let j = p.y.floor() as i64;
        let k = p.z.floor() as i64;

        let mut c = [[[Vec3::ZERO; 2]; 2]; 2];
        for (di, plane) in c.iter_mut().enumerate() {
            for (dj, row) in plane.iter_mut().enumerate() {
                for (dk, cell) in row.iter_mut().enumerate() {
                    *cell = self.lattice_gradient(i + di as i64, j + dj as i64, k + dk as i64);
                }
            }
        }

        Self::trilinear_interp(&c, u, v, w)
    }

    /// Sum of `depth` octaves of absolute noise, each at double frequency and
    /// half weight.
    pub fn turbulence(&self, p: Point3, depth: u32) -> f64 {
        let mut accum = 0.0;
        let mut temp_p = p;
        let mut weight = 1.0;

        for _ in 0..depth {
            accum += weight * self.noise(temp_p);
            weight *= 0.5;
            temp_p *= 2.0;
        }

        accum.abs()
    }

    /// Gradient at an integer lattice point.
    fn lattice_gradient(&self, i: i64, j: i64, k: i64) -> Vec3 {
        let index = self.perm[Self::wrap(i)] ^ self.perm[Self::wrap(j)] ^ self.perm[Self::wrap(k)];
        self.gradients[index]
    }

    #[inline]
    fn wrap(i: i64) -> usize {
        (i & (POINT_COUNT as i64 - 1)) as usize
    }

    fn generate_perm(rng: &mut dyn RngCore) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..POINT_COUNT).collect();
        perm.shuffle(rng);
        perm
    }

    fn trilinear_interp(c: &[[[Vec3; 2]; 2]; 2], u: f64, v: f64, w: f64) -> f64 {
        // Hermite smoothing removes grid artifacts
        let uu = u * u * (3.0 - 2.0 * u);
        let vv = v * v * (3.0 - 2.0 * v);
        let ww = w * w * (3.0 - 2.0 * w);

        let mut accum = 0.0;
        for (i, plane) in c.iter().enumerate() {
            for (j, row) in plane.iter().enumerate() {
                for (k, gradient) in row.iter().enumerate() {
                    let (fi, fj, fk) = (i as f64, j as f64, k as f64);
                    let weight = Vec3::new(u - fi, v - fj, w - fk);
                    accum += (fi * uu + (1.0 - fi) * (1.0 - uu))
                        * (fj * vv + (1.0 - fj) * (1.0 - vv))
                        * (fk * ww + (1.0 - fk) * (1.0 - ww))
                        * gradient.dot(weight);
                }
            }
        }

        accum
    }
}
