use crate::Vec3;

/// Extra vector operations used by the shading code.
pub trait Vec3Ext {
    /// True when every component is within 1e-8 of zero.
    fn near_zero(&self) -> bool;

    /// Mirror this vector about the (unit) normal `n`.
    fn reflect(&self, n: Vec3) -> Vec3;

    /// Bend this unit vector through a surface with unit normal `n`.
    ///
    /// `eta_ratio` is the incident index over the transmitted index.
    fn refract(&self, n: Vec3, eta_ratio: f64) -> Vec3;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        const S: f64 = 1e-8;
        self.x.abs() < S && self.y.abs() < S && self.z.abs() < S
    }

    #[inline]
    fn reflect(&self, n: Vec3) -> Vec3 {
        *self - 2.0 * self.dot(n) * n
    }

    #[inline]
    fn refract(&self, n: Vec3, eta_ratio: f64) -> Vec3 {
        let cos_theta = (-*self).dot(n).min(1.0);
        let r_out_perp = eta_ratio * (*self + cos_theta * n);
        let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
        r_out_perp + r_out_parallel
    }
}
