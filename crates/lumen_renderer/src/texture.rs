//! Textures: functions from surface coordinates and position to color.

use std::sync::Arc;

use crate::perlin::Perlin;
use lumen_core::ImageData;
use lumen_math::{Color, Interval, Point3};
use log::warn;
use rand::RngCore;

/// Color returned by image textures that have no pixel data.
pub const MISSING_IMAGE_COLOR: Color = Color::new(0.0, 1.0, 1.0);

pub trait Texture: Send + Sync {
    fn value(&self, u: f64, v: f64, p: Point3) -> Color;
}

/// A constant color.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    albedo: Color,
}

impl SolidColor {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::new(Color::new(red, green, blue))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        self.albedo
    }
}

/// 3D checkerboard alternating between two textures in cubes of side `scale`.
pub struct CheckerTexture {
    inv_scale: f64,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(scale: f64, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }

    pub fn from_colors(scale: f64, even: Color, odd: Color) -> Self {
        Self::new(scale, Arc::new(SolidColor::new(even)), Arc::new(SolidColor::new(odd)))
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f64, v: f64, p: Point3) -> Color {
        let cell = (self.inv_scale * p).floor();
        let parity = (cell.x as i64 + cell.y as i64 + cell.z as i64).rem_euclid(2);

        if parity == 0 {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}

/// Visualizes the surface parameterization as (u, v, 0).
#[derive(Debug, Clone, Copy, Default)]
pub struct UvTexture;

impl Texture for UvTexture {
    fn value(&self, u: f64, v: f64, _p: Point3) -> Color {
        Color::new(u, v, 0.0)
    }
}

/// Texture sampled from a decoded image with nearest-texel lookup.
pub struct ImageTexture {
    image: Option<ImageData>,
}

impl ImageTexture {
    pub fn new(image: ImageData) -> Self {
        Self { image: Some(image) }
    }

    /// Look the file up on the image search path. A failed load still yields
    /// a texture, one that renders as solid cyan.
    pub fn open(file_name: &str) -> Self {
        match ImageData::find(file_name) {
            Ok(image) => Self::new(image),
            Err(err) => {
                warn!("Could not load image texture '{}': {}", file_name, err);
                Self { image: None }
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f64, v: f64, _p: Point3) -> Color {
        let Some(image) = &self.image else {
            return MISSING_IMAGE_COLOR;
        };

        // Image rows run top to bottom, v runs bottom to top
        let u = Interval::UNIT.clamp(u);
        let v = 1.0 - Interval::UNIT.clamp(v);

        let i = (u * image.width() as f64) as u32;
        let j = (v * image.height() as f64) as u32;
        image.pixel(i, j)
    }
}

/// Marble-like texture driven by Perlin turbulence.
pub struct NoiseTexture {
    noise: Perlin,
    scale: f64,
}

impl NoiseTexture {
    pub fn new(scale: f64, rng: &mut dyn RngCore) -> Self {
        Self {
            noise: Perlin::new(rng),
            scale,
        }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f64, _v: f64, p: Point3) -> Color {
        Color::splat(0.5) * (1.0 + (self.scale * p.z + 10.0 * self.noise.turbulence(p, 7)).sin())
    }
}
