//! Image loading for texture lookups.
//!
//! Decodes image files with the `image` crate and stores them as linear
//! float RGB so the renderer can sample them directly.

use std::env;
use std::path::{Path, PathBuf};

use lumen_math::Color;
use thiserror::Error;

/// Environment variable naming a directory searched first for image files.
pub const IMAGE_DIR_ENV: &str = "LUMEN_IMAGES";

/// Errors that can occur while loading an image.
#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("could not find image '{0}' in any search location")]
    NotFound(String),

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image {0} has no pixels")]
    Empty(PathBuf),
}

pub type ImageResult<T> = Result<T, ImageLoadError>;

/// A decoded image with linear RGB pixel data.
///
/// Pixels are stored row-major, top row first.
#[derive(Clone, Debug)]
pub struct ImageData {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 3]>,
}

impl ImageData {
    /// Create an image from raw linear pixels.
    ///
    /// Returns `None` if the pixel count does not match the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 3]>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Load an image from an explicit path.
    pub fn load(path: impl AsRef<Path>) -> ImageResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| ImageLoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = rgb
            .pixels()
            .map(|p| [srgb_to_linear(p[0]), srgb_to_linear(p[1]), srgb_to_linear(p[2])])
            .collect();

        let data = Self::new(width, height, pixels)
            .ok_or_else(|| ImageLoadError::Empty(path.to_path_buf()))?;

        log::debug!("Loaded image {} ({}x{})", path.display(), width, height);
        Ok(data)
    }

    /// Locate an image by file name and load it.
    ///
    /// Looks in `$LUMEN_IMAGES` first, then the working directory, then
    /// `images/` in the working directory and up to three parents.
    pub fn find(file_name: &str) -> ImageResult<Self> {
        for candidate in search_paths(file_name) {
            if candidate.is_file() {
                return Self::load(&candidate);
            }
        }
        Err(ImageLoadError::NotFound(file_name.to_string()))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Linear color of the texel at (x, y), with coordinates clamped to the image.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        let [r, g, b] = self.pixels[y * self.width as usize + x];
        Color::new(r as f64, g as f64, b as f64)
    }
}

/// Candidate locations for an image file, in search order.
fn search_paths(file_name: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(dir) = env::var(IMAGE_DIR_ENV) {
        if !dir.is_empty() {
            paths.push(Path::new(&dir).join(file_name));
        }
    }

    paths.push(PathBuf::from(file_name));

    let mut prefix = PathBuf::new();
    for _ in 0..4 {
        paths.push(prefix.join("images").join(file_name));
        prefix.push("..");
    }

    paths
}

/// Convert sRGB byte value to linear float.
fn srgb_to_linear(value: u8) -> f32 {
    let v = value as f32 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_data_dimensions_checked() {
        assert!(ImageData::new(2, 2, vec![[0.0; 3]; 4]).is_some());
        assert!(ImageData::new(2, 2, vec![[0.0; 3]; 3]).is_none());
        assert!(ImageData::new(0, 0, Vec::new()).is_none());
    }

    #[test]
    fn test_pixel_lookup_clamps() {
        let pixels = vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0, 1.0]];
        let img = ImageData::new(2, 2, pixels).unwrap();

        assert_eq!(img.pixel(1, 0), Color::new(0.0, 1.0, 0.0));
        assert_eq!(img.pixel(0, 1), Color::new(0.0, 0.0, 1.0));
        assert_eq!(img.pixel(10, 10), Color::ONE);
    }

    #[test]
    fn test_search_paths_order() {
        let paths = search_paths("earth.jpg");
        let tail: Vec<_> = paths.iter().rev().take(5).rev().collect();

        assert_eq!(tail[0], &PathBuf::from("earth.jpg"));
        assert_eq!(tail[1], &PathBuf::from("images/earth.jpg"));
        assert_eq!(tail[4], &PathBuf::from("../../../images/earth.jpg"));
    }

    #[test]
    fn test_missing_image_is_not_found() {
        let err = ImageData::find("definitely-not-a-real-image-file.png").unwrap_err();
        assert!(matches!(err, ImageLoadError::NotFound(_)));
    }

    #[test]
    fn test_srgb_to_linear() {
        assert!((srgb_to_linear(0) - 0.0).abs() < 0.001);
        assert!((srgb_to_linear(255) - 1.0).abs() < 0.001);

        // Mid-gray is darker in linear
        let mid = srgb_to_linear(128);
        assert!(mid < 0.5);
        assert!(mid > 0.1);
    }
}
