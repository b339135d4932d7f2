//! Encoding rendered pixels to image files.
//!
//! Both writers take 8-bit RGB triplets in row-major order, top row first.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("expected {expected} pixels for a {width}x{height} image, got {actual}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type OutputResult<T> = Result<T, OutputError>;

fn check_size(width: u32, height: u32, pixels: &[[u8; 3]]) -> OutputResult<()> {
    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        return Err(OutputError::SizeMismatch {
            width,
            height,
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// Write pixels as a plain-text PPM (P3) stream.
pub fn write_ppm<W: Write>(
    writer: &mut W,
    width: u32,
    height: u32,
    pixels: &[[u8; 3]],
) -> OutputResult<()> {
    check_size(width, height, pixels)?;

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", width, height)?;
    writeln!(writer, "255")?;

    for [r, g, b] in pixels {
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    Ok(())
}

/// Save pixels to `path`, picking the format from the extension.
///
/// `.ppm` is written as text; everything else goes through the `image`
/// crate (PNG, JPEG, BMP, ...).
pub fn save_image(path: &Path, width: u32, height: u32, pixels: &[[u8; 3]]) -> OutputResult<()> {
    check_size(width, height, pixels)?;

    let is_ppm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let mut writer = BufWriter::new(File::create(path)?);
        write_ppm(&mut writer, width, height, pixels)?;
        writer.flush()?;
    } else {
        let bytes: Vec<u8> = pixels.iter().flatten().copied().collect();
        image::save_buffer(path, &bytes, width, height, image::ColorType::Rgb8)?;
    }

    log::info!("Saved {}x{} image to {}", width, height, path.display());
    Ok(())
}
