//! Lumen Core - services around the path tracer.
//!
//! This crate provides:
//!
//! - **Images**: decoding texture images to linear RGB (`ImageData`)
//! - **Output**: writing rendered pixels as PPM or any format `image` supports
//! - **Settings**: JSON render settings with validation
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{RenderSettings, save_image};
//!
//! let settings = RenderSettings::default().load_over("render.json")?;
//! save_image("out.png".as_ref(), width, height, &pixels)?;
//! ```

pub mod images;
pub mod output;
pub mod settings;

// Re-export commonly used types
pub use images::{ImageData, ImageLoadError, ImageResult, IMAGE_DIR_ENV};
pub use output::{save_image, write_ppm, OutputError, OutputResult};
pub use settings::{image_height_for, BackgroundSetting, RenderSettings, SettingsError};
