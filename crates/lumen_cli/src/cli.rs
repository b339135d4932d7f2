use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_core::RenderSettings;

use crate::scenes::SceneKind;

/// Log levels selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "Offline path tracer", version)]
pub struct Args {
    /// Built-in scene to render
    #[arg(long, value_enum, default_value = "three-spheres")]
    pub scene: SceneKind,

    /// Output image; `.ppm` writes plain-text PPM, other extensions go through the image encoder
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,

    /// JSON render settings, applied on top of the scene's defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum ray bounce depth
    #[arg(long, short = 'd')]
    pub depth: Option<u32>,

    /// Seed for scene generation and pixel sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Bucket edge length in pixels
    #[arg(long)]
    pub bucket_size: Option<u32>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command line overrides on top of loaded settings.
    pub fn apply_overrides(&self, settings: &mut RenderSettings) {
        if let Some(width) = self.width {
            settings.image_width = width;
        }
        if let Some(samples) = self.samples {
            settings.samples_per_pixel = samples;
        }
        if let Some(depth) = self.depth {
            settings.max_depth = depth;
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(bucket_size) = self.bucket_size {
            settings.bucket_size = bucket_size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["lumen"]).unwrap();
        assert_eq!(args.scene, SceneKind::ThreeSpheres);
        assert_eq!(args.output, PathBuf::from("image.ppm"));
        assert!(args.config.is_none());
        assert_eq!(args.log_level, LogLevel::Info);
    }

    #[test]
    fn test_overrides_apply() {
        let args = Args::try_parse_from([
            "lumen",
            "--scene",
            "cornell-smoke",
            "-o",
            "smoke.png",
            "--width",
            "128",
            "-s",
            "16",
            "-d",
            "8",
            "--seed",
            "42",
            "--bucket-size",
            "16",
        ])
        .unwrap();
        assert_eq!(args.scene, SceneKind::CornellSmoke);

        let mut settings = args.scene.default_settings();
        args.apply_overrides(&mut settings);
        assert_eq!(settings.image_width, 128);
        assert_eq!(settings.samples_per_pixel, 16);
        assert_eq!(settings.max_depth, 8);
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.bucket_size, 16);
        // Untouched values keep the scene's framing
        assert_eq!(settings.vfov, 40.0);
    }

    #[test]
    fn test_unknown_scene_rejected() {
        assert!(Args::try_parse_from(["lumen", "--scene", "teapot"]).is_err());
    }

    #[test]
    fn test_log_level_maps_to_filter() {
        assert_eq!(LevelFilter::from(LogLevel::Debug), LevelFilter::Debug);
        assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::Error);
    }
}
