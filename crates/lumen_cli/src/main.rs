mod cli;
mod scenes;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_core::save_image;
use lumen_renderer::{render, Camera, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Lumen");

    // Scene defaults, then the settings file, then command line flags
    let defaults = args.scene.default_settings();
    let mut settings = match &args.config {
        Some(path) => defaults
            .load_over(path)
            .with_context(|| format!("failed to load render settings from {}", path.display()))?,
        None => defaults,
    };
    args.apply_overrides(&mut settings);
    settings.validate().context("invalid render settings")?;

    let mut scene_rng = StdRng::seed_from_u64(settings.seed);
    let world = args
        .scene
        .build_world(&mut scene_rng)
        .with_context(|| format!("failed to build scene {:?}", args.scene))?;

    let camera = Camera::from_settings(&settings);
    let config = RenderConfig::from_settings(&settings);

    let image = render(&camera, world.as_ref(), &config);

    save_image(&args.output, image.width, image.height, &image.to_rgb8())
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    log::info!("Wrote {}", args.output.display());
    Ok(())
}
