//! Simple path tracer example.
//!
//! Renders three spheres and a smoke-filled box straight through the
//! library API and saves the result as PPM.

use std::path::Path;
use std::sync::Arc;

use lumen_core::save_image;
use lumen_renderer::{
    cuboid, render, Background, BvhNode, Camera, Color, ConstantMedium, Dielectric, HittableList, Lambertian, Metal,
    Point3, RenderConfig, RotateY, Sphere, Vec3,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Lumen Path Tracer - Simple Example");
    println!("==================================");

    let start = std::time::Instant::now();
    let world = BvhNode::new(build_scene())?;
    println!("Scene built in {:?}", start.elapsed());

    let mut camera = Camera::new()
        .with_aspect_ratio(640, 16.0 / 9.0)
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0);
    camera.initialize();

    let config = RenderConfig {
        samples_per_pixel: 32,
        max_depth: 10,
        background: Background::Sky,
        seed: 7,
        bucket_size: 32,
    };

    println!(
        "Rendering {}x{} @ {} spp...",
        camera.width(),
        camera.height(),
        config.samples_per_pixel
    );

    let start = std::time::Instant::now();
    let image = render(&camera, &world, &config);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_image(Path::new(filename), image.width, image.height, &image.to_rgb8())?;
    println!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> HittableList {
    let mut world = HittableList::new();

    // Ground
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5))),
    )));

    // Three main spheres
    world.add(Arc::new(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, Arc::new(Dielectric::new(1.5)))));
    world.add(Arc::new(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    // A tilted block of thin gray smoke behind them
    let block = Arc::new(cuboid(
        Point3::new(-1.0, 0.0, -4.0),
        Point3::new(1.0, 2.0, -2.0),
        Arc::new(Lambertian::new(Color::ONE)),
    ));
    world.add(Arc::new(ConstantMedium::new(
        Arc::new(RotateY::new(block, 30.0)),
        0.5,
        Color::splat(0.6),
    )));

    world
}
