//! Built-in demo scenes.
//!
//! Each scene pairs a world with the render settings it was framed for.
//! Worlds that place objects randomly draw from the generator they are
//! given, so a fixed seed rebuilds the same scene.

use std::sync::Arc;

use clap::ValueEnum;
use lumen_core::{BackgroundSetting, RenderSettings};
use lumen_math::{Color, Point3, Vec3};
use lumen_renderer::{
    cuboid,
    sampling::{gen_f64, gen_range, random_vec3},
    BvhNode, CheckerTexture, ConstantMedium, Dielectric, DiffuseLight, Hittable, HittableList, ImageTexture,
    Lambertian, Material, Metal, NoiseTexture, Quad, RotateY, SceneResult, Sphere, Translate, UvTexture,
};
use rand::RngCore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Ground, a diffuse sphere, a hollow glass sphere and a brushed metal one
    ThreeSpheres,
    /// Field of small random spheres around three large ones, with motion blur
    FinalWeekend,
    /// Two large spheres with a spatial checker texture
    Checkered,
    /// Image-textured globe
    Earth,
    /// Marble spheres from Perlin turbulence
    Perlin,
    /// Five quads around a glass ball
    Quads,
    /// Marble spheres lit by a sphere light and a quad light
    SimpleLight,
    /// Cornell box with two rotated blocks
    Cornell,
    /// Cornell box with blocks of black and white smoke
    CornellSmoke,
    /// Spheres showing their (u, v) parameterization
    Uv,
}

/// Shared settings for scenes seen through a narrow lens from (13, 2, 3).
fn overview_settings() -> RenderSettings {
    RenderSettings {
        vfov: 20.0,
        look_from: [13.0, 2.0, 3.0],
        look_at: [0.0, 0.0, 0.0],
        ..RenderSettings::default()
    }
}

fn cornell_settings() -> RenderSettings {
    RenderSettings {
        aspect_ratio: 1.0,
        image_width: 600,
        samples_per_pixel: 200,
        max_depth: 50,
        vfov: 40.0,
        look_from: [278.0, 278.0, -800.0],
        look_at: [278.0, 278.0, 0.0],
        background: BackgroundSetting::Solid([0.0, 0.0, 0.0]),
        ..RenderSettings::default()
    }
}

impl SceneKind {
    /// Camera and sampling settings the scene is framed for.
    pub fn default_settings(self) -> RenderSettings {
        match self {
            SceneKind::ThreeSpheres => RenderSettings {
                samples_per_pixel: 10,
                max_depth: 20,
                vfov: 20.0,
                look_from: [-2.0, 2.0, 1.0],
                look_at: [0.0, 0.0, -1.0],
                defocus_angle: 10.0,
                focus_dist: 3.4,
                ..RenderSettings::default()
            },
            SceneKind::FinalWeekend => RenderSettings {
                image_width: 600,
                samples_per_pixel: 64,
                max_depth: 20,
                defocus_angle: 0.6,
                focus_dist: 10.0,
                ..overview_settings()
            },
            SceneKind::Checkered | SceneKind::Perlin => overview_settings(),
            SceneKind::Earth => RenderSettings {
                vfov: 20.0,
                look_from: [0.0, 0.0, 12.0],
                look_at: [0.0, 0.0, 0.0],
                ..RenderSettings::default()
            },
            SceneKind::Quads => RenderSettings {
                aspect_ratio: 1.0,
                image_width: 500,
                samples_per_pixel: 200,
                vfov: 80.0,
                look_from: [0.0, 0.0, 9.0],
                look_at: [0.0, 0.0, 0.0],
                ..RenderSettings::default()
            },
            SceneKind::SimpleLight => RenderSettings {
                image_width: 700,
                samples_per_pixel: 300,
                vfov: 20.0,
                look_from: [26.0, 3.0, 6.0],
                look_at: [0.0, 2.0, 0.0],
                background: BackgroundSetting::Solid([0.0, 0.0, 0.0]),
                ..RenderSettings::default()
            },
            SceneKind::Cornell | SceneKind::CornellSmoke => cornell_settings(),
            SceneKind::Uv => RenderSettings {
                vfov: 70.0,
                look_from: [-15.0, 2.0, 3.0],
                look_at: [0.0, 0.0, 0.0],
                ..RenderSettings::default()
            },
        }
    }

    /// Build the scene's objects, wrapped in a BVH.
    pub fn build_world(self, rng: &mut dyn RngCore) -> SceneResult<Arc<dyn Hittable>> {
        let world = match self {
            SceneKind::ThreeSpheres => three_spheres(),
            SceneKind::FinalWeekend => final_weekend(rng),
            SceneKind::Checkered => checkered_spheres(),
            SceneKind::Earth => earth(),
            SceneKind::Perlin => perlin_spheres(rng),
            SceneKind::Quads => quads(rng),
            SceneKind::SimpleLight => simple_light(rng),
            SceneKind::Cornell => cornell_box(),
            SceneKind::CornellSmoke => cornell_smoke(),
            SceneKind::Uv => uv_spheres(),
        };

        log::info!("Scene {:?}: {} top-level objects", self, world.len());
        Ok(Arc::new(BvhNode::new(world)?))
    }
}

fn lambertian(r: f64, g: f64, b: f64) -> Arc<dyn Material> {
    Arc::new(Lambertian::new(Color::new(r, g, b)))
}

fn three_spheres() -> HittableList {
    let mut world = HittableList::new();

    let ground = lambertian(0.8, 0.8, 0.0);
    let center = lambertian(0.1, 0.2, 0.5);
    let left: Arc<dyn Material> = Arc::new(Dielectric::new(1.51));
    // Air pocket inside the glass sphere, making it hollow
    let bubble: Arc<dyn Material> = Arc::new(Dielectric::new(1.0 / 1.51));
    let right: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 1.0));

    world.add(Arc::new(Sphere::new(Point3::new(0.0, -100.5, -1.0), 100.0, ground)));
    world.add(Arc::new(Sphere::new(Point3::new(0.0, 0.0, -1.2), 0.5, center)));
    world.add(Arc::new(Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.5, left)));
    world.add(Arc::new(Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.4, bubble)));
    world.add(Arc::new(Sphere::new(Point3::new(1.0, 0.0, -1.0), 0.5, right)));

    world
}

fn final_weekend(rng: &mut dyn RngCore) -> HittableList {
    let mut world = HittableList::new();

    let checker = Arc::new(CheckerTexture::from_colors(
        0.32,
        Color::new(0.65, 0.3, 0.3),
        Color::new(0.3, 0.3, 0.65),
    ));
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::textured(checker)),
    )));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f64(rng);
            let center = Point3::new(a as f64 + 0.9 * gen_f64(rng), 0.2, b as f64 + 0.9 * gen_f64(rng));

            // Keep clear of the large metal sphere
            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                // Diffuse, bouncing upward during the shutter interval
                let albedo = random_vec3(rng, 0.0, 1.0) * random_vec3(rng, 0.0, 1.0);
                let end = center + Vec3::new(0.0, gen_range(rng, 0.0, 0.5), 0.0);
                world.add(Arc::new(Sphere::moving(center, end, 0.2, Arc::new(Lambertian::new(albedo)))));
            } else if choose_mat < 0.95 {
                let albedo = random_vec3(rng, 0.5, 1.0);
                let fuzz = gen_range(rng, 0.0, 0.5);
                world.add(Arc::new(Sphere::new(center, 0.2, Arc::new(Metal::new(albedo, fuzz)))));
            } else {
                world.add(Arc::new(Sphere::new(center, 0.2, Arc::new(Dielectric::new(1.5)))));
            }
        }
    }

    world.add(Arc::new(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, Arc::new(Dielectric::new(1.5)))));
    world.add(Arc::new(Sphere::new(Point3::new(-4.0, 1.0, 0.0), 1.0, lambertian(0.4, 0.2, 0.1))));
    world.add(Arc::new(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    world
}

fn checkered_spheres() -> HittableList {
    let mut world = HittableList::new();

    let checker: Arc<dyn Material> = Arc::new(Lambertian::textured(Arc::new(CheckerTexture::from_colors(
        0.32,
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ))));

    world.add(Arc::new(Sphere::new(Point3::new(0.0, -10.0, 0.0), 10.0, checker.clone())));
    world.add(Arc::new(Sphere::new(Point3::new(0.0, 10.0, 0.0), 10.0, checker)));

    world
}

fn earth() -> HittableList {
    let surface = Arc::new(Lambertian::textured(Arc::new(ImageTexture::open("earthmap.jpg"))));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(Point3::ZERO, 2.0, surface)));
    world
}

fn perlin_spheres(rng: &mut dyn RngCore) -> HittableList {
    let marble: Arc<dyn Material> = Arc::new(Lambertian::textured(Arc::new(NoiseTexture::new(4.0, rng))));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, marble.clone())));
    world.add(Arc::new(Sphere::new(Point3::new(0.0, 2.0, 0.0), 2.0, marble)));
    world
}

fn quads(rng: &mut dyn RngCore) -> HittableList {
    let marble: Arc<dyn Material> = Arc::new(Lambertian::textured(Arc::new(NoiseTexture::new(4.0, rng))));
    let back_green = lambertian(0.2, 1.0, 0.2);
    let earth: Arc<dyn Material> = Arc::new(Lambertian::textured(Arc::new(ImageTexture::open("earthmap.jpg"))));
    let upper_orange = lambertian(1.0, 0.5, 0.0);
    let lower_metal: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.75, 0.2, 0.2), 0.05));

    let mut world = HittableList::new();
    world.add(Arc::new(Quad::new(
        Point3::new(-3.0, -2.0, 5.0),
        Vec3::new(0.0, 0.0, -4.0),
        Vec3::new(0.0, 4.0, 0.0),
        marble,
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(-2.0, -2.0, 0.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 4.0, 0.0),
        back_green,
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(3.0, -2.0, 1.0),
        Vec3::new(0.0, 0.0, 4.0),
        Vec3::new(0.0, 4.0, 0.0),
        earth,
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(-2.0, 3.0, 1.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 4.0),
        upper_orange,
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(-2.0, -3.0, 5.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -4.0),
        lower_metal,
    )));
    world.add(Arc::new(Sphere::new(Point3::new(0.0, 0.0, 3.0), 1.0, Arc::new(Dielectric::new(1.5)))));

    world
}

fn simple_light(rng: &mut dyn RngCore) -> HittableList {
    let mut world = perlin_spheres(rng);

    let blue_light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::new(0.1, 0.2, 2.0)));
    let red_light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::new(1.0, 0.2, 0.2)));

    world.add(Arc::new(Sphere::new(Point3::new(0.0, 7.0, 0.0), 2.0, red_light)));
    world.add(Arc::new(Quad::new(
        Point3::new(3.0, 1.0, -2.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
        blue_light,
    )));

    world
}

/// The five walls of the Cornell box, without its light.
fn cornell_walls(world: &mut HittableList, white: &Arc<dyn Material>) {
    let red = lambertian(0.65, 0.05, 0.05);
    let green = lambertian(0.12, 0.45, 0.15);

    world.add(Arc::new(Quad::new(
        Point3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        green,
    )));
    world.add(Arc::new(Quad::new(
        Point3::ZERO,
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        red,
    )));
    world.add(Arc::new(Quad::new(
        Point3::ZERO,
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(555.0, 555.0, 555.0),
        Vec3::new(-555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -555.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(0.0, 0.0, 555.0),
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        white.clone(),
    )));
}

/// The tall and short blocks, rotated and moved into place.
fn cornell_blocks(white: &Arc<dyn Material>) -> [Arc<dyn Hittable>; 2] {
    let tall = Arc::new(cuboid(Point3::ZERO, Point3::new(165.0, 330.0, 165.0), white.clone()));
    let tall = Arc::new(RotateY::new(tall, 15.0));
    let tall: Arc<dyn Hittable> = Arc::new(Translate::new(tall, Vec3::new(265.0, 0.0, 295.0)));

    let short = Arc::new(cuboid(Point3::ZERO, Point3::new(165.0, 165.0, 165.0), white.clone()));
    let short = Arc::new(RotateY::new(short, -18.0));
    let short: Arc<dyn Hittable> = Arc::new(Translate::new(short, Vec3::new(130.0, 0.0, 65.0)));

    [tall, short]
}

fn cornell_box() -> HittableList {
    let mut world = HittableList::new();
    let white = lambertian(0.73, 0.73, 0.73);

    cornell_walls(&mut world, &white);
    world.add(Arc::new(Quad::new(
        Point3::new(343.0, 554.0, 332.0),
        Vec3::new(-130.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -105.0),
        Arc::new(DiffuseLight::new(Color::splat(15.0))),
    )));

    for block in cornell_blocks(&white) {
        world.add(block);
    }

    world
}

fn cornell_smoke() -> HittableList {
    let mut world = HittableList::new();
    let white = lambertian(0.73, 0.73, 0.73);

    cornell_walls(&mut world, &white);
    // Larger, dimmer light so the smoke is lit evenly
    world.add(Arc::new(Quad::new(
        Point3::new(113.0, 554.0, 127.0),
        Vec3::new(330.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 305.0),
        Arc::new(DiffuseLight::new(Color::splat(7.0))),
    )));

    let [tall, short] = cornell_blocks(&white);
    world.add(Arc::new(ConstantMedium::new(tall, 0.01, Color::ZERO)));
    world.add(Arc::new(ConstantMedium::new(short, 0.01, Color::ONE)));

    world
}

fn uv_spheres() -> HittableList {
    let surface: Arc<dyn Material> = Arc::new(Lambertian::textured(Arc::new(UvTexture)));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(Point3::new(0.0, -5.0, 0.0), 5.0, surface.clone())));
    world.add(Arc::new(Sphere::new(Point3::new(0.0, 5.0, 0.0), 5.0, surface)));
    world
}
