//! Lumen Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for physically-based rendering. Scenes are
//! built from [`Hittable`] objects (spheres, quads, media, instances) placed
//! in a [`BvhNode`], shaded by [`Material`]s that sample [`Texture`]s, and
//! rendered through a [`Camera`] by [`render`].
//!
//! All randomness flows through explicit generators, so a render with a
//! fixed seed is reproducible on any number of threads.

mod bucket;
mod bvh;
mod camera;
mod constant_medium;
mod error;
mod hittable;
mod instance;
mod material;
mod perlin;
mod quad;
mod renderer;
pub mod sampling;
mod sphere;
mod texture;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::BvhNode;
pub use camera::Camera;
pub use constant_medium::ConstantMedium;
pub use error::{SceneError, SceneResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use instance::{RotateY, Translate};
pub use material::{Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal, ScatterResult};
pub use perlin::Perlin;
pub use quad::{cuboid, Quad};
pub use renderer::{color_to_rgb8, linear_to_gamma, ray_color, render, render_pixel, Background, ImageBuffer, RenderConfig};
pub use sphere::Sphere;
pub use texture::{CheckerTexture, ImageTexture, NoiseTexture, SolidColor, Texture, UvTexture, MISSING_IMAGE_COLOR};

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Aabb, Color, Interval, Point3, Ray, Vec3};
