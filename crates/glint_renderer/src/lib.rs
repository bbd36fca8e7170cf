//! Glint - CPU Path Tracing
//!
//! A Monte Carlo path tracer for spheres and infinite planes with diffuse,
//! metallic, glass and procedurally patterned materials, accelerated by a
//! bounding volume hierarchy and rendered in parallel buckets.

mod bvh;
mod camera;
mod error;
mod hittable;
mod material;
mod plane;
mod sky;
mod sphere;

pub mod bucket;
pub mod output;
pub mod renderer;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::{BvhNode, SplitAxis};
pub use camera::{Camera, CameraBuilder};
pub use error::{ConfigError, OutputError, OutputResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{
    Checker, Color, Dielectric, FaceDebug, Lambertian, Material, Metal, ScatterResult, SinePattern,
    TiledMetal,
};
pub use output::{save_image, write_ppm};
pub use plane::Plane;
pub use renderer::{
    color_to_rgb, ray_color, render, render_pixel, render_serial, ImageBuffer, RenderConfig,
};
pub use sky::{Sky, Sun};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Aabb, Interval, Ray, Vec3};
