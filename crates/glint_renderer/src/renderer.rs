//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Anti-aliasing via multi-sampling
//! - Gamma correction and 8-bit quantization
//! - Parallel bucket rendering, reproducible from a seed

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::{Camera, Color, ConfigError, Hittable, Ray, Sky};
use glint_math::sampling::gen_f32;
use glint_math::Interval;
use rand::RngCore;
use rayon::prelude::*;
use std::time::Instant;

/// Lower bound of the hit window; keeps a bounce from re-hitting the surface it left.
pub const T_MIN: f32 = 0.001;

/// Render configuration.
///
/// Image size, sample count, bounce limit and seed have no defaults; the
/// caller always states them.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Seed of all sampling; same seed, same image
    pub seed: u64,
    /// Radiance for rays that escape the scene
    pub sky: Sky,
    /// Edge length of the square tiles rendered in parallel
    pub bucket_size: u32,
}

impl RenderConfig {
    pub fn new(width: u32, height: u32, samples_per_pixel: u32, max_depth: u32, seed: u64) -> Self {
        Self {
            width,
            height,
            samples_per_pixel,
            max_depth,
            seed,
            sky: Sky::default(),
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }

    pub fn with_sky(mut self, sky: Sky) -> Self {
        self.sky = sky;
        self
    }

    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    /// Check the values that would make the render meaningless.
    /// A bounce depth of zero is allowed and renders black.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::NoSamples);
        }
        if self.bucket_size == 0 {
            return Err(ConfigError::EmptyBucket);
        }
        Ok(())
    }
}

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and multiplying in each attenuation.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    sky: &Sky,
    rng: &mut dyn RngCore,
) -> Color {
    // Out of bounces: no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return sky.color(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            result.attenuation * ray_color(&result.scattered, world, depth - 1, sky, rng)
        }
        None => Color::ZERO,
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let quantize = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Render a single pixel with multi-sampling.
///
/// `(x, y)` are image coordinates with `y = 0` on the top row. Returns the
/// average of the samples in linear color.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    // Viewport t grows upward, image rows grow downward
    let row_from_bottom = (config.height - 1 - y) as f32;
    let s_scale = (config.width.max(2) - 1) as f32;
    let t_scale = (config.height.max(2) - 1) as f32;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let s = (x as f32 + gen_f32(rng)) / s_scale;
        let t = (row_from_bottom + gen_f32(rng)) / t_scale;

        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, &config.sky, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    /// Averaged linear colors, row-major from the top row down
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; pixel_count(width, height)],
        }
    }

    /// Offset of pixel (x, y) in `pixels`.
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Copy a finished bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (local_y, row) in result.pixels.chunks(bucket.width as usize).enumerate() {
            let start = self.index(bucket.x, bucket.y + local_y as u32);
            self.pixels[start..start + row.len()].copy_from_slice(row);
        }
    }

    /// Tone-mapped RGB bytes, three per pixel, top row first.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }
}

/// Pixels in a `width` x `height` image, counted without `u32` overflow.
pub fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Render the entire scene, buckets in parallel.
///
/// Each bucket draws from its own generator seeded by `config.seed` and the
/// bucket's grid position, so the result does not depend on the thread count.
/// Fails without rendering if `config` does not pass [`RenderConfig::validate`].
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
) -> Result<ImageBuffer, ConfigError> {
    config.validate()?;

    let buckets = generate_buckets(config.width, config.height, config.bucket_size);
    log::info!(
        "Rendering {}x{} @ {} spp, depth {}, {} buckets",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        buckets.len()
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, camera, world, config))
        .collect();

    let image = assemble(config, &results);
    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}

/// Single-threaded [`render`]; produces the identical image.
pub fn render_serial(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
) -> Result<ImageBuffer, ConfigError> {
    config.validate()?;

    let buckets = generate_buckets(config.width, config.height, config.bucket_size);
    let results: Vec<BucketResult> = buckets
        .iter()
        .map(|bucket| render_bucket(bucket, camera, world, config))
        .collect();

    Ok(assemble(config, &results))
}

fn assemble(config: &RenderConfig, results: &[BucketResult]) -> ImageBuffer {
    let mut image = ImageBuffer::new(config.width, config.height);
    for result in results {
        image.write_bucket(result);
    }
    image
}
