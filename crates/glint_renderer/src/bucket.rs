//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon. Every bucket owns its random stream, so the
//! finished image is the same however the buckets are scheduled.

use crate::renderer::render_pixel;
use crate::{Camera, Color, Hittable, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Spreads neighbouring bucket indices across the seed space.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Row-major position in the bucket grid; fixes the random stream
    pub grid_index: usize,
    /// Position in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, grid_index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            grid_index,
            index: grid_index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Generate buckets for an image, sorted in spiral order from center.
///
/// Edge buckets are cropped to the image.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    if bucket_size == 0 {
        return buckets;
    }

    let mut grid_index = 0;
    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, grid_index));
            grid_index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center, nearest first.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    let distance = |b: &Bucket| {
        let dx = b.x as f32 + b.width as f32 / 2.0 - center_x;
        let dy = b.y as f32 + b.height as f32 / 2.0 - center_y;
        dx * dx + dy * dy
    };

    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Random stream for the bucket at `grid_index` of a render seeded with `seed`.
pub fn bucket_rng(seed: u64, grid_index: usize) -> StdRng {
    let offset = (grid_index as u64).wrapping_mul(SEED_STRIDE);
    StdRng::seed_from_u64(seed.wrapping_add(offset))
}

/// Render a single bucket.
///
/// Pixels are visited in row-major order within the bucket, all drawing
/// from the bucket's own stream.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
) -> BucketResult {
    let mut rng = bucket_rng(config.seed, bucket.grid_index);
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = render_pixel(
                camera,
                world,
                bucket.x + local_x,
                bucket.y + local_y,
                config,
                &mut rng,
            );
            pixels.push(color);
        }
    }

    log::debug!(
        "Bucket {} ({}, {}) {}x{} done",
        bucket.index,
        bucket.x,
        bucket.y,
        bucket.width,
        bucket.height
    );

    BucketResult::new(*bucket, pixels)
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }
}
