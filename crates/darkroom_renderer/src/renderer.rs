//! Core recursive ray tracer.
//!
//! Implements Whitted-style tracing with:
//! - Blinn-Phong local shading with hard shadows
//! - Recursive mirror reflection up to a configurable depth
//! - Multi-sampled thin-lens depth of field
//! - Parallel bucket rendering with per-pixel seeded RNGs

use std::time::Instant;

use darkroom_math::{Color, DVec3, Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::sampling::{gen_f64, pixel_seed};
use crate::shading::blinn_phong;
use crate::Scene;

/// Offset of a mirror ray origin off the surface.
pub const MIRROR_BIAS: f64 = 1e-6;

/// Color of a ray that leaves the scene.
pub const BACKGROUND: Color = Color::ZERO;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Primary rays averaged per pixel
    pub samples_per_pixel: u32,
    /// Maximum mirror recursion depth (0 disables reflections)
    pub max_depth: u32,
    /// Scale of every material's ambient term
    pub ambient_intensity: f64,
    /// Base seed of the per-pixel lens sample streams
    pub seed: u64,
    /// Edge length of the square tiles rendered in parallel
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            samples_per_pixel: 32,
            max_depth: 9,
            ambient_intensity: 0.1,
            seed: 42,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

/// Mirror `d` about the plane with normal `n`.
#[inline]
pub fn reflect(d: DVec3, n: DVec3) -> DVec3 {
    let n = n.normalize();
    d - 2.0 * d.dot(n) * n
}

/// Compute the color seen along `ray`, or `None` if it hits nothing.
///
/// `depth` counts the mirror bounces taken so far; reflections stop once it
/// reaches `config.max_depth`.
pub fn ray_color(
    ray: &Ray,
    min_t: f64,
    scene: &Scene,
    depth: u32,
    config: &RenderConfig,
) -> Option<Color> {
    let hit = scene.first_hit(ray, min_t)?;

    let mut color = blinn_phong(ray, &hit, scene, config.ambient_intensity);

    let material = &scene.objects[hit.object].material;
    if depth < config.max_depth && material.is_reflective() {
        let p = ray.at(hit.t);
        let reflected = reflect(ray.direction(), hit.normal);

        // Start on the side the reflected ray leaves from
        let offset = if reflected.dot(hit.normal) >= 0.0 {
            hit.normal
        } else {
            -hit.normal
        };
        let mirror_ray = Ray::new(p + MIRROR_BIAS * offset, reflected);

        let mirrored = ray_color(&mirror_ray, MIRROR_BIAS, scene, depth + 1, config)
            .unwrap_or(BACKGROUND);
        color += material.km * mirrored;
    }

    Some(color)
}

/// Render a single pixel (row `i`, column `j`) by averaging primary rays.
///
/// Lens samples are drawn from `rng`. A pinhole camera sends the same ray
/// for every sample, so it is traced only once.
///
/// Primary rays are unit length and start at `min_t = camera.d`, so the near
/// clip is a sphere of radius `d` around the ray origin rather than the flat
/// image plane. Off-axis pixels can see geometry slightly in front of the
/// image plane.
pub fn render_pixel(
    scene: &Scene,
    config: &RenderConfig,
    i: u32,
    j: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let camera = &scene.camera;
    let (width, height) = (config.width, config.height);

    if !camera.has_depth_of_field() {
        let ray = camera.pinhole_ray(i, j, width, height);
        return ray_color(&ray, camera.d, scene, 0, config).unwrap_or(BACKGROUND);
    }

    let samples = config.samples_per_pixel.max(1);
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        let lens_u = gen_f64(rng);
        let lens_v = gen_f64(rng);
        let ray = camera.primary_ray(i, j, width, height, lens_u, lens_v);
        pixel_color += ray_color(&ray, camera.d, scene, 0, config).unwrap_or(BACKGROUND);
    }

    pixel_color / samples as f64
}

/// Render a pixel with its own RNG derived from the base seed.
pub(crate) fn render_seeded_pixel(scene: &Scene, config: &RenderConfig, i: u32, j: u32) -> Color {
    let index = i as u64 * config.width as u64 + j as u64;
    let mut rng = StdRng::seed_from_u64(pixel_seed(config.seed, index));
    render_pixel(scene, config, i, j, &mut rng)
}

/// Quantize a linear color channel to 8 bits.
#[inline]
pub fn quantize(channel: f64) -> u8 {
    (255.0 * Interval::UNIT.clamp(channel)).round() as u8
}

/// Image buffer of linear colors in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at column `x`, row `y`.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for local_y in 0..bucket.height {
            for local_x in 0..bucket.width {
                let color = result.pixels[(local_y * bucket.width + local_x) as usize];
                self.set(bucket.x + local_x, bucket.y + local_y, color);
            }
        }
    }

    /// Convert to packed RGB bytes, `round(255 * clamp(c, 0, 1))` per channel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&[quantize(color.x), quantize(color.y), quantize(color.z)]);
        }
        bytes
    }
}

/// Render the entire scene, buckets in parallel.
///
/// Every pixel seeds its own RNG, so the image does not depend on the
/// number of threads or the order buckets finish in.
pub fn render(scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let start = Instant::now();
    let buckets = generate_buckets(config.width, config.height, config.bucket_size);

    log::info!(
        "Rendering {}x{} with {} samples/pixel, max depth {} ({} objects, {} lights)",
        config.width,
        config.height,
        if scene.camera.has_depth_of_field() { config.samples_per_pixel.max(1) } else { 1 },
        config.max_depth,
        scene.objects.len(),
        scene.lights.len()
    );
    log::debug!("{} buckets of {}px", buckets.len(), config.bucket_size);

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| BucketResult::new(*bucket, render_bucket(bucket, scene, config)))
        .collect();

    let mut image = ImageBuffer::new(config.width, config.height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    image
}
