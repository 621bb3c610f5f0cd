//! Film-look post-processing applied to a finished render.
//!
//! Filters run per pixel on linear colors, in the order
//! grade, vignette, grain.

use darkroom_math::Color;
use rayon::prelude::*;

use crate::ImageBuffer;

fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let x = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

/// Integer hash of a pixel coordinate, in [0, 1].
fn hash(i: u32, j: u32, seed: i32) -> f64 {
    let mut n = (i as i32)
        .wrapping_mul(374_761_393)
        .wrapping_add((j as i32).wrapping_mul(668_265_263))
        .wrapping_add(seed);
    n = (n ^ (n >> 13)).wrapping_mul(1_274_126_177);
    n ^= n >> 16;
    (n & 0x7fff_ffff) as f64 / 0x7fff_ffff as f64
}

/// Add fixed per-pixel noise in `[-intensity, intensity]` to each channel.
pub fn film_grain(color: Color, i: u32, j: u32, intensity: f64) -> Color {
    let grain = Color::new(
        hash(i, j, 0) - 0.5,
        hash(i, j, 1) - 0.5,
        hash(i, j, 2) - 0.5,
    ) * 2.0
        * intensity;

    (color + grain).clamp(Color::ZERO, Color::ONE)
}

/// Darken pixel (row `i`, column `j`) toward the image corners.
pub fn vignette(color: Color, i: u32, j: u32, width: u32, height: u32, strength: f64) -> Color {
    let x = (j as f64 / width as f64 - 0.5) * 2.0;
    let y = (i as f64 / height as f64 - 0.5) * 2.0;

    let aspect = width as f64 / height as f64;
    let dist = (x * x * aspect * aspect + y * y).sqrt();

    color * (1.0 - smoothstep(0.4, 1.4, dist) * strength)
}

/// Warm color grade: lift red, cut blue, and add a touch of contrast.
pub fn warm_grade(color: Color, strength: f64) -> Color {
    let tint = Color::new(1.0 + strength * 0.15, 1.0 + strength * 0.05, 1.0 - strength * 0.1);
    let contrast = 1.0 + strength * 0.1;

    let graded = (color * tint - Color::splat(0.5)) * contrast + Color::splat(0.5);
    graded.clamp(Color::ZERO, Color::ONE)
}

/// Post-processing settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PostProcess {
    pub grading: bool,
    pub grading_strength: f64,
    pub vignette: bool,
    pub vignette_strength: f64,
    pub grain: bool,
    pub grain_intensity: f64,
}

impl Default for PostProcess {
    fn default() -> Self {
        Self {
            grading: true,
            grading_strength: 0.3,
            vignette: true,
            vignette_strength: 0.6,
            grain: true,
            grain_intensity: 0.025,
        }
    }
}

impl PostProcess {
    /// Every filter switched off.
    pub fn none() -> Self {
        Self {
            grading: false,
            vignette: false,
            grain: false,
            ..Default::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.grading || self.vignette || self.grain
    }

    /// Run the enabled filters on one pixel.
    pub fn apply_pixel(&self, color: Color, i: u32, j: u32, width: u32, height: u32) -> Color {
        let mut color = color;
        if self.grading {
            color = warm_grade(color, self.grading_strength);
        }
        if self.vignette {
            color = vignette(color, i, j, width, height, self.vignette_strength);
        }
        if self.grain {
            color = film_grain(color, i, j, self.grain_intensity);
        }
        color
    }

    /// Run the enabled filters over a whole image in place.
    pub fn apply(&self, image: &mut ImageBuffer) {
        if !self.is_enabled() {
            return;
        }

        let (width, height) = (image.width, image.height);
        if width == 0 {
            return;
        }

        image
            .pixels
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(row, pixels)| {
                for (column, pixel) in pixels.iter_mut().enumerate() {
                    *pixel = self.apply_pixel(*pixel, row as u32, column as u32, width, height);
                }
            });

        log::debug!("Applied post-processing {:?}", self);
    }
}
