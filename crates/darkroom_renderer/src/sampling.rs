//! Random number helpers and lens sampling.

use darkroom_math::DVec2;
use rand::{Rng, RngCore};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

/// Generate a uniform f64 in [0, 1) from a type-erased RNG.
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Map a point of the unit square onto the unit disk.
///
/// Shirley-Chiu concentric mapping: area preserving, so uniform `(u, v)`
/// gives uniformly distributed disk points.
pub fn disk_sample(u: f64, v: f64) -> DVec2 {
    let a = 2.0 * u - 1.0;
    let b = 2.0 * v - 1.0;

    if a == 0.0 && b == 0.0 {
        return DVec2::ZERO;
    }

    let (r, theta) = if a * a > b * b {
        (a, FRAC_PI_4 * (b / a))
    } else {
        (b, FRAC_PI_2 - FRAC_PI_4 * (a / b))
    };

    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Seed for the RNG of one pixel, stable across runs and thread counts.
pub fn pixel_seed(seed: u64, pixel_index: u64) -> u64 {
    // splitmix64 finalizer over the combined value
    let mut z = seed ^ pixel_index.wrapping_mul(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const GRID: usize = 200;

    fn grid_samples() -> impl Iterator<Item = DVec2> {
        (0..GRID).flat_map(|a| {
            (0..GRID).map(move |b| {
                let u = (a as f64 + 0.5) / GRID as f64;
                let v = (b as f64 + 0.5) / GRID as f64;
                disk_sample(u, v)
            })
        })
    }

    #[test]
    fn test_disk_center_maps_to_origin() {
        assert_eq!(disk_sample(0.5, 0.5), DVec2::ZERO);
    }

    #[test]
    fn test_disk_samples_stay_inside() {
        for p in grid_samples() {
            assert!(p.length_squared() <= 1.0 + 1e-12, "{p:?} outside disk");
        }
        // Corners of the square land on the rim
        for (u, v) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
            assert!((disk_sample(u, v).length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_disk_samples_have_zero_mean() {
        let mean = grid_samples().fold(DVec2::ZERO, |acc, p| acc + p) / (GRID * GRID) as f64;
        assert!(mean.length() < 1e-9, "mean {mean:?}");
    }

    #[test]
    fn test_disk_samples_are_uniform_in_area() {
        // A uniform disk has a quarter of its samples within half the radius
        let inner = grid_samples().filter(|p| p.length() < 0.5).count();
        let fraction = inner as f64 / (GRID * GRID) as f64;
        assert!((fraction - 0.25).abs() < 0.01, "fraction {fraction}");
    }

    #[test]
    fn test_gen_f64_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = gen_f64(&mut rng);
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_pixel_seed_is_stable_and_spread() {
        assert_eq!(pixel_seed(42, 10), pixel_seed(42, 10));
        assert_ne!(pixel_seed(42, 10), pixel_seed(42, 11));
        assert_ne!(pixel_seed(42, 10), pixel_seed(43, 10));
    }
}
