//! Math types shared by the Darkroom crates.
//!
//! Everything is double precision: intersection code biases hits by
//! epsilons on the order of 1e-9, which single precision cannot resolve.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;

/// RGB color with linear components, nominally in [0, 1].
pub type Color = DVec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dvec3_operations() {
        let a = DVec3::new(1.0, 2.0, 3.0);
        let b = DVec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, DVec3::new(5.0, 7.0, 9.0));
        assert_eq!(a * b, DVec3::new(4.0, 10.0, 18.0));
    }

    #[test]
    fn test_color_alias() {
        let c: Color = Color::new(0.25, 0.5, 1.0);
        assert_eq!(c.max_element(), 1.0);
    }
}
