//! Blinn-Phong surface material.

use darkroom_math::Color;

/// Reflectance coefficients of a surface.
///
/// Every coefficient is an RGB triple in [0, 1]. The scene loader checks
/// this when it builds materials; the renderer trusts it.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Ambient reflectance
    pub ka: Color,
    /// Diffuse reflectance
    pub kd: Color,
    /// Specular reflectance
    pub ks: Color,
    /// Mirror reflectance, zero for non-reflective surfaces
    pub km: Color,
    /// Specular shininess (>= 0)
    pub phong_exponent: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ka: Color::splat(0.5),
            kd: Color::splat(0.5),
            ks: Color::ZERO,
            km: Color::ZERO,
            phong_exponent: 1.0,
        }
    }
}

impl Material {
    /// Create a new material from all of its coefficients.
    pub fn new(ka: Color, kd: Color, ks: Color, km: Color, phong_exponent: f64) -> Self {
        Self {
            ka,
            kd,
            ks,
            km,
            phong_exponent,
        }
    }

    /// A purely diffuse material where ambient and diffuse share one color.
    pub fn matte(color: Color) -> Self {
        Self {
            ka: color,
            kd: color,
            ..Default::default()
        }
    }

    /// A perfect mirror with no local shading of its own.
    pub fn mirror() -> Self {
        Self {
            ka: Color::ZERO,
            kd: Color::ZERO,
            ks: Color::ZERO,
            km: Color::ONE,
            phong_exponent: 0.0,
        }
    }

    /// Set the specular coefficient and exponent.
    pub fn with_specular(mut self, ks: Color, phong_exponent: f64) -> Self {
        self.ks = ks;
        self.phong_exponent = phong_exponent;
        self
    }

    /// Set the mirror coefficient.
    pub fn with_mirror(mut self, km: Color) -> Self {
        self.km = km;
        self
    }

    /// True if any channel of the mirror coefficient is positive.
    pub fn is_reflective(&self) -> bool {
        self.km.max_element() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matte_is_not_reflective() {
        let m = Material::matte(Color::new(0.8, 0.1, 0.1));
        assert_eq!(m.ka, m.kd);
        assert!(!m.is_reflective());
    }

    #[test]
    fn test_single_channel_mirror_is_reflective() {
        let m = Material::default().with_mirror(Color::new(0.0, 0.0, 0.2));
        assert!(m.is_reflective());
    }

    #[test]
    fn test_mirror_has_no_local_shading() {
        let m = Material::mirror();
        assert_eq!(m.ka + m.kd + m.ks, Color::ZERO);
        assert_eq!(m.km, Color::ONE);
    }
}
