//! Light sources.

use darkroom_math::{Color, DVec3};

/// A light that can illuminate a point in the scene.
pub trait Light: Send + Sync {
    /// Unit direction from `q` toward the light, and the parametric distance
    /// along that direction beyond which an occluder no longer blocks it.
    fn direction(&self, q: DVec3) -> (DVec3, f64);

    /// Radiant intensity (RGB).
    fn intensity(&self) -> Color;
}

/// A light infinitely far away, arriving from one direction everywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    /// Normalized direction the light travels (from the light into the scene)
    direction: DVec3,
    intensity: Color,
}

impl DirectionalLight {
    /// Create a new directional light from the direction its light travels.
    pub fn new(direction: DVec3, intensity: Color) -> Self {
        Self {
            direction: direction.normalize(),
            intensity,
        }
    }
}

impl Light for DirectionalLight {
    fn direction(&self, _q: DVec3) -> (DVec3, f64) {
        (-self.direction, f64::INFINITY)
    }

    fn intensity(&self) -> Color {
        self.intensity
    }
}

/// A light emitting equally in all directions from a position.
///
/// No distance falloff is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    position: DVec3,
    intensity: Color,
}

impl PointLight {
    pub fn new(position: DVec3, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }
}

impl Light for PointLight {
    fn direction(&self, q: DVec3) -> (DVec3, f64) {
        let to_light = self.position - q;
        let distance = to_light.length();
        (to_light.normalize_or_zero(), distance)
    }

    fn intensity(&self) -> Color {
        self.intensity
    }
}
