//! Hittable trait and hit records for ray-object intersection.

use std::sync::Arc;

use darkroom_math::{DVec3, Ray};

use crate::Material;

/// Bias applied to every intersection test so a secondary ray never
/// reports the surface it starts on.
pub const EPSILON: f64 = 1e-9;

/// Record of a ray-primitive intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Unit surface normal at the intersection (not flipped toward the ray)
    pub normal: DVec3,
}

impl Hit {
    pub fn new(t: f64, normal: DVec3) -> Self {
        Self { t, normal }
    }
}

/// Trait for geometry that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the nearest intersection with `t >= min_t + EPSILON`, if any.
    fn hit(&self, ray: &Ray, min_t: f64) -> Option<Hit>;
}

/// A renderable object: a piece of geometry bound to a shared material.
pub struct Object {
    geometry: Box<dyn Hittable>,
    pub material: Arc<Material>,
}

impl Object {
    /// Create a new object from any hittable geometry.
    pub fn new<H: Hittable + 'static>(geometry: H, material: Arc<Material>) -> Self {
        Self {
            geometry: Box::new(geometry),
            material,
        }
    }
}

impl Hittable for Object {
    #[inline]
    fn hit(&self, ray: &Ray, min_t: f64) -> Option<Hit> {
        self.geometry.hit(ray, min_t)
    }
}
