//! Sphere primitive for ray tracing.

use crate::hittable::{Hit, Hittable, EPSILON};
use darkroom_math::{DVec3, Interval, Ray};

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere. The radius is expected to be positive.
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, min_t: f64) -> Option<Hit> {
        // |o + t d - c|^2 = r^2, solved with the half-b form of the quadratic
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let ray_t = Interval::from_min(min_t + EPSILON);

        // Prefer the near root, fall back to the far one (ray starts inside)
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.contains(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.contains(root) {
                return None;
            }
        }

        let normal = (ray.at(root) - self.center).normalize();
        Some(Hit::new(root, normal))
    }
}
