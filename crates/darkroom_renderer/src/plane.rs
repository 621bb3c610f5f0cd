//! Infinite plane primitive.

use crate::hittable::{Hit, Hittable, EPSILON};
use darkroom_math::{DVec3, Ray};

/// An infinite plane through `point` with a unit `normal`.
///
/// The normal is reported as stored, whichever side the ray comes from.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    point: DVec3,
    normal: DVec3,
}

impl Plane {
    /// Create a new plane. The normal is normalized here, once, so the
    /// intersection test can rely on it.
    pub fn new(point: DVec3, normal: DVec3) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    pub fn point(&self) -> DVec3 {
        self.point
    }

    pub fn normal(&self) -> DVec3 {
        self.normal
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, min_t: f64) -> Option<Hit> {
        let denom = self.normal.dot(ray.direction());

        // Ray parallel to the plane
        if denom.abs() < EPSILON {
            return None;
        }

        let t = self.normal.dot(self.point - ray.origin()) / denom;
        if t < min_t + EPSILON {
            return None;
        }

        Some(Hit::new(t, self.normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Plane {
        Plane::new(DVec3::new(0.0, -1.0, 0.0), DVec3::Y)
    }

    #[test]
    fn test_plane_hit() {
        let ray = Ray::new(DVec3::ZERO, DVec3::NEG_Y);
        let hit = floor().hit(&ray, 0.0).expect("should hit the floor");

        assert!((hit.t - 1.0).abs() < 1e-12);
        assert_eq!(hit.normal, DVec3::Y);
    }

    #[test]
    fn test_plane_parallel_never_hits() {
        let plane = floor();
        for origin in [DVec3::ZERO, DVec3::new(3.0, -1.0, 2.0), DVec3::new(0.0, -7.0, 0.0)] {
            let ray = Ray::new(origin, DVec3::new(1.0, 0.0, 0.5));
            assert!(plane.hit(&ray, 0.0).is_none());
        }
    }

    #[test]
    fn test_plane_behind_ray() {
        let ray = Ray::new(DVec3::ZERO, DVec3::Y);
        assert!(floor().hit(&ray, 0.0).is_none());
    }

    #[test]
    fn test_plane_back_face_keeps_stored_normal() {
        let ray = Ray::new(DVec3::new(0.0, -5.0, 0.0), DVec3::Y);
        let hit = floor().hit(&ray, 0.0).expect("should hit from below");

        assert!((hit.t - 4.0).abs() < 1e-12);
        assert_eq!(hit.normal, DVec3::Y);
    }

    #[test]
    fn test_plane_normal_is_normalized() {
        let plane = Plane::new(DVec3::ZERO, DVec3::new(0.0, 0.0, 3.0));
        assert!((plane.normal().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_plane_respects_min_t() {
        let ray = Ray::new(DVec3::ZERO, DVec3::NEG_Y);
        assert!(floor().hit(&ray, 1.0).is_none());
        assert!(floor().hit(&ray, 0.999).is_some());
    }
}
