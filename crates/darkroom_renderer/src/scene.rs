//! The renderable scene and nearest-hit resolution.

use darkroom_math::{DVec3, Ray};

use crate::hittable::{Hittable, Object};
use crate::{Camera, Light};

/// Nearest intersection over a list of objects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneHit {
    /// Index of the object that was hit
    pub object: usize,
    pub t: f64,
    /// Unit normal of the hit object at the intersection
    pub normal: DVec3,
}

/// Everything a render pass reads: camera, geometry and lights.
///
/// Immutable while rendering and shared by reference across workers.
pub struct Scene {
    pub camera: Camera,
    pub objects: Vec<Object>,
    pub lights: Vec<Box<dyn Light>>,
}

impl Scene {
    pub fn new(camera: Camera, objects: Vec<Object>, lights: Vec<Box<dyn Light>>) -> Self {
        Self {
            camera,
            objects,
            lights,
        }
    }

    /// Nearest hit over every object in the scene.
    #[inline]
    pub fn first_hit(&self, ray: &Ray, min_t: f64) -> Option<SceneHit> {
        first_hit(ray, min_t, &self.objects)
    }
}

/// Find the nearest object hit by `ray` with `t >= min_t + EPSILON`.
///
/// Linear scan; only a strictly smaller `t` replaces the current best, so
/// the earlier object wins a tie.
pub fn first_hit(ray: &Ray, min_t: f64, objects: &[Object]) -> Option<SceneHit> {
    let mut closest: Option<SceneHit> = None;

    for (index, object) in objects.iter().enumerate() {
        if let Some(hit) = object.hit(ray, min_t) {
            if closest.map_or(true, |best| hit.t < best.t) {
                closest = Some(SceneHit {
                    object: index,
                    t: hit.t,
                    normal: hit.normal,
                });
            }
        }
    }

    closest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Plane, Sphere};
    use std::sync::Arc;

    fn sphere_and_plane() -> Vec<Object> {
        let material = Arc::new(Material::default());
        vec![
            Object::new(
                Plane::new(DVec3::new(0.0, 0.0, -10.0), DVec3::Z),
                material.clone(),
            ),
            Object::new(Sphere::new(DVec3::new(0.0, 0.0, -6.0), 1.0), material),
        ]
    }

    #[test]
    fn test_first_hit_is_global_minimum() {
        let objects = sphere_and_plane();
        let ray = Ray::new(DVec3::ZERO, DVec3::NEG_Z);

        let hit = first_hit(&ray, 0.0, &objects).expect("should hit");
        assert_eq!(hit.object, 1);
        assert!((hit.t - 5.0).abs() < 1e-12);
        assert!((hit.normal - DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_first_hit_min_t_skips_nearer_objects() {
        let objects = sphere_and_plane();
        let ray = Ray::new(DVec3::ZERO, DVec3::NEG_Z);

        // Past both sphere roots (5 and 7), only the plane at 10 remains
        let hit = first_hit(&ray, 7.5, &objects).expect("plane remains");
        assert_eq!(hit.object, 0);
        assert!((hit.t - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_first_hit_tie_keeps_first_object() {
        let material = Arc::new(Material::default());
        let objects = vec![
            Object::new(Sphere::new(DVec3::new(0.0, 0.0, -3.0), 1.0), material.clone()),
            Object::new(Sphere::new(DVec3::new(0.0, 0.0, -3.0), 1.0), material),
        ];

        let hit = first_hit(&Ray::new(DVec3::ZERO, DVec3::NEG_Z), 0.0, &objects)
            .expect("should hit");
        assert_eq!(hit.object, 0);
    }

    #[test]
    fn test_first_hit_empty_scene() {
        assert!(first_hit(&Ray::default(), 0.0, &[]).is_none());
    }
}
