//! Unstructured triangle collection treated as a single object.

use crate::hittable::{Hit, Hittable};
use crate::Triangle;
use darkroom_math::Ray;

/// An ordered list of triangles intersected as one object.
///
/// Intersection is a linear scan over the members; the nearest hit wins and
/// the earlier triangle wins a tie.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleSoup {
    triangles: Vec<Triangle>,
}

impl TriangleSoup {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

impl Hittable for TriangleSoup {
    fn hit(&self, ray: &Ray, min_t: f64) -> Option<Hit> {
        let mut closest: Option<Hit> = None;

        for triangle in &self.triangles {
            if let Some(hit) = triangle.hit(ray, min_t) {
                if closest.map_or(true, |best| hit.t < best.t) {
                    closest = Some(hit);
                }
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darkroom_math::DVec3;

    fn quad_at(z: f64) -> Vec<Triangle> {
        let a = DVec3::new(-1.0, -1.0, z);
        let b = DVec3::new(1.0, -1.0, z);
        let c = DVec3::new(1.0, 1.0, z);
        let d = DVec3::new(-1.0, 1.0, z);
        vec![Triangle::new(a, b, c), Triangle::new(a, c, d)]
    }

    #[test]
    fn test_soup_returns_nearest_member() {
        let mut triangles = quad_at(-5.0);
        triangles.extend(quad_at(-2.0));
        let soup = TriangleSoup::new(triangles);

        let ray = Ray::new(DVec3::new(0.2, 0.3, 0.0), DVec3::NEG_Z);
        let hit = soup.hit(&ray, 0.0).expect("should hit");
        assert!((hit.t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_soup_min_t_reaches_farther_member() {
        let mut triangles = quad_at(-2.0);
        triangles.extend(quad_at(-5.0));
        let soup = TriangleSoup::new(triangles);

        let ray = Ray::new(DVec3::new(0.2, 0.3, 0.0), DVec3::NEG_Z);
        let hit = soup.hit(&ray, 3.0).expect("far quad should remain");
        assert!((hit.t - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_soup_misses() {
        let soup = TriangleSoup::default();
        assert!(soup.is_empty());
        assert!(soup.hit(&Ray::default(), 0.0).is_none());
    }

    #[test]
    fn test_soup_miss() {
        let soup = TriangleSoup::new(quad_at(-2.0));
        assert_eq!(soup.len(), 2);

        let ray = Ray::new(DVec3::new(3.0, 0.0, 0.0), DVec3::NEG_Z);
        assert!(soup.hit(&ray, 0.0).is_none());
    }
}
