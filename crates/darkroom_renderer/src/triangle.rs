//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::hittable::{Hit, Hittable, EPSILON};
use darkroom_math::{DVec3, Ray};

/// A triangle primitive with a flat face normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    /// Vertices
    v0: DVec3,
    v1: DVec3,
    v2: DVec3,
    /// Face normal from the winding, `normalize((v1 - v0) x (v2 - v0))`
    normal: DVec3,
}

/// Barycentric result of a ray-triangle test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    pub t: f64,
    /// Weight of `v1`
    pub u: f64,
    /// Weight of `v2`
    pub v: f64,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: DVec3, v1: DVec3, v2: DVec3) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        Self { v0, v1, v2, normal }
    }

    pub fn corners(&self) -> [DVec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    pub fn centroid(&self) -> DVec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    /// True if the corners are (nearly) collinear.
    pub fn is_degenerate(&self) -> bool {
        (self.v1 - self.v0).cross(self.v2 - self.v0).length() < EPSILON
    }

    /// Möller-Trumbore ray-triangle intersection, keeping the barycentrics.
    pub fn intersect(&self, ray: &Ray, min_t: f64) -> Option<TriangleHit> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction().cross(edge2);
        let det = edge1.dot(h);

        // Ray is parallel to the triangle, or the triangle is degenerate
        if det.abs() < EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = ray.origin() - self.v0;
        let u = inv_det * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = inv_det * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = inv_det * edge2.dot(q);
        if t < min_t + EPSILON {
            return None;
        }

        Some(TriangleHit { t, u, v })
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, min_t: f64) -> Option<Hit> {
        self.intersect(ray, min_t)
            .map(|tri_hit| Hit::new(tri_hit.t, self.normal))
    }
}
