//! Camera for primary ray generation.
//!
//! Two models share one image plane: a pinhole camera, and a thin lens
//! that blurs everything off the focal plane.

use darkroom_math::{DVec3, Ray};

use crate::hittable::EPSILON;
use crate::sampling::disk_sample;

/// A camera with an orthonormal frame where `-w` is the viewing direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position
    pub eye: DVec3,
    /// Right
    pub u: DVec3,
    /// Up
    pub v: DVec3,
    /// Backward (opposite the viewing direction)
    pub w: DVec3,
    /// Distance from the eye to the image plane
    pub d: f64,
    /// Physical width of the image plane
    pub width: f64,
    /// Physical height of the image plane
    pub height: f64,
    /// Lens radius, 0 for a pinhole
    pub aperture: f64,
    /// Distance from the eye to the plane of perfect focus
    pub focal_distance: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: DVec3::ZERO,
            u: DVec3::X,
            v: DVec3::Y,
            w: DVec3::Z,
            d: 1.0,
            width: 1.0,
            height: 1.0,
            aperture: 0.0,
            focal_distance: 1.0,
        }
    }
}

impl Camera {
    /// Create a pinhole camera from an already orthonormal frame.
    pub fn new(eye: DVec3, u: DVec3, v: DVec3, w: DVec3, d: f64, width: f64, height: f64) -> Self {
        Self {
            eye,
            u,
            v,
            w,
            d,
            width,
            height,
            ..Default::default()
        }
    }

    /// Create a pinhole camera looking along `look`, with `up` as a hint.
    ///
    /// The frame is rebuilt so it is orthonormal even when `up` is not
    /// perpendicular to `look`.
    pub fn look_at(eye: DVec3, look: DVec3, up: DVec3, d: f64, width: f64, height: f64) -> Self {
        let w = -look.normalize();
        let u = up.normalize().cross(w).normalize();
        let v = w.cross(u);
        Self::new(eye, u, v, w, d, width, height)
    }

    /// Replace the lens parameters.
    pub fn with_lens(mut self, aperture: f64, focal_distance: f64) -> Self {
        self.aperture = aperture;
        self.focal_distance = focal_distance;
        self
    }

    pub fn has_depth_of_field(&self) -> bool {
        self.aperture > 0.0
    }

    /// Unit direction from the eye through the center of pixel (row `i`,
    /// column `j`) of a `image_width` x `image_height` image. Row 0 is the top.
    pub fn pinhole_direction(&self, i: u32, j: u32, image_width: u32, image_height: u32) -> DVec3 {
        let sx = ((j as f64 + 0.5) / image_width as f64 - 0.5) * self.width;
        let sy = -((i as f64 + 0.5) / image_height as f64 - 0.5) * self.height;

        let image_point = self.eye - self.d * self.w + sx * self.u + sy * self.v;
        (image_point - self.eye).normalize()
    }

    /// Pinhole ray through the center of a pixel.
    pub fn pinhole_ray(&self, i: u32, j: u32, image_width: u32, image_height: u32) -> Ray {
        Ray::new(self.eye, self.pinhole_direction(i, j, image_width, image_height))
    }

    /// Thin-lens ray through the center of a pixel.
    ///
    /// `(lens_u, lens_v)` in [0, 1]^2 pick the point on the lens. Without an
    /// aperture, or when the pixel direction runs parallel to the focal plane,
    /// this is the pinhole ray.
    pub fn thin_lens_ray(
        &self,
        i: u32,
        j: u32,
        image_width: u32,
        image_height: u32,
        lens_u: f64,
        lens_v: f64,
    ) -> Ray {
        let pinhole = self.pinhole_ray(i, j, image_width, image_height);
        if self.aperture <= 0.0 {
            return pinhole;
        }

        let direction = pinhole.direction();
        let denom = direction.dot(-self.w);
        if denom.abs() < EPSILON {
            return pinhole;
        }

        let focal_point = self.eye + (self.focal_distance / denom) * direction;

        let lens = disk_sample(lens_u, lens_v);
        let lens_point = self.eye + self.aperture * (lens.x * self.u + lens.y * self.v);

        Ray::new(lens_point, (focal_point - lens_point).normalize())
    }

    /// Primary ray for a pixel, using the lens model when there is an aperture.
    #[inline]
    pub fn primary_ray(
        &self,
        i: u32,
        j: u32,
        image_width: u32,
        image_height: u32,
        lens_u: f64,
        lens_v: f64,
    ) -> Ray {
        if self.has_depth_of_field() {
            self.thin_lens_ray(i, j, image_width, image_height, lens_u, lens_v)
        } else {
            self.pinhole_ray(i, j, image_width, image_height)
        }
    }
}
