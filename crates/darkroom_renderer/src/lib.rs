//! Darkroom renderer: CPU Whitted-style ray tracing.
//!
//! Traces primary rays through a pinhole or thin-lens camera, shades hits
//! with Blinn-Phong and hard shadows, and follows mirror reflections to a
//! fixed depth. Intersection is a linear scan over the scene's objects.

mod bucket;
mod camera;
mod hittable;
mod light;
mod material;
mod plane;
pub mod post;
mod renderer;
mod sampling;
mod scene;
mod shading;
mod sphere;
mod triangle;
mod triangle_soup;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use hittable::{Hit, Hittable, Object, EPSILON};
pub use light::{DirectionalLight, Light, PointLight};
pub use material::Material;
pub use plane::Plane;
pub use post::PostProcess;
pub use renderer::{
    quantize, ray_color, reflect, render, render_pixel, ImageBuffer, RenderConfig, BACKGROUND,
    MIRROR_BIAS,
};
pub use sampling::{disk_sample, gen_f64, pixel_seed};
pub use scene::{first_hit, Scene, SceneHit};
pub use shading::{blinn_phong, SHADOW_BIAS};
pub use sphere::Sphere;
pub use triangle::{Triangle, TriangleHit};
pub use triangle_soup::TriangleSoup;

/// Re-export common math types from darkroom_math
pub use darkroom_math::{Color, DVec2, DVec3, Interval, Ray};
