//! Local Blinn-Phong shading with hard shadows.

use darkroom_math::{Color, Ray};

use crate::scene::{first_hit, Scene, SceneHit};

/// Offset of a shadow ray origin along the surface normal.
pub const SHADOW_BIAS: f64 = 1e-8;

/// Shade `hit` as seen along `ray` with ambient, diffuse and specular terms.
///
/// A light contributes only when nothing lies between the surface point and
/// the light (closer than the light's `max_t`). The result is not clamped.
pub fn blinn_phong(ray: &Ray, hit: &SceneHit, scene: &Scene, ambient_intensity: f64) -> Color {
    let material = &scene.objects[hit.object].material;
    let p = ray.at(hit.t);
    let n = hit.normal;
    let view = (-ray.direction()).normalize();

    let mut color = ambient_intensity * material.ka;

    for light in &scene.lights {
        let (l, max_t) = light.direction(p);

        let shadow_ray = Ray::new(p + SHADOW_BIAS * n, l);
        let occluded = first_hit(&shadow_ray, SHADOW_BIAS, &scene.objects)
            .is_some_and(|blocker| blocker.t < max_t);
        if occluded {
            continue;
        }

        let n_dot_l = n.dot(l);
        if n_dot_l <= 0.0 {
            continue;
        }

        let intensity = light.intensity();
        color += material.kd * intensity * n_dot_l;

        let h = (l + view).normalize_or_zero();
        let n_dot_h = n.dot(h).max(0.0);
        color += material.ks * intensity * n_dot_h.powf(material.phong_exponent);
    }

    color
}
