//! JSON scene loading.
//!
//! A scene file names its materials once and refers to them by name from
//! every object:
//!
//! ```json
//! {
//!   "camera": { "eye": [0, 0, 5], "look": [0, 0, -1], "up": [0, 1, 0],
//!               "focal_length": 1, "width": 1.6, "height": 0.9 },
//!   "materials": [ { "name": "red", "ka": [0.1, 0, 0], "kd": [0.8, 0, 0],
//!                    "ks": [0.3, 0.3, 0.3], "km": [0, 0, 0], "phong_exponent": 20 } ],
//!   "lights": [ { "type": "directional", "direction": [0, -1, -1], "color": [1, 1, 1] } ],
//!   "objects": [ { "type": "sphere", "center": [0, 0, 0], "radius": 1, "material": "red" } ]
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use darkroom_math::{Color, DVec3};
use darkroom_renderer::{
    Camera, DirectionalLight, Light, Material, Object, Plane, PointLight, RenderConfig, Scene,
    Sphere, Triangle, TriangleSoup,
};
use serde::Deserialize;
use thiserror::Error;

use crate::obj::load_obj_triangles;

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("OBJ error in {path}: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Duplicate material: {0}")]
    DuplicateMaterial(String),

    #[error("Invalid {context}: {message}")]
    Invalid { context: String, message: String },
}

impl SceneError {
    fn invalid(context: impl Into<String>, message: impl Into<String>) -> Self {
        SceneError::Invalid {
            context: context.into(),
            message: message.into(),
        }
    }
}

/// Result type for loading operations.
pub type SceneResult<T> = Result<T, SceneError>;

type Vec3Desc = [f64; 3];

#[derive(Debug, Deserialize)]
struct SceneDesc {
    camera: CameraDesc,
    #[serde(default)]
    materials: Vec<MaterialDesc>,
    #[serde(default)]
    lights: Vec<LightDesc>,
    #[serde(default)]
    objects: Vec<ObjectDesc>,
    #[serde(default)]
    render: Option<RenderSettings>,
}

fn default_focal_distance() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
struct CameraDesc {
    eye: Vec3Desc,
    look: Vec3Desc,
    up: Vec3Desc,
    focal_length: f64,
    width: f64,
    height: f64,
    #[serde(default)]
    aperture: f64,
    #[serde(default = "default_focal_distance")]
    focal_distance: f64,
}

fn default_phong_exponent() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
struct MaterialDesc {
    name: String,
    #[serde(default)]
    ka: Vec3Desc,
    #[serde(default)]
    kd: Vec3Desc,
    #[serde(default)]
    ks: Vec3Desc,
    #[serde(default)]
    km: Vec3Desc,
    #[serde(default = "default_phong_exponent")]
    phong_exponent: f64,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum LightDesc {
    Directional { direction: Vec3Desc, color: Vec3Desc },
    Point { position: Vec3Desc, color: Vec3Desc },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ObjectDesc {
    Sphere {
        center: Vec3Desc,
        radius: f64,
        material: String,
    },
    Plane {
        point: Vec3Desc,
        normal: Vec3Desc,
        material: String,
    },
    Triangle {
        corners: [Vec3Desc; 3],
        material: String,
    },
    Soup {
        #[serde(default)]
        triangles: Vec<[Vec3Desc; 3]>,
        #[serde(default)]
        obj: Option<PathBuf>,
        material: String,
    },
}

/// Optional render settings carried by a scene file.
///
/// Every field is optional; present fields replace the corresponding
/// [`RenderConfig`] value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RenderSettings {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub samples_per_pixel: Option<u32>,
    pub max_depth: Option<u32>,
    pub seed: Option<u64>,
}

impl RenderSettings {
    /// Overwrite the fields of `config` that these settings specify.
    pub fn apply_to(&self, config: &mut RenderConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(samples) = self.samples_per_pixel {
            config.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
    }

    fn validate(&self) -> SceneResult<()> {
        if self.width == Some(0) || self.height == Some(0) {
            return Err(SceneError::invalid("render", "image size must be positive"));
        }
        if self.samples_per_pixel == Some(0) {
            return Err(SceneError::invalid("render", "samples_per_pixel must be positive"));
        }
        Ok(())
    }
}

/// A loaded scene plus the render settings found alongside it.
pub struct LoadedScene {
    pub scene: Scene,
    pub render: Option<RenderSettings>,
}

/// Load a scene from a JSON file.
///
/// OBJ paths inside the file are resolved relative to its directory.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<LoadedScene> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    log::info!("Loading scene {}", path.display());
    load_scene_from_str(&contents, base_dir)
}

/// Load a scene from a JSON string, resolving OBJ paths against `base_dir`.
pub fn load_scene_from_str(json: &str, base_dir: &Path) -> SceneResult<LoadedScene> {
    let desc: SceneDesc = serde_json::from_str(json)?;

    let camera = build_camera(&desc.camera)?;

    let mut materials: HashMap<String, Arc<Material>> = HashMap::new();
    for material in &desc.materials {
        let built = Arc::new(build_material(material)?);
        if materials.insert(material.name.clone(), built).is_some() {
            return Err(SceneError::DuplicateMaterial(material.name.clone()));
        }
    }

    let lights = desc
        .lights
        .iter()
        .enumerate()
        .map(|(index, light)| build_light(index, light))
        .collect::<SceneResult<Vec<_>>>()?;

    let mut objects = Vec::with_capacity(desc.objects.len());
    for (index, object) in desc.objects.iter().enumerate() {
        objects.push(build_object(index, object, &materials, base_dir)?);
    }

    if let Some(render) = &desc.render {
        render.validate()?;
    }

    log::info!(
        "Loaded {} objects, {} lights, {} materials",
        objects.len(),
        lights.len(),
        materials.len()
    );

    Ok(LoadedScene {
        scene: Scene::new(camera, objects, lights),
        render: desc.render,
    })
}

fn vec3(v: Vec3Desc) -> DVec3 {
    DVec3::from_array(v)
}

fn require_finite(context: &str, values: &[f64]) -> SceneResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SceneError::invalid(context, "values must be finite"))
    }
}

/// Normalize a direction, warning when it was not already unit length.
fn unit_direction(context: &str, v: Vec3Desc) -> SceneResult<DVec3> {
    require_finite(context, &v)?;
    let v = vec3(v);
    let length = v.length();
    if length < 1e-12 {
        return Err(SceneError::invalid(context, "direction must be non-zero"));
    }
    if (length - 1.0).abs() > 1e-6 {
        log::warn!("{}: normalizing direction of length {}", context, length);
    }
    Ok(v / length)
}

fn build_camera(desc: &CameraDesc) -> SceneResult<Camera> {
    require_finite("camera", &desc.eye)?;
    require_finite(
        "camera",
        &[desc.focal_length, desc.width, desc.height, desc.aperture, desc.focal_distance],
    )?;

    if desc.focal_length <= 0.0 {
        return Err(SceneError::invalid("camera", "focal_length must be positive"));
    }
    if desc.width <= 0.0 || desc.height <= 0.0 {
        return Err(SceneError::invalid("camera", "image plane size must be positive"));
    }
    if desc.aperture < 0.0 {
        return Err(SceneError::invalid("camera", "aperture must not be negative"));
    }
    if desc.focal_distance <= 0.0 {
        return Err(SceneError::invalid("camera", "focal_distance must be positive"));
    }

    let look = unit_direction("camera look", desc.look)?;
    let up = unit_direction("camera up", desc.up)?;
    if look.cross(up).length() < 1e-9 {
        return Err(SceneError::invalid("camera", "up must not be parallel to look"));
    }

    let camera = Camera::look_at(vec3(desc.eye), look, up, desc.focal_length, desc.width, desc.height)
        .with_lens(desc.aperture, desc.focal_distance);

    log::debug!("Camera {:?}", camera);
    Ok(camera)
}

fn build_material(desc: &MaterialDesc) -> SceneResult<Material> {
    let context = format!("material '{}'", desc.name);

    for (label, coefficient) in [("ka", desc.ka), ("kd", desc.kd), ("ks", desc.ks), ("km", desc.km)] {
        if !coefficient.iter().all(|c| (0.0..=1.0).contains(c)) {
            return Err(SceneError::invalid(
                &context,
                format!("{} must be in [0, 1], got {:?}", label, coefficient),
            ));
        }
    }
    if !(desc.phong_exponent >= 0.0 && desc.phong_exponent.is_finite()) {
        return Err(SceneError::invalid(&context, "phong_exponent must be >= 0"));
    }

    Ok(Material::new(
        vec3(desc.ka),
        vec3(desc.kd),
        vec3(desc.ks),
        vec3(desc.km),
        desc.phong_exponent,
    ))
}

fn light_color(context: &str, color: Vec3Desc) -> SceneResult<Color> {
    require_finite(context, &color)?;
    if color.iter().any(|c| *c < 0.0) {
        return Err(SceneError::invalid(context, "color must not be negative"));
    }
    Ok(vec3(color))
}

fn build_light(index: usize, desc: &LightDesc) -> SceneResult<Box<dyn Light>> {
    let context = format!("light {}", index);

    let light: Box<dyn Light> = match desc {
        LightDesc::Directional { direction, color } => Box::new(DirectionalLight::new(
            unit_direction(&context, *direction)?,
            light_color(&context, *color)?,
        )),
        LightDesc::Point { position, color } => {
            require_finite(&context, position)?;
            Box::new(PointLight::new(vec3(*position), light_color(&context, *color)?))
        }
    };

    log::debug!("{}: {:?}", context, desc);
    Ok(light)
}

fn lookup_material(
    materials: &HashMap<String, Arc<Material>>,
    name: &str,
) -> SceneResult<Arc<Material>> {
    materials
        .get(name)
        .cloned()
        .ok_or_else(|| SceneError::UnknownMaterial(name.to_string()))
}

fn triangle(context: &str, corners: &[Vec3Desc; 3]) -> SceneResult<Triangle> {
    for corner in corners {
        require_finite(context, corner)?;
    }
    Ok(Triangle::new(vec3(corners[0]), vec3(corners[1]), vec3(corners[2])))
}

fn build_object(
    index: usize,
    desc: &ObjectDesc,
    materials: &HashMap<String, Arc<Material>>,
    base_dir: &Path,
) -> SceneResult<Object> {
    let context = format!("object {}", index);

    let object = match desc {
        ObjectDesc::Sphere {
            center,
            radius,
            material,
        } => {
            require_finite(&context, center)?;
            if !(*radius > 0.0 && radius.is_finite()) {
                return Err(SceneError::invalid(&context, "sphere radius must be positive"));
            }
            Object::new(
                Sphere::new(vec3(*center), *radius),
                lookup_material(materials, material)?,
            )
        }
        ObjectDesc::Plane {
            point,
            normal,
            material,
        } => {
            require_finite(&context, point)?;
            Object::new(
                Plane::new(vec3(*point), unit_direction(&context, *normal)?),
                lookup_material(materials, material)?,
            )
        }
        ObjectDesc::Triangle { corners, material } => {
            let tri = triangle(&context, corners)?;
            if tri.is_degenerate() {
                return Err(SceneError::invalid(&context, "triangle is degenerate"));
            }
            Object::new(tri, lookup_material(materials, material)?)
        }
        ObjectDesc::Soup {
            triangles,
            obj,
            material,
        } => {
            let mut members = Vec::with_capacity(triangles.len());
            for corners in triangles {
                members.push(triangle(&context, corners)?);
            }
            if let Some(obj) = obj {
                members.extend(load_obj_triangles(&base_dir.join(obj))?);
            }

            let before = members.len();
            members.retain(|tri| !tri.is_degenerate());
            if members.len() < before {
                log::warn!(
                    "{}: dropped {} degenerate triangles",
                    context,
                    before - members.len()
                );
            }
            if members.is_empty() {
                log::warn!("{}: triangle soup has no triangles", context);
            }

            Object::new(TriangleSoup::new(members), lookup_material(materials, material)?)
        }
    };

    Ok(object)
}
