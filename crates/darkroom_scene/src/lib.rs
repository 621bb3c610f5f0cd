//! Darkroom Scene - JSON scene loading and image output.
//!
//! This crate provides:
//!
//! - **Scene loading**: JSON scene files with named materials, lights and
//!   objects, including triangle soups read from OBJ files
//! - **Output**: PNG and ASCII PPM writers for quantized renders
//!
//! # Example
//!
//! ```ignore
//! use darkroom_renderer::{render, RenderConfig};
//! use darkroom_scene::{load_scene, write_image};
//!
//! let loaded = load_scene("scene.json")?;
//! let mut config = RenderConfig::default();
//! if let Some(settings) = &loaded.render {
//!     settings.apply_to(&mut config);
//! }
//! let image = render(&loaded.scene, &config);
//! write_image("out.png", &image.to_rgb8(), image.width, image.height)?;
//! ```

pub mod loader;
pub mod obj;
pub mod output;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, LoadedScene, RenderSettings, SceneError, SceneResult};
pub use obj::load_obj_triangles;
pub use output::{write_image, write_png, write_ppm, OutputError, OutputResult};
