//! Wavefront OBJ meshes as triangle soups.

use std::path::Path;

use darkroom_math::DVec3;
use darkroom_renderer::Triangle;

use crate::loader::{SceneError, SceneResult};

/// Load every face of every model in an OBJ file as flat triangles.
///
/// Polygons are triangulated; normals, texture coordinates and materials in
/// the file are ignored.
pub fn load_obj_triangles(path: &Path) -> SceneResult<Vec<Triangle>> {
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        },
    )
    .map_err(|source| SceneError::Obj {
        path: path.to_path_buf(),
        source,
    })?;

    let mut triangles = Vec::new();
    for model in &models {
        let mesh = &model.mesh;
        let vertex = |index: u32| {
            let i = index as usize * 3;
            DVec3::new(
                mesh.positions[i] as f64,
                mesh.positions[i + 1] as f64,
                mesh.positions[i + 2] as f64,
            )
        };

        for face in mesh.indices.chunks_exact(3) {
            triangles.push(Triangle::new(vertex(face[0]), vertex(face[1]), vertex(face[2])));
        }

        log::debug!(
            "OBJ model '{}': {} triangles",
            model.name,
            mesh.indices.len() / 3
        );
    }

    log::info!("Loaded {} triangles from {}", triangles.len(), path.display());
    Ok(triangles)
}
