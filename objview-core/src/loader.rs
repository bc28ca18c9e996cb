/// Model loading entry point: file -> parsed model -> triangles
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use crate::assemble::{assemble, AssembleError, TriangulationPolicy};
use crate::geometry::Mesh;
use crate::mtl::{load_mtl, MaterialLibrary};
use crate::obj::ObjModel;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open model file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid face in {}: {source}", .path.display())]
    InvalidFace {
        path: PathBuf,
        #[source]
        source: AssembleError,
    },
    #[error("model file {} contains no triangles", .path.display())]
    Empty { path: PathBuf },
}

#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub path: PathBuf,
    pub mesh: Mesh,
    pub materials: MaterialLibrary,
}

pub fn load_model(
    path: impl AsRef<Path>,
    policy: TriangulationPolicy,
) -> Result<LoadedModel, LoadError> {
    let path = path.as_ref();
    let model = ObjModel::read(path).map_err(|source| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let mesh = assemble(&model, policy).map_err(|source| LoadError::InvalidFace {
        path: path.to_path_buf(),
        source,
    })?;
    if mesh.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let materials = match &model.material_library {
        Some(name) => {
            let library_path = path.parent().unwrap_or_else(|| Path::new("")).join(name);
            load_mtl(&library_path).unwrap_or_else(|| {
                warn!("continuing without materials from {}", library_path.display());
                MaterialLibrary::new()
            })
        }
        None => MaterialLibrary::new(),
    };

    info!(
        "loaded {}: {} vertices, {} faces, {} triangles, {} materials",
        path.display(),
        model.vertices.len(),
        model.faces.len(),
        mesh.len(),
        materials.len()
    );

    Ok(LoadedModel {
        path: path.to_path_buf(),
        mesh,
        materials,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("objview-loader-{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_with_material_library() {
        let dir = scratch_dir("mtl");
        fs::write(dir.join("shape.mtl"), "newmtl blue\nKd 0 0 1\n").unwrap();
        fs::write(
            dir.join("shape.obj"),
            "mtllib shape.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nusemtl blue\nf 1//1 2//1 3//1\n",
        )
        .unwrap();

        let loaded = load_model(dir.join("shape.obj"), TriangulationPolicy::Drop).unwrap();
        assert_eq!(loaded.mesh.len(), 1);
        assert!(loaded.materials.contains_key("blue"));
    }

    #[test]
    fn test_missing_material_library_is_tolerated() {
        let dir = scratch_dir("no-mtl");
        fs::write(dir.join("shape.obj"), "mtllib gone.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n")
            .unwrap();
        let loaded = load_model(dir.join("shape.obj"), TriangulationPolicy::Drop).unwrap();
        assert_eq!(loaded.mesh.len(), 1);
        assert!(loaded.materials.is_empty());
    }

    #[test]
    fn test_errors() {
        let dir = scratch_dir("errors");
        let missing = load_model(dir.join("absent.obj"), TriangulationPolicy::Drop);
        assert!(matches!(missing, Err(LoadError::Unreadable { .. })));

        fs::write(dir.join("bad.obj"), "v 0 0 0\nf 1 2 3\n").unwrap();
        let bad = load_model(dir.join("bad.obj"), TriangulationPolicy::Drop);
        assert!(matches!(
            bad,
            Err(LoadError::InvalidFace { source: AssembleError::IndexOutOfRange { face: 0, .. }, .. })
        ));

        fs::write(dir.join("empty.obj"), "v 0 0 0\n").unwrap();
        let empty = load_model(dir.join("empty.obj"), TriangulationPolicy::Drop);
        assert!(matches!(empty, Err(LoadError::Empty { .. })));
    }
}
