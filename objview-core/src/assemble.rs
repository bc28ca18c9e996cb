/// Turns parsed OBJ faces into working triangles
use std::fmt;

use log::debug;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Mesh, Triangle};
use crate::obj::{Face, ObjModel};

/// What to do with faces that do not have exactly three corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriangulationPolicy {
    /// Skip them.
    #[default]
    Drop,
    /// Split polygons with more than three corners into a fan around the
    /// first corner.
    Fan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Position,
    Normal,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Position => f.write_str("position"),
            IndexKind::Normal => f.write_str("normal"),
        }
    }
}

/// A face refers to geometry that does not exist. Face and corner numbers
/// are 0-based positions in the model; `index` is the 0-based array index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    #[error("face {face}, corner {corner}: missing position index")]
    MissingPosition { face: usize, corner: usize },
    #[error(
        "face {face}, corner {corner}: {kind} index {} is out of range ({available} defined)",
        .index + 1
    )]
    IndexOutOfRange {
        face: usize,
        corner: usize,
        kind: IndexKind,
        index: usize,
        available: usize,
    },
}

pub fn assemble(model: &ObjModel, policy: TriangulationPolicy) -> Result<Mesh, AssembleError> {
    let mut mesh = Mesh::with_capacity(model.faces.len());
    let mut skipped = 0usize;

    for (face_index, face) in model.faces.iter().enumerate() {
        let count = face.corners.len();
        match policy {
            _ if count == 3 => {
                mesh.add_triangle(build_triangle(model, face_index, face, [0, 1, 2])?);
            }
            TriangulationPolicy::Fan if count > 3 => {
                for i in 1..count - 1 {
                    mesh.add_triangle(build_triangle(model, face_index, face, [0, i, i + 1])?);
                }
            }
            _ => skipped += 1,
        }
    }

    debug!(
        "assembled {} triangles from {} faces ({} skipped)",
        mesh.len(),
        model.faces.len(),
        skipped
    );
    Ok(mesh)
}

fn build_triangle(
    model: &ObjModel,
    face_index: usize,
    face: &Face,
    corners: [usize; 3],
) -> Result<Triangle, AssembleError> {
    let mut vertices = [Point3::origin(); 3];
    for (slot, &corner) in vertices.iter_mut().zip(&corners) {
        let index = face.corners[corner]
            .position
            .ok_or(AssembleError::MissingPosition {
                face: face_index,
                corner,
            })?;
        *slot = *lookup(&model.vertices, IndexKind::Position, face_index, corner, index)?;
    }

    let normal_indices = corners.map(|corner| face.corners[corner].normal);
    let mut normals = [Vector3::zeros(); 3];
    if let [Some(a), Some(b), Some(c)] = normal_indices {
        for ((slot, &corner), index) in normals.iter_mut().zip(&corners).zip([a, b, c]) {
            *slot = *lookup(&model.normals, IndexKind::Normal, face_index, corner, index)?;
        }
    }

    Ok(Triangle::new(vertices, normals))
}

fn lookup<T>(
    items: &[T],
    kind: IndexKind,
    face: usize,
    corner: usize,
    index: usize,
) -> Result<&T, AssembleError> {
    items.get(index).ok_or(AssembleError::IndexOutOfRange {
        face,
        corner,
        kind,
        index,
        available: items.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vn 0 0 1
";

    #[test]
    fn test_only_three_corner_faces_become_triangles() {
        let model = ObjModel::parse(&format!("{SQUARE}f 1 2 3\nf 1 2 3 4\nf 1 2\nf 1 3 4\n"));
        let mesh = assemble(&model, TriangulationPolicy::Drop).unwrap();
        assert_eq!(mesh.len(), 2);
        assert_eq!(mesh.triangles[1].vertices[1], Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_fan_triangulation() {
        let model = ObjModel::parse(&format!("{SQUARE}f 1//1 2//1 3//1 4//1\nf 1 2\n"));
        let mesh = assemble(&model, TriangulationPolicy::Fan).unwrap();
        assert_eq!(mesh.len(), 2);
        assert_eq!(
            mesh.triangles[0].vertices,
            [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)]
        );
        assert_eq!(
            mesh.triangles[1].vertices,
            [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0), Point3::new(0.0, 1.0, 0.0)]
        );
        assert_eq!(mesh.triangles[1].average_normal, Vector3::z());
    }

    #[test]
    fn test_normals_are_used_only_when_every_corner_has_one() {
        let model = ObjModel::parse(&format!("{SQUARE}f 1//1 2//1 3//1\nf 1//1 2 3//1\n"));
        let mesh = assemble(&model, TriangulationPolicy::Drop).unwrap();
        assert_eq!(mesh.triangles[0].normals, [Vector3::z(); 3]);
        assert_eq!(mesh.triangles[0].average_normal, Vector3::z());
        assert_eq!(mesh.triangles[1].normals, [Vector3::zeros(); 3]);
        assert_eq!(mesh.triangles[1].average_normal, Vector3::zeros());
    }

    #[test]
    fn test_out_of_range_position_fails() {
        let model = ObjModel::parse(&format!("{SQUARE}f 1 2 3\nf 1 2 9\n"));
        let err = assemble(&model, TriangulationPolicy::Drop).unwrap_err();
        assert_eq!(
            err,
            AssembleError::IndexOutOfRange {
                face: 1,
                corner: 2,
                kind: IndexKind::Position,
                index: 8,
                available: 4,
            }
        );
        assert_eq!(
            err.to_string(),
            "face 1, corner 2: position index 9 is out of range (4 defined)"
        );
    }

    #[test]
    fn test_missing_position_fails() {
        let model = ObjModel::parse(&format!("{SQUARE}f 1 /1/1 3\n"));
        assert_eq!(
            assemble(&model, TriangulationPolicy::Drop),
            Err(AssembleError::MissingPosition { face: 0, corner: 1 })
        );
    }

    #[test]
    fn test_out_of_range_normal_fails() {
        let model = ObjModel::parse(&format!("{SQUARE}f 1//1 2//1 3//2\n"));
        let err = assemble(&model, TriangulationPolicy::Drop).unwrap_err();
        assert!(matches!(
            err,
            AssembleError::IndexOutOfRange { kind: IndexKind::Normal, index: 1, .. }
        ));
    }

    #[test]
    fn test_invalid_faces_that_are_dropped_do_not_fail() {
        let model = ObjModel::parse(&format!("{SQUARE}f 1 2 3 99\n"));
        let mesh = assemble(&model, TriangulationPolicy::Drop).unwrap();
        assert!(mesh.is_empty());
    }
}
