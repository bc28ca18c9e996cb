/// Geometry primitives shared by the loader and the renderers
use log::trace;
use nalgebra::{Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("cannot normalize a zero-length normal")]
    DegenerateNormal,
}

/// Normalized mean of three per-vertex normals.
pub fn average_normal(normals: &[Vector3<f32>; 3]) -> Result<Vector3<f32>, GeometryError> {
    let mean = (normals[0] + normals[1] + normals[2]) / 3.0;
    mean.try_normalize(0.0)
        .ok_or(GeometryError::DegenerateNormal)
}

/// Working triangle: three positions, three vertex normals and the flat
/// face normal derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3<f32>; 3],
    pub normals: [Vector3<f32>; 3],
    pub average_normal: Vector3<f32>,
}

impl Triangle {
    /// Build a triangle, substituting a zero face normal when the vertex
    /// normals cancel out or are missing.
    pub fn new(vertices: [Point3<f32>; 3], normals: [Vector3<f32>; 3]) -> Self {
        let average_normal = average_normal(&normals).unwrap_or_else(|err| {
            trace!("{err}; using a zero face normal");
            Vector3::zeros()
        });

        Self {
            vertices,
            normals,
            average_normal,
        }
    }

    /// Like [`Triangle::new`] but reports degenerate normals instead of
    /// substituting them.
    pub fn try_new(
        vertices: [Point3<f32>; 3],
        normals: [Vector3<f32>; 3],
    ) -> Result<Self, GeometryError> {
        let average_normal = average_normal(&normals)?;
        Ok(Self {
            vertices,
            normals,
            average_normal,
        })
    }

    /// Same normal on all three corners.
    pub fn flat(vertices: [Point3<f32>; 3], normal: Vector3<f32>) -> Self {
        Self::new(vertices, [normal; 3])
    }

    /// Largest z among the three vertices, the painter's sort key.
    pub fn max_z(&self) -> f32 {
        self.vertices[0]
            .z
            .max(self.vertices[1].z)
            .max(self.vertices[2].z)
    }

    pub fn has_normal(&self) -> bool {
        self.average_normal != Vector3::zeros()
    }
}

/// A flat list of working triangles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Axis-aligned cube centred on the origin, 12 triangles with outward normals.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let mut mesh = Self::with_capacity(12);

        let faces: [([[f32; 3]; 4], [f32; 3]); 6] = [
            // Front
            ([[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]], [0.0, 0.0, 1.0]),
            // Back
            ([[h, -h, -h], [-h, -h, -h], [-h, h, -h], [h, h, -h]], [0.0, 0.0, -1.0]),
            // Top
            ([[-h, h, h], [h, h, h], [h, h, -h], [-h, h, -h]], [0.0, 1.0, 0.0]),
            // Bottom
            ([[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]], [0.0, -1.0, 0.0]),
            // Right
            ([[h, -h, h], [h, -h, -h], [h, h, -h], [h, h, h]], [1.0, 0.0, 0.0]),
            // Left
            ([[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]], [-1.0, 0.0, 0.0]),
        ];

        for (corners, normal) in faces {
            let [a, b, c, d] = corners.map(Point3::from);
            let normal = Vector3::from(normal);
            mesh.add_triangle(Triangle::flat([a, b, c], normal));
            mesh.add_triangle(Triangle::flat([a, c, d], normal));
        }

        mesh
    }
}
