/// Backface visibility and flat Lambert shading
use nalgebra::Vector3;

use crate::geometry::Triangle;

/// Directional light. The direction is kept normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    direction: Vector3<f32>,
}

impl Light {
    /// A zero direction falls back to the default light along +z.
    pub fn directional(direction: Vector3<f32>) -> Self {
        Self {
            direction: direction.try_normalize(0.0).unwrap_or_else(Vector3::z),
        }
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }
}

impl Default for Light {
    fn default() -> Self {
        Self {
            direction: Vector3::z(),
        }
    }
}

/// Faces whose averaged normal points toward the viewer (z >= 0) are shown.
/// Triangles without a usable normal count as facing away.
pub fn is_visible(triangle: &Triangle) -> bool {
    triangle.has_normal() && triangle.average_normal.z >= 0.0
}

/// `max(0, n . l)`, kept inside `[0, 1]`.
pub fn light_intensity(triangle: &Triangle, light: &Light) -> f32 {
    triangle
        .average_normal
        .dot(&light.direction)
        .clamp(0.0, 1.0)
}

/// Equal RGB channels, packed as 0x00RRGGBB.
pub fn grayscale(intensity: f32) -> u32 {
    let level = (intensity.clamp(0.0, 1.0) * 255.0) as u32;
    (level << 16) | (level << 8) | level
}
