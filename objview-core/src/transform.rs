/// Model rotation, zoom and screen placement
use nalgebra::{Matrix4, Point2, Vector3};

use crate::geometry::Triangle;

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Interactive camera state: rotation of the model and a zoom multiplier
/// on the base scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub rotation: RotationState,
    pub zoom: f32,
}

impl ViewState {
    /// Pointer drag: horizontal motion spins around y, vertical around x.
    /// `degrees_per_unit` converts pointer units to an angle.
    pub fn drag(&mut self, dx: f32, dy: f32, degrees_per_unit: f32) {
        self.rotation.rotate(
            (dy * degrees_per_unit).to_radians(),
            (dx * degrees_per_unit).to_radians(),
            0.0,
        );
    }

    /// Wheel: each notch changes the zoom by `step`, kept within `[min, max]`.
    /// Bad bounds never panic; a non-finite result leaves the zoom unchanged.
    pub fn wheel(&mut self, notches: f32, step: f32, min: f32, max: f32) {
        let zoom = self.zoom + notches * step;
        if !zoom.is_finite() {
            return;
        }
        let zoom = zoom.min(max).max(min);
        if zoom.is_finite() {
            self.zoom = zoom;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            rotation: RotationState::zero(),
            zoom: 1.0,
        }
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from a rotation state
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));

        // Apply rotations in order: Z, Y, X
        rz * ry * rx
    }

    /// Rotated copy of a triangle. Positions, vertex normals and the face
    /// normal all turn with the model.
    pub fn rotate(triangle: &Triangle, matrix: &Matrix4<f32>) -> Triangle {
        Triangle {
            vertices: triangle.vertices.map(|v| matrix.transform_point(&v)),
            normals: triangle.normals.map(|n| matrix.transform_vector(&n)),
            average_normal: matrix.transform_vector(&triangle.average_normal),
        }
    }

    /// Screen-space copy of a triangle: x and y are scaled and moved to
    /// `center`, z is left as is for depth ordering.
    pub fn to_screen(triangle: &Triangle, scale: f32, center: Point2<f32>) -> Triangle {
        let mut placed = triangle.clone();
        for vertex in &mut placed.vertices {
            vertex.x = vertex.x * scale + center.x;
            vertex.y = vertex.y * scale + center.y;
        }
        placed
    }

    /// Place a whole model on a `width` x `height` surface.
    pub fn project(
        triangles: &[Triangle],
        view: &ViewState,
        base_scale: f32,
        width: usize,
        height: usize,
    ) -> Vec<Triangle> {
        let center = Point2::new((width / 2) as f32, (height / 2) as f32);
        let scale = base_scale * view.zoom;

        if view.rotation.is_zero() {
            return triangles
                .iter()
                .map(|t| Self::to_screen(t, scale, center))
                .collect();
        }

        let matrix = Self::rotation_matrix(&view.rotation);
        triangles
            .iter()
            .map(|t| Self::to_screen(&Self::rotate(t, &matrix), scale, center))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn sample() -> Triangle {
        Triangle::flat(
            [
                Point3::new(0.0, 0.0, 0.5),
                Point3::new(1.0, 0.0, -0.5),
                Point3::new(0.0, -1.0, 2.0),
            ],
            Vector3::new(0.0, 0.0, 1.0),
        )
    }

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert!(state.is_zero());

        state.rotate(0.1, 0.2, 0.3);
        assert!((state.x - 0.1).abs() < 1e-6);
        assert!((state.y - 0.2).abs() < 1e-6);
        assert!((state.z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_identity_rotation() {
        let rotation = RotationState::zero();
        let matrix = Transform::rotation_matrix(&rotation);
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_to_screen_scales_and_centers_xy_only() {
        let original = sample();
        let placed = Transform::to_screen(&original, 150.0, Point2::new(400.0, 300.0));

        assert_eq!(placed.vertices[0], Point3::new(400.0, 300.0, 0.5));
        assert_eq!(placed.vertices[1], Point3::new(550.0, 300.0, -0.5));
        assert_eq!(placed.vertices[2], Point3::new(400.0, 150.0, 2.0));
        assert_eq!(placed.average_normal, original.average_normal);
        // The source triangle is a separate copy.
        assert_eq!(original, sample());
    }

    #[test]
    fn test_rotation_turns_normals_with_the_model() {
        let quarter_turn = RotationState::new(0.0, std::f32::consts::FRAC_PI_2, 0.0);
        let matrix = Transform::rotation_matrix(&quarter_turn);
        let rotated = Transform::rotate(&sample(), &matrix);

        // +z rotated a quarter turn around y points along +x.
        assert!((rotated.average_normal - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-6);
        assert!((rotated.average_normal.norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_drag_and_wheel() {
        let mut view = ViewState::default();
        view.drag(180.0, 0.0, 0.5);
        assert!((view.rotation.y - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(view.rotation.x, 0.0);

        view.wheel(3.0, 0.1, 0.1, 10.0);
        assert!((view.zoom - 1.3).abs() < 1e-6);
        view.wheel(-100.0, 0.1, 0.1, 10.0);
        assert_eq!(view.zoom, 0.1);

        view.reset();
        assert_eq!(view, ViewState::default());
    }

    #[test]
    fn test_wheel_with_inverted_or_nan_bounds() {
        let mut view = ViewState::default();
        view.wheel(1.0, 0.1, 5.0, 1.0);
        assert!(view.zoom.is_finite());

        let mut view = ViewState::default();
        view.wheel(1.0, f32::NAN, 0.1, 10.0);
        assert_eq!(view.zoom, 1.0);
    }

    #[test]
    fn test_project_uses_zoomed_scale_and_integer_center() {
        let view = ViewState {
            rotation: RotationState::zero(),
            zoom: 2.0,
        };
        let placed = Transform::project(&[sample()], &view, 10.0, 101, 51);
        assert_eq!(placed[0].vertices[1], Point3::new(70.0, 25.0, -0.5));
    }
}
