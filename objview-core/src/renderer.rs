/// Painter's-algorithm renderers
///
/// Both renderers take screen-space triangles (see
/// [`Transform::project`](crate::transform::Transform::project)), drop the
/// ones facing away, order the rest back to front and draw each one in a
/// single flat gray level. There is no depth buffer: later triangles simply
/// overwrite earlier ones.
use nalgebra::Point2;

use crate::framebuffer::FrameBuffer;
use crate::geometry::Triangle;
use crate::raster::{draw_line, fill_triangle};
use crate::shading::{grayscale, is_visible, light_intensity, Light};

/// Common interface for the interchangeable renderers.
pub trait Renderer {
    fn name(&self) -> &'static str;

    /// Draw screen-space triangles into `frame`. The frame is not cleared.
    fn render(&self, triangles: &[Triangle], frame: &mut FrameBuffer, light: &Light);
}

/// Visible triangles in drawing order: descending maximum z, so a
/// triangle whose farthest vertex is nearer the viewer is drawn later.
/// Ties keep their input order.
pub fn depth_order(triangles: &[Triangle]) -> Vec<&Triangle> {
    let mut visible: Vec<&Triangle> = triangles.iter().filter(|t| is_visible(t)).collect();
    // `sort_by` is stable, which gives the tie-break.
    visible.sort_by(|a, b| b.max_z().total_cmp(&a.max_z()));
    visible
}

fn screen_corners(triangle: &Triangle) -> [Point2<f32>; 3] {
    triangle.vertices.map(|v| Point2::new(v.x, v.y))
}

/// Solid flat-shaded fill.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidRenderer;

impl Renderer for SolidRenderer {
    fn name(&self) -> &'static str {
        "solid"
    }

    fn render(&self, triangles: &[Triangle], frame: &mut FrameBuffer, light: &Light) {
        for triangle in depth_order(triangles) {
            let color = grayscale(light_intensity(triangle, light));
            fill_triangle(frame, screen_corners(triangle), color);
        }
    }
}

/// Outlines of the visible triangles, in the same order and shade as
/// [`SolidRenderer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WireframeRenderer;

impl Renderer for WireframeRenderer {
    fn name(&self) -> &'static str {
        "wireframe"
    }

    fn render(&self, triangles: &[Triangle], frame: &mut FrameBuffer, light: &Light) {
        for triangle in depth_order(triangles) {
            let color = grayscale(light_intensity(triangle, light));
            let [a, b, c] = screen_corners(triangle);
            draw_line(frame, a, b, color);
            draw_line(frame, b, c, color);
            draw_line(frame, c, a, color);
        }
    }
}
