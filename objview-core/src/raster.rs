/// Flat triangle fill and line drawing into a [`FrameBuffer`]
use nalgebra::Point2;

use crate::framebuffer::FrameBuffer;

/// Fill every pixel whose centre lies inside the triangle or on its edge.
/// Works for either winding; degenerate triangles draw nothing.
pub fn fill_triangle(frame: &mut FrameBuffer, corners: [Point2<f32>; 3], color: u32) {
    if frame.is_empty() {
        return;
    }
    let [v0, v1, v2] = corners;

    // Bounding box
    let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
    let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
    let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
    let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

    // Clip to screen bounds
    let min_x = min_x.max(0);
    let max_x = max_x.min(frame.width() as i32 - 1);
    let min_y = min_y.max(0);
    let max_y = max_y.min(frame.height() as i32 - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
            if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    frame.set_pixel(x, y, color);
                }
            }
        }
    }
}

/// Bresenham line between two points, endpoints included. The segment is
/// clipped to the frame first, so only on-screen pixels are visited.
pub fn draw_line(frame: &mut FrameBuffer, from: Point2<f32>, to: Point2<f32>, color: u32) {
    if frame.is_empty() {
        return;
    }
    let Some(((mut x0, mut y0), (x1, y1))) = clip_line(from, to, frame.width(), frame.height())
    else {
        return;
    };

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        frame.set_pixel(x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

// Cohen-Sutherland outcodes
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const ABOVE: u8 = 4;
const BELOW: u8 = 8;

/// Cut a segment down to `[0, width - 1] x [0, height - 1]` and return its
/// pixel endpoints, or `None` when nothing of it is on screen. Runs in f64
/// so far-away endpoints keep enough precision for the visible part.
fn clip_line(
    from: Point2<f32>,
    to: Point2<f32>,
    width: usize,
    height: usize,
) -> Option<((i32, i32), (i32, i32))> {
    let max_x = width as f64 - 1.0;
    let max_y = height as f64 - 1.0;
    let outcode = |x: f64, y: f64| {
        let mut code = 0;
        if x < 0.0 {
            code |= LEFT;
        } else if x > max_x {
            code |= RIGHT;
        }
        if y < 0.0 {
            code |= ABOVE;
        } else if y > max_y {
            code |= BELOW;
        }
        code
    };

    let (mut x0, mut y0) = (f64::from(from.x), f64::from(from.y));
    let (mut x1, mut y1) = (f64::from(to.x), f64::from(to.y));
    if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
        return None;
    }
    let mut code0 = outcode(x0, y0);
    let mut code1 = outcode(x1, y1);

    // Each endpoint needs at most two cuts; the cap guards against rounding.
    for _ in 0..8 {
        if code0 | code1 == 0 {
            let pixel = |x: f64, y: f64| {
                (x.clamp(0.0, max_x).floor() as i32, y.clamp(0.0, max_y).floor() as i32)
            };
            return Some((pixel(x0, y0), pixel(x1, y1)));
        }
        if code0 & code1 != 0 {
            return None;
        }

        let out = if code0 != 0 { code0 } else { code1 };
        let (x, y) = if out & ABOVE != 0 {
            (x0 + (x1 - x0) * (0.0 - y0) / (y1 - y0), 0.0)
        } else if out & BELOW != 0 {
            (x0 + (x1 - x0) * (max_y - y0) / (y1 - y0), max_y)
        } else if out & LEFT != 0 {
            (0.0, y0 + (y1 - y0) * (0.0 - x0) / (x1 - x0))
        } else {
            (max_x, y0 + (y1 - y0) * (max_x - x0) / (x1 - x0))
        };
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }

        if out == code0 {
            (x0, y0) = (x, y);
            code0 = outcode(x0, y0);
        } else {
            (x1, y1) = (x, y);
            code1 = outcode(x1, y1);
        }
    }
    None
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: Point2<f32>,
    v1: Point2<f32>,
    v2: Point2<f32>,
    p: Point2<f32>,
) -> Option<(f32, f32, f32)> {
    let denom = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);

    if denom.abs() < 1e-6 || !denom.is_finite() {
        return None;
    }

    let w0 = ((v1.y - v2.y) * (p.x - v2.x) + (v2.x - v1.x) * (p.y - v2.y)) / denom;
    let w1 = ((v2.y - v0.y) * (p.x - v2.x) + (v0.x - v2.x) * (p.y - v2.y)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
