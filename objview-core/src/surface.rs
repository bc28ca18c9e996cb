/// Double-buffered presentation
///
/// The [`Presenter`] owns the back buffer. A frame is cleared to the
/// background colour, drawn by the selected [`Renderer`] and then handed
/// to a [`Surface`] in one piece.
use std::io;

use log::debug;
use thiserror::Error;

use crate::framebuffer::FrameBuffer;
use crate::geometry::Triangle;
use crate::renderer::Renderer;
use crate::shading::Light;
use crate::transform::{Transform, ViewState};

/// Something a finished frame can be copied to.
pub trait Surface {
    fn present(&mut self, frame: &FrameBuffer) -> io::Result<()>;
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("surface has no area")]
    EmptySurface,
    #[error("failed to present frame: {0}")]
    Present(#[from] io::Error),
}

pub struct Presenter {
    back_buffer: FrameBuffer,
    background: u32,
    renderer: Box<dyn Renderer>,
}

impl Presenter {
    pub fn new(width: usize, height: usize, background: u32, renderer: Box<dyn Renderer>) -> Self {
        Self {
            back_buffer: FrameBuffer::new(width, height),
            background,
            renderer,
        }
    }

    /// Recreate the back buffer at the new size. Nothing from the previous
    /// frame is kept.
    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) != self.size() {
            debug!("back buffer resized to {width}x{height}");
            self.back_buffer = FrameBuffer::new(width, height);
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.back_buffer.width(), self.back_buffer.height())
    }

    pub fn renderer_name(&self) -> &'static str {
        self.renderer.name()
    }

    pub fn back_buffer(&self) -> &FrameBuffer {
        &self.back_buffer
    }

    /// Draw model-space triangles into the back buffer: clear, place on
    /// screen, rasterize.
    pub fn draw(
        &mut self,
        triangles: &[Triangle],
        view: &ViewState,
        base_scale: f32,
        light: &Light,
    ) -> Result<(), RenderError> {
        if self.back_buffer.is_empty() {
            return Err(RenderError::EmptySurface);
        }
        let (width, height) = self.size();

        self.back_buffer.clear(self.background);
        let placed = Transform::project(triangles, view, base_scale, width, height);
        self.renderer.render(&placed, &mut self.back_buffer, light);
        Ok(())
    }

    /// Copy the whole back buffer to `surface`.
    pub fn present(&self, surface: &mut dyn Surface) -> Result<(), RenderError> {
        if self.back_buffer.is_empty() {
            return Err(RenderError::EmptySurface);
        }
        surface.present(&self.back_buffer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Mesh;
    use crate::renderer::SolidRenderer;

    #[derive(Default)]
    struct Capture {
        frames: Vec<FrameBuffer>,
    }

    impl Surface for Capture {
        fn present(&mut self, frame: &FrameBuffer) -> io::Result<()> {
            self.frames.push(frame.clone());
            Ok(())
        }
    }

    struct Broken;

    impl Surface for Broken {
        fn present(&mut self, _frame: &FrameBuffer) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
    }

    #[test]
    fn test_frame_is_cleared_drawn_and_presented_whole() {
        let mut presenter = Presenter::new(40, 30, 0x0000_0040, Box::new(SolidRenderer));
        let mut surface = Capture::default();

        presenter
            .draw(&Mesh::cube(1.0).triangles, &ViewState::default(), 10.0, &Light::default())
            .unwrap();
        presenter.present(&mut surface).unwrap();

        let frame = &surface.frames[0];
        assert_eq!((frame.width(), frame.height()), (40, 30));
        assert_eq!(frame.pixel(0, 0), Some(0x0000_0040));
        assert_eq!(frame.pixel(20, 15), Some(0x00FF_FFFF));
    }

    #[test]
    fn test_resize_recreates_buffer() {
        let mut presenter = Presenter::new(10, 10, 0, Box::new(SolidRenderer));
        presenter.resize(64, 16);
        assert_eq!(presenter.size(), (64, 16));
        assert_eq!(presenter.back_buffer().pixels().len(), 64 * 16);
    }

    #[test]
    fn test_empty_surface_skips_frame() {
        let mut presenter = Presenter::new(0, 10, 0, Box::new(SolidRenderer));
        let result = presenter.draw(&[], &ViewState::default(), 1.0, &Light::default());
        assert!(matches!(result, Err(RenderError::EmptySurface)));
        assert!(matches!(
            presenter.present(&mut Capture::default()),
            Err(RenderError::EmptySurface)
        ));
    }

    #[test]
    fn test_present_errors_are_reported() {
        let presenter = Presenter::new(4, 4, 0, Box::new(SolidRenderer));
        assert!(matches!(
            presenter.present(&mut Broken),
            Err(RenderError::Present(_))
        ));
    }
}
