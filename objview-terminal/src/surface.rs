/// Half-block terminal surface for presenting frames
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
    QueueableCommand,
};
use objview_core::framebuffer::rgb;
use objview_core::{FrameBuffer, Surface};
use std::io::{self, Write};

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: char = '▀';

/// Draws each pair of pixel rows as one row of character cells, followed by
/// a one-line status bar.
pub struct TerminalSurface<W: Write> {
    out: W,
    status: String,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            status: String::new(),
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Frame size in pixels for a terminal of `columns` x `rows` cells,
    /// keeping the last row for the status bar.
    pub fn frame_size(columns: u16, rows: u16) -> (usize, usize) {
        (columns as usize, rows.saturating_sub(1) as usize * 2)
    }

    fn draw_frame(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        for (cell_row, y) in (0..frame.height()).step_by(2).enumerate() {
            self.out.queue(cursor::MoveTo(0, cell_row as u16))?;

            let mut current: Option<(u32, u32)> = None;
            for x in 0..frame.width() {
                let top = frame.pixel(x, y).unwrap_or(0);
                let bottom = frame.pixel(x, y + 1).unwrap_or(0);
                if current != Some((top, bottom)) {
                    self.out
                        .queue(SetForegroundColor(to_color(top)))?
                        .queue(SetBackgroundColor(to_color(bottom)))?;
                    current = Some((top, bottom));
                }
                self.out.queue(Print(HALF_BLOCK))?;
            }
        }
        self.out.queue(ResetColor)?;
        Ok(())
    }

    fn draw_status(&mut self, row: u16, width: usize) -> io::Result<()> {
        let status: String = self.status.chars().take(width).collect();
        self.out
            .queue(cursor::MoveTo(0, row))?
            .queue(Clear(ClearType::CurrentLine))?
            .queue(SetForegroundColor(Color::Yellow))?
            .queue(Print(status))?
            .queue(ResetColor)?;
        Ok(())
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn present(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        self.draw_frame(frame)?;
        let status_row = ((frame.height() + 1) / 2) as u16;
        self.draw_status(status_row, frame.width())?;
        self.out.flush()
    }
}

fn to_color(pixel: u32) -> Color {
    let (r, g, b) = rgb(pixel);
    Color::Rgb { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_size_reserves_status_row() {
        assert_eq!(TerminalSurface::<Vec<u8>>::frame_size(80, 25), (80, 48));
        assert_eq!(TerminalSurface::<Vec<u8>>::frame_size(80, 0), (80, 0));
    }

    #[test]
    fn test_present_writes_one_glyph_per_cell() {
        let mut frame = FrameBuffer::new(3, 4);
        frame.set_pixel(1, 0, 0x00FF_FFFF);
        let mut surface = TerminalSurface::new(Vec::new());
        surface.set_status("ready");
        surface.present(&frame).unwrap();

        let output = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(output.matches(HALF_BLOCK).count(), 6);
        assert!(output.contains("ready"));
        // True colour escape for the white top pixel.
        assert!(output.contains("38;2;255;255;255"));
    }

    #[test]
    fn test_status_is_truncated_to_frame_width() {
        let frame = FrameBuffer::new(4, 2);
        let mut surface = TerminalSurface::new(Vec::new());
        surface.set_status("abcdefgh");
        surface.present(&frame).unwrap();

        let output = String::from_utf8(surface.into_inner()).unwrap();
        assert!(output.contains("abcd"));
        assert!(!output.contains("abcde"));
    }
}
