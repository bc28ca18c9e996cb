/// Off-screen pixel buffer, 0x00RRGGBB per pixel in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    pub fn row(&self, y: usize) -> &[u32] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }
}

/// Split a packed pixel into its red, green and blue channels.
pub fn rgb(color: u32) -> (u8, u8, u8) {
    ((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_and_bounds() {
        let mut frame = FrameBuffer::new(4, 3);
        frame.clear(0x0011_2233);
        assert!(frame.pixels().iter().all(|&p| p == 0x0011_2233));

        frame.set_pixel(3, 2, 7);
        frame.set_pixel(4, 0, 9);
        frame.set_pixel(-1, 0, 9);
        assert_eq!(frame.pixel(3, 2), Some(7));
        assert_eq!(frame.pixel(4, 0), None);
        assert_eq!(frame.row(2), &[0x0011_2233, 0x0011_2233, 0x0011_2233, 7]);
        assert_eq!(frame.pixels().iter().filter(|&&p| p == 9).count(), 0);
    }

    #[test]
    fn test_rgb() {
        assert_eq!(rgb(0x00AB_CDEF), (0xAB, 0xCD, 0xEF));
    }
}
