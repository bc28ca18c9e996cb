/// Example: Render an OBJ file to a PPM image without a terminal
///
/// Usage: cargo run --example render_to_ppm -- path/to/model.obj out.ppm [width height]
use anyhow::{bail, Context, Result};
use objview_core::{FrameBuffer, Surface, Viewer, ViewerConfig, ViewerEvent};
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Writes each presented frame as a binary PPM (P6).
struct PpmSurface<W: Write> {
    out: W,
}

impl<W: Write> Surface for PpmSurface<W> {
    fn present(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        write!(self.out, "P6\n{} {}\n255\n", frame.width(), frame.height())?;
        for &pixel in frame.pixels() {
            let (r, g, b) = objview_core::framebuffer::rgb(pixel);
            self.out.write_all(&[r, g, b])?;
        }
        self.out.flush()
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        bail!("usage: {} <model.obj> <out.ppm> [width height]", args[0]);
    }
    let width = match args.get(3) {
        Some(w) => w.parse().context("width must be a number")?,
        None => 640,
    };
    let height = match args.get(4) {
        Some(h) => h.parse().context("height must be a number")?,
        None => 480,
    };

    let mut viewer = Viewer::new(ViewerConfig::default(), width, height);
    let count = viewer.open(&args[1])?;
    // A slight turn so more than one face is lit.
    viewer.handle_event(ViewerEvent::PointerDrag { dx: 40.0, dy: 30.0 })?;

    let file = File::create(&args[2]).with_context(|| format!("creating {}", args[2]))?;
    let mut surface = PpmSurface {
        out: BufWriter::new(file),
    };
    viewer.render(&mut surface)?;

    println!("Rendered {count} triangles to {} ({width}x{height})", args[2]);
    Ok(())
}
