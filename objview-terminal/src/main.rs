/// objview - OBJ model viewer for the terminal
///
/// Controls:
///   - Mouse drag / WASD / Arrow Keys: Rotate the model
///   - Mouse wheel / +/-: Zoom
///   - 0: Reset the view
///   - R: Reload the model from disk
///   - Q/ESC: Quit
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use objview_core::{Mesh, RenderMode, TriangulationPolicy, ViewerConfig};
use objview_terminal::TerminalApp;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "objview", version, about = "Flat-shaded OBJ viewer for the terminal")]
struct Args {
    /// OBJ file to display; a cube is shown when omitted
    model: Option<PathBuf>,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pixels per model unit at zoom 1
    #[arg(long)]
    scale: Option<f32>,

    /// Draw triangle edges instead of filled faces
    #[arg(long, default_value_t = false)]
    wireframe: bool,

    /// Split polygons with more than three corners into triangle fans
    #[arg(long, default_value_t = false)]
    fan: bool,

    /// Light direction as x,y,z
    #[arg(
        long,
        value_delimiter = ',',
        num_args = 3,
        allow_negative_numbers = true
    )]
    light: Option<Vec<f32>>,
}

impl Args {
    fn config(&self) -> Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => ViewerConfig::default(),
        };

        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if self.wireframe {
            config.render_mode = RenderMode::Wireframe;
        }
        if self.fan {
            config.triangulation = TriangulationPolicy::Fan;
        }
        if let Some(light) = &self.light {
            config.light_direction = <[f32; 3]>::try_from(light.as_slice())
                .map_err(|_| anyhow!("--light takes exactly three components"))?;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Log output shares the terminal with the frame, keep it quiet unless asked.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();
    let args = Args::parse();
    let config = args.config()?;

    let mut app = TerminalApp::new(config).context("querying terminal size")?;
    match &args.model {
        Some(path) => app.open(path),
        None => {
            info!("no model given, showing the demo cube");
            app.show_mesh(Mesh::cube(1.0));
        }
    }

    app.run()?;
    Ok(())
}
