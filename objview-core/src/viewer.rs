/// Viewer state and event handling
///
/// A [`Viewer`] is the single owner of everything the display needs: the
/// current mesh, its materials, the camera and the presenter. The host
/// (terminal front end, tests) forwards [`ViewerEvent`]s to it and asks
/// it to render when the frame is stale.
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::ViewerConfig;
use crate::geometry::Mesh;
use crate::loader::{load_model, LoadError};
use crate::mtl::MaterialLibrary;
use crate::shading::Light;
use crate::surface::{Presenter, RenderError, Surface};
use crate::transform::ViewState;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    FileOpen(PathBuf),
    /// Load the current file again.
    Reload,
    /// Pointer moved by `(dx, dy)` with the rotate button held.
    PointerDrag { dx: f32, dy: f32 },
    /// Wheel notches, positive zooms in.
    Wheel(f32),
    Resize { width: usize, height: usize },
    ResetView,
}

pub struct Viewer {
    config: ViewerConfig,
    light: Light,
    mesh: Mesh,
    materials: MaterialLibrary,
    model_path: Option<PathBuf>,
    view: ViewState,
    presenter: Presenter,
}

impl Viewer {
    pub fn new(config: ViewerConfig, width: usize, height: usize) -> Self {
        let presenter = Presenter::new(
            width,
            height,
            config.background,
            config.render_mode.renderer(),
        );
        Self {
            light: config.light(),
            config,
            mesh: Mesh::new(),
            materials: MaterialLibrary::new(),
            model_path: None,
            view: ViewState::default(),
            presenter,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    /// Apply an event. Returns whether the frame needs to be redrawn.
    /// A failed load leaves the displayed model untouched.
    pub fn handle_event(&mut self, event: ViewerEvent) -> Result<bool, LoadError> {
        match event {
            ViewerEvent::FileOpen(path) => {
                self.open(path)?;
            }
            ViewerEvent::Reload => match self.model_path.clone() {
                Some(path) => {
                    self.open(path)?;
                }
                None => return Ok(false),
            },
            ViewerEvent::PointerDrag { dx, dy } => {
                self.view.drag(dx, dy, self.config.rotate_sensitivity);
            }
            ViewerEvent::Wheel(notches) => {
                self.view.wheel(
                    notches,
                    self.config.zoom_step,
                    self.config.min_zoom,
                    self.config.max_zoom,
                );
            }
            ViewerEvent::Resize { width, height } => self.presenter.resize(width, height),
            ViewerEvent::ResetView => self.view.reset(),
        }
        Ok(true)
    }

    /// Load a model and swap it in whole. Returns the triangle count.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let loaded = load_model(path, self.config.triangulation)?;
        let count = loaded.mesh.len();

        self.mesh = loaded.mesh;
        self.materials = loaded.materials;
        self.model_path = Some(loaded.path);
        info!("displaying {count} triangles");
        Ok(count)
    }

    /// Show a mesh that did not come from a file.
    pub fn show_mesh(&mut self, mesh: Mesh) {
        debug!("displaying {} generated triangles", mesh.len());
        self.mesh = mesh;
        self.materials = MaterialLibrary::new();
        self.model_path = None;
    }

    /// Draw the current model and copy it to `surface`.
    pub fn render(&mut self, surface: &mut dyn Surface) -> Result<(), RenderError> {
        self.presenter
            .draw(&self.mesh.triangles, &self.view, self.config.scale, &self.light)?;
        self.presenter.present(surface)
    }
}
