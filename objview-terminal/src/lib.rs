/// Terminal front end: owns the event loop and presents frames as text
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, Clear, ClearType},
};
use log::{error, warn};
use objview_core::{Mesh, Viewer, ViewerConfig, ViewerEvent};
use std::io::{self, stdout, Stdout};
use std::path::Path;
use std::time::Duration;

pub mod input;
pub mod surface;

pub use input::{Command, InputState};
pub use surface::TerminalSurface;

/// Main application struct for terminal 3D viewing
pub struct TerminalApp {
    viewer: Viewer,
    surface: TerminalSurface<Stdout>,
    input: InputState,
    running: bool,
    dirty: bool,
}

impl TerminalApp {
    pub fn new(config: ViewerConfig) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let (width, height) = TerminalSurface::<Stdout>::frame_size(columns, rows);

        Ok(Self {
            viewer: Viewer::new(config, width, height),
            surface: TerminalSurface::new(stdout()),
            input: InputState::default(),
            running: true,
            dirty: true,
        })
    }

    /// Load a model file, reporting failures on the status bar.
    pub fn open(&mut self, path: &Path) {
        self.dispatch(ViewerEvent::FileOpen(path.to_path_buf()));
    }

    pub fn show_mesh(&mut self, mesh: Mesh) {
        self.viewer.show_mesh(mesh);
        self.refresh_status();
        self.dirty = true;
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            if self.dirty {
                self.render();
            }

            if event::poll(Duration::from_millis(250))? {
                let event = event::read()?;
                match self.input.translate(&event) {
                    Some(Command::Quit) => self.running = false,
                    Some(Command::Viewer(viewer_event)) => self.dispatch(viewer_event),
                    None => {}
                }
            }
        }

        Ok(())
    }

    fn dispatch(&mut self, event: ViewerEvent) {
        let resized = matches!(event, ViewerEvent::Resize { .. });
        match self.viewer.handle_event(event) {
            Ok(redraw) => {
                self.refresh_status();
                self.dirty |= redraw;
            }
            Err(err) => {
                warn!("{err}");
                self.surface.set_status(format!("Load failed: {err}"));
                self.dirty = true;
            }
        }
        if resized {
            // Stale cells outside the new frame would otherwise stay on screen.
            if let Err(err) = execute!(stdout(), Clear(ClearType::All)) {
                warn!("failed to clear terminal: {err}");
            }
        }
    }

    fn refresh_status(&mut self) {
        let model = self
            .viewer
            .model_path()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "demo cube".to_string());
        let view = self.viewer.view();
        self.surface.set_status(format!(
            "{model} | {} triangles | {} materials | {} | zoom {:.2} | drag/WASD rotate, wheel/+- zoom, 0 reset, r reload, q quit",
            self.viewer.mesh().len(),
            self.viewer.materials().len(),
            self.viewer.presenter().renderer_name(),
            view.zoom,
        ));
    }

    fn render(&mut self) {
        // A failed frame is skipped; the next event draws again.
        if let Err(err) = self.viewer.render(&mut self.surface) {
            error!("frame skipped: {err}");
        }
        self.dirty = false;
    }
}
