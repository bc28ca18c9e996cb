/// Maps terminal key, mouse and resize events to viewer events
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use objview_core::ViewerEvent;

use crate::surface::TerminalSurface;

/// Pointer units sent per arrow key press.
const KEY_ROTATE_STEP: f32 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Viewer(ViewerEvent),
}

/// Remembers where a left-button drag last was.
#[derive(Debug, Default)]
pub struct InputState {
    drag_origin: Option<(u16, u16)>,
}

impl InputState {
    pub fn translate(&mut self, event: &Event) -> Option<Command> {
        match event {
            Event::Key(key) => translate_key(key),
            Event::Mouse(mouse) => self.translate_mouse(mouse).map(Command::Viewer),
            Event::Resize(columns, rows) => {
                let (width, height) = TerminalSurface::<Vec<u8>>::frame_size(*columns, *rows);
                Some(Command::Viewer(ViewerEvent::Resize { width, height }))
            }
            _ => None,
        }
    }

    fn translate_mouse(&mut self, mouse: &MouseEvent) -> Option<ViewerEvent> {
        let position = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_origin = Some(position);
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let (last_column, last_row) = self.drag_origin.replace(position)?;
                // A cell is two pixels tall.
                let dx = f32::from(mouse.column) - f32::from(last_column);
                let dy = (f32::from(mouse.row) - f32::from(last_row)) * 2.0;
                Some(ViewerEvent::PointerDrag { dx, dy })
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag_origin = None;
                None
            }
            MouseEventKind::ScrollUp => Some(ViewerEvent::Wheel(1.0)),
            MouseEventKind::ScrollDown => Some(ViewerEvent::Wheel(-1.0)),
            _ => None,
        }
    }
}

fn translate_key(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let drag = |dx: f32, dy: f32| Some(Command::Viewer(ViewerEvent::PointerDrag { dx, dy }));
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('w') | KeyCode::Up => drag(0.0, -KEY_ROTATE_STEP),
        KeyCode::Char('s') | KeyCode::Down => drag(0.0, KEY_ROTATE_STEP),
        KeyCode::Char('a') | KeyCode::Left => drag(-KEY_ROTATE_STEP, 0.0),
        KeyCode::Char('d') | KeyCode::Right => drag(KEY_ROTATE_STEP, 0.0),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::Viewer(ViewerEvent::Wheel(1.0))),
        KeyCode::Char('-') => Some(Command::Viewer(ViewerEvent::Wheel(-1.0))),
        KeyCode::Char('0') => Some(Command::Viewer(ViewerEvent::ResetView)),
        KeyCode::Char('r') => Some(Command::Viewer(ViewerEvent::Reload)),
        _ => None,
    }
}
