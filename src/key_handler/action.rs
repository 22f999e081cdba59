use super::{Action, C, S, VOLUME_STEP, X};
use crate::{
    REFRESH_RATE,
    tui::{Control, PlayerView},
};
use anyhow::Result;
use ratatui::{
    crossterm::event::{self, Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind},
    layout::Rect,
};

use KeyCode::*;

pub fn handle_key_event(key: &KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (C, Char('c')) | (X, Char('q')) | (X, Esc) => Some(Action::Quit),

        (X, Char(' ')) | (X, Enter) => Some(Action::Transport(Control::TogglePlayback)),
        (X, Left) | (X, Char('h')) => Some(Action::Transport(Control::Rewind)),
        (X, Right) | (X, Char('l')) => Some(Action::Transport(Control::Forward)),

        (X, Char('+')) | (S, Char('+')) | (X, Char('=')) => Some(Action::Volume(VOLUME_STEP)),
        (X, Char('-')) => Some(Action::Volume(-VOLUME_STEP)),

        _ => None,
    }
}

/// Left clicks on one of the buttons of `view`, rendered in `area`.
pub fn handle_mouse_event(mouse: &MouseEvent, view: &PlayerView, area: Rect) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => view
            .control_at(area, mouse.column, mouse.row)
            .map(Action::Transport),
        _ => None,
    }
}

pub fn next_event() -> Result<Option<Event>> {
    match event::poll(REFRESH_RATE)? {
        true => Ok(Some(event::read()?)),
        false => Ok(None),
    }
}
