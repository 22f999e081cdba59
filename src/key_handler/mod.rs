mod action;

pub use action::{handle_key_event, handle_mouse_event, next_event};

use crate::tui::Control;
use ratatui::crossterm::event::KeyModifiers;

const X: KeyModifiers = KeyModifiers::NONE;
const S: KeyModifiers = KeyModifiers::SHIFT;
const C: KeyModifiers = KeyModifiers::CONTROL;

pub const VOLUME_STEP: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    Transport(Control),
    Volume(f32),
    Quit,
}
