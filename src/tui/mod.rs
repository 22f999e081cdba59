mod layout;
mod renderer;
mod widgets;

use ratatui::style::Color;

pub use renderer::{player_area, render};
pub use widgets::{Capsule, Control, PlayerStyle, PlayerView, ProgressSemantics, StatusLine};

pub const ACCENT: Color = Color::Rgb(10, 132, 255);
