use super::{FORWARD_ICON, PAUSE_ICON, PLAY_ICON, REWIND_ICON};
use crate::{
    player::{PlaybackController, PlaybackSnapshot},
    tui::layout::ViewLayout,
};
use anyhow::Result;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Widget,
};

/// A transport button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Rewind,
    TogglePlayback,
    Forward,
}

impl Control {
    pub fn apply(self, controller: &PlaybackController, snapshot: &PlaybackSnapshot) -> Result<()> {
        match self {
            Control::Rewind => controller.rewind(),
            Control::Forward => controller.forward(),
            Control::TogglePlayback => match snapshot.is_playing {
                true => controller.stop(),
                false => controller.play(),
            },
        }
    }
}

/// The rewind / toggle / forward row.
pub(super) struct Controls {
    pub is_playing: bool,
    pub inert: bool,
    pub accent: Color,
}

impl Controls {
    pub(super) fn render_into(self, layout: &ViewLayout, buf: &mut Buffer) {
        let style = match self.inert {
            true => Style::new().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            false => Style::new().fg(self.accent),
        };
        let toggle_icon = match self.is_playing {
            true => PAUSE_ICON,
            false => PLAY_ICON,
        };

        button(REWIND_ICON, style, layout.rewind, buf);
        button(toggle_icon, style.add_modifier(Modifier::BOLD), layout.toggle, buf);
        button(FORWARD_ICON, style, layout.forward, buf);
    }
}

fn button(label: &str, style: Style, area: Rect, buf: &mut Buffer) {
    Line::styled(label, style).centered().render(area, buf);
}
