use crate::player::PlaybackSnapshot;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Stylize},
    text::{Line, Span},
    widgets::Widget,
};

const KEY_HINTS: &str = "space play/pause · ←/→ seek · +/- volume · q quit";

/// Bottom line of the demo app: the load error if there is one, otherwise
/// volume, loop state and key hints.
pub struct StatusLine<'a> {
    pub snapshot: &'a PlaybackSnapshot,
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = match &self.snapshot.last_error {
            Some(err) => Line::from(err.to_string()).fg(Color::LightRed),
            None => {
                let volume = (self.snapshot.volume * 100.0).round() as u8;
                let looping = match self.snapshot.looping {
                    true => " ⟳ loop ·",
                    false => "",
                };

                Line::from_iter([
                    Span::from(format!(" vol {volume}% ·{looping} ")).fg(Color::Gray),
                    Span::from(KEY_HINTS).fg(Color::DarkGray),
                ])
            }
        };

        line.centered().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerError;

    fn text(buf: &Buffer) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn shows_volume_when_healthy() {
        let snap = PlaybackSnapshot {
            volume: 0.8,
            looping: true,
            ..Default::default()
        };
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        StatusLine { snapshot: &snap }.render(area, &mut buf);

        let line = text(&buf);
        assert!(line.contains("vol 80%"));
        assert!(line.contains("loop"));
    }

    #[test]
    fn shows_error_instead() {
        let snap = PlaybackSnapshot {
            last_error: Some(PlayerError::LoadFailed {
                path: "/a.wav".into(),
                cause: "truncated".into(),
            }),
            ..Default::default()
        };
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        StatusLine { snapshot: &snap }.render(area, &mut buf);

        assert!(text(&buf).contains("Failed to load audio from /a.wav"));
    }
}
