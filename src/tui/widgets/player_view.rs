use super::{Capsule, Control, controls::Controls};
use crate::{player::PlaybackSnapshot, tui::ACCENT, tui::layout::ViewLayout};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Stylize},
    text::{Line, Text},
    widgets::Widget,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerStyle {
    pub bar_outline: Color,
    pub bar_fill: Color,
    pub show_file_name: bool,
}

impl Default for PlayerStyle {
    fn default() -> Self {
        PlayerStyle {
            bar_outline: ACCENT,
            bar_fill: ACCENT,
            show_file_name: false,
        }
    }
}

/// What assistive tooling should announce for the progress region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressSemantics {
    pub label: &'static str,
    pub value: String,
}

impl From<&PlaybackSnapshot> for ProgressSemantics {
    fn from(snapshot: &PlaybackSnapshot) -> Self {
        ProgressSemantics {
            label: match snapshot.is_playing {
                true => "Playing at",
                false => "Duration",
            },
            value: snapshot.formatted_progress.clone(),
        }
    }
}

/// Progress capsule, time labels and transport buttons for one sound.
///
/// ```text
///            door bell
///
///        ╭─ Playing at ───────────╮
///  00:42 │██████████              │ 01:40
///        ╰────────────────────────╯
///            « 15     ⏸     15 »
/// ```
pub struct PlayerView<'a> {
    snapshot: &'a PlaybackSnapshot,
    style: &'a PlayerStyle,
}

impl<'a> PlayerView<'a> {
    pub fn new(snapshot: &'a PlaybackSnapshot, style: &'a PlayerStyle) -> Self {
        PlayerView { snapshot, style }
    }

    pub fn height(style: &PlayerStyle) -> u16 {
        ViewLayout::height(style.show_file_name)
    }

    pub fn semantics(&self) -> ProgressSemantics {
        ProgressSemantics::from(self.snapshot)
    }

    /// The button drawn at `column`/`row` when the view is rendered in `area`.
    pub fn control_at(&self, area: Rect, column: u16, row: u16) -> Option<Control> {
        let layout = self.layout(area);
        let pos = Position::new(column, row);

        [
            (layout.rewind, Control::Rewind),
            (layout.toggle, Control::TogglePlayback),
            (layout.forward, Control::Forward),
        ]
        .into_iter()
        .find(|(rect, _)| rect.contains(pos))
        .map(|(_, control)| control)
    }

    fn layout(&self, area: Rect) -> ViewLayout {
        let label_width = self
            .snapshot
            .formatted_duration
            .chars()
            .count()
            .max(self.snapshot.formatted_progress.chars().count());

        ViewLayout::new(area, self.style.show_file_name, label_width as u16)
    }
}

impl Widget for PlayerView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = self.layout(area);
        let semantics = self.semantics();

        if let Some(name_area) = layout.name {
            Line::from(self.snapshot.display_name.as_str())
                .bold()
                .centered()
                .render(name_area, buf);
        }

        Text::from(self.snapshot.formatted_progress.as_str())
            .fg(Color::DarkGray)
            .right_aligned()
            .render(layout.elapsed, buf);

        Capsule::new(self.snapshot.progress)
            .outline(self.style.bar_outline)
            .fill(self.style.bar_fill)
            .title(semantics.label)
            .render(layout.bar, buf);

        Text::from(self.snapshot.formatted_duration.as_str())
            .fg(Color::DarkGray)
            .left_aligned()
            .render(layout.duration, buf);

        Controls {
            is_playing: self.snapshot.is_playing,
            inert: self.snapshot.is_inert(),
            accent: self.style.bar_outline,
        }
        .render_into(&layout, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerError;
    use ratatui::style::Modifier;

    fn snapshot(progress: f64, is_playing: bool) -> PlaybackSnapshot {
        PlaybackSnapshot {
            display_name: "door bell".into(),
            is_playing,
            progress,
            duration: 100.0,
            formatted_duration: "01:40".into(),
            formatted_progress: "00:42".into(),
            ..Default::default()
        }
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn render(snapshot: &PlaybackSnapshot, style: &PlayerStyle, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        PlayerView::new(snapshot, style).render(area, &mut buf);
        buf
    }

    #[test]
    fn renders_times_and_controls() {
        let snap = snapshot(0.0, false);
        let style = PlayerStyle::default();
        let buf = render(&snap, &style, Rect::new(0, 0, 40, 4));

        let timeline = row_text(&buf, 1);
        assert!(timeline.starts_with("00:42"));
        assert!(timeline.trim_end().ends_with("01:40"));

        let controls = row_text(&buf, 3);
        assert!(controls.contains("« 15"));
        assert!(controls.contains("▶"));
        assert!(controls.contains("15 »"));
        assert!(!row_text(&buf, 0).contains("door bell"));
    }

    #[test]
    fn toggle_icon_reflects_playback() {
        let style = PlayerStyle::default();
        let buf = render(&snapshot(0.0, true), &style, Rect::new(0, 0, 40, 4));
        assert!(row_text(&buf, 3).contains("⏸"));
    }

    #[test]
    fn file_name_only_when_enabled() {
        let snap = snapshot(0.0, false);
        let style = PlayerStyle {
            show_file_name: true,
            ..Default::default()
        };
        assert_eq!(PlayerView::height(&style), 6);

        let buf = render(&snap, &style, Rect::new(0, 0, 40, 6));
        assert_eq!(row_text(&buf, 0).trim(), "door bell");
        assert!(buf[(16, 0)].modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn fill_is_proportional_to_progress() {
        let snap = snapshot(0.5, true);
        let style = PlayerStyle {
            bar_outline: Color::White,
            bar_fill: Color::Green,
            show_file_name: false,
        };
        // Labels take 5 + 1 on each side, leaving a 20 wide capsule, 18 inside
        let buf = render(&snap, &style, Rect::new(0, 0, 32, 4));

        let filled = (0..32u16).filter(|&x| buf[(x, 1)].bg == Color::Green).count();
        assert_eq!(filled, 9);
        assert_eq!(buf[(6, 0)].fg, Color::White);
    }

    #[test]
    fn clicks_map_to_the_rendered_buttons() {
        let snap = snapshot(0.0, false);
        let style = PlayerStyle::default();
        let area = Rect::new(0, 0, 40, 4);
        let view = PlayerView::new(&snap, &style);
        let buf = render(&snap, &style, area);

        let hits: Vec<_> = (0..40u16).filter_map(|x| view.control_at(area, x, 3)).collect();
        assert!(hits.contains(&Control::Rewind));
        assert!(hits.contains(&Control::TogglePlayback));
        assert!(hits.contains(&Control::Forward));

        let play_x = (0..40u16).find(|&x| buf[(x, 3)].symbol() == "▶").unwrap();
        assert_eq!(view.control_at(area, play_x, 3), Some(Control::TogglePlayback));
        assert_eq!(view.control_at(area, play_x, 1), None);
        assert_eq!(view.control_at(area, 0, 3), None);
    }

    #[test]
    fn semantics_follow_playback() {
        let playing = ProgressSemantics::from(&snapshot(0.1, true));
        assert_eq!(playing.label, "Playing at");
        assert_eq!(playing.value, "00:42");

        let paused = ProgressSemantics::from(&snapshot(0.1, false));
        assert_eq!(paused.label, "Duration");

        let snap = snapshot(0.1, true);
        let style = PlayerStyle::default();
        let buf = render(&snap, &style, Rect::new(0, 0, 40, 4));
        assert!(row_text(&buf, 0).contains("Playing at"));
    }

    #[test]
    fn failed_sound_renders_inert_controls() {
        let snap = PlaybackSnapshot {
            last_error: Some(PlayerError::LoadFailed {
                path: "/x.wav".into(),
                cause: "bad".into(),
            }),
            ..Default::default()
        };
        let style = PlayerStyle::default();
        let buf = render(&snap, &style, Rect::new(0, 0, 40, 4));

        let play_x = (0..40u16).find(|&x| buf[(x, 3)].symbol() == "▶").unwrap();
        assert_eq!(buf[(play_x, 3)].fg, Color::DarkGray);
        assert!(buf[(play_x, 3)].modifier.contains(Modifier::DIM));
    }
}
