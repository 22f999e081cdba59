use super::widgets::{BUTTON_GAP, BUTTON_WIDTH, CAPSULE_HEIGHT, DUR_WIDTH};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Where each piece of a [`PlayerView`](super::PlayerView) lands. Shared by
/// rendering and hit testing so the two can't drift apart.
pub struct ViewLayout {
    pub name: Option<Rect>,
    pub elapsed: Rect,
    pub bar: Rect,
    pub duration: Rect,
    pub rewind: Rect,
    pub toggle: Rect,
    pub forward: Rect,
}

impl ViewLayout {
    /// Rows needed to show everything.
    pub fn height(show_file_name: bool) -> u16 {
        let name_height = if show_file_name { 2 } else { 0 };
        name_height + CAPSULE_HEIGHT + 1
    }

    pub fn new(area: Rect, show_file_name: bool, label_width: u16) -> Self {
        let name_height = if show_file_name { 2 } else { 0 };
        let label_width = label_width.max(DUR_WIDTH);

        let [name, timeline, controls, _] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(name_height),
                Constraint::Length(CAPSULE_HEIGHT),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .areas(area);

        let [elapsed, _, bar, _, duration] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(label_width),
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(label_width),
            ])
            .areas(timeline);

        let [_, rewind, _, toggle, _, forward, _] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(BUTTON_WIDTH),
                Constraint::Length(BUTTON_GAP),
                Constraint::Length(BUTTON_WIDTH),
                Constraint::Length(BUTTON_GAP),
                Constraint::Length(BUTTON_WIDTH),
                Constraint::Fill(1),
            ])
            .areas(controls);

        // Labels sit on the capsule's middle row
        let middle = |r: Rect| Rect {
            y: r.y + r.height / 2,
            height: r.height.min(1),
            ..r
        };

        ViewLayout {
            name: show_file_name.then(|| Rect {
                height: name.height.min(1),
                ..name
            }),
            elapsed: middle(elapsed),
            bar,
            duration: middle(duration),
            rewind,
            toggle,
            forward,
        }
    }
}
