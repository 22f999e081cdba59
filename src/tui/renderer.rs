use super::{PlayerStyle, PlayerView, StatusLine};
use crate::player::PlaybackSnapshot;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    widgets::Widget,
};

const MAX_WIDTH: u16 = 72;

pub fn render(f: &mut Frame, snapshot: &PlaybackSnapshot, style: &PlayerStyle) {
    let [_, status] = get_full_screen_layout(f.area());

    PlayerView::new(snapshot, style).render(player_area(f.area(), style), f.buffer_mut());
    StatusLine { snapshot }.render(status, f.buffer_mut());
}

/// Where [`render`] puts the player, centered in the space above the status line.
pub fn player_area(area: Rect, style: &PlayerStyle) -> Rect {
    let [upper, _] = get_full_screen_layout(area);

    let [row] = Layout::vertical([Constraint::Length(PlayerView::height(style))])
        .flex(Flex::Center)
        .areas(upper);

    let [centered] = Layout::horizontal([Constraint::Length(area.width.min(MAX_WIDTH))])
        .flex(Flex::Center)
        .areas(row);

    centered
}

fn get_full_screen_layout(area: Rect) -> [Rect; 2] {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(1)])
        .areas::<2>(area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn player_is_centered_above_status() {
        let style = PlayerStyle::default();
        let area = player_area(Rect::new(0, 0, 100, 21), &style);

        assert_eq!(area.width, MAX_WIDTH);
        assert_eq!(area.x, 14);
        assert_eq!(area.height, PlayerView::height(&style));
        assert_eq!(area.y, 8);
    }

    #[test]
    fn draws_a_full_frame() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let snapshot = PlaybackSnapshot {
            formatted_progress: "00:07".into(),
            formatted_duration: "03:00".into(),
            ..Default::default()
        };

        terminal
            .draw(|f| render(f, &snapshot, &PlayerStyle::default()))
            .unwrap();

        let buf = terminal.backend().buffer();
        let screen: String = (0..12u16)
            .flat_map(|y| (0..60u16).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(screen.contains("00:07"));
        assert!(screen.contains("03:00"));
        assert!(screen.contains("vol 100%"));
    }
}
