use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::Span,
    widgets::{Block, BorderType, Widget},
};

/// Rounded outline whose interior fills left to right with `ratio`.
pub struct Capsule<'a> {
    ratio: f64,
    outline: Color,
    fill: Color,
    title: Option<&'a str>,
}

impl<'a> Capsule<'a> {
    pub fn new(ratio: f64) -> Self {
        Capsule {
            ratio,
            outline: Color::Reset,
            fill: Color::Reset,
            title: None,
        }
    }

    pub fn outline(mut self, color: Color) -> Self {
        self.outline = color;
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = color;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Cells of an interior `width` wide that should be filled.
    pub fn filled_width(&self, width: u16) -> u16 {
        let ratio = match self.ratio.is_finite() {
            true => self.ratio.clamp(0.0, 1.0),
            false => 0.0,
        };
        ((ratio * width as f64).round() as u16).min(width)
    }
}

impl Widget for Capsule<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(self.outline));

        if let Some(title) = self.title {
            block = block.title(Span::from(format!(" {title} ")).fg(self.outline).dim());
        }

        let inner = block.inner(area);
        block.render(area, buf);

        let filled = Rect {
            width: self.filled_width(inner.width),
            ..inner
        };
        buf.set_style(filled, Style::new().bg(self.fill));
    }
}
