use anyhow::{Context, Result, anyhow, bail};
use ratatui::style::Color;

/// Accepts `#RRGGBB`, `#RGB`, `rgb(r, g, b)` or one of the 16 terminal color
/// names. An empty string or `none` leaves the terminal default.
pub(super) fn parse_color(s: &str) -> Result<Color> {
    let s = s.trim();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).with_context(|| format!("Bad hex color {s:?}"));
    }
    if let Some(args) = s.strip_prefix("rgb(").and_then(|rest| rest.strip_suffix(')')) {
        return parse_rgb(args).with_context(|| format!("Bad rgb() color {s:?}"));
    }
    named_color(s).ok_or_else(|| anyhow!("Unknown color {s:?}"))
}

fn parse_hex(hex: &str) -> Result<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("expected hex digits");
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);
    match hex.len() {
        6 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        // #abc is #aabbcc
        3 => Ok(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        n => bail!("expected 3 or 6 digits, got {n}"),
    }
}

fn parse_rgb(args: &str) -> Result<Color> {
    let channels = args
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<Result<Vec<_>, _>>()?;

    match channels[..] {
        [r, g, b] => Ok(Color::Rgb(r, g, b)),
        _ => bail!("expected three channels, got {}", channels.len()),
    }
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name.to_ascii_lowercase().replace(['_', '-', ' '], "").as_str() {
        "" | "none" | "default" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        _ => return None,
    };
    Some(color)
}
