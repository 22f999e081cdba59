use super::config_utils::parse_color;
use crate::TimeStyle;
use ratatui::style::Color;
use serde::{Deserialize, Deserializer};

/// On-disk layout of `config.toml`. Every key is optional.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ConfigImport {
    pub player: PlayerSection,
    pub view: ViewSection,
}

#[derive(Deserialize)]
#[serde(default)]
pub struct PlayerSection {
    pub volume: f32,
    pub looping: bool,
    /// Seconds
    pub seek_step: u64,
}

impl Default for PlayerSection {
    fn default() -> Self {
        PlayerSection {
            volume: 1.0,
            looping: false,
            seek_step: crate::SEEK_STEP.as_secs(),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ViewSection {
    pub bar_outline: Option<ConfigColor>,
    pub bar_fill: Option<ConfigColor>,
    pub show_file_name: bool,
    pub time_style: TimeStyle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfigColor(pub Color);

impl<'de> Deserialize<'de> for ConfigColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        parse_color(&s)
            .map(ConfigColor)
            .map_err(serde::de::Error::custom)
    }
}

impl From<ConfigColor> for Color {
    fn from(c: ConfigColor) -> Self {
        c.0
    }
}
