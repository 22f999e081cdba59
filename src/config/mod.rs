mod config_import;
mod config_utils;

use crate::{CONFIG_DIRECTORY, CONFIG_FILE, PlayerOptions, PlayerStyle, expand_tilde};
use anyhow::{Context, Result, bail};
use config_import::ConfigImport;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    pub player: PlayerOptions,
    pub style: PlayerStyle,
}

impl Config {
    /// `<config dir>/playbar/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIRECTORY).join(CONFIG_FILE))
    }

    /// Load the user's config, or the defaults if there is none.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from_file(path),
            _ => Ok(Config::default()),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = expand_tilde(path)?;
        let file_str = std::fs::read_to_string(&path)
            .with_context(|| format!("Could not read config at {}", path.display()))?;
        Self::from_toml(&file_str).with_context(|| format!("Invalid config at {}", path.display()))
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        let import = toml::from_str::<ConfigImport>(s)?;
        Self::try_from(&import)
    }
}

impl TryFrom<&ConfigImport> for Config {
    type Error = anyhow::Error;

    fn try_from(import: &ConfigImport) -> Result<Self> {
        let player = &import.player;
        let view = &import.view;

        if !(0.0..=1.0).contains(&player.volume) {
            bail!("volume must be between 0.0 and 1.0, got {}", player.volume);
        }
        if player.seek_step == 0 {
            bail!("seek_step must be at least one second");
        }

        let defaults = PlayerStyle::default();

        Ok(Config {
            player: PlayerOptions {
                volume: player.volume,
                looping: player.looping,
                seek_step: Duration::from_secs(player.seek_step),
                time_style: view.time_style,
            },
            style: PlayerStyle {
                bar_outline: view.bar_outline.map_or(defaults.bar_outline, Into::into),
                bar_fill: view.bar_fill.map_or(defaults.bar_fill, Into::into),
                show_file_name: view.show_file_name,
            },
        })
    }
}
