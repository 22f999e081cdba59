use anyhow::{Result, anyhow};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

pub mod app_core;
pub mod config;
pub mod key_handler;
pub mod player;
pub mod tui;

pub use config::Config;
pub use player::{Bundle, PlaybackController, PlayerError, PlayerOptions};
pub use tui::{Control, PlayerStyle, PlayerView};

pub const CONFIG_DIRECTORY: &str = "playbar";
pub const CONFIG_FILE: &str = "config.toml";
pub const SOUNDS_DIRECTORY: &str = "sounds";

/// Cadence of the playback sampler.
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(100);

/// Distance covered by a single forward/rewind.
pub const SEEK_STEP: Duration = Duration::from_secs(15);

// ~30fps
pub const REFRESH_RATE: Duration = Duration::from_millis(33);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeStyle {
    /// `MM:SS`, minutes and seconds both zero padded
    #[default]
    Padded,
    /// `M:SS`
    Compact,
}

/// Format a position in seconds for display.
///
/// Minutes are never folded into hours, so an hour long track reads `60:00`.
/// Negative or non-finite input is treated as zero.
pub fn format_time(secs: f64, style: TimeStyle) -> String {
    let secs = match secs.is_finite() && secs > 0.0 {
        true => secs as u64,
        false => 0,
    };
    let mins = secs / 60;
    let secs = secs % 60;

    match style {
        TimeStyle::Padded => format!("{mins:02}:{secs:02}"),
        TimeStyle::Compact => format!("{mins}:{secs:02}"),
    }
}

/// The file name of `path` with its extension stripped.
pub fn display_name<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory!"))?;

    match path_str.len() {
        1 => Ok(home),
        _ if path_str.starts_with("~/") || path_str.starts_with("~\\") => {
            Ok(home.join(&path_str[2..]))
        }
        _ => Err(anyhow!("Error expanding path with tilde (~): {path_str}")),
    }
}
