use std::path::PathBuf;
use thiserror::Error;

/// Errors published through [`PlaybackSnapshot::last_error`].
///
/// [`PlaybackSnapshot::last_error`]: super::PlaybackSnapshot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    #[error("Failed to load audio from {}: {cause}", path.display())]
    LoadFailed { path: PathBuf, cause: String },
}

impl PlayerError {
    pub fn load_failed(path: impl Into<PathBuf>, cause: &anyhow::Error) -> Self {
        PlayerError::LoadFailed {
            path: path.into(),
            // Keep the whole context chain, the outermost message alone is usually vague
            cause: format!("{cause:#}"),
        }
    }

    /// Stable identifier for programmatic handling.
    pub fn kind(&self) -> &'static str {
        match self {
            PlayerError::LoadFailed { .. } => "load_failed",
        }
    }
}
