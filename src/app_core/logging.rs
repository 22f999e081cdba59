use crate::CONFIG_DIRECTORY;
use anyhow::{Context, Result, anyhow};
use env_logger::{Builder, Target};
use std::{fs::File, path::PathBuf};

pub const LOG_FILE: &str = "playbar.log";

pub fn log_path() -> Result<PathBuf> {
    let dir = dirs::data_dir()
        .ok_or_else(|| anyhow!("Could not determine data directory!"))?
        .join(CONFIG_DIRECTORY);
    Ok(dir.join(LOG_FILE))
}

/// Route `log` output to a file under the data directory.
///
/// The terminal belongs to the interface while it runs, so nothing is logged
/// unless `RUST_LOG` asks for it.
pub fn init_logging() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }

    let path = log_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;

    Builder::from_default_env()
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;

    Ok(())
}
