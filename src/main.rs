use anyhow::{Result, bail};
use clap::Parser;
use playbar::{Bundle, Config, PlaybackController, app_core};
use std::path::PathBuf;

/// Play one sound in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// A file path, or the name of a sound in the bundle
    sound: String,

    /// Directory to look sound names up in
    #[arg(long, value_name = "DIR")]
    bundle: Option<PathBuf>,

    /// Initial volume, 0.0 to 1.0
    #[arg(long, value_name = "V")]
    volume: Option<f32>,

    /// Restart from the beginning when the sound ends
    #[arg(long = "loop")]
    looping: bool,

    /// Show the sound's name above the bar
    #[arg(long)]
    show_name: bool,

    /// Config file to use instead of the default one
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    app_core::init_logging()?;

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    if let Some(volume) = args.volume {
        config.player.volume = volume.clamp(0.0, 1.0);
    }
    config.player.looping |= args.looping;
    config.style.show_file_name |= args.show_name;

    let path = PathBuf::from(&args.sound);
    let controller = match path.is_file() {
        true => PlaybackController::open(path, config.player),
        false => {
            let bundle = args.bundle.as_ref().map_or_else(Bundle::main, Bundle::new);
            match PlaybackController::from_bundle(&args.sound, &bundle, config.player) {
                Some(controller) => controller,
                None => bail!(
                    "No file or bundled sound named {} (looked in {})",
                    args.sound,
                    bundle.root().display()
                ),
            }
        }
    };

    log::info!("starting with {:?}", config);
    app_core::Playbar::new(controller, config.style).run()
}
