mod app;
mod logging;

pub use app::Playbar;
pub use logging::init_logging;
