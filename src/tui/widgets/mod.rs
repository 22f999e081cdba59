mod capsule;
mod controls;
mod player_view;
mod status;

pub use capsule::Capsule;
pub use controls::Control;
pub use player_view::{PlayerStyle, PlayerView, ProgressSemantics};
pub use status::StatusLine;

pub(super) const DUR_WIDTH: u16 = 5;
pub(super) const CAPSULE_HEIGHT: u16 = 3;
pub(super) const BUTTON_WIDTH: u16 = 7;
pub(super) const BUTTON_GAP: u16 = 2;

const PLAY_ICON: &str = "▶";
const PAUSE_ICON: &str = "⏸";
const REWIND_ICON: &str = "« 15";
const FORWARD_ICON: &str = "15 »";
