mod dispatch;
mod menu;
pub mod model;
mod source;
mod throttle;

pub use dispatch::Dispatcher;
pub use menu::{MenuAction, MenuItem, MenuItemKind, VoiceToolsMenu};
pub use source::VoiceStateSource;
pub use throttle::{PacingMode, ThrottleConfig, ThrottleConfigPatch, WaitAfter, WaitSeconds};
