//! UI layer for the round-display remote.
//!
//! Three screens (Home carousel, Series track list, Player) coordinated
//! by [`Ui`], which routes knob input, runs slide transitions, and emits
//! [`UiCommand`]s on a bus for the host loop to execute.

pub mod events;
pub mod model;
pub mod screens;
pub mod theme;
pub mod ui;

pub use events::UiCommandBus;
pub use model::{InputEvent, RotateDirection, ScreenId, SlideDirection, UiCommand};
pub use screens::{HomeScreen, PlayerScreen, SeriesScreen};
pub use theme::Theme;
pub use ui::{LONG_PRESS_HOLD, Ui};
