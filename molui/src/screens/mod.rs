//! One controller per screen, each owning its slice of UI state

pub mod home;
pub mod player;
pub mod series;

pub use home::HomeScreen;
pub use player::PlayerScreen;
pub use series::SeriesScreen;
