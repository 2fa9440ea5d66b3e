//! Screens of the game UI.

mod game;
mod home;
mod options;
mod setup;

pub use game::{GameScreen, gallows_art};
pub use home::HomeScreen;
pub use options::{OptionsScreen, OptionsTab};
pub use setup::SetupScreen;
