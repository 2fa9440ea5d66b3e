//! Screen trait and transition type for the UI state machine.

use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::games::hangman::{Difficulty, GameMode, Session};
use crate::settings::AppSettings;

/// The result of handling an input event on a screen.
///
/// Screens return this from [`Screen::handle_key`]; the
/// [`Controller`](super::Controller) applies it to the [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Open the setup screen of a mode.
    SelectMode(GameMode),
    /// Leave a setup screen.
    BackToHome,
    /// Start a game with a generated word.
    StartAi {
        /// Topic, absent for random words.
        topic: Option<String>,
        /// Requested difficulty.
        difficulty: Difficulty,
    },
    /// Start a versus game.
    StartManual {
        /// Secret word as typed.
        word: String,
        /// Hints as typed.
        hints: Vec<String>,
    },
    /// Guess a key.
    Guess(char),
    /// Show the next hint.
    RevealHint,
    /// Leave the game for the home screen.
    ExitGame,
    /// Show the options screen over the current one.
    OpenOptions,
    /// Close the options screen.
    CloseOptions,
    /// Switch between dark and light themes.
    ToggleTheme,
    /// Switch low-performance mode.
    TogglePerformance,
    /// Exit the application cleanly.
    Quit,
}

/// Read-only state every screen renders from.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    /// Current session.
    pub session: &'a Session,
    /// Current settings.
    pub settings: &'a AppSettings,
    /// Frames drawn so far, for animation.
    pub frame_count: u64,
}

/// Trait implemented by each screen.
///
/// Each screen owns its own input state, renders its UI, and handles key
/// events. The controller calls these methods in the event loop.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, ctx: ViewContext<'_>);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent, session: &Session) -> ScreenTransition;
}
