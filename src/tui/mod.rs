//! Terminal UI for the hangman game.

mod controller;
mod palette;
mod screen;
mod screens;

use std::io;
use std::path::Path;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, instrument};

use crate::config::ForcaConfig;
use crate::games::hangman::Session;

pub use controller::{Controller, FetchCompleted};
pub use palette::Palette;
pub use screen::{Screen, ScreenTransition, ViewContext};
pub use screens::{GameScreen, HomeScreen, OptionsScreen, OptionsTab, SetupScreen, gallows_art};

/// Runs the game in the terminal until the player quits.
///
/// Logs go to `log_file` so they do not interfere with the UI.
#[instrument(skip(config, log_file))]
pub async fn run_tui(config: ForcaConfig, log_file: &Path) -> Result<()> {
    let file = std::fs::File::create(log_file)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .try_init();

    info!(log_file = %log_file.display(), "Starting forca TUI");

    let mut controller = Controller::new(
        Session::with_loss_delay(config.loss_delay()),
        config.settings(),
        config.word_source(),
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = controller.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Event loop error");
    }
    res
}
