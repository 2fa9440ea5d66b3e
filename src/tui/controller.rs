//! Controller: the state machine driving the game UI.

use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument, warn};

use crate::games::hangman::{AppScreen, FetchTicket, GameMode, GameWord, Session, SessionError};
use crate::settings::AppSettings;
use crate::tui::screen::{Screen, ScreenTransition, ViewContext};
use crate::tui::screens::{GameScreen, HomeScreen, OptionsScreen, SetupScreen};
use crate::word_source::WordSource;

/// A generated word arriving for a session.
#[derive(Debug, Clone)]
pub struct FetchCompleted {
    /// Session token of the request.
    pub generation: u64,
    /// The word, generated or fallback.
    pub word: GameWord,
}

/// Active screen in the UI state machine.
#[derive(Debug)]
enum ActiveScreen {
    Home(HomeScreen),
    Setup(SetupScreen),
    Game(GameScreen),
    Options(OptionsScreen),
}

impl ActiveScreen {
    /// Screen matching the session's mounted screen.
    fn for_session(session: &Session) -> Self {
        match session.screen() {
            AppScreen::Home => Self::Home(HomeScreen::new()),
            AppScreen::Game => Self::Game(GameScreen::new()),
            screen => match GameMode::from_setup_screen(screen) {
                Some(mode) => Self::Setup(SetupScreen::new(mode)),
                None => Self::Home(HomeScreen::new()),
            },
        }
    }

    fn matches(&self, screen: AppScreen) -> bool {
        match self {
            Self::Home(_) => screen == AppScreen::Home,
            Self::Setup(s) => screen == s.mode().setup_screen(),
            Self::Game(_) => screen == AppScreen::Game,
            // Drawn over whatever the session shows.
            Self::Options(_) => true,
        }
    }

    fn as_screen(&self) -> &dyn Screen {
        match self {
            Self::Home(s) => s,
            Self::Setup(s) => s,
            Self::Game(s) => s,
            Self::Options(s) => s,
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Home(s) => s,
            Self::Setup(s) => s,
            Self::Game(s) => s,
            Self::Options(s) => s,
        }
    }
}

/// Controller that owns the session, the settings and the word source.
///
/// Call [`Controller::run`] to start the event loop.
#[derive(Debug)]
pub struct Controller {
    session: Session,
    settings: AppSettings,
    word_source: WordSource,
    fetch_tx: mpsc::UnboundedSender<FetchCompleted>,
    fetch_rx: mpsc::UnboundedReceiver<FetchCompleted>,
    frame_count: u64,
}

impl Controller {
    /// Creates a new controller.
    #[instrument(skip(session, word_source))]
    pub fn new(session: Session, settings: AppSettings, word_source: WordSource) -> Self {
        info!(online = word_source.is_online(), "Creating Controller");
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        Self {
            session,
            settings,
            word_source,
            fetch_tx,
            fetch_rx,
            frame_count: 0,
        }
    }

    /// Current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current settings.
    pub fn settings(&self) -> AppSettings {
        self.settings
    }

    /// Runs the event loop until the user quits.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting event loop");
        let mut screen = ActiveScreen::for_session(&self.session);

        loop {
            self.drain_fetches();
            self.session.tick(Instant::now());
            if !screen.matches(self.session.screen()) {
                screen = ActiveScreen::for_session(&self.session);
            }

            let ctx = ViewContext {
                session: &self.session,
                settings: &self.settings,
                frame_count: self.frame_count,
            };
            terminal.draw(|f| screen.as_screen().render(f, ctx))?;
            self.frame_count = self.frame_count.wrapping_add(1);

            // Short poll keeps fetch results and the loss timer responsive.
            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                if key.kind == KeyEventKind::Release {
                    continue;
                }

                let transition = match key.code {
                    KeyCode::F(2) => ScreenTransition::ToggleTheme,
                    KeyCode::F(3) => ScreenTransition::TogglePerformance,
                    _ => screen.as_screen_mut().handle_key(key, &self.session),
                };

                if !self.apply_transition(transition, &mut screen) {
                    info!("Quitting");
                    return Ok(());
                }
            }

            sleep(Duration::from_millis(10)).await;
        }
    }

    /// Applies completed fetches to the session.
    #[instrument(skip(self))]
    pub fn drain_fetches(&mut self) {
        while let Ok(done) = self.fetch_rx.try_recv() {
            self.session.complete_fetch(done.generation, done.word);
        }
    }

    /// Applies a screen transition. Returns `false` to quit.
    #[instrument(skip(self, screen))]
    fn apply_transition(&mut self, transition: ScreenTransition, screen: &mut ActiveScreen) -> bool {
        debug!(transition = ?transition, "Applying screen transition");
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::SelectMode(mode) => {
                self.session.select_mode(mode);
            }
            ScreenTransition::BackToHome => self.session.back_to_home(),
            ScreenTransition::StartAi { topic, difficulty } => {
                match self.session.start_ai_session(topic.as_deref(), difficulty) {
                    Ok(ticket) => self.spawn_fetch(ticket),
                    Err(e) => warn!(error = %e, "Could not start AI session"),
                }
            }
            ScreenTransition::StartManual { word, hints } => {
                if let Err(e) = self.session.start_manual_session(&word, &hints) {
                    warn!(error = %e, "Could not start manual session");
                    if let (ActiveScreen::Setup(setup), SessionError::Sanitize(_)) = (screen, e) {
                        setup.set_error("A palavra precisa ter ao menos uma letra.");
                    }
                }
            }
            ScreenTransition::Guess(c) => {
                let outcome = self.session.press_key(c, Instant::now());
                debug!(outcome = ?outcome, "Guess handled");
                if let ActiveScreen::Game(game) = screen {
                    game.record(outcome);
                }
            }
            ScreenTransition::RevealHint => {
                self.session.reveal_hint();
            }
            ScreenTransition::ExitGame => {
                self.session.exit();
                if matches!(*screen, ActiveScreen::Options(_)) {
                    *screen = ActiveScreen::for_session(&self.session);
                }
            }
            ScreenTransition::OpenOptions => {
                let in_game = self.session.screen() == AppScreen::Game;
                *screen = ActiveScreen::Options(OptionsScreen::new(in_game));
            }
            ScreenTransition::CloseOptions => {
                *screen = ActiveScreen::for_session(&self.session);
            }
            ScreenTransition::ToggleTheme => self.settings.toggle_theme(),
            ScreenTransition::TogglePerformance => self.settings.toggle_performance(),
            ScreenTransition::Quit => return false,
        }
        true
    }

    /// Requests a word in the background; the result comes back through
    /// the fetch channel tagged with the ticket's generation.
    #[instrument(skip(self), fields(generation = ticket.generation))]
    pub fn spawn_fetch(&self, ticket: FetchTicket) {
        let source = self.word_source.clone();
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let word = source.fetch_word(ticket.topic.as_deref(), ticket.difficulty).await;
            let done = FetchCompleted {
                generation: ticket.generation,
                word,
            };
            if tx.send(done).is_err() {
                debug!("Controller gone, dropping fetched word");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hangman::{Difficulty, GameStatus};

    #[tokio::test]
    async fn test_offline_fetch_reaches_session() {
        let mut controller = Controller::new(Session::new(), AppSettings::new(), WordSource::offline());
        let mut screen = ActiveScreen::for_session(&controller.session);
        assert!(controller.apply_transition(ScreenTransition::SelectMode(GameMode::Random), &mut screen));
        controller.apply_transition(
            ScreenTransition::StartAi {
                topic: None,
                difficulty: Difficulty::Easy,
            },
            &mut screen,
        );
        assert!(controller.session().is_loading());

        for _ in 0..50 {
            controller.drain_fetches();
            if !controller.session().is_loading() {
                break;
            }
            sleep(Duration::from_millis(10)).await;
        }
        assert!(controller.session().word().is_some());
        assert_eq!(controller.session().status(), GameStatus::Playing);
    }

    #[tokio::test]
    async fn test_empty_manual_word_stays_on_setup() {
        let mut controller = Controller::new(Session::new(), AppSettings::new(), WordSource::offline());
        controller.session.select_mode(GameMode::Manual);
        let mut screen = ActiveScreen::for_session(&controller.session);
        controller.apply_transition(
            ScreenTransition::StartManual {
                word: "123".to_string(),
                hints: Vec::new(),
            },
            &mut screen,
        );
        assert_eq!(controller.session().screen(), AppScreen::SetupWord);
        assert!(screen.matches(AppScreen::SetupWord));
    }

    #[tokio::test]
    async fn test_options_exit_leaves_game_for_home() {
        let mut controller = Controller::new(Session::new(), AppSettings::new(), WordSource::offline());
        controller.session.select_mode(GameMode::Manual);
        controller.session.start_manual_session("sol", &[]).unwrap();
        let mut screen = ActiveScreen::for_session(&controller.session);

        controller.apply_transition(ScreenTransition::OpenOptions, &mut screen);
        assert!(matches!(screen, ActiveScreen::Options(_)));
        controller.apply_transition(ScreenTransition::ToggleTheme, &mut screen);
        assert_eq!(controller.settings().theme, crate::settings::Theme::Light);
        assert_eq!(controller.session().screen(), AppScreen::Game);

        controller.apply_transition(ScreenTransition::ExitGame, &mut screen);
        assert_eq!(controller.session().screen(), AppScreen::Home);
        assert!(matches!(screen, ActiveScreen::Home(_)));
    }

    #[tokio::test]
    async fn test_closing_options_returns_to_game() {
        let mut controller = Controller::new(Session::new(), AppSettings::new(), WordSource::offline());
        controller.session.select_mode(GameMode::Manual);
        controller.session.start_manual_session("sol", &[]).unwrap();
        let mut screen = ActiveScreen::for_session(&controller.session);

        controller.apply_transition(ScreenTransition::OpenOptions, &mut screen);
        controller.apply_transition(ScreenTransition::TogglePerformance, &mut screen);
        controller.apply_transition(ScreenTransition::CloseOptions, &mut screen);
        assert!(matches!(screen, ActiveScreen::Game(_)));
        assert!(controller.settings().low_performance);
        assert_eq!(controller.session().status(), GameStatus::Playing);
    }

    #[tokio::test]
    async fn test_quit_stops_loop() {
        let mut controller = Controller::new(Session::new(), AppSettings::new(), WordSource::offline());
        let mut screen = ActiveScreen::for_session(&controller.session);
        assert!(!controller.apply_transition(ScreenTransition::Quit, &mut screen));
    }
}
