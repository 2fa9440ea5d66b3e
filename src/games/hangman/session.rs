//! Session state machine: screens, game lifecycle and the deferred loss.
//!
//! A [`Session`] is driven entirely by events: mode selection, session
//! starts, fetch completions, key presses and clock ticks. Time is passed in
//! by the caller so the delayed loss can be tested without sleeping.

use std::time::{Duration, Instant};

use derive_more::Display;
use tracing::{debug, info, instrument, warn};

use super::guesses::GuessedLetters;
use super::hints::HintReveal;
use super::rules::{self, MAX_INCORRECT, Verdict};
use super::sanitize::{SanitizeError, build_manual_word};
use super::types::{AppScreen, Difficulty, GameMode, GameStatus, GameWord, Letter};

/// Pause between reaching the miss limit and the game being lost.
pub const LOSS_DELAY: Duration = Duration::from_millis(500);

/// Why a letter was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InputBlocked {
    /// The game screen is not mounted.
    #[display("Not on the game screen")]
    NotInGame,
    /// The game is over or never started.
    #[display("Game is not being played")]
    NotPlaying,
    /// The word is still being generated.
    #[display("Word is still loading")]
    Loading,
    /// No word has been assigned.
    #[display("No word to guess")]
    NoWord,
    /// Six incorrect guesses were already made.
    #[display("No attempts left")]
    NoAttemptsLeft,
    /// The key is not an ASCII letter.
    #[display("Not a letter")]
    NotALetter,
}

/// Result of guessing a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Input was not admitted.
    Rejected(InputBlocked),
    /// The letter had been guessed before; nothing changed.
    AlreadyGuessed(Letter),
    /// The letter is in the word.
    Correct(Letter),
    /// The letter is not in the word.
    Incorrect {
        /// The guessed letter.
        letter: Letter,
        /// Incorrect guesses still allowed.
        remaining: usize,
    },
    /// The guess completed the word.
    Won(Letter),
    /// The guess reached the miss limit; the loss lands at `deadline`.
    LossPending {
        /// The guessed letter.
        letter: Letter,
        /// When [`Session::tick`] will commit the loss.
        deadline: Instant,
    },
}

/// Errors starting a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SessionError {
    /// Sessions start from a setup screen.
    #[display("Cannot start a game from {:?}", _0)]
    NotInSetup(AppScreen),
    /// The manual word was empty after cleanup.
    #[display("{}", _0)]
    Sanitize(SanitizeError),
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Sanitize(e) => Some(e),
            Self::NotInSetup(_) => None,
        }
    }
}

impl From<SanitizeError> for SessionError {
    fn from(err: SanitizeError) -> Self {
        Self::Sanitize(err)
    }
}

/// A word request the caller must dispatch and later report back through
/// [`Session::complete_fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Session token the completion must carry.
    pub generation: u64,
    /// Topic, absent for random words.
    pub topic: Option<String>,
    /// Requested difficulty.
    pub difficulty: Difficulty,
}

/// The loss waiting for its delay to elapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingLoss {
    generation: u64,
    deadline: Instant,
}

/// One player's game session and the screen it is shown on.
#[derive(Debug, Clone)]
pub struct Session {
    screen: AppScreen,
    status: GameStatus,
    word: Option<GameWord>,
    guesses: GuessedLetters,
    hints: HintReveal,
    loading: bool,
    generation: u64,
    pending_loss: Option<PendingLoss>,
    loss_delay: Duration,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates an idle session on the home screen.
    #[instrument]
    pub fn new() -> Self {
        Self::with_loss_delay(LOSS_DELAY)
    }

    /// Creates an idle session with a custom loss delay.
    #[instrument]
    pub fn with_loss_delay(loss_delay: Duration) -> Self {
        debug!(?loss_delay, "Creating session");
        Self {
            screen: AppScreen::Home,
            status: GameStatus::Idle,
            word: None,
            guesses: GuessedLetters::new(),
            hints: HintReveal::default(),
            loading: false,
            generation: 0,
            pending_loss: None,
            loss_delay,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Navigation
    // ─────────────────────────────────────────────────────────────

    /// Moves from the home screen to the setup screen of `mode`.
    #[instrument(skip(self))]
    pub fn select_mode(&mut self, mode: GameMode) -> AppScreen {
        if self.screen != AppScreen::Home {
            warn!(screen = ?self.screen, "Mode selection outside home screen ignored");
            return self.screen;
        }
        self.screen = mode.setup_screen();
        info!(screen = ?self.screen, "Mode selected");
        self.screen
    }

    /// Leaves a setup screen for the home screen.
    #[instrument(skip(self))]
    pub fn back_to_home(&mut self) {
        if GameMode::from_setup_screen(self.screen).is_some() {
            debug!(from = ?self.screen, "Back to home");
            self.screen = AppScreen::Home;
        }
    }

    /// Leaves the game for the home screen, dropping the current word.
    ///
    /// Any pending loss is cancelled and in-flight fetches become stale.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn exit(&mut self) {
        info!(status = ?self.status, "Exiting to home");
        self.generation += 1;
        self.pending_loss = None;
        self.word = None;
        self.loading = false;
        self.status = GameStatus::Idle;
        self.screen = AppScreen::Home;
    }

    // ─────────────────────────────────────────────────────────────
    //  Session starts
    // ─────────────────────────────────────────────────────────────

    /// Starts a game whose word comes from the generator.
    ///
    /// The game screen is entered right away in a loading state. A blank
    /// topic counts as no topic.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotInSetup`] outside the setup screens.
    #[instrument(skip(self, topic))]
    pub fn start_ai_session(
        &mut self,
        topic: Option<&str>,
        difficulty: Difficulty,
    ) -> Result<FetchTicket, SessionError> {
        self.ensure_setup()?;
        self.reset_round(None);
        self.loading = true;

        let topic = topic
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        info!(generation = self.generation, topic = ?topic, %difficulty, "AI session started");
        Ok(FetchTicket {
            generation: self.generation,
            topic,
            difficulty,
        })
    }

    /// Assigns the generated word for the session that requested it.
    ///
    /// Returns `false` and changes nothing when the completion belongs to an
    /// abandoned session.
    #[instrument(skip(self, word), fields(current = self.generation))]
    pub fn complete_fetch(&mut self, generation: u64, word: GameWord) -> bool {
        if generation != self.generation || !self.loading {
            warn!(generation, "Discarding stale word fetch");
            return false;
        }
        info!(category = %word.category(), "Word assigned");
        self.guesses.clear();
        self.hints.reset(word.hints().len());
        self.word = Some(word);
        self.loading = false;
        true
    }

    /// Starts a versus game with a word typed by the other player.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Sanitize`] when nothing playable is left of
    /// the word, and [`SessionError::NotInSetup`] outside the setup screens.
    /// The session is left untouched in both cases.
    #[instrument(skip(self, raw_word, hints))]
    pub fn start_manual_session(&mut self, raw_word: &str, hints: &[String]) -> Result<(), SessionError> {
        self.ensure_setup()?;
        let word = build_manual_word(raw_word, hints)?;
        self.reset_round(Some(word));
        info!(generation = self.generation, "Manual session started");
        Ok(())
    }

    fn ensure_setup(&self) -> Result<(), SessionError> {
        match GameMode::from_setup_screen(self.screen) {
            Some(_) => Ok(()),
            None => Err(SessionError::NotInSetup(self.screen)),
        }
    }

    /// Resets every per-session field and enters the game screen.
    fn reset_round(&mut self, word: Option<GameWord>) {
        self.generation += 1;
        self.pending_loss = None;
        self.guesses.clear();
        self.hints.reset(word.as_ref().map_or(0, |w| w.hints().len()));
        self.word = word;
        self.loading = false;
        self.status = GameStatus::Playing;
        self.screen = AppScreen::Game;
    }

    // ─────────────────────────────────────────────────────────────
    //  Play
    // ─────────────────────────────────────────────────────────────

    /// Handles a key press on the game screen.
    #[instrument(skip(self, now))]
    pub fn press_key(&mut self, key: char, now: Instant) -> GuessOutcome {
        if self.screen != AppScreen::Game {
            return GuessOutcome::Rejected(InputBlocked::NotInGame);
        }
        match Letter::from_key(key) {
            Some(letter) => self.guess(letter, now),
            None => GuessOutcome::Rejected(InputBlocked::NotALetter),
        }
    }

    /// Guesses a letter and evaluates the result.
    #[instrument(skip(self, now), fields(generation = self.generation))]
    pub fn guess(&mut self, letter: Letter, now: Instant) -> GuessOutcome {
        if let Some(blocked) = self.input_blocked() {
            debug!(%blocked, "Guess rejected");
            return GuessOutcome::Rejected(blocked);
        }
        let Some(word) = &self.word else {
            return GuessOutcome::Rejected(InputBlocked::NoWord);
        };
        if !self.guesses.add(letter) {
            return GuessOutcome::AlreadyGuessed(letter);
        }

        let verdict = rules::evaluate(word, &self.guesses);
        let incorrect = rules::incorrect_letters(word, &self.guesses);
        let hit = !incorrect.contains(&letter);

        match verdict {
            Verdict::Lost => {
                let deadline = match self.pending_loss {
                    Some(pending) => pending.deadline,
                    None => {
                        let deadline = now + self.loss_delay;
                        self.pending_loss = Some(PendingLoss {
                            generation: self.generation,
                            deadline,
                        });
                        info!(misses = incorrect.len(), "Miss limit reached, loss pending");
                        deadline
                    }
                };
                GuessOutcome::LossPending { letter, deadline }
            }
            Verdict::Won => {
                self.status = GameStatus::Won;
                info!(guesses = self.guesses.len(), "Game won");
                GuessOutcome::Won(letter)
            }
            Verdict::Continue if hit => GuessOutcome::Correct(letter),
            Verdict::Continue => GuessOutcome::Incorrect {
                letter,
                remaining: MAX_INCORRECT.saturating_sub(incorrect.len()),
            },
        }
    }

    /// Commits a pending loss once its delay has elapsed.
    ///
    /// Returns `true` when the status changed to [`GameStatus::Lost`].
    #[instrument(skip(self, now))]
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(pending) = self.pending_loss else {
            return false;
        };
        if pending.generation != self.generation {
            debug!(pending = pending.generation, "Dropping loss from another session");
            self.pending_loss = None;
            return false;
        }
        if now < pending.deadline || self.status != GameStatus::Playing {
            return false;
        }
        self.pending_loss = None;
        self.status = GameStatus::Lost;
        info!(generation = self.generation, "Game lost");
        true
    }

    /// Shows the next hint and returns how many are shown.
    #[instrument(skip(self))]
    pub fn reveal_hint(&mut self) -> usize {
        if self.status != GameStatus::Playing || self.word.is_none() {
            return self.hints.count();
        }
        let count = self.hints.reveal_next();
        debug!(count, total = self.hints.total(), "Hint revealed");
        count
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Returns why input would be rejected right now, if it would.
    pub fn input_blocked(&self) -> Option<InputBlocked> {
        if self.screen != AppScreen::Game {
            return Some(InputBlocked::NotInGame);
        }
        if self.status != GameStatus::Playing {
            return Some(InputBlocked::NotPlaying);
        }
        if self.loading {
            return Some(InputBlocked::Loading);
        }
        if self.word.is_none() {
            return Some(InputBlocked::NoWord);
        }
        if self.incorrect_letters().len() >= MAX_INCORRECT {
            return Some(InputBlocked::NoAttemptsLeft);
        }
        None
    }

    /// True when a letter guess would be admitted.
    pub fn is_input_enabled(&self) -> bool {
        self.input_blocked().is_none()
    }

    /// Mounted screen.
    pub fn screen(&self) -> AppScreen {
        self.screen
    }

    /// Game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Current word, if assigned.
    pub fn word(&self) -> Option<&GameWord> {
        self.word.as_ref()
    }

    /// Guessed letters.
    pub fn guesses(&self) -> &GuessedLetters {
        &self.guesses
    }

    /// Hint counter.
    pub fn hints(&self) -> HintReveal {
        self.hints
    }

    /// Hints currently shown.
    pub fn revealed_hints(&self) -> &[String] {
        match &self.word {
            Some(word) => &word.hints()[..self.hints.count().min(word.hints().len())],
            None => &[],
        }
    }

    /// True while a generated word is awaited.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current session token.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True when the loss is waiting for its delay.
    pub fn loss_pending(&self) -> bool {
        self.pending_loss.is_some()
    }

    /// Guessed letters not in the word.
    pub fn incorrect_letters(&self) -> Vec<Letter> {
        match &self.word {
            Some(word) => rules::incorrect_letters(word, &self.guesses),
            None => Vec::new(),
        }
    }

    /// Guessed letters in the word.
    pub fn correct_letters(&self) -> Vec<Letter> {
        match &self.word {
            Some(word) => rules::correct_letters(word, &self.guesses),
            None => Vec::new(),
        }
    }

    /// True once the game is over and the word may be shown in full.
    pub fn reveals_word(&self) -> bool {
        self.status.is_finished()
    }
}
