//! Game screen: gallows, word tiles, keyboard and hints.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tracing::{debug, instrument};

use crate::games::hangman::{
    GameStatus, GuessOutcome, InputBlocked, KeyState, Letter, MAX_INCORRECT, Session, Tile,
    board,
};
use crate::tui::palette::Palette;
use crate::tui::screen::{Screen, ScreenTransition, ViewContext};

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Gallows art for a number of drawn parts.
pub fn gallows_art(stage: usize) -> Vec<String> {
    let part = |n: usize, s: &'static str| if stage >= n { s } else { " " };
    vec![
        "  +---+".to_string(),
        "  |   |".to_string(),
        format!("  {}   |", part(1, "O")),
        format!(" {}{}{}  |", part(3, "/"), part(2, "|"), part(4, "\\")),
        format!(" {} {}  |", part(5, "/"), part(6, "\\")),
        "      |".to_string(),
        "=========".to_string(),
    ]
}

/// State for the game screen.
#[derive(Debug, Default)]
pub struct GameScreen {
    feedback: Option<String>,
}

impl GameScreen {
    /// Creates the game screen.
    #[instrument]
    pub fn new() -> Self {
        debug!("Initializing GameScreen");
        Self::default()
    }

    /// Records the result of the last guess for the status line.
    pub fn record(&mut self, outcome: GuessOutcome) {
        self.feedback = match outcome {
            GuessOutcome::AlreadyGuessed(letter) => {
                Some(format!("A letra {} já foi usada.", letter.as_char()))
            }
            GuessOutcome::Correct(letter) => Some(format!("{} está na palavra!", letter.as_char())),
            GuessOutcome::Incorrect { letter, remaining } => Some(format!(
                "{} não está na palavra. Restam {} tentativas.",
                letter.as_char(),
                remaining
            )),
            GuessOutcome::Rejected(InputBlocked::NotALetter) => {
                Some("Use apenas letras de A a Z.".to_string())
            }
            GuessOutcome::Rejected(_) | GuessOutcome::Won(_) | GuessOutcome::LossPending { .. } => None,
        };
    }

    /// Feedback for the last guess.
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, ctx: ViewContext<'_>, palette: Palette) {
        let session = ctx.session;
        let category = session.word().map_or("...", |w| w.category());
        let misses = session.incorrect_letters().len();
        let line = Line::from(vec![
            Span::styled("Categoria: ", palette.muted),
            Span::styled(category.to_string(), palette.accent),
            Span::styled("   Erros: ", palette.muted),
            Span::styled(
                format!("{} / {}", misses, MAX_INCORRECT),
                if misses > 0 { palette.bad } else { palette.base },
            ),
        ]);
        frame.render_widget(
            Paragraph::new(line)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("FORCA")),
            area,
        );
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect, ctx: ViewContext<'_>, palette: Palette) {
        let session = ctx.session;
        let hints = session.hints();
        let mut lines: Vec<Line> = session
            .revealed_hints()
            .iter()
            .enumerate()
            .map(|(i, hint)| Line::styled(format!("{}. {}", i + 1, hint), palette.base))
            .collect();
        if lines.is_empty() {
            lines.push(Line::styled("Nenhuma dica revelada.", palette.muted));
        }
        if session.status() == GameStatus::Lost
            && let Some(word) = session.word()
        {
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled("A palavra correta era: ", palette.muted),
                Span::styled(word.word().to_string(), palette.bad),
            ]));
        }
        let title = format!("Dicas ({}/{}) - F1", hints.count(), hints.total());
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(title)),
            area,
        );
    }

    fn render_word(&self, frame: &mut Frame, area: Rect, ctx: ViewContext<'_>, palette: Palette) {
        let session = ctx.session;
        let line = if session.is_loading() {
            let text = if ctx.settings.low_performance {
                "Gerando desafio...".to_string()
            } else {
                let frame_idx = (ctx.frame_count / 2) as usize % SPINNER.len();
                format!("{} Gerando desafio...", SPINNER[frame_idx])
            };
            Line::styled(text, palette.muted)
        } else if let Some(word) = session.word() {
            let spans: Vec<Span> = board::tiles(word, session.guesses(), session.reveals_word())
                .into_iter()
                .map(|tile| match tile {
                    Tile::Space => Span::raw("   "),
                    Tile::Letter { ch, visible: true, missed: true } => {
                        Span::styled(format!("{} ", ch), palette.bad)
                    }
                    Tile::Letter { ch, visible: true, .. } => {
                        Span::styled(format!("{} ", ch), palette.good)
                    }
                    Tile::Letter { visible: false, .. } => Span::styled("_ ", palette.base),
                })
                .collect();
            Line::from(spans)
        } else {
            Line::default()
        };
        frame.render_widget(
            Paragraph::new(line)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            area,
        );
    }

    fn render_keyboard(&self, frame: &mut Frame, area: Rect, ctx: ViewContext<'_>, palette: Palette) {
        let session = ctx.session;
        let letters: Vec<Letter> = Letter::alphabet().collect();
        let lines: Vec<Line> = letters
            .chunks(13)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|letter| {
                        let state = session
                            .word()
                            .map_or(KeyState::Unused, |w| board::key_state(*letter, w, session.guesses()));
                        let style = match state {
                            KeyState::Unused if session.is_input_enabled() => palette.base,
                            KeyState::Unused => palette.muted,
                            KeyState::Correct => palette.good,
                            KeyState::Incorrect => palette.bad,
                        };
                        Span::styled(format!(" {} ", letter.as_char()), style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Teclado")),
            area,
        );
    }

    fn status_line(&self, session: &Session, palette: Palette) -> Line<'static> {
        match session.status() {
            GameStatus::Won => Line::styled("Vitória! Você salvou o boneco.", palette.good),
            GameStatus::Lost => Line::styled("Derrota! O boneco foi enforcado.", palette.bad),
            GameStatus::Idle | GameStatus::Playing => match &self.feedback {
                Some(text) => Line::styled(text.clone(), palette.muted),
                None => Line::default(),
            },
        }
    }
}

impl Screen for GameScreen {
    #[instrument(skip_all)]
    fn render(&self, frame: &mut Frame, ctx: ViewContext<'_>) {
        let palette = Palette::for_theme(ctx.settings.theme);
        let area = frame.area();
        frame.render_widget(Block::default().style(palette.base), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(9),
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        self.render_header(frame, chunks[0], ctx, palette);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(16), Constraint::Min(20)])
            .split(chunks[1]);
        let stage = board::gallows_stage(ctx.session.incorrect_letters().len());
        let art: Vec<Line> = gallows_art(stage)
            .into_iter()
            .map(|row| Line::styled(row, palette.base))
            .collect();
        frame.render_widget(
            Paragraph::new(art).block(Block::default().borders(Borders::ALL)),
            middle[0],
        );
        self.render_hints(frame, middle[1], ctx, palette);

        self.render_word(frame, chunks[2], ctx, palette);
        self.render_keyboard(frame, chunks[3], ctx, palette);
        frame.render_widget(
            Paragraph::new(self.status_line(ctx.session, palette)).alignment(Alignment::Center),
            chunks[4],
        );

        let help = if ctx.session.status().is_finished() {
            "Enter/Esc: Voltar ao início | Tab: Opções | F2: Tema | F3: Desempenho"
        } else {
            "A-Z: Chutar | F1: Dica | Tab: Opções | F2: Tema | F3: Desempenho | Esc: Sair"
        };
        frame.render_widget(
            Paragraph::new(help)
                .style(palette.muted)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            chunks[6],
        );
    }

    #[instrument(skip(self, key, session))]
    fn handle_key(&mut self, key: KeyEvent, session: &Session) -> ScreenTransition {
        match key.code {
            KeyCode::Esc => ScreenTransition::ExitGame,
            KeyCode::Enter if session.status().is_finished() => ScreenTransition::ExitGame,
            KeyCode::F(1) => ScreenTransition::RevealHint,
            KeyCode::Tab => ScreenTransition::OpenOptions,
            KeyCode::Char(c) => ScreenTransition::Guess(c),
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_gallows_grows_with_misses() {
        assert!(!gallows_art(0)[2].contains('O'));
        assert!(gallows_art(1)[2].contains('O'));
        assert_eq!(gallows_art(6)[3], " /|\\  |");
        assert_eq!(gallows_art(6)[4], " / \\  |");
    }

    #[test]
    fn test_keys_map_to_transitions() {
        let mut screen = GameScreen::new();
        let session = Session::new();
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(screen.handle_key(key(KeyCode::Char('a')), &session), ScreenTransition::Guess('a'));
        assert_eq!(screen.handle_key(key(KeyCode::F(1)), &session), ScreenTransition::RevealHint);
        assert_eq!(screen.handle_key(key(KeyCode::Esc), &session), ScreenTransition::ExitGame);
        assert_eq!(screen.handle_key(key(KeyCode::Tab), &session), ScreenTransition::OpenOptions);
        assert_eq!(screen.handle_key(key(KeyCode::Enter), &session), ScreenTransition::Stay);
    }

    #[test]
    fn test_feedback_for_repeated_letter() {
        let mut screen = GameScreen::new();
        let letter = Letter::from_key('e').unwrap();
        screen.record(GuessOutcome::AlreadyGuessed(letter));
        assert_eq!(screen.feedback(), Some("A letra E já foi usada."));
    }
}
