//! Setup screen: difficulty, topic or secret word before a game starts.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tracing::{debug, info, instrument};

use crate::games::hangman::{Difficulty, GameMode, MAX_HINTS, Session};
use crate::tui::palette::Palette;
use crate::tui::screen::{Screen, ScreenTransition, ViewContext};

/// Message shown when submitting without text.
const EMPTY_INPUT_MESSAGE: &str = "Preencha o campo antes de iniciar.";

/// Focusable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Input,
    Difficulty,
    Hint(usize),
}

/// State for the setup screen of one mode.
#[derive(Debug)]
pub struct SetupScreen {
    mode: GameMode,
    input: String,
    difficulty: Difficulty,
    hints: Vec<String>,
    focus: Field,
    error: Option<String>,
}

impl SetupScreen {
    /// Creates the setup screen for `mode`.
    #[instrument]
    pub fn new(mode: GameMode) -> Self {
        debug!("Initializing SetupScreen");
        let focus = match mode {
            GameMode::Random => Field::Difficulty,
            GameMode::Topic | GameMode::Manual => Field::Input,
        };
        let hints = match mode {
            GameMode::Manual => vec![String::new(); MAX_HINTS],
            GameMode::Random | GameMode::Topic => Vec::new(),
        };
        Self {
            mode,
            input: String::new(),
            difficulty: Difficulty::default(),
            hints,
            focus,
            error: None,
        }
    }

    /// Mode being configured.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Shows an error under the form.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Fields in tab order for this mode.
    fn fields(&self) -> Vec<Field> {
        match self.mode {
            GameMode::Random => vec![Field::Difficulty],
            GameMode::Topic => vec![Field::Input, Field::Difficulty],
            GameMode::Manual => std::iter::once(Field::Input)
                .chain((0..self.hints.len()).map(Field::Hint))
                .collect(),
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let fields = self.fields();
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (pos + 1) % fields.len()
        } else {
            (pos + fields.len() - 1) % fields.len()
        };
        self.focus = fields[next];
    }

    /// Text buffer under focus, if the focused field takes text.
    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Input => Some(&mut self.input),
            Field::Hint(i) => self.hints.get_mut(i),
            Field::Difficulty => None,
        }
    }

    fn add_hint(&mut self) {
        if self.mode == GameMode::Manual && self.hints.len() < MAX_HINTS {
            self.hints.push(String::new());
            self.focus = Field::Hint(self.hints.len() - 1);
        }
    }

    fn remove_hint(&mut self) {
        if let Field::Hint(i) = self.focus
            && self.hints.len() > 1
        {
            self.hints.remove(i);
            self.focus = Field::Hint(i.min(self.hints.len() - 1));
        }
    }

    /// Builds the start transition, or records why it cannot start.
    #[instrument(skip(self))]
    fn submit(&mut self) -> ScreenTransition {
        if self.mode != GameMode::Random && self.input.trim().is_empty() {
            debug!("Submit blocked on empty input");
            self.error = Some(EMPTY_INPUT_MESSAGE.to_string());
            return ScreenTransition::Stay;
        }
        self.error = None;
        info!(mode = ?self.mode, difficulty = %self.difficulty, "Starting game");
        match self.mode {
            GameMode::Random => ScreenTransition::StartAi {
                topic: None,
                difficulty: self.difficulty,
            },
            GameMode::Topic => ScreenTransition::StartAi {
                topic: Some(self.input.clone()),
                difficulty: self.difficulty,
            },
            GameMode::Manual => ScreenTransition::StartManual {
                word: self.input.clone(),
                hints: self.hints.clone(),
            },
        }
    }

    fn field_block(&self, field: Field, title: String, palette: Palette) -> Block<'static> {
        let style = if self.focus == field {
            palette.accent
        } else {
            palette.muted
        };
        Block::default().borders(Borders::ALL).title(title).border_style(style)
    }

    fn render_difficulty(&self, frame: &mut Frame, area: Rect, palette: Palette) {
        let spans: Vec<Span> = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
            .into_iter()
            .map(|d| {
                let style = if d == self.difficulty {
                    palette.accent
                } else {
                    palette.muted
                };
                Span::styled(format!("  {}  ", d.label()), style)
            })
            .collect();
        let block = self.field_block(Field::Difficulty, "Dificuldade (←/→)".to_string(), palette);
        frame.render_widget(
            Paragraph::new(Line::from(spans))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
    }
}

impl Screen for SetupScreen {
    #[instrument(skip_all)]
    fn render(&self, frame: &mut Frame, ctx: ViewContext<'_>) {
        let palette = Palette::for_theme(ctx.settings.theme);
        let area = frame.area();
        frame.render_widget(Block::default().style(palette.base), area);

        let mut constraints = vec![Constraint::Length(3), Constraint::Length(3)];
        match self.mode {
            GameMode::Random => constraints.push(Constraint::Length(3)),
            GameMode::Topic => constraints.extend([Constraint::Length(3), Constraint::Length(3)]),
            GameMode::Manual => {
                constraints.push(Constraint::Length(3));
                constraints.extend(self.hints.iter().map(|_| Constraint::Length(3)));
            }
        }
        constraints.extend([Constraint::Min(1), Constraint::Length(3)]);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let title = Paragraph::new(self.mode.label())
            .style(palette.accent)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let description = Paragraph::new(self.mode.description())
            .style(palette.muted)
            .alignment(Alignment::Center);
        frame.render_widget(description, chunks[1]);

        let mut next = 2;
        match self.mode {
            GameMode::Random => {
                self.render_difficulty(frame, chunks[next], palette);
                next += 1;
            }
            GameMode::Topic => {
                let block = self.field_block(Field::Input, "Tópico".to_string(), palette);
                frame.render_widget(
                    Paragraph::new(self.input.as_str()).style(palette.base).block(block),
                    chunks[next],
                );
                self.render_difficulty(frame, chunks[next + 1], palette);
                next += 2;
            }
            GameMode::Manual => {
                let masked: String = self.input.chars().map(|_| '•').collect();
                let block = self.field_block(Field::Input, "Palavra secreta".to_string(), palette);
                frame.render_widget(
                    Paragraph::new(masked).style(palette.base).block(block),
                    chunks[next],
                );
                next += 1;
                for (i, hint) in self.hints.iter().enumerate() {
                    let block = self.field_block(Field::Hint(i), format!("Dica {}", i + 1), palette);
                    frame.render_widget(
                        Paragraph::new(hint.as_str()).style(palette.base).block(block),
                        chunks[next],
                    );
                    next += 1;
                }
            }
        }

        if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(error.as_str())
                    .style(palette.bad)
                    .wrap(Wrap { trim: true })
                    .alignment(Alignment::Center),
                chunks[next],
            );
        }

        let help = match self.mode {
            GameMode::Manual => {
                "Tab: Próximo campo | Ctrl+N: Nova dica | Ctrl+D: Remover dica | Enter: Iniciar | Esc: Voltar"
            }
            GameMode::Random | GameMode::Topic => "Tab: Próximo campo | ←/→: Dificuldade | Enter: Iniciar | Esc: Voltar",
        };
        frame.render_widget(
            Paragraph::new(help)
                .style(palette.muted)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            chunks[next + 1],
        );
    }

    #[instrument(skip(self, key, _session))]
    fn handle_key(&mut self, key: KeyEvent, _session: &Session) -> ScreenTransition {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => ScreenTransition::BackToHome,
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => {
                self.move_focus(true);
                ScreenTransition::Stay
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_focus(false);
                ScreenTransition::Stay
            }
            KeyCode::Left if self.focus == Field::Difficulty => {
                self.difficulty = self.difficulty.previous();
                ScreenTransition::Stay
            }
            KeyCode::Right if self.focus == Field::Difficulty => {
                self.difficulty = self.difficulty.next();
                ScreenTransition::Stay
            }
            KeyCode::Char('n') if ctrl => {
                self.add_hint();
                ScreenTransition::Stay
            }
            KeyCode::Char('d') if ctrl => {
                self.remove_hint();
                ScreenTransition::Stay
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(text) = self.focused_text() {
                    text.push(c);
                    self.error = None;
                }
                ScreenTransition::Stay
            }
            KeyCode::Backspace => {
                if let Some(text) = self.focused_text() {
                    text.pop();
                }
                ScreenTransition::Stay
            }
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut SetupScreen, text: &str, session: &Session) {
        for c in text.chars() {
            screen.handle_key(press(KeyCode::Char(c)), session);
        }
    }

    #[test]
    fn test_random_mode_starts_without_input() {
        let mut screen = SetupScreen::new(GameMode::Random);
        let session = Session::new();
        screen.handle_key(press(KeyCode::Right), &session);
        assert_eq!(
            screen.handle_key(press(KeyCode::Enter), &session),
            ScreenTransition::StartAi {
                topic: None,
                difficulty: Difficulty::Hard
            }
        );
    }

    #[test]
    fn test_topic_mode_blocks_empty_topic() {
        let mut screen = SetupScreen::new(GameMode::Topic);
        let session = Session::new();
        type_text(&mut screen, "  ", &session);
        assert_eq!(screen.handle_key(press(KeyCode::Enter), &session), ScreenTransition::Stay);
        assert!(screen.error.is_some());

        type_text(&mut screen, "Roma", &session);
        assert_eq!(
            screen.handle_key(press(KeyCode::Enter), &session),
            ScreenTransition::StartAi {
                topic: Some("  Roma".to_string()),
                difficulty: Difficulty::Medium
            }
        );
    }

    #[test]
    fn test_manual_mode_collects_word_and_hints() {
        let mut screen = SetupScreen::new(GameMode::Manual);
        let session = Session::new();
        type_text(&mut screen, "café", &session);
        screen.handle_key(press(KeyCode::Tab), &session);
        type_text(&mut screen, "Bebida", &session);
        let transition = screen.handle_key(press(KeyCode::Enter), &session);
        assert_eq!(
            transition,
            ScreenTransition::StartManual {
                word: "café".to_string(),
                hints: vec!["Bebida".to_string(), String::new(), String::new()],
            }
        );
    }

    #[test]
    fn test_hint_fields_can_be_removed_and_added_back() {
        let mut screen = SetupScreen::new(GameMode::Manual);
        let session = Session::new();
        screen.handle_key(press(KeyCode::Tab), &session);
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        screen.handle_key(ctrl_d, &session);
        assert_eq!(screen.hints.len(), MAX_HINTS - 1);
        let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        screen.handle_key(ctrl_n, &session);
        screen.handle_key(ctrl_n, &session);
        assert_eq!(screen.hints.len(), MAX_HINTS);
    }
}
