//! Home screen: pick a game mode.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use crate::games::hangman::{GameMode, Session};
use crate::tui::palette::Palette;
use crate::tui::screen::{Screen, ScreenTransition, ViewContext};

/// State for the home screen.
#[derive(Debug)]
pub struct HomeScreen {
    modes: Vec<GameMode>,
    list_state: ListState,
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeScreen {
    /// Creates the home screen with the first mode selected.
    #[instrument]
    pub fn new() -> Self {
        debug!("Initializing HomeScreen");
        let mut state = ListState::default();
        state.select(Some(0));
        Self {
            modes: GameMode::iter().collect(),
            list_state: state,
        }
    }

    fn select_previous(&mut self) {
        let count = self.modes.len();
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.list_state.select(Some(i));
    }

    fn select_next(&mut self) {
        let count = self.modes.len();
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Returns the highlighted mode.
    pub fn selected_mode(&self) -> GameMode {
        let idx = self.list_state.selected().unwrap_or(0);
        self.modes[idx.min(self.modes.len() - 1)]
    }
}

impl Screen for HomeScreen {
    #[instrument(skip_all)]
    fn render(&self, frame: &mut Frame, ctx: ViewContext<'_>) {
        let palette = Palette::for_theme(ctx.settings.theme);
        let area = frame.area();
        frame.render_widget(Block::default().style(palette.base), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(4),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("FORCA - Jogo da Forca")
            .style(palette.accent)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = self
            .modes
            .iter()
            .enumerate()
            .map(|(i, mode)| ListItem::new(format!("{}. {}", i + 1, mode.label())))
            .collect();
        let menu = List::new(items)
            .style(palette.base)
            .block(Block::default().borders(Borders::ALL).title("Modos"))
            .highlight_style(palette.accent)
            .highlight_symbol("> ");
        let mut list_state = self.list_state;
        frame.render_stateful_widget(menu, chunks[1], &mut list_state);

        let description = Paragraph::new(self.selected_mode().description())
            .style(palette.muted)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(description, chunks[2]);

        let help = Paragraph::new(format!(
            "↑↓: Navegar | Enter: Escolher | o: Opções | F2: Tema ({}) | F3: Desempenho | q: Sair",
            ctx.settings.theme.label()
        ))
        .style(palette.muted)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, _session))]
    fn handle_key(&mut self, key: KeyEvent, _session: &Session) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.select_previous();
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.select_next();
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let mode = self.selected_mode();
                info!(mode = ?mode, "Mode chosen");
                ScreenTransition::SelectMode(mode)
            }
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                match self.modes.get(idx) {
                    Some(mode) => ScreenTransition::SelectMode(*mode),
                    None => ScreenTransition::Stay,
                }
            }
            KeyCode::Char('o') | KeyCode::Char('O') | KeyCode::Tab => ScreenTransition::OpenOptions,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
