//! Options screen: settings toggles, how-to-play text and the game exit.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use tracing::{debug, info, instrument};

use crate::games::hangman::{MAX_HINTS, MAX_INCORRECT, Session};
use crate::settings::AppSettings;
use crate::tui::palette::Palette;
use crate::tui::screen::{Screen, ScreenTransition, ViewContext};

/// Tab shown by the options screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsTab {
    /// Theme and performance toggles.
    Settings,
    /// Rules and modes.
    Tutorial,
}

impl OptionsTab {
    fn label(self) -> &'static str {
        match self {
            Self::Settings => "Ajustes",
            Self::Tutorial => "Como Jogar",
        }
    }

    fn toggle(self) -> Self {
        match self {
            Self::Settings => Self::Tutorial,
            Self::Tutorial => Self::Settings,
        }
    }
}

/// Entry of the settings tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionItem {
    Theme,
    Performance,
    ExitGame,
}

impl OptionItem {
    fn label(self, settings: &AppSettings) -> String {
        match self {
            Self::Theme => format!("Tema              [ {} ]", settings.theme.label()),
            Self::Performance => format!(
                "Modo desempenho   [ {} ]",
                if settings.low_performance { "Ligado" } else { "Desligado" }
            ),
            Self::ExitGame => "Sair da Partida".to_string(),
        }
    }
}

/// State for the options screen.
#[derive(Debug)]
pub struct OptionsScreen {
    tab: OptionsTab,
    in_game: bool,
    list_state: ListState,
}

impl OptionsScreen {
    /// Creates the options screen; `in_game` adds the exit entry.
    #[instrument]
    pub fn new(in_game: bool) -> Self {
        debug!("Initializing OptionsScreen");
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            tab: OptionsTab::Settings,
            in_game,
            list_state,
        }
    }

    /// Tab on display.
    pub fn tab(&self) -> OptionsTab {
        self.tab
    }

    fn items(&self) -> Vec<OptionItem> {
        let mut items = vec![OptionItem::Theme, OptionItem::Performance];
        if self.in_game {
            items.push(OptionItem::ExitGame);
        }
        items
    }

    fn select_previous(&mut self) {
        let count = self.items().len();
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.list_state.select(Some(i));
    }

    fn select_next(&mut self) {
        let count = self.items().len();
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn activate(&self) -> ScreenTransition {
        let items = self.items();
        let idx = self.list_state.selected().unwrap_or(0).min(items.len() - 1);
        info!(item = ?items[idx], "Option activated");
        match items[idx] {
            OptionItem::Theme => ScreenTransition::ToggleTheme,
            OptionItem::Performance => ScreenTransition::TogglePerformance,
            OptionItem::ExitGame => ScreenTransition::ExitGame,
        }
    }

    fn tutorial_lines(palette: Palette) -> Vec<Line<'static>> {
        let heading = |text: &'static str| Line::styled(text, palette.accent);
        let mode = |name: &'static str, text: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {}: ", name), palette.good),
                Span::styled(text, palette.base),
            ])
        };
        vec![
            heading("OBJETIVO"),
            Line::styled(
                format!(
                    "Descubra a palavra secreta antes que o desenho da forca seja completado. Você tem {} chances.",
                    MAX_INCORRECT
                ),
                palette.base,
            ),
            Line::default(),
            heading("MODOS DE JOGO"),
            mode("Aleatório", "A IA escolhe o tema e a palavra."),
            mode("Tópico", "Você escolhe o tema, a IA gera a palavra."),
            mode("Versus", "Crie um desafio personalizado para um amigo (1x1)."),
            Line::default(),
            heading("DICAS"),
            Line::styled(
                format!(
                    "No modo IA, você pode revelar até {} dicas progressivas (F1). No modo Versus, depende do criador do jogo!",
                    MAX_HINTS
                ),
                palette.base,
            ),
        ]
    }
}

impl Screen for OptionsScreen {
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
                Constraint::Length(3),
            ])
            .split(area);

        let tabs: Vec<Span> = [OptionsTab::Settings, OptionsTab::Tutorial]
            .into_iter()
            .map(|tab| {
                let style = if tab == self.tab { palette.accent } else { palette.muted };
                Span::styled(format!("  {}  ", tab.label()), style)
            })
            .collect();
        frame.render_widget(
            Paragraph::new(Line::from(tabs))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Opções")),
            chunks[0],
        );

        match self.tab {
            OptionsTab::Settings => {
                let items: Vec<ListItem> = self
                    .items()
                    .into_iter()
                    .map(|item| {
                        let style = match item {
                            OptionItem::ExitGame => palette.bad,
                            OptionItem::Theme | OptionItem::Performance => palette.base,
                        };
                        ListItem::new(item.label(ctx.settings)).style(style)
                    })
                    .collect();
                let list = List::new(items)
                    .style(palette.base)
                    .block(Block::default().borders(Borders::ALL))
                    .highlight_style(palette.accent)
                    .highlight_symbol("> ");
                let mut list_state = self.list_state;
                frame.render_stateful_widget(list, chunks[1], &mut list_state);
            }
            OptionsTab::Tutorial => {
                frame.render_widget(
                    Paragraph::new(Self::tutorial_lines(palette))
                        .wrap(Wrap { trim: true })
                        .block(Block::default().borders(Borders::ALL)),
                    chunks[1],
                );
            }
        }

        let help = match self.tab {
            OptionsTab::Settings => "←→: Aba | ↑↓: Navegar | Enter: Alternar | Esc: Fechar",
            OptionsTab::Tutorial => "←→: Aba | Esc: Fechar",
        };
        frame.render_widget(
            Paragraph::new(help)
                .style(palette.muted)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            chunks[2],
        );
    }

    #[instrument(skip(self, key, _session))]
    fn handle_key(&mut self, key: KeyEvent, _session: &Session) -> ScreenTransition {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.tab = self.tab.toggle();
                ScreenTransition::Stay
            }
            KeyCode::Up if self.tab == OptionsTab::Settings => {
                self.select_previous();
                ScreenTransition::Stay
            }
            KeyCode::Down if self.tab == OptionsTab::Settings => {
                self.select_next();
                ScreenTransition::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') if self.tab == OptionsTab::Settings => self.activate(),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                info!("Leaving options screen");
                ScreenTransition::CloseOptions
            }
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_settings_entries_toggle() {
        let mut screen = OptionsScreen::new(false);
        let session = Session::new();
        assert_eq!(screen.handle_key(press(KeyCode::Enter), &session), ScreenTransition::ToggleTheme);
        screen.handle_key(press(KeyCode::Down), &session);
        assert_eq!(
            screen.handle_key(press(KeyCode::Enter), &session),
            ScreenTransition::TogglePerformance
        );
    }

    #[test]
    fn test_exit_entry_only_in_game() {
        let session = Session::new();
        let mut home = OptionsScreen::new(false);
        home.handle_key(press(KeyCode::Up), &session);
        assert_eq!(
            home.handle_key(press(KeyCode::Enter), &session),
            ScreenTransition::TogglePerformance
        );

        let mut game = OptionsScreen::new(true);
        game.handle_key(press(KeyCode::Up), &session);
        assert_eq!(game.handle_key(press(KeyCode::Enter), &session), ScreenTransition::ExitGame);
    }

    #[test]
    fn test_tutorial_tab_ignores_enter() {
        let mut screen = OptionsScreen::new(true);
        let session = Session::new();
        screen.handle_key(press(KeyCode::Right), &session);
        assert_eq!(screen.tab(), OptionsTab::Tutorial);
        assert_eq!(screen.handle_key(press(KeyCode::Enter), &session), ScreenTransition::Stay);
        assert_eq!(screen.handle_key(press(KeyCode::Esc), &session), ScreenTransition::CloseOptions);
    }

    #[test]
    fn test_labels_show_current_state() {
        let mut settings = AppSettings::new();
        assert!(OptionItem::Theme.label(&settings).contains("Escuro"));
        settings.toggle_performance();
        assert!(OptionItem::Performance.label(&settings).contains("Ligado"));
    }
}
