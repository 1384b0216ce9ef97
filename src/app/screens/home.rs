//! Kiosk selection screen
//!
//! The lobby menu: pick the ATM, the loan portal, the service desk,
//! or the transfer mini-game.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::state::AppState;

/// Selectable lobby entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeEntry {
    Atm,
    Loan,
    Support,
    Game,
    Exit,
}

impl HomeEntry {
    fn all() -> [Self; 5] {
        [Self::Atm, Self::Loan, Self::Support, Self::Game, Self::Exit]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Atm => "ATM Area",
            Self::Loan => "Loan Center",
            Self::Support => "Customer Service",
            Self::Game => "Transfer Mini-Game",
            Self::Exit => "Leave the Bank",
        }
    }

    /// Kiosk this entry leads to, if any
    pub fn target(&self) -> Option<AppState> {
        match self {
            Self::Atm => Some(AppState::Atm),
            Self::Loan => Some(AppState::Loan),
            Self::Support => Some(AppState::Support),
            Self::Game => Some(AppState::Game),
            Self::Exit => None,
        }
    }
}

/// Lobby menu component
#[derive(Debug)]
pub struct HomeScreen {
    entries: [HomeEntry; 5],
    selected_index: usize,
    list_state: ListState,
    notice: Option<String>,
}

impl HomeScreen {
    /// Create a new lobby menu
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            entries: HomeEntry::all(),
            selected_index: 0,
            list_state,
            notice: None,
        }
    }

    /// Get the currently highlighted entry
    pub fn selected(&self) -> HomeEntry {
        self.entries[self.selected_index]
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        } else {
            self.selected_index = self.entries.len() - 1;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if self.selected_index < self.entries.len() - 1 {
            self.selected_index += 1;
        } else {
            self.selected_index = 0;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Show a one-line notice under the menu
    pub fn set_notice(&mut self, notice: String) {
        self.notice = Some(notice);
    }

    /// Render the lobby menu
    pub fn render(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Title and subtitle
                Constraint::Min(9),    // Menu
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0]);
        self.render_menu(f, chunks[1]);
        self.render_help(f, chunks[2]);
    }

    fn render_title(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let title_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(2)])
            .split(area);

        let title = Paragraph::new("FIRST ATLANTIC BANK")
            .style(
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta)),
            );
        f.render_widget(title, title_chunks[0]);

        let subtitle = Paragraph::new("Welcome to the digital lobby")
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(subtitle, title_chunks[1]);
    }

    fn render_menu(&mut self, f: &mut Frame, area: ratatui::layout::Rect) {
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| ListItem::new(entry.label()))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Where would you like to go?"),
            )
            .highlight_style(Style::default().bg(Color::Magenta).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_help(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let line = if let Some(notice) = &self.notice {
            Line::from(Span::styled(
                notice.clone(),
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::from(vec![
                Span::styled(
                    "↑↓",
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" Navigate  "),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" Select  "),
                Span::styled(
                    "Q",
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" Quit"),
            ])
        };

        let help = Paragraph::new(vec![line])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );

        f.render_widget(help, area);
    }
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_screen_creation() {
        let screen = HomeScreen::new();
        assert_eq!(screen.selected(), HomeEntry::Atm);
    }

    #[test]
    fn test_menu_navigation_wraps() {
        let mut screen = HomeScreen::new();

        screen.select_previous();
        assert_eq!(screen.selected(), HomeEntry::Exit);

        screen.select_next();
        assert_eq!(screen.selected(), HomeEntry::Atm);

        screen.select_next();
        assert_eq!(screen.selected(), HomeEntry::Loan);
    }

    #[test]
    fn test_entry_targets() {
        assert_eq!(HomeEntry::Atm.target(), Some(AppState::Atm));
        assert_eq!(HomeEntry::Exit.target(), None);
    }
}
