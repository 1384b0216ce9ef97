//! Application state management
//!
//! Handles top-level navigation between the kiosks and keyboard
//! event translation for the TUI application.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Top-level application states, one per kiosk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Kiosk selection menu
    Home,
    /// ATM area with withdraw/deposit/balance/statement
    Atm,
    /// Loan services portal
    Loan,
    /// Customer-service desk
    Support,
    /// Guided transfer mini-game
    Game,
}

impl Default for AppState {
    fn default() -> Self {
        Self::Home
    }
}

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move selection up (arrow up)
    Up,
    /// Move selection down (arrow down)
    Down,
    /// Move selection left (arrow left)
    Left,
    /// Move selection right (arrow right)
    Right,
    /// Confirm selection (Enter)
    Select,
    /// Go back/cancel (Esc)
    Back,
    /// Next tab (Tab)
    NextTab,
    /// Previous tab (Shift+Tab)
    PrevTab,
    /// Quit application (Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Top-level state manager
///
/// Screens inside each kiosk are owned by that kiosk's flow
/// controller; this only tracks which kiosk is active.
#[derive(Debug, Default)]
pub struct StateManager {
    current_state: AppState,
    should_quit: bool,
}

impl StateManager {
    /// Create a new state manager starting at the kiosk menu
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current application state
    pub fn current_state(&self) -> AppState {
        self.current_state
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Set the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Switch to a kiosk or back to the menu
    pub fn transition_to(&mut self, new_state: AppState) {
        self.current_state = new_state;
    }

    /// Convert a keyboard event to a navigation action
    ///
    /// Kiosk screens with free text entry receive the raw key event
    /// instead, so plain letters never map to actions here.
    pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                NavigationAction::Quit
            }

            KeyCode::Up => NavigationAction::Up,
            KeyCode::Down => NavigationAction::Down,
            KeyCode::Left => NavigationAction::Left,
            KeyCode::Right => NavigationAction::Right,

            KeyCode::Enter => NavigationAction::Select,
            KeyCode::Esc => NavigationAction::Back,

            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    NavigationAction::PrevTab
                } else {
                    NavigationAction::NextTab
                }
            }
            KeyCode::BackTab => NavigationAction::PrevTab,

            _ => NavigationAction::None,
        }
    }
}
