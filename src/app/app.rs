//! Main application controller
//!
//! Owns the TUI, the kiosk screens, and the event channel that
//! processing timers complete into. The loop drains completions,
//! draws the active kiosk, and routes keys to it.

use std::io;

use chrono::Utc;
use crossterm::event::KeyCode;
use tokio::sync::mpsc;

use crate::{
    app::{
        event::AppEvent,
        screens::{AtmArea, HomeScreen, LoanArea, SupportDesk, TransferGame},
        state::{AppState, NavigationAction, StateManager},
        tui::Tui,
    },
    config::{persistence::HistoryStore, KioskConfig},
    models::HistoryEntry,
    Result,
};

/// TUI application controller
pub struct App {
    /// Terminal UI handler
    tui: Tui,
    /// Top-level navigation state
    state_manager: StateManager,
    /// Persisted session history
    history: HistoryStore,
    /// Kiosk screen components
    home_screen: HomeScreen,
    atm_area: AtmArea,
    loan_area: LoanArea,
    support_desk: SupportDesk,
    transfer_game: TransferGame,
    /// Completion event channel
    event_tx: mpsc::Sender<AppEvent>,
    event_rx: mpsc::Receiver<AppEvent>,
}

impl App {
    /// Create a new application instance from the loaded config
    pub fn new(config: KioskConfig) -> Result<Self> {
        config.validate()?;
        let (event_tx, event_rx) = mpsc::channel(100);

        Ok(Self {
            tui: Tui::new()?,
            state_manager: StateManager::new(),
            history: HistoryStore::new()?,
            home_screen: HomeScreen::new(),
            atm_area: AtmArea::new(&config),
            loan_area: LoanArea::new(&config),
            support_desk: SupportDesk::new(&config),
            transfer_game: TransferGame::new(&config),
            event_tx,
            event_rx,
        })
    }

    /// Initialize the terminal
    pub fn init(&mut self) -> Result<()> {
        self.tui
            .init()
            .map_err(|e| crate::FabError::TuiError(format!("Failed to initialize terminal: {}", e)))
    }

    /// Restore the terminal
    pub fn restore(&mut self) -> Result<()> {
        self.tui
            .restore()
            .map_err(|e| crate::FabError::TuiError(format!("Failed to restore terminal: {}", e)))
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        while !self.state_manager.should_quit() {
            while let Ok(event) = self.event_rx.try_recv() {
                self.apply_event(event);
            }
            self.draw()?;
            self.handle_input()?;
        }
        Ok(())
    }

    /// Draw the active kiosk
    fn draw(&mut self) -> io::Result<()> {
        let state = self.state_manager.current_state();
        let home_screen = &mut self.home_screen;
        let atm_area = &mut self.atm_area;
        let loan_area = &mut self.loan_area;
        let support_desk = &mut self.support_desk;
        let transfer_game = &mut self.transfer_game;

        self.tui.draw(|f| match state {
            AppState::Home => home_screen.render(f),
            AppState::Atm => atm_area.render(f),
            AppState::Loan => loan_area.render(f),
            AppState::Support => support_desk.render(f),
            AppState::Game => transfer_game.render(f),
        })
    }

    /// Apply a timer completion to its kiosk
    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::AtmTransactionDone => {
                if let Some(receipt) = self.atm_area.complete_transaction(Utc::now()) {
                    self.record(HistoryEntry::Transaction(receipt));
                }
            }
            AppEvent::AtmBalanceReady => {
                self.atm_area.complete_balance();
            }
            AppEvent::LoanDecided(status) => {
                if let Some(application) = self.loan_area.complete_decision(status, Utc::now()) {
                    self.record(HistoryEntry::Loan(application));
                }
            }
            AppEvent::ChatReply(text) => self.support_desk.complete_chat_reply(text),
            AppEvent::QueueAssigned(slot) => self.support_desk.complete_queue(slot),
        }
    }

    /// Persist a finished record; failures only surface as a notice
    fn record(&mut self, entry: HistoryEntry) {
        if let Err(err) = self.history.append_entry(entry) {
            self.home_screen.set_notice(err.user_message());
        }
    }

    /// Route the next key press to the active kiosk
    fn handle_input(&mut self) -> Result<()> {
        let key = match self.tui.next_key()? {
            Some(key) => key,
            None => return Ok(()),
        };

        if StateManager::key_to_navigation(key) == NavigationAction::Quit {
            self.state_manager.quit();
            return Ok(());
        }

        match self.state_manager.current_state() {
            AppState::Home => self.handle_home_key(key.code),
            AppState::Atm => {
                if self.atm_area.handle_key(key, &self.event_tx) {
                    self.atm_area.reset();
                    self.state_manager.transition_to(AppState::Home);
                }
            }
            AppState::Loan => {
                if self.loan_area.handle_key(key, &self.event_tx) {
                    self.loan_area.reset();
                    self.state_manager.transition_to(AppState::Home);
                }
            }
            AppState::Support => {
                if self.support_desk.handle_key(key, &self.event_tx) {
                    self.support_desk.reset();
                    self.state_manager.transition_to(AppState::Home);
                }
            }
            AppState::Game => {
                if self.transfer_game.handle_key(key) {
                    self.transfer_game.reset();
                    self.state_manager.transition_to(AppState::Home);
                }
            }
        }

        Ok(())
    }

    fn handle_home_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.home_screen.select_previous(),
            KeyCode::Down => self.home_screen.select_next(),
            KeyCode::Enter => match self.home_screen.selected().target() {
                Some(target) => self.state_manager.transition_to(target),
                None => self.state_manager.quit(),
            },
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.state_manager.quit(),
            _ => {}
        }
    }
}
