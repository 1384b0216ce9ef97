//! ATM area screen
//!
//! Withdraw, deposit, balance check, and mini-statement, driven by
//! one flow controller. Confirmed transactions pass through the
//! synthetic processing delay before the receipt appears.

use std::time::Duration;

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Row, Table},
    Frame,
};
use tokio::sync::mpsc;

use crate::app::event::AppEvent;
use crate::bank::account::Account;
use crate::config::KioskConfig;
use crate::flow::{FlowController, ScreenFlow};
use crate::models::{TransactionReceipt, TxKind};
use crate::util::money::{format_balance, parse_amount, with_currency};

/// Screens of the ATM flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtmScreen {
    Main,
    Withdraw,
    Deposit,
    CheckBalance,
    MiniStatement,
}

impl ScreenFlow for AtmScreen {
    fn start() -> Self {
        Self::Main
    }

    fn transitions(&self) -> &'static [Self] {
        match self {
            Self::Main => &[
                Self::Withdraw,
                Self::Deposit,
                Self::CheckBalance,
                Self::MiniStatement,
            ],
            // Every transaction screen returns to the menu explicitly
            Self::Withdraw | Self::Deposit | Self::CheckBalance | Self::MiniStatement => {
                &[Self::Main]
            }
        }
    }
}

/// Transient ATM inputs, cleared on return to the main menu
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtmDraft {
    /// Keypad amount entry, digits only
    pub amount: String,
    /// Whether the receipt for the finished transaction is showing
    pub receipt: bool,
}

/// Keypad entry limit, matching the physical ATM's six digits
const MAX_AMOUNT_DIGITS: usize = 6;

const MENU: [(AtmScreen, &str); 4] = [
    (AtmScreen::Withdraw, "Withdraw Cash"),
    (AtmScreen::Deposit, "Deposit Cash"),
    (AtmScreen::CheckBalance, "Check Balance"),
    (AtmScreen::MiniStatement, "Mini Statement"),
];

/// ATM kiosk component
pub struct AtmArea {
    flow: FlowController<AtmScreen, AtmDraft>,
    account: Account,
    currency: String,
    card_mask: String,
    transaction_delay: Duration,
    balance_delay: Duration,
    selected_index: usize,
    list_state: ListState,
}

impl AtmArea {
    /// Create the ATM kiosk with the configured demo account
    pub fn new(config: &KioskConfig) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            flow: FlowController::new(),
            account: Account::with_demo_statement(config.opening_balance, &config.currency),
            currency: config.currency.clone(),
            card_mask: config.card_mask.clone(),
            transaction_delay: config.transaction_delay(),
            balance_delay: config.balance_delay(),
            selected_index: 0,
            list_state,
        }
    }

    /// Get the active ATM screen
    pub fn current_screen(&self) -> AtmScreen {
        self.flow.current_screen()
    }

    /// Whether a processing delay is showing
    pub fn is_processing(&self) -> bool {
        self.flow.is_processing()
    }

    /// Current keypad entry
    pub fn amount(&self) -> &str {
        &self.flow.draft().amount
    }

    /// Whether the receipt panel is showing
    pub fn has_receipt(&self) -> bool {
        self.flow.draft().receipt
    }

    /// Current account balance
    pub fn balance(&self) -> f64 {
        self.account.balance()
    }

    /// Move the menu selection up
    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        } else {
            self.selected_index = MENU.len() - 1;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Move the menu selection down
    pub fn select_next(&mut self) {
        if self.selected_index < MENU.len() - 1 {
            self.selected_index += 1;
        } else {
            self.selected_index = 0;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Enter the selected transaction screen
    ///
    /// Balance checks start their retrieval delay immediately.
    pub fn activate_selection(&mut self, tx: &mpsc::Sender<AppEvent>) {
        if self.flow.current_screen() != AtmScreen::Main {
            return;
        }

        let (target, _) = MENU[self.selected_index];
        self.flow.go_to(target);

        if target == AtmScreen::CheckBalance {
            self.flow
                .begin_processing(self.balance_delay, tx.clone(), AppEvent::AtmBalanceReady);
        }
    }

    /// Jump straight to a transaction screen
    pub fn go_to(&mut self, target: AtmScreen) {
        self.flow.go_to(target);
    }

    /// Append a keypad digit to the amount entry
    pub fn push_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() || self.flow.is_processing() || self.flow.draft().receipt {
            return;
        }

        let draft = self.flow.draft_mut();
        if draft.amount.len() < MAX_AMOUNT_DIGITS {
            draft.amount.push(digit);
        }
    }

    /// Delete the last keypad digit
    pub fn backspace(&mut self) {
        if !self.flow.is_processing() && !self.flow.draft().receipt {
            self.flow.draft_mut().amount.pop();
        }
    }

    /// Clear the keypad entry
    pub fn clear_amount(&mut self) {
        if !self.flow.is_processing() && !self.flow.draft().receipt {
            self.flow.draft_mut().amount.clear();
        }
    }

    /// Whether the entered amount can be confirmed
    pub fn can_confirm(&self) -> bool {
        matches!(
            self.flow.current_screen(),
            AtmScreen::Withdraw | AtmScreen::Deposit
        ) && !self.flow.is_processing()
            && !self.flow.draft().receipt
            && parse_amount(&self.flow.draft().amount) > 0.0
    }

    /// Confirm the entered amount and start the processing delay
    pub fn confirm(&mut self, tx: &mpsc::Sender<AppEvent>) {
        if self.can_confirm() {
            self.flow.begin_processing(
                self.transaction_delay,
                tx.clone(),
                AppEvent::AtmTransactionDone,
            );
        }
    }

    /// Apply the finished transaction and expose its receipt
    ///
    /// Stale completions (after a reset or screen change) are dropped.
    pub fn complete_transaction(&mut self, now: DateTime<Utc>) -> Option<TransactionReceipt> {
        if !self.flow.finish_processing() {
            return None;
        }

        let kind = match self.flow.current_screen() {
            AtmScreen::Withdraw => TxKind::Withdraw,
            AtmScreen::Deposit => TxKind::Deposit,
            _ => return None,
        };

        let amount = parse_amount(&self.flow.draft().amount);
        let balance_after = match kind {
            TxKind::Withdraw => self.account.withdraw(amount),
            TxKind::Deposit => self.account.deposit(amount),
        };

        self.flow.draft_mut().receipt = true;
        Some(TransactionReceipt::new(now, kind, amount, balance_after))
    }

    /// Mark the balance retrieval as finished
    pub fn complete_balance(&mut self) -> bool {
        self.flow.finish_processing()
    }

    /// Return to the main menu, clearing amount and receipt
    pub fn back_to_main(&mut self) {
        self.flow.cancel_processing();
        self.flow.go_to(AtmScreen::Main);
    }

    /// Cancel any pending delay and restart the flow
    pub fn reset(&mut self) {
        self.flow.reset();
    }

    /// Handle a key event; returns true when the user leaves the kiosk
    pub fn handle_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<AppEvent>) -> bool {
        match self.flow.current_screen() {
            AtmScreen::Main => match key.code {
                KeyCode::Up => self.select_previous(),
                KeyCode::Down => self.select_next(),
                KeyCode::Enter => self.activate_selection(tx),
                KeyCode::Esc | KeyCode::Char('q') => return true,
                _ => {}
            },
            AtmScreen::Withdraw | AtmScreen::Deposit => match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() => self.push_digit(c),
                KeyCode::Char('c') | KeyCode::Char('C') => self.clear_amount(),
                KeyCode::Backspace => self.backspace(),
                KeyCode::Enter => {
                    if self.has_receipt() {
                        self.back_to_main();
                    } else {
                        self.confirm(tx);
                    }
                }
                KeyCode::Esc => self.back_to_main(),
                _ => {}
            },
            AtmScreen::CheckBalance | AtmScreen::MiniStatement => match key.code {
                KeyCode::Enter | KeyCode::Esc => self.back_to_main(),
                _ => {}
            },
        }
        false
    }

    /// Render the ATM kiosk
    pub fn render(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(12),   // Screen content
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_status_bar(f, chunks[0]);

        match self.flow.current_screen() {
            AtmScreen::Main => self.render_main(f, chunks[1]),
            AtmScreen::Withdraw => self.render_amount_entry(f, chunks[1], "WITHDRAW CASH"),
            AtmScreen::Deposit => self.render_amount_entry(f, chunks[1], "DEPOSIT CASH"),
            AtmScreen::CheckBalance => self.render_balance(f, chunks[1]),
            AtmScreen::MiniStatement => self.render_statement(f, chunks[1]),
        }

        self.render_help(f, chunks[2]);
    }

    fn render_status_bar(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let now = chrono::Local::now().format("%a, %b %e  %H:%M:%S");
        let bar = Paragraph::new(format!("Card: {}    {}", self.card_mask, now))
            .style(Style::default().fg(Color::Blue))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("FIRST ATLANTIC ATM"),
            );
        f.render_widget(bar, area);
    }

    fn render_main(&mut self, f: &mut Frame, area: ratatui::layout::Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(6)])
            .split(area);

        let prompt = Paragraph::new("Please select a transaction")
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(prompt, chunks[0]);

        let items: Vec<ListItem> = MENU
            .iter()
            .map(|(_, label)| ListItem::new(*label))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Transactions"))
            .highlight_style(Style::default().bg(Color::Blue).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, chunks[1], &mut self.list_state);
    }

    fn render_amount_entry(&self, f: &mut Frame, area: ratatui::layout::Rect, title: &str) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Amount display
                Constraint::Min(5),    // Status panel
            ])
            .split(area);

        let amount = if self.amount().is_empty() {
            "0"
        } else {
            self.amount()
        };
        let display = Paragraph::new(with_currency(&self.currency, amount))
            .style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(title.to_string()));
        f.render_widget(display, chunks[0]);

        let (lines, color) = if self.is_processing() {
            (
                vec![
                    Line::from(""),
                    Line::from("Processing your transaction..."),
                    Line::from("Please wait."),
                ],
                Color::Yellow,
            )
        } else if self.has_receipt() {
            (
                vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        "--- TRANSACTION RECEIPT ---",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(format!(
                        "Amount: {}",
                        with_currency(&self.currency, amount)
                    )),
                    Line::from(format!(
                        "Available Balance: {}",
                        with_currency(&self.currency, &format_balance(self.balance()))
                    )),
                    Line::from(""),
                    Line::from("Press Enter to return to the main menu."),
                ],
                Color::Green,
            )
        } else {
            (
                vec![
                    Line::from(""),
                    Line::from("Enter an amount with the number keys."),
                    Line::from("Enter confirms, C clears, Esc cancels."),
                ],
                Color::White,
            )
        };

        let panel = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        f.render_widget(panel, chunks[1]);
    }

    fn render_balance(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let lines = if self.is_processing() {
            vec![Line::from(""), Line::from("Retrieving your balance...")]
        } else {
            vec![
                Line::from(""),
                Line::from("Available Balance:"),
                Line::from(Span::styled(
                    with_currency(&self.currency, &format_balance(self.balance())),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from("Press Enter to return to the main menu."),
            ]
        };

        let panel = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .title("ACCOUNT BALANCE"),
        );
        f.render_widget(panel, area);
    }

    fn render_statement(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let rows: Vec<Row> = self
            .account
            .statement()
            .iter()
            .map(|entry| {
                let amount_style = if entry.is_credit() {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Red)
                };
                Row::new(vec![
                    Span::raw(entry.date.clone()),
                    Span::raw(entry.description.clone()),
                    Span::styled(entry.amount.clone(), amount_style),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Min(20),
                Constraint::Length(14),
            ],
        )
        .header(
            Row::new(vec!["Date", "Description", "Amount"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("RECENT TRANSACTIONS"),
        )
        .column_spacing(2);

        f.render_widget(table, area);
    }

    fn render_help(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let help = Paragraph::new("↑↓ Navigate  Enter Select  Esc Back")
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        f.render_widget(help, area);
    }
}
