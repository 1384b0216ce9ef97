//! Guided transfer mini-game screen
//!
//! Six scripted levels walking through a mobile money transfer:
//! launch the app, pick the recipient, enter the amount, pick the
//! action, enter the PIN, celebrate. Wrong choices show a playful
//! alert and stay on the level.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::config::KioskConfig;
use crate::flow::{FlowController, ScreenFlow};
use crate::util::money::parse_amount;

/// Levels of the mini-game flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameLevel {
    Launch,
    Recipient,
    Amount,
    Action,
    Pin,
    Celebrate,
    Complete,
}

impl ScreenFlow for GameLevel {
    fn start() -> Self {
        Self::Launch
    }

    fn transitions(&self) -> &'static [Self] {
        match self {
            Self::Launch => &[Self::Recipient],
            Self::Recipient => &[Self::Amount],
            Self::Amount => &[Self::Action],
            Self::Action => &[Self::Pin],
            Self::Pin => &[Self::Celebrate],
            Self::Celebrate => &[Self::Complete],
            // Replay goes through reset()
            Self::Complete => &[],
        }
    }
}

/// Transient mini-game inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameDraft {
    /// Transfer amount entry, digits only
    pub amount: String,
    /// PIN entry
    pub pin: String,
    /// Current playful alert, if any
    pub alert: Option<String>,
}

/// Quick-fill amounts offered above the keypad
pub const PRESET_AMOUNTS: [u32; 3] = [100, 200, 500];

/// Sending more than this trips the fraud alert
const FRAUD_ALERT_LIMIT: f64 = 10_000.0;

/// Presets above this value also trip the alert
const PRESET_ALERT_LIMIT: u32 = 1_000;

const MAX_AMOUNT_KEYS: usize = 7;
const PIN_LENGTH: usize = 4;

struct Choice {
    label: &'static str,
    correct: bool,
    feedback: &'static str,
}

const RECIPIENTS: [Choice; 3] = [
    Choice {
        label: "Mom",
        correct: true,
        feedback: "",
    },
    Choice {
        label: "Friend",
        correct: false,
        feedback: "You don't owe your friend!",
    },
    Choice {
        label: "Business Partner",
        correct: false,
        feedback: "This isn't a business deal!",
    },
];

const ACTIONS: [Choice; 3] = [
    Choice {
        label: "Transfer",
        correct: true,
        feedback: "",
    },
    Choice {
        label: "Pay Bills",
        correct: false,
        feedback: "This isn't the time to pay bills!",
    },
    Choice {
        label: "Buy Airtime",
        correct: false,
        feedback: "You're not out of airtime yet!",
    },
];

/// Mini-game kiosk component
pub struct TransferGame {
    flow: FlowController<GameLevel, GameDraft>,
    demo_pin: String,
    cursor: usize,
    preset_index: usize,
}

impl TransferGame {
    /// Create the mini-game with the configured demo PIN
    pub fn new(config: &KioskConfig) -> Self {
        Self {
            flow: FlowController::new(),
            demo_pin: config.demo_pin.clone(),
            cursor: 0,
            preset_index: 0,
        }
    }

    /// Get the active level
    pub fn current_level(&self) -> GameLevel {
        self.flow.current_screen()
    }

    /// Read the form draft
    pub fn draft(&self) -> &GameDraft {
        self.flow.draft()
    }

    /// Current alert text, if any
    pub fn alert(&self) -> Option<&str> {
        self.flow.draft().alert.as_deref()
    }

    /// Tap the app icon on the first level
    pub fn launch(&mut self) {
        if self.flow.current_screen() == GameLevel::Launch {
            self.flow.go_to(GameLevel::Recipient);
        }
    }

    /// Move the choice cursor
    pub fn move_cursor(&mut self, forward: bool) {
        let count = 3;
        self.cursor = if forward {
            (self.cursor + 1) % count
        } else {
            (self.cursor + count - 1) % count
        };
    }

    /// Pick the recipient under the cursor
    pub fn choose_recipient(&mut self) {
        if self.flow.current_screen() != GameLevel::Recipient {
            return;
        }

        let choice = &RECIPIENTS[self.cursor];
        if choice.correct {
            self.flow.draft_mut().alert = None;
            self.cursor = 0;
            self.flow.go_to(GameLevel::Amount);
        } else {
            self.flow.draft_mut().alert = Some(choice.feedback.to_string());
        }
    }

    /// Append a keypad digit to the amount
    pub fn push_amount_digit(&mut self, digit: char) {
        if self.flow.current_screen() != GameLevel::Amount || !digit.is_ascii_digit() {
            return;
        }

        let draft = self.flow.draft_mut();
        if draft.amount.len() < MAX_AMOUNT_KEYS {
            draft.amount.push(digit);
        }
    }

    /// Clear the amount and any alert
    pub fn clear_amount(&mut self) {
        let draft = self.flow.draft_mut();
        draft.amount.clear();
        draft.alert = None;
    }

    /// Fill the amount from the next preset
    pub fn cycle_preset(&mut self) {
        if self.flow.current_screen() != GameLevel::Amount {
            return;
        }

        let preset = PRESET_AMOUNTS[self.preset_index];
        self.preset_index = (self.preset_index + 1) % PRESET_AMOUNTS.len();

        let draft = self.flow.draft_mut();
        draft.amount = preset.to_string();
        if preset > PRESET_ALERT_LIMIT {
            draft.alert = Some("Fraud Alert! You sure about sending that much?".to_string());
        }
    }

    /// Send the entered amount
    ///
    /// Amounts over the limit trip the fraud alert and stay here;
    /// zero or empty entries do nothing.
    pub fn send_amount(&mut self) {
        if self.flow.current_screen() != GameLevel::Amount {
            return;
        }

        let amount = parse_amount(&self.flow.draft().amount);
        if amount > FRAUD_ALERT_LIMIT {
            self.flow.draft_mut().alert =
                Some("Fraud Alert! You sure about sending that much?".to_string());
        } else if amount > 0.0 {
            self.flow.draft_mut().alert = None;
            self.cursor = 0;
            self.flow.go_to(GameLevel::Action);
        }
    }

    /// Pick the action under the cursor
    pub fn choose_action(&mut self) {
        if self.flow.current_screen() != GameLevel::Action {
            return;
        }

        let choice = &ACTIONS[self.cursor];
        if choice.correct {
            self.flow.draft_mut().alert = None;
            self.cursor = 0;
            self.flow.go_to(GameLevel::Pin);
        } else {
            self.flow.draft_mut().alert = Some(choice.feedback.to_string());
        }
    }

    /// Append a PIN digit
    pub fn push_pin_digit(&mut self, digit: char) {
        if self.flow.current_screen() != GameLevel::Pin || !digit.is_ascii_digit() {
            return;
        }

        let draft = self.flow.draft_mut();
        if draft.pin.len() < PIN_LENGTH {
            draft.pin.push(digit);
        }
    }

    /// Clear the PIN and any alert
    pub fn clear_pin(&mut self) {
        let draft = self.flow.draft_mut();
        draft.pin.clear();
        draft.alert = None;
    }

    /// Submit the PIN; a wrong code clears the entry
    pub fn submit_pin(&mut self) {
        if self.flow.current_screen() != GameLevel::Pin {
            return;
        }

        if self.flow.draft().pin == self.demo_pin {
            self.flow.draft_mut().alert = None;
            self.flow.go_to(GameLevel::Celebrate);
        } else {
            let draft = self.flow.draft_mut();
            draft.alert = Some("Oops! Try again".to_string());
            draft.pin.clear();
        }
    }

    /// Leave the celebration for the replay screen
    pub fn finish(&mut self) {
        if self.flow.current_screen() == GameLevel::Celebrate {
            self.flow.go_to(GameLevel::Complete);
        }
    }

    /// Start the game over from the first level
    pub fn replay(&mut self) {
        self.flow.reset();
        self.cursor = 0;
        self.preset_index = 0;
    }

    /// Restart the flow (alias used when leaving the kiosk)
    pub fn reset(&mut self) {
        self.replay();
    }

    /// Handle a key event; returns true when the user leaves the kiosk
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Esc {
            return true;
        }

        match self.flow.current_screen() {
            GameLevel::Launch => {
                if key.code == KeyCode::Enter {
                    self.launch();
                }
            }
            GameLevel::Recipient => match key.code {
                KeyCode::Left | KeyCode::Up => self.move_cursor(false),
                KeyCode::Right | KeyCode::Down => self.move_cursor(true),
                KeyCode::Enter => self.choose_recipient(),
                _ => {}
            },
            GameLevel::Amount => match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() => self.push_amount_digit(c),
                KeyCode::Char('c') | KeyCode::Char('C') => self.clear_amount(),
                KeyCode::Backspace => {
                    self.flow.draft_mut().amount.pop();
                }
                KeyCode::Tab => self.cycle_preset(),
                KeyCode::Enter => self.send_amount(),
                _ => {}
            },
            GameLevel::Action => match key.code {
                KeyCode::Left | KeyCode::Up => self.move_cursor(false),
                KeyCode::Right | KeyCode::Down => self.move_cursor(true),
                KeyCode::Enter => self.choose_action(),
                _ => {}
            },
            GameLevel::Pin => match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() => self.push_pin_digit(c),
                KeyCode::Char('c') | KeyCode::Char('C') => self.clear_pin(),
                KeyCode::Backspace => {
                    self.flow.draft_mut().pin.pop();
                }
                KeyCode::Enter => self.submit_pin(),
                _ => {}
            },
            GameLevel::Celebrate => {
                if key.code == KeyCode::Enter {
                    self.finish();
                }
            }
            GameLevel::Complete => {
                if key.code == KeyCode::Enter {
                    self.replay();
                }
            }
        }
        false
    }

    /// Render the mini-game
    pub fn render(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(10),   // Level content
                Constraint::Length(3), // Help text
            ])
            .split(size);

        let title = Paragraph::new("Experience the Power of Digital Banking")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        match self.flow.current_screen() {
            GameLevel::Launch => self.render_launch(f, chunks[1]),
            GameLevel::Recipient => self.render_choices(
                f,
                chunks[1],
                "Select who you want to send money to",
                &RECIPIENTS,
            ),
            GameLevel::Amount => self.render_amount(f, chunks[1]),
            GameLevel::Action => {
                self.render_choices(f, chunks[1], "What do you want to do?", &ACTIONS)
            }
            GameLevel::Pin => self.render_pin(f, chunks[1]),
            GameLevel::Celebrate => self.render_celebrate(f, chunks[1]),
            GameLevel::Complete => self.render_complete(f, chunks[1]),
        }

        self.render_help(f, chunks[2]);
    }

    fn render_launch(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let lines = vec![
            Line::from(""),
            Line::from("Tap the First Atlantic app to open it."),
            Line::from(""),
            Line::from(Span::styled(
                "[ FAB ]",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Press Enter to launch."),
        ];

        let panel = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Level 1: Launch the App"),
        );
        f.render_widget(panel, area);
    }

    fn render_choices(
        &self,
        f: &mut Frame,
        area: ratatui::layout::Rect,
        prompt: &str,
        choices: &[Choice; 3],
    ) {
        let mut lines = vec![Line::from(prompt.to_string()), Line::from("")];

        for (i, choice) in choices.iter().enumerate() {
            let style = if i == self.cursor {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!("  {}  ", choice.label),
                style,
            )));
        }

        if let Some(alert) = self.alert() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                alert.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }

        let panel = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(panel, area);
    }

    fn render_amount(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let draft = self.flow.draft();
        let amount = if draft.amount.is_empty() {
            "0"
        } else {
            draft.amount.as_str()
        };

        let mut lines = vec![
            Line::from("How much do you want to send?"),
            Line::from(""),
            Line::from(Span::styled(
                format!("GHS {}", amount),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!(
                "Presets (Tab): GHS {} / GHS {} / GHS {}",
                PRESET_AMOUNTS[0], PRESET_AMOUNTS[1], PRESET_AMOUNTS[2]
            )),
            Line::from("Digits to type, C clears, Enter sends."),
        ];

        if let Some(alert) = self.alert() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                alert.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }

        let panel = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Level 3: Enter Amount"),
            );
        f.render_widget(panel, area);
    }

    fn render_pin(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let draft = self.flow.draft();
        let boxes: String = (0..PIN_LENGTH)
            .map(|i| if i < draft.pin.len() { "[*] " } else { "[ ] " })
            .collect();

        let mut lines = vec![
            Line::from("Enter 4-digit PIN"),
            Line::from(""),
            Line::from(Span::styled(
                boxes,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Digits to type, C clears, Enter submits."),
        ];

        if let Some(alert) = self.alert() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                alert.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }

        let panel = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Level 5: Confirm with PIN"),
            );
        f.render_widget(panel, area);
    }

    fn render_celebrate(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Transaction Complete!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Digital banking made fun and easy."),
            Line::from("That's First Atlantic Bank."),
            Line::from(""),
            Line::from("Press Enter when you're done celebrating."),
        ];

        let panel = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(panel, area);
    }

    fn render_complete(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let lines = vec![
            Line::from(""),
            Line::from("That was the whole transfer."),
            Line::from(""),
            Line::from("Press Enter to do it again."),
        ];

        let panel = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(panel, area);
    }

    fn render_help(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let help = Paragraph::new("←→ Choose  Enter Confirm  Esc Leave")
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        f.render_widget(help, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> TransferGame {
        TransferGame::new(&KioskConfig::default())
    }

    #[test]
    fn test_game_starts_at_launch() {
        let game = game();
        assert_eq!(game.current_level(), GameLevel::Launch);
        assert_eq!(*game.draft(), GameDraft::default());
    }

    #[test]
    fn test_happy_path_through_all_levels() {
        let mut game = game();

        game.launch();
        assert_eq!(game.current_level(), GameLevel::Recipient);

        // Mom is the first choice and the right one
        game.choose_recipient();
        assert_eq!(game.current_level(), GameLevel::Amount);

        for c in "250".chars() {
            game.push_amount_digit(c);
        }
        game.send_amount();
        assert_eq!(game.current_level(), GameLevel::Action);

        game.choose_action();
        assert_eq!(game.current_level(), GameLevel::Pin);

        for c in "1234".chars() {
            game.push_pin_digit(c);
        }
        game.submit_pin();
        assert_eq!(game.current_level(), GameLevel::Celebrate);

        game.finish();
        assert_eq!(game.current_level(), GameLevel::Complete);
    }

    #[test]
    fn test_wrong_recipient_shows_alert_and_stays() {
        let mut game = game();
        game.launch();

        game.move_cursor(true);
        game.choose_recipient();

        assert_eq!(game.current_level(), GameLevel::Recipient);
        assert_eq!(game.alert(), Some("You don't owe your friend!"));
    }

    #[test]
    fn test_fraud_alert_blocks_large_amounts() {
        let mut game = game();
        game.launch();
        game.choose_recipient();

        for c in "2000000".chars() {
            game.push_amount_digit(c);
        }
        game.send_amount();

        assert_eq!(game.current_level(), GameLevel::Amount);
        assert!(game.alert().expect("fraud alert").contains("Fraud Alert"));

        // The boundary amount itself is allowed
        game.clear_amount();
        for c in "10000".chars() {
            game.push_amount_digit(c);
        }
        game.send_amount();
        assert_eq!(game.current_level(), GameLevel::Action);
    }

    #[test]
    fn test_empty_amount_does_not_advance() {
        let mut game = game();
        game.launch();
        game.choose_recipient();

        game.send_amount();
        assert_eq!(game.current_level(), GameLevel::Amount);
    }

    #[test]
    fn test_amount_keys_capped_at_seven() {
        let mut game = game();
        game.launch();
        game.choose_recipient();

        for _ in 0..12 {
            game.push_amount_digit('9');
        }
        assert_eq!(game.draft().amount.len(), 7);
    }

    #[test]
    fn test_presets_cycle() {
        let mut game = game();
        game.launch();
        game.choose_recipient();

        game.cycle_preset();
        assert_eq!(game.draft().amount, "100");
        game.cycle_preset();
        assert_eq!(game.draft().amount, "200");
        game.cycle_preset();
        assert_eq!(game.draft().amount, "500");
        game.cycle_preset();
        assert_eq!(game.draft().amount, "100");
    }

    #[test]
    fn test_wrong_pin_clears_entry() {
        let mut game = game();
        game.launch();
        game.choose_recipient();
        game.push_amount_digit('5');
        game.send_amount();
        game.choose_action();

        for c in "9999".chars() {
            game.push_pin_digit(c);
        }
        game.submit_pin();

        assert_eq!(game.current_level(), GameLevel::Pin);
        assert_eq!(game.draft().pin, "");
        assert_eq!(game.alert(), Some("Oops! Try again"));

        for c in "1234".chars() {
            game.push_pin_digit(c);
        }
        game.submit_pin();
        assert_eq!(game.current_level(), GameLevel::Celebrate);
    }

    #[test]
    fn test_pin_entry_capped_at_four() {
        let mut game = game();
        game.launch();
        game.choose_recipient();
        game.push_amount_digit('5');
        game.send_amount();
        game.choose_action();

        for _ in 0..8 {
            game.push_pin_digit('1');
        }
        assert_eq!(game.draft().pin.len(), 4);
    }

    #[test]
    fn test_replay_resets_everything() {
        let mut game = game();
        game.launch();
        game.choose_recipient();
        game.push_amount_digit('7');

        game.replay();
        assert_eq!(game.current_level(), GameLevel::Launch);
        assert_eq!(*game.draft(), GameDraft::default());
    }
}
