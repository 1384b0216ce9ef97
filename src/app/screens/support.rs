//! Customer-service desk screen
//!
//! Scripted chat with a keyword bot, the virtual queue, the callback
//! scheduler, a FAQ tab, the branch directory, and the feedback form.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::sync::mpsc;

use crate::app::event::AppEvent;
use crate::bank::support::{
    self, available_dates, available_times, can_schedule_call, can_submit_feedback, QueueSlot,
};
use crate::config::KioskConfig;
use crate::flow::{FlowController, ScreenFlow};

/// Tabs of the customer-service desk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportTab {
    Support,
    Faq,
    Branches,
    Feedback,
}

impl SupportTab {
    const ALL: [Self; 4] = [Self::Support, Self::Faq, Self::Branches, Self::Feedback];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Support => "Support",
            Self::Faq => "FAQ",
            Self::Branches => "Branches",
            Self::Feedback => "Feedback",
        }
    }

    fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    fn previous(&self) -> Self {
        let index = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl ScreenFlow for SupportTab {
    fn start() -> Self {
        Self::Support
    }

    fn transitions(&self) -> &'static [Self] {
        // The tab bar allows any jump
        &Self::ALL
    }
}

/// Transient service-desk inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupportDraft {
    /// Chat message being typed
    pub message_input: String,
    /// Star rating, 0 = none
    pub rating: u8,
    /// Feedback comment
    pub feedback_text: String,
    /// Chosen callback date index
    pub selected_date: Option<usize>,
    /// Chosen callback time index
    pub selected_time: Option<usize>,
}

/// Panels layered over the Support tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SupportPanel {
    Chat,
    /// Queue-or-callback choice after asking for an agent
    Options { selected: usize },
    Queue,
    Scheduler,
}

/// One chat transcript entry
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub from_user: bool,
    pub text: String,
}

/// Customer-service kiosk component
pub struct SupportDesk {
    flow: FlowController<SupportTab, SupportDraft>,
    rng: SmallRng,
    panel: SupportPanel,
    messages: Vec<ChatMessage>,
    queue_slot: Option<QueueSlot>,
    notification: Option<String>,
    agent_requested: bool,
    currency: String,
    usd_rate: f64,
    chat_delay: Duration,
    queue_delay: Duration,
    date_cursor: usize,
    time_cursor: usize,
    faq_expanded: Option<usize>,
    faq_cursor: usize,
}

impl SupportDesk {
    /// Create the service desk with the scripted greeting
    pub fn new(config: &KioskConfig) -> Self {
        let messages = vec![ChatMessage {
            from_user: false,
            text: "Hello! Welcome to First Atlantic Bank customer support. How can I help \
                   you today?"
                .to_string(),
        }];

        Self {
            flow: FlowController::new(),
            rng: SmallRng::from_entropy(),
            panel: SupportPanel::Chat,
            messages,
            queue_slot: None,
            notification: None,
            agent_requested: false,
            currency: config.currency.clone(),
            usd_rate: config.usd_rate,
            chat_delay: config.chat_delay(),
            queue_delay: config.queue_delay(),
            date_cursor: 0,
            time_cursor: 0,
            faq_expanded: None,
            faq_cursor: 0,
        }
    }

    /// Get the active tab
    pub fn current_tab(&self) -> SupportTab {
        self.flow.current_screen()
    }

    /// Whether a chat reply or queue assignment is pending
    pub fn is_processing(&self) -> bool {
        self.flow.is_processing()
    }

    /// Read the form draft
    pub fn draft(&self) -> &SupportDraft {
        self.flow.draft()
    }

    /// Chat transcript
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Assigned queue slot, if any
    pub fn queue_slot(&self) -> Option<QueueSlot> {
        self.queue_slot
    }

    /// Last notification line
    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    /// Switch to a tab
    pub fn go_to_tab(&mut self, tab: SupportTab) {
        self.flow.go_to(tab);
    }

    /// Type into the chat input
    pub fn type_message(&mut self, c: char) {
        self.flow.draft_mut().message_input.push(c);
    }

    /// Delete from the chat input
    pub fn backspace_message(&mut self) {
        self.flow.draft_mut().message_input.pop();
    }

    /// Send the typed message and schedule the scripted reply
    pub fn send_message(&mut self, tx: &mpsc::Sender<AppEvent>) {
        let input = self.flow.draft().message_input.trim().to_string();
        if input.is_empty() {
            return;
        }

        self.messages.push(ChatMessage {
            from_user: true,
            text: input.clone(),
        });
        self.flow.draft_mut().message_input.clear();

        if support::wants_agent(&input) {
            self.agent_requested = true;
        }

        let reply = support::chat_reply(&input, &self.currency, self.usd_rate);
        self.flow
            .begin_processing(self.chat_delay, tx.clone(), AppEvent::ChatReply(reply));
    }

    /// Append the bot reply; opens the agent options when requested
    pub fn complete_chat_reply(&mut self, text: String) {
        if !self.flow.finish_processing() {
            return;
        }

        self.messages.push(ChatMessage {
            from_user: false,
            text,
        });

        if self.agent_requested {
            self.agent_requested = false;
            self.panel = SupportPanel::Options { selected: 0 };
        }
    }

    /// Join the virtual queue and schedule the position assignment
    pub fn join_queue(&mut self, tx: &mpsc::Sender<AppEvent>) {
        self.panel = SupportPanel::Queue;
        self.queue_slot = None;

        let slot = support::draw_queue_slot(&mut self.rng);
        self.flow
            .begin_processing(self.queue_delay, tx.clone(), AppEvent::QueueAssigned(slot));
    }

    /// Record the assigned queue slot
    pub fn complete_queue(&mut self, slot: QueueSlot) {
        if self.flow.finish_processing() {
            self.queue_slot = Some(slot);
        }
    }

    /// Open the callback scheduler
    pub fn open_scheduler(&mut self) {
        self.panel = SupportPanel::Scheduler;
    }

    /// Move the date cursor, selecting the date under it
    pub fn move_date(&mut self, forward: bool) {
        let count = available_dates().len();
        match self.flow.draft().selected_date {
            None => self.date_cursor = 0,
            Some(_) => {
                self.date_cursor = if forward {
                    (self.date_cursor + 1) % count
                } else {
                    (self.date_cursor + count - 1) % count
                };
            }
        }
        self.flow.draft_mut().selected_date = Some(self.date_cursor);
    }

    /// Move the time cursor, selecting the time under it
    pub fn move_time(&mut self, forward: bool) {
        let count = available_times().len();
        match self.flow.draft().selected_time {
            None => self.time_cursor = 0,
            Some(_) => {
                self.time_cursor = if forward {
                    (self.time_cursor + 1) % count
                } else {
                    (self.time_cursor + count - 1) % count
                };
            }
        }
        self.flow.draft_mut().selected_time = Some(self.time_cursor);
    }

    /// Whether the scheduler may be submitted
    pub fn can_submit_schedule(&self) -> bool {
        let draft = self.flow.draft();
        can_schedule_call(draft.selected_date, draft.selected_time)
    }

    /// Book the callback; no-op until both date and time are chosen
    pub fn submit_schedule(&mut self) {
        let draft = self.flow.draft();
        let (date_index, time_index) = match (draft.selected_date, draft.selected_time) {
            (Some(date), Some(time)) => (date, time),
            _ => return,
        };

        let date = available_dates()[date_index];
        let time = available_times()[time_index];
        self.messages.push(ChatMessage {
            from_user: false,
            text: support::schedule_confirmation(&date, time),
        });
        self.notification = Some("Your call has been scheduled successfully!".to_string());

        let draft = self.flow.draft_mut();
        draft.selected_date = None;
        draft.selected_time = None;
        self.panel = SupportPanel::Chat;
    }

    /// Set the star rating (0-5)
    pub fn set_rating(&mut self, rating: u8) {
        self.flow.draft_mut().rating = rating.min(5);
    }

    /// Type into the feedback comment
    pub fn type_feedback(&mut self, c: char) {
        self.flow.draft_mut().feedback_text.push(c);
    }

    /// Delete from the feedback comment
    pub fn backspace_feedback(&mut self) {
        self.flow.draft_mut().feedback_text.pop();
    }

    /// Whether the feedback form may be submitted
    pub fn can_submit_feedback(&self) -> bool {
        can_submit_feedback(self.flow.draft().rating)
    }

    /// Submit the feedback; no-op while the rating is zero
    pub fn submit_feedback(&mut self) {
        if !self.can_submit_feedback() {
            return;
        }

        self.notification = Some("Thank you for your feedback!".to_string());
        let draft = self.flow.draft_mut();
        draft.rating = 0;
        draft.feedback_text.clear();
    }

    /// Cancel any pending delay and restart the desk
    pub fn reset(&mut self) {
        self.flow.reset();
        self.panel = SupportPanel::Chat;
        self.queue_slot = None;
        self.notification = None;
        self.agent_requested = false;
        self.date_cursor = 0;
        self.time_cursor = 0;
        self.faq_expanded = None;
        self.faq_cursor = 0;
    }

    /// Handle a key event; returns true when the user leaves the kiosk
    pub fn handle_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<AppEvent>) -> bool {
        match key.code {
            KeyCode::Tab => {
                self.flow.go_to(self.current_tab().next());
                return false;
            }
            KeyCode::BackTab => {
                self.flow.go_to(self.current_tab().previous());
                return false;
            }
            _ => {}
        }

        match self.current_tab() {
            SupportTab::Support => match self.panel {
                SupportPanel::Chat => match key.code {
                    KeyCode::Char(c) => self.type_message(c),
                    KeyCode::Backspace => self.backspace_message(),
                    KeyCode::Enter => self.send_message(tx),
                    KeyCode::Esc => return true,
                    _ => {}
                },
                SupportPanel::Options { selected } => match key.code {
                    KeyCode::Up | KeyCode::Down => {
                        self.panel = SupportPanel::Options {
                            selected: 1 - selected,
                        };
                    }
                    KeyCode::Enter => {
                        if selected == 0 {
                            self.join_queue(tx);
                        } else {
                            self.open_scheduler();
                        }
                    }
                    KeyCode::Esc => self.panel = SupportPanel::Chat,
                    _ => {}
                },
                SupportPanel::Queue => match key.code {
                    KeyCode::Enter | KeyCode::Esc => self.panel = SupportPanel::Chat,
                    _ => {}
                },
                SupportPanel::Scheduler => match key.code {
                    KeyCode::Up => self.move_date(false),
                    KeyCode::Down => self.move_date(true),
                    KeyCode::Left => self.move_time(false),
                    KeyCode::Right => self.move_time(true),
                    KeyCode::Enter => self.submit_schedule(),
                    KeyCode::Esc => self.panel = SupportPanel::Chat,
                    _ => {}
                },
            },
            SupportTab::Faq => match key.code {
                KeyCode::Up => {
                    let count = support::faq_items(&self.currency, self.usd_rate).len();
                    self.faq_cursor = (self.faq_cursor + count - 1) % count;
                }
                KeyCode::Down => {
                    let count = support::faq_items(&self.currency, self.usd_rate).len();
                    self.faq_cursor = (self.faq_cursor + 1) % count;
                }
                KeyCode::Enter => {
                    self.faq_expanded = if self.faq_expanded == Some(self.faq_cursor) {
                        None
                    } else {
                        Some(self.faq_cursor)
                    };
                }
                KeyCode::Esc => return true,
                _ => {}
            },
            SupportTab::Branches => match key.code {
                KeyCode::Esc => return true,
                _ => {}
            },
            SupportTab::Feedback => match key.code {
                KeyCode::Left => {
                    let rating = self.flow.draft().rating;
                    self.set_rating(rating.saturating_sub(1));
                }
                KeyCode::Right => {
                    let rating = self.flow.draft().rating;
                    self.set_rating(rating + 1);
                }
                KeyCode::Char(c) => self.type_feedback(c),
                KeyCode::Backspace => self.backspace_feedback(),
                KeyCode::Enter => self.submit_feedback(),
                KeyCode::Esc => return true,
                _ => {}
            },
        }
        false
    }

    /// Render the service desk
    pub fn render(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tab bar
                Constraint::Min(12),   // Tab content
                Constraint::Length(3), // Notification / help
            ])
            .split(size);

        self.render_tabs(f, chunks[0]);

        match self.current_tab() {
            SupportTab::Support => self.render_support(f, chunks[1]),
            SupportTab::Faq => self.render_faq(f, chunks[1]),
            SupportTab::Branches => self.render_branches(f, chunks[1]),
            SupportTab::Feedback => self.render_feedback(f, chunks[1]),
        }

        self.render_footer(f, chunks[2]);
    }

    fn render_tabs(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let spans: Vec<Span> = SupportTab::ALL
            .iter()
            .flat_map(|tab| {
                let style = if *tab == self.current_tab() {
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                vec![Span::styled(tab.title(), style), Span::raw("   ")]
            })
            .collect();

        let bar = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Customer Service"),
            );
        f.render_widget(bar, area);
    }

    fn render_support(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        match self.panel {
            SupportPanel::Chat => self.render_chat(f, area),
            SupportPanel::Options { selected } => self.render_options(f, area, selected),
            SupportPanel::Queue => self.render_queue(f, area),
            SupportPanel::Scheduler => self.render_scheduler(f, area),
        }
    }

    fn render_chat(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(3)])
            .split(area);

        let items: Vec<ListItem> = self
            .messages
            .iter()
            .map(|message| {
                let (prefix, color) = if message.from_user {
                    ("You: ", Color::Cyan)
                } else {
                    ("Bank: ", Color::White)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(prefix, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                    Span::raw(message.text.clone()),
                ]))
            })
            .collect();

        let transcript = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Live Chat"));
        f.render_widget(transcript, chunks[0]);

        let input_title = if self.is_processing() {
            "Message (the assistant is typing...)"
        } else {
            "Message"
        };
        let input = Paragraph::new(self.flow.draft().message_input.clone())
            .block(Block::default().borders(Borders::ALL).title(input_title));
        f.render_widget(input, chunks[1]);
    }

    fn render_options(&self, f: &mut Frame, area: ratatui::layout::Rect, selected: usize) {
        let options = ["Join the virtual queue", "Schedule a callback"];
        let lines: Vec<Line> = options
            .iter()
            .enumerate()
            .map(|(i, label)| {
                if i == selected {
                    Line::from(Span::styled(
                        format!(">> {}", label),
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(format!("   {}", label))
                }
            })
            .collect();

        let panel = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Talk to a representative"),
        );
        f.render_widget(panel, area);
    }

    fn render_queue(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let lines = match self.queue_slot {
            None => vec![Line::from(""), Line::from("Finding your place in the queue...")],
            Some(slot) => vec![
                Line::from(""),
                Line::from(format!("Your position in queue: {}", slot.position)),
                Line::from(format!("Estimated wait: {} minutes", slot.wait_minutes)),
                Line::from(""),
                Line::from("Press Enter to return to the chat."),
            ],
        };

        let panel = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Virtual Queue"),
        );
        f.render_widget(panel, area);
    }

    fn render_scheduler(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let draft = self.flow.draft();
        let mut lines = vec![Line::from("Pick a date (↑↓) and a time (←→):"), Line::from("")];

        for (i, date) in available_dates().iter().enumerate() {
            let style = if draft.selected_date == Some(i) {
                Style::default().fg(Color::Black).bg(Color::Magenta)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(date.display, style)));
        }

        lines.push(Line::from(""));
        let time_spans: Vec<Span> = available_times()
            .iter()
            .enumerate()
            .flat_map(|(i, time)| {
                let style = if draft.selected_time == Some(i) {
                    Style::default().fg(Color::Black).bg(Color::Magenta)
                } else {
                    Style::default()
                };
                vec![Span::styled(*time, style), Span::raw("  ")]
            })
            .collect();
        lines.push(Line::from(time_spans));

        lines.push(Line::from(""));
        lines.push(if self.can_submit_schedule() {
            Line::from(Span::styled(
                "Enter Schedule Call",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(
                "Select both a date and a time",
                Style::default().fg(Color::DarkGray),
            ))
        });

        let panel = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Schedule a Callback"),
        );
        f.render_widget(panel, area);
    }

    fn render_faq(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let items = support::faq_items(&self.currency, self.usd_rate);
        let mut lines = Vec::new();

        for (i, item) in items.iter().enumerate() {
            let style = if i == self.faq_cursor {
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(item.question, style)));
            if self.faq_expanded == Some(i) {
                lines.push(Line::from(format!("  {}", item.answer)));
            }
        }

        let panel = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Frequently Asked Questions"),
            );
        f.render_widget(panel, area);
    }

    fn render_branches(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let rows: Vec<Row> = support::branches()
            .iter()
            .map(|branch| {
                Row::new(vec![branch.name, branch.address, branch.phone, branch.hours])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Min(24),
                Constraint::Length(14),
                Constraint::Length(20),
            ],
        )
        .header(
            Row::new(vec!["Branch", "Address", "Phone", "Hours"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title("Our Branches"))
        .column_spacing(1);

        f.render_widget(table, area);
    }

    fn render_feedback(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let draft = self.flow.draft();
        let stars: String = (1..=5)
            .map(|i| if draft.rating >= i { '★' } else { '☆' })
            .collect();

        let submit_hint = if self.can_submit_feedback() {
            Span::styled(
                "Enter Submit Feedback",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                "Pick a rating to enable submission",
                Style::default().fg(Color::DarkGray),
            )
        };

        let lines = vec![
            Line::from("How was your experience today?"),
            Line::from(""),
            Line::from(Span::styled(
                stars,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from("(←/→ to adjust the rating)"),
            Line::from(""),
            Line::from(format!("Comments: {}", draft.feedback_text)),
            Line::from(""),
            Line::from(submit_hint),
        ];

        let panel = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Share Your Feedback"),
        );
        f.render_widget(panel, area);
    }

    fn render_footer(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let text = if let Some(notification) = &self.notification {
            Line::from(Span::styled(
                notification.clone(),
                Style::default().fg(Color::Green),
            ))
        } else {
            Line::from("Tab Switch tab  Enter Select  Esc Back")
        };

        let footer = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(footer, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProcessingDelays;

    fn desk() -> SupportDesk {
        let config = KioskConfig::default().with_delays(ProcessingDelays {
            transaction_ms: 10,
            balance_ms: 10,
            decision_ms: 10,
            queue_ms: 10,
            chat_ms: 10,
        });
        SupportDesk::new(&config)
    }

    #[test]
    fn test_desk_starts_on_support_tab() {
        let desk = desk();
        assert_eq!(desk.current_tab(), SupportTab::Support);
        assert_eq!(desk.messages().len(), 1);
        assert!(!desk.messages()[0].from_user);
    }

    #[test]
    fn test_tab_cycling() {
        assert_eq!(SupportTab::Support.next(), SupportTab::Faq);
        assert_eq!(SupportTab::Support.previous(), SupportTab::Feedback);
        assert_eq!(SupportTab::Feedback.next(), SupportTab::Support);
    }

    #[tokio::test]
    async fn test_chat_reply_round_trip() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut desk = desk();

        for c in "check my balance".chars() {
            desk.type_message(c);
        }
        desk.send_message(&tx);
        assert!(desk.is_processing());
        assert_eq!(desk.draft().message_input, "");
        assert_eq!(desk.messages().len(), 2);

        let reply = match rx.recv().await.expect("chat reply") {
            AppEvent::ChatReply(text) => text,
            other => panic!("unexpected event: {:?}", other),
        };
        desk.complete_chat_reply(reply);

        assert_eq!(desk.messages().len(), 3);
        assert!(desk.messages()[2].text.contains("12,456.78"));
        assert!(!desk.is_processing());
    }

    #[tokio::test]
    async fn test_agent_request_opens_options() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut desk = desk();

        for c in "I need a human agent".chars() {
            desk.type_message(c);
        }
        desk.send_message(&tx);

        let reply = match rx.recv().await.expect("chat reply") {
            AppEvent::ChatReply(text) => text,
            other => panic!("unexpected event: {:?}", other),
        };
        desk.complete_chat_reply(reply);

        assert_eq!(desk.panel, SupportPanel::Options { selected: 0 });
    }

    #[tokio::test]
    async fn test_queue_assignment() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut desk = desk();

        desk.join_queue(&tx);
        assert!(desk.queue_slot().is_none());

        let slot = match rx.recv().await.expect("queue slot") {
            AppEvent::QueueAssigned(slot) => slot,
            other => panic!("unexpected event: {:?}", other),
        };
        desk.complete_queue(slot);

        let assigned = desk.queue_slot().expect("assigned slot");
        assert!((1..=5).contains(&assigned.position));
        assert!((5..=14).contains(&assigned.wait_minutes));
    }

    #[test]
    fn test_schedule_gating() {
        let mut desk = desk();
        desk.open_scheduler();

        assert!(!desk.can_submit_schedule());
        desk.submit_schedule();
        assert!(desk.notification().is_none());

        desk.move_date(true);
        assert!(!desk.can_submit_schedule());

        desk.move_time(true);
        assert!(desk.can_submit_schedule());
        desk.submit_schedule();

        assert!(desk.notification().is_some());
        // The confirmation joined the transcript and selections cleared
        assert!(desk
            .messages()
            .last()
            .expect("confirmation")
            .text
            .contains("scheduled a callback"));
        assert_eq!(desk.draft().selected_date, None);
        assert_eq!(desk.draft().selected_time, None);
    }

    #[test]
    fn test_feedback_gating() {
        let mut desk = desk();
        desk.go_to_tab(SupportTab::Feedback);
        assert_eq!(desk.current_tab(), SupportTab::Feedback);

        assert!(!desk.can_submit_feedback());
        desk.submit_feedback();
        assert!(desk.notification().is_none());

        for rating in 1..=5u8 {
            desk.set_rating(rating);
            assert!(desk.can_submit_feedback());
        }

        desk.set_rating(9);
        assert_eq!(desk.draft().rating, 5);

        desk.submit_feedback();
        assert!(desk.notification().is_some());
        assert_eq!(desk.draft().rating, 0);
        assert_eq!(desk.draft().feedback_text, "");
    }

    #[tokio::test]
    async fn test_reset_cancels_pending_reply() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut desk = desk();

        for c in "hello there".chars() {
            desk.type_message(c);
        }
        desk.send_message(&tx);
        desk.reset();

        let delivered =
            tokio::time::timeout(Duration::from_millis(100), rx.recv()).await;
        assert!(delivered.is_err(), "reset must cancel the pending reply");
        assert_eq!(desk.draft().message_input, "");
    }
}
