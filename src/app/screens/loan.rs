//! Loan services portal screen
//!
//! Application wizard (type, details, personal info, verdict), the
//! My Loans table, the payment calculator, and contact support. The
//! verdict comes from an injectable decision strategy after the
//! processing delay.

use std::time::Duration;

use chrono::{DateTime, Datelike, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
    Frame,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::sync::mpsc;

use crate::app::event::AppEvent;
use crate::bank::loan::{
    self, DecisionStrategy, ExistingLoan, LoanProduct, DEFAULT_TERM_MONTHS, TERM_CHOICES,
};
use crate::config::KioskConfig;
use crate::flow::{FlowController, ScreenFlow};
use crate::models::{ApplicationStatus, LoanApplication};
use crate::util::money::{format_amount, format_balance, parse_amount, with_currency};

/// Screens of the loan portal flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanScreen {
    Main,
    ApplyLoan,
    LoanDetails,
    PersonalInfo,
    MyLoans,
    LoanCalculator,
    ContactSupport,
}

impl ScreenFlow for LoanScreen {
    fn start() -> Self {
        Self::Main
    }

    fn transitions(&self) -> &'static [Self] {
        match self {
            Self::Main => &[
                Self::ApplyLoan,
                Self::MyLoans,
                Self::LoanCalculator,
                Self::ContactSupport,
            ],
            Self::ApplyLoan => &[Self::Main, Self::LoanDetails],
            Self::LoanDetails => &[Self::ApplyLoan, Self::PersonalInfo, Self::Main],
            Self::PersonalInfo => &[Self::LoanDetails, Self::Main],
            Self::MyLoans => &[Self::Main],
            Self::LoanCalculator => &[Self::Main, Self::ApplyLoan],
            Self::ContactSupport => &[Self::Main],
        }
    }
}

/// Employment status options on the personal-info form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Employment {
    #[default]
    FullTime,
    PartTime,
    SelfEmployed,
    Unemployed,
    Retired,
    Student,
}

impl Employment {
    const ALL: [Self; 6] = [
        Self::FullTime,
        Self::PartTime,
        Self::SelfEmployed,
        Self::Unemployed,
        Self::Retired,
        Self::Student,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::SelfEmployed => "Self-employed",
            Self::Unemployed => "Unemployed",
            Self::Retired => "Retired",
            Self::Student => "Student",
        }
    }

    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|e| e == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let index = Self::ALL.iter().position(|e| e == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Applicant details collected before submission
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub income: String,
    pub address: String,
    pub employment: Employment,
}

/// Fields of the personal-info form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PersonalField {
    FullName,
    Email,
    Phone,
    Income,
    Address,
    Employment,
}

impl PersonalField {
    const ALL: [Self; 6] = [
        Self::FullName,
        Self::Email,
        Self::Phone,
        Self::Income,
        Self::Address,
        Self::Employment,
    ];

    fn title(&self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Email => "Email Address",
            Self::Phone => "Phone Number",
            Self::Income => "Annual Income",
            Self::Address => "Home Address",
            Self::Employment => "Employment Status",
        }
    }
}

/// Transient loan-portal inputs, cleared on return to the main menu
#[derive(Debug, Clone, PartialEq)]
pub struct LoanDraft {
    /// Selected loan product
    pub product: Option<&'static LoanProduct>,
    /// Requested amount, formatted with separators
    pub amount: String,
    /// Term in months
    pub term_months: u32,
    /// Annual rate in percent
    pub rate: f64,
    /// Applicant details
    pub personal: PersonalInfo,
    /// Verdict of the submitted application, if any
    pub verdict: Option<LoanApplication>,
}

impl Default for LoanDraft {
    fn default() -> Self {
        Self {
            product: None,
            amount: String::new(),
            term_months: DEFAULT_TERM_MONTHS,
            rate: 5.9,
            personal: PersonalInfo::default(),
            verdict: None,
        }
    }
}

const MENU: [(LoanScreen, &str); 4] = [
    (LoanScreen::ApplyLoan, "Apply for Loan"),
    (LoanScreen::MyLoans, "My Loans"),
    (LoanScreen::LoanCalculator, "Loan Calculator"),
    (LoanScreen::ContactSupport, "Contact Support"),
];

/// Editable fields on the calculator screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CalcField {
    Amount,
    Rate,
    Term,
}

/// Loan portal kiosk component
pub struct LoanArea {
    flow: FlowController<LoanScreen, LoanDraft>,
    decide: DecisionStrategy,
    rng: SmallRng,
    existing_loans: Vec<ExistingLoan>,
    currency: String,
    account_holder: String,
    decision_delay: Duration,
    menu_index: usize,
    menu_state: ListState,
    product_index: usize,
    field_index: usize,
    calc_field: CalcField,
    rate_input: String,
}

impl LoanArea {
    /// Create the loan portal with the configured demo catalogue
    pub fn new(config: &KioskConfig) -> Self {
        let mut menu_state = ListState::default();
        menu_state.select(Some(0));

        Self {
            flow: FlowController::new(),
            decide: loan::uniform_decision(SmallRng::from_entropy()),
            rng: SmallRng::from_entropy(),
            existing_loans: loan::demo_loans(&config.currency),
            currency: config.currency.clone(),
            account_holder: config.account_holder.clone(),
            decision_delay: config.decision_delay(),
            menu_index: 0,
            menu_state,
            product_index: 0,
            field_index: 0,
            calc_field: CalcField::Amount,
            rate_input: "5.9".to_string(),
        }
    }

    /// Replace the verdict strategy, pinning outcomes in tests
    pub fn with_decision(mut self, decide: DecisionStrategy) -> Self {
        self.decide = decide;
        self
    }

    /// Get the active portal screen
    pub fn current_screen(&self) -> LoanScreen {
        self.flow.current_screen()
    }

    /// Whether the verdict delay is showing
    pub fn is_processing(&self) -> bool {
        self.flow.is_processing()
    }

    /// Read the form draft
    pub fn draft(&self) -> &LoanDraft {
        self.flow.draft()
    }

    /// Rows of the My Loans table
    pub fn existing_loans(&self) -> &[ExistingLoan] {
        &self.existing_loans
    }

    /// Jump straight to a portal screen
    pub fn go_to(&mut self, target: LoanScreen) {
        self.flow.go_to(target);
    }

    /// Move the main-menu selection up
    pub fn select_previous(&mut self) {
        if self.menu_index > 0 {
            self.menu_index -= 1;
        } else {
            self.menu_index = MENU.len() - 1;
        }
        self.menu_state.select(Some(self.menu_index));
    }

    /// Move the main-menu selection down
    pub fn select_next(&mut self) {
        if self.menu_index < MENU.len() - 1 {
            self.menu_index += 1;
        } else {
            self.menu_index = 0;
        }
        self.menu_state.select(Some(self.menu_index));
    }

    /// Enter the selected portal screen
    pub fn activate_selection(&mut self) {
        if self.flow.current_screen() == LoanScreen::Main {
            let (target, _) = MENU[self.menu_index];
            self.flow.go_to(target);
        }
    }

    /// Pick a loan product and move to the details screen
    ///
    /// The product's base rate becomes the draft rate.
    pub fn select_product(&mut self, index: usize) {
        let products = loan::products();
        if index >= products.len() {
            return;
        }

        let product = &products[index];
        let draft = self.flow.draft_mut();
        draft.product = Some(product);
        draft.rate = product.base_rate;
        self.rate_input = format!("{}", product.base_rate);
        self.flow.go_to(LoanScreen::LoanDetails);
    }

    /// Append a character to the amount entry, reformatting separators
    pub fn amount_input(&mut self, c: char) {
        let draft = self.flow.draft_mut();
        let raw = format!("{}{}", draft.amount, c);
        draft.amount = format_amount(&raw);
    }

    /// Delete the last character of the amount entry
    pub fn amount_backspace(&mut self) {
        let draft = self.flow.draft_mut();
        let mut raw = draft.amount.clone();
        raw.pop();
        draft.amount = format_amount(&raw);
    }

    /// Select the next term choice
    pub fn next_term(&mut self) {
        let term = self.flow.draft().term_months;
        let index = TERM_CHOICES.iter().position(|&t| t == term).unwrap_or(0);
        self.flow.draft_mut().term_months = TERM_CHOICES[(index + 1) % TERM_CHOICES.len()];
    }

    /// Select the previous term choice
    pub fn previous_term(&mut self) {
        let term = self.flow.draft().term_months;
        let index = TERM_CHOICES.iter().position(|&t| t == term).unwrap_or(0);
        self.flow.draft_mut().term_months =
            TERM_CHOICES[(index + TERM_CHOICES.len() - 1) % TERM_CHOICES.len()];
    }

    /// Estimated monthly payment for the current draft
    pub fn monthly_payment(&self) -> f64 {
        let draft = self.flow.draft();
        loan::monthly_payment(
            parse_amount(&draft.amount),
            draft.rate,
            draft.term_months,
        )
    }

    /// Whether the details screen may advance
    pub fn can_continue(&self) -> bool {
        loan::can_continue(&self.flow.draft().amount)
    }

    /// Advance from details to the personal-info form
    pub fn continue_to_personal_info(&mut self) {
        if self.flow.current_screen() == LoanScreen::LoanDetails && self.can_continue() {
            self.flow.go_to(LoanScreen::PersonalInfo);
        }
    }

    /// Type into the focused personal-info field
    pub fn type_field(&mut self, c: char) {
        let field = PersonalField::ALL[self.field_index];
        let draft = self.flow.draft_mut();
        match field {
            PersonalField::FullName => draft.personal.full_name.push(c),
            PersonalField::Email => draft.personal.email.push(c),
            PersonalField::Phone => draft.personal.phone.push(c),
            PersonalField::Income => {
                let raw = format!("{}{}", draft.personal.income, c);
                draft.personal.income = format_amount(&raw);
            }
            PersonalField::Address => draft.personal.address.push(c),
            PersonalField::Employment => {}
        }
    }

    /// Delete from the focused personal-info field
    pub fn backspace_field(&mut self) {
        let field = PersonalField::ALL[self.field_index];
        let draft = self.flow.draft_mut();
        match field {
            PersonalField::FullName => {
                draft.personal.full_name.pop();
            }
            PersonalField::Email => {
                draft.personal.email.pop();
            }
            PersonalField::Phone => {
                draft.personal.phone.pop();
            }
            PersonalField::Income => {
                let mut raw = draft.personal.income.clone();
                raw.pop();
                draft.personal.income = format_amount(&raw);
            }
            PersonalField::Address => {
                draft.personal.address.pop();
            }
            PersonalField::Employment => {}
        }
    }

    /// Focus the next form field
    pub fn next_field(&mut self) {
        self.field_index = (self.field_index + 1) % PersonalField::ALL.len();
    }

    /// Focus the previous form field
    pub fn previous_field(&mut self) {
        self.field_index =
            (self.field_index + PersonalField::ALL.len() - 1) % PersonalField::ALL.len();
    }

    /// Cycle the employment selector, if focused
    pub fn cycle_employment(&mut self, forward: bool) {
        if PersonalField::ALL[self.field_index] == PersonalField::Employment {
            let current = self.flow.draft().personal.employment;
            self.flow.draft_mut().personal.employment = if forward {
                current.next()
            } else {
                current.previous()
            };
        }
    }

    /// Submit the application and start the verdict delay
    pub fn submit_application(&mut self, tx: &mpsc::Sender<AppEvent>) {
        if self.flow.current_screen() != LoanScreen::PersonalInfo
            || self.flow.is_processing()
            || self.flow.draft().verdict.is_some()
        {
            return;
        }

        let status = (self.decide)();
        self.flow
            .begin_processing(self.decision_delay, tx.clone(), AppEvent::LoanDecided(status));
    }

    /// Record the verdict and expose the application for history
    ///
    /// Approved applications join the My Loans table as pending
    /// activation. Stale completions are dropped.
    pub fn complete_decision(
        &mut self,
        status: ApplicationStatus,
        now: DateTime<Utc>,
    ) -> Option<LoanApplication> {
        if !self.flow.finish_processing() {
            return None;
        }

        let monthly = self.monthly_payment();
        let draft = self.flow.draft();
        let product_name = draft
            .product
            .map(|p| p.name)
            .unwrap_or("Personal Loan")
            .to_string();
        let amount_display = if draft.amount.is_empty() {
            "0".to_string()
        } else {
            draft.amount.clone()
        };

        let application = LoanApplication {
            timestamp: now,
            reference: loan::application_reference(&mut self.rng),
            product: product_name.clone(),
            amount: parse_amount(&draft.amount),
            term_months: draft.term_months,
            rate: draft.rate,
            monthly_payment: monthly,
            status,
        };

        if status == ApplicationStatus::Approved {
            let new_loan = ExistingLoan::new(
                &loan::loan_id(&mut self.rng, now.year()),
                &product_name,
                &with_currency(&self.currency, &amount_display),
                &format!("{}%", application.rate),
                &with_currency(&self.currency, &amount_display),
                "Pending Activation",
            );
            self.existing_loans.insert(0, new_loan);
        }

        self.flow.draft_mut().verdict = Some(application.clone());
        Some(application)
    }

    /// Return to the main menu, clearing the application draft
    pub fn return_to_main(&mut self) {
        self.flow.cancel_processing();
        self.flow.go_to(LoanScreen::Main);
    }

    /// Cancel any pending delay and restart the flow
    pub fn reset(&mut self) {
        self.flow.reset();
        self.rate_input = "5.9".to_string();
        self.product_index = 0;
        self.field_index = 0;
    }

    /// Type into the focused calculator field
    fn calculator_input(&mut self, c: char) {
        match self.calc_field {
            CalcField::Amount => {
                if c.is_ascii_digit() {
                    self.amount_input(c);
                }
            }
            CalcField::Rate => {
                if c.is_ascii_digit() || c == '.' {
                    self.rate_input.push(c);
                    self.flow.draft_mut().rate = self.rate_input.parse().unwrap_or(0.0);
                }
            }
            CalcField::Term => {}
        }
    }

    fn calculator_backspace(&mut self) {
        match self.calc_field {
            CalcField::Amount => self.amount_backspace(),
            CalcField::Rate => {
                self.rate_input.pop();
                self.flow.draft_mut().rate = self.rate_input.parse().unwrap_or(0.0);
            }
            CalcField::Term => {}
        }
    }

    /// Handle a key event; returns true when the user leaves the kiosk
    pub fn handle_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<AppEvent>) -> bool {
        match self.flow.current_screen() {
            LoanScreen::Main => match key.code {
                KeyCode::Up => self.select_previous(),
                KeyCode::Down => self.select_next(),
                KeyCode::Enter => self.activate_selection(),
                KeyCode::Esc | KeyCode::Char('q') => return true,
                _ => {}
            },
            LoanScreen::ApplyLoan => match key.code {
                KeyCode::Up => {
                    let count = loan::products().len();
                    self.product_index = (self.product_index + count - 1) % count;
                }
                KeyCode::Down => {
                    self.product_index = (self.product_index + 1) % loan::products().len();
                }
                KeyCode::Enter => self.select_product(self.product_index),
                KeyCode::Esc => self.flow.go_to(LoanScreen::Main),
                _ => {}
            },
            LoanScreen::LoanDetails => match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() => self.amount_input(c),
                KeyCode::Backspace => self.amount_backspace(),
                KeyCode::Left => self.previous_term(),
                KeyCode::Right => self.next_term(),
                KeyCode::Enter => self.continue_to_personal_info(),
                KeyCode::Esc => self.flow.go_to(LoanScreen::ApplyLoan),
                _ => {}
            },
            LoanScreen::PersonalInfo => {
                if self.flow.draft().verdict.is_some() {
                    if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                        self.return_to_main();
                    }
                    return false;
                }

                match key.code {
                    KeyCode::Up => self.previous_field(),
                    KeyCode::Down => self.next_field(),
                    KeyCode::Left => self.cycle_employment(false),
                    KeyCode::Right => self.cycle_employment(true),
                    KeyCode::Char(c) => self.type_field(c),
                    KeyCode::Backspace => self.backspace_field(),
                    KeyCode::Enter => self.submit_application(tx),
                    KeyCode::Esc => {
                        if !self.flow.is_processing() {
                            self.flow.go_to(LoanScreen::LoanDetails);
                        }
                    }
                    _ => {}
                }
            }
            LoanScreen::MyLoans | LoanScreen::ContactSupport => match key.code {
                KeyCode::Enter | KeyCode::Esc => self.flow.go_to(LoanScreen::Main),
                _ => {}
            },
            LoanScreen::LoanCalculator => match key.code {
                KeyCode::Up => {
                    self.calc_field = match self.calc_field {
                        CalcField::Amount => CalcField::Term,
                        CalcField::Rate => CalcField::Amount,
                        CalcField::Term => CalcField::Rate,
                    };
                }
                KeyCode::Down => {
                    self.calc_field = match self.calc_field {
                        CalcField::Amount => CalcField::Rate,
                        CalcField::Rate => CalcField::Term,
                        CalcField::Term => CalcField::Amount,
                    };
                }
                KeyCode::Left => {
                    if self.calc_field == CalcField::Term {
                        self.previous_term();
                    }
                }
                KeyCode::Right => {
                    if self.calc_field == CalcField::Term {
                        self.next_term();
                    }
                }
                KeyCode::Char(c) => self.calculator_input(c),
                KeyCode::Backspace => self.calculator_backspace(),
                KeyCode::Enter => self.flow.go_to(LoanScreen::ApplyLoan),
                KeyCode::Esc => self.flow.go_to(LoanScreen::Main),
                _ => {}
            },
        }
        false
    }

    /// Render the loan portal
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
            LoanScreen::Main => self.render_main(f, chunks[1]),
            LoanScreen::ApplyLoan => self.render_apply(f, chunks[1]),
            LoanScreen::LoanDetails => self.render_details(f, chunks[1]),
            LoanScreen::PersonalInfo => self.render_personal_info(f, chunks[1]),
            LoanScreen::MyLoans => self.render_my_loans(f, chunks[1]),
            LoanScreen::LoanCalculator => self.render_calculator(f, chunks[1]),
            LoanScreen::ContactSupport => self.render_contact(f, chunks[1]),
        }

        self.render_help(f, chunks[2]);
    }

    fn render_status_bar(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let now = chrono::Local::now().format("%a, %b %e  %H:%M:%S");
        let bar = Paragraph::new(format!("User: {}    {}", self.account_holder, now))
            .style(Style::default().fg(Color::Magenta))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("FIRST ATLANTIC BANK LOAN CENTER"),
            );
        f.render_widget(bar, area);
    }

    fn render_main(&mut self, f: &mut Frame, area: ratatui::layout::Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(6)])
            .split(area);

        let prompt = Paragraph::new("What would you like to do today?")
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(prompt, chunks[0]);

        let items: Vec<ListItem> = MENU
            .iter()
            .map(|(_, label)| ListItem::new(*label))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Loan Services Portal"),
            )
            .highlight_style(Style::default().bg(Color::Magenta).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, chunks[1], &mut self.menu_state);
    }

    fn render_apply(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let mut lines = vec![Line::from("Please select the type of loan to apply for:"), Line::from("")];

        for (i, product) in loan::products().iter().enumerate() {
            let marker = if i == self.product_index { ">> " } else { "   " };
            let style = if i == self.product_index {
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!("{}{}  (from {}% APR)", marker, product.name, product.base_rate),
                style,
            )));
            lines.push(Line::from(format!(
                "     {} - {}  |  {}",
                with_currency(&self.currency, &format_amount(&product.min_amount.to_string())),
                with_currency(&self.currency, &format_amount(&product.max_amount.to_string())),
                product.blurb,
            )));
        }

        let panel = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Select Loan Type"),
            );
        f.render_widget(panel, area);
    }

    fn render_details(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let draft = self.flow.draft();
        let monthly = self.monthly_payment();
        let principal = parse_amount(&draft.amount);
        let repayment = loan::total_repayment(monthly, draft.term_months);
        let interest = loan::total_interest(monthly, draft.term_months, principal);

        let product_name = draft.product.map(|p| p.name).unwrap_or("-");
        let amount_display = if draft.amount.is_empty() {
            "0"
        } else {
            draft.amount.as_str()
        };

        let continue_hint = if self.can_continue() {
            Span::styled(
                "Enter Continue",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("Enter an amount to continue", Style::default().fg(Color::DarkGray))
        };

        let lines = vec![
            Line::from(format!("Loan Type: {}", product_name)),
            Line::from(format!(
                "Loan Amount: {}",
                with_currency(&self.currency, amount_display)
            )),
            Line::from(format!(
                "Loan Term: {} months (←/→ to change)",
                draft.term_months
            )),
            Line::from(format!("Interest Rate: {}% APR", draft.rate)),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "Estimated Monthly Payment: {}",
                    with_currency(&self.currency, &format_balance(monthly))
                ),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "Total Interest: {}    Total Repayment: {}",
                with_currency(&self.currency, &format_balance(interest)),
                with_currency(&self.currency, &format_balance(repayment)),
            )),
            Line::from(""),
            Line::from(continue_hint),
        ];

        let panel = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Loan Details"));
        f.render_widget(panel, area);
    }

    fn render_personal_info(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        if self.flow.is_processing() {
            let panel = Paragraph::new(vec![
                Line::from(""),
                Line::from("Processing your application..."),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
            f.render_widget(panel, area);
            return;
        }

        if let Some(verdict) = &self.flow.draft().verdict {
            self.render_verdict(f, area, verdict);
            return;
        }

        let draft = self.flow.draft();
        let values = [
            draft.personal.full_name.as_str(),
            draft.personal.email.as_str(),
            draft.personal.phone.as_str(),
            draft.personal.income.as_str(),
            draft.personal.address.as_str(),
            draft.personal.employment.label(),
        ];

        let mut lines = Vec::new();
        for (i, field) in PersonalField::ALL.iter().enumerate() {
            let style = if i == self.field_index {
                Style::default().fg(Color::Black).bg(Color::Magenta)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!("{}: {}", field.title(), values[i]),
                style,
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from("Enter submits the application."));

        let panel = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Personal Information"),
        );
        f.render_widget(panel, area);
    }

    fn render_verdict(&self, f: &mut Frame, area: ratatui::layout::Rect, verdict: &LoanApplication) {
        let color = match verdict.status {
            ApplicationStatus::Approved => Color::Green,
            ApplicationStatus::PendingReview => Color::Yellow,
            ApplicationStatus::ConditionallyApproved => Color::Blue,
        };

        let lines = vec![
            Line::from(Span::styled(
                verdict.status.headline(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(verdict.status.detail()),
            Line::from(""),
            Line::from(format!("Application ID: {}", verdict.reference)),
            Line::from(format!("Loan Type: {}", verdict.product)),
            Line::from(format!(
                "Loan Amount: {}",
                with_currency(&self.currency, &format_balance(verdict.amount))
            )),
            Line::from(format!("Term: {} months", verdict.term_months)),
            Line::from(format!("Interest Rate: {}% APR", verdict.rate)),
            Line::from(""),
            Line::from("Press Enter to return to the main menu."),
        ];

        let panel = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        f.render_widget(panel, area);
    }

    fn render_my_loans(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let rows: Vec<Row> = self
            .existing_loans
            .iter()
            .map(|loan| {
                Row::new(vec![
                    loan.id.clone(),
                    loan.kind.clone(),
                    loan.amount.clone(),
                    loan.rate.clone(),
                    loan.remaining.clone(),
                    loan.status.clone(),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Min(14),
                Constraint::Length(14),
                Constraint::Length(6),
                Constraint::Length(14),
                Constraint::Length(18),
            ],
        )
        .header(
            Row::new(vec!["Loan ID", "Type", "Amount", "Rate", "Remaining", "Status"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title("My Loans"))
        .column_spacing(1);

        f.render_widget(table, area);
    }

    fn render_calculator(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let draft = self.flow.draft();
        let monthly = self.monthly_payment();
        let principal = parse_amount(&draft.amount);
        let repayment = loan::total_repayment(monthly, draft.term_months);
        let interest = loan::total_interest(monthly, draft.term_months, principal);

        let amount_display = if draft.amount.is_empty() {
            "0"
        } else {
            draft.amount.as_str()
        };

        let field_style = |field: CalcField, selected: CalcField| {
            if field == selected {
                Style::default().fg(Color::Black).bg(Color::Magenta)
            } else {
                Style::default()
            }
        };

        let lines = vec![
            Line::from(Span::styled(
                format!(
                    "Loan Amount: {}",
                    with_currency(&self.currency, amount_display)
                ),
                field_style(CalcField::Amount, self.calc_field),
            )),
            Line::from(Span::styled(
                format!("Interest Rate (%): {}", self.rate_input),
                field_style(CalcField::Rate, self.calc_field),
            )),
            Line::from(Span::styled(
                format!("Loan Term: {} months (←/→)", draft.term_months),
                field_style(CalcField::Term, self.calc_field),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "Monthly Payment: {}",
                    with_currency(&self.currency, &format_balance(monthly))
                ),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "Total Interest: {}    Total Cost: {}",
                with_currency(&self.currency, &format_balance(interest)),
                with_currency(&self.currency, &format_balance(repayment)),
            )),
            Line::from(""),
            Line::from("Enter starts an application with these numbers."),
        ];

        let panel = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Loan Calculator"));
        f.render_widget(panel, area);
    }

    fn render_contact(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let lines = vec![
            Line::from("Phone Support: +233-20-800-FIRST-ATLANTIC-BANK (24/7)"),
            Line::from("Email Support: loans@firstatlanticbank.com (response within 24 hours)"),
            Line::from("Live Chat: available in the mobile app, 9AM - 9PM"),
            Line::from("Visit a Branch: find your nearest branch and book an appointment"),
            Line::from(""),
            Line::from(Span::styled(
                "Frequently Asked Questions",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("How long does the loan approval process take?"),
            Line::from("  Most loan applications are processed within 1-2 business days."),
            Line::from("Can I pay off my loan early?"),
            Line::from("  Yes, there are no early repayment fees on most loans."),
            Line::from("How can I change my payment due date?"),
            Line::from("  Contact customer support or visit your local branch."),
        ];

        let panel = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Contact Support"),
            );
        f.render_widget(panel, area);
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
