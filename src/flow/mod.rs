//! Screen-flow management
//!
//! One controller drives every kiosk wizard: it tracks the active
//! screen out of a flow-specific enumeration, carries the flow's
//! transient form draft, and schedules the synthetic processing
//! delays shown before balances, receipts, and loan verdicts.

use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// Screen enumeration of one wizard
///
/// Implementors supply the designated start screen and a flat
/// transition table. The table is advisory: the kiosks historically
/// allow any jump, so [`FlowController::go_to`] only checks it in
/// debug builds.
pub trait ScreenFlow: Copy + Eq + std::fmt::Debug {
    /// The screen a fresh or reset flow shows
    fn start() -> Self;

    /// Screens reachable from `self` by a user action
    fn transitions(&self) -> &'static [Self];
}

/// Cancellation handle for one in-flight processing delay
///
/// Delays are fire-and-forget tokio tasks that deliver a completion
/// event over the app's event channel. At most one delay per flow
/// instance is in flight: starting a new one supersedes the pending
/// one, and dropping the timer cancels it.
#[derive(Debug, Default)]
pub struct ProcessingTimer {
    cancel_tx: Option<oneshot::Sender<()>>,
}

impl ProcessingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` for delivery after `delay`
    ///
    /// Any previously scheduled event is cancelled first.
    pub fn start<E: Send + 'static>(&mut self, delay: Duration, tx: mpsc::Sender<E>, event: E) {
        self.cancel();

        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        self.cancel_tx = Some(cancel_tx);

        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(event).await;
                }
                _ = cancel_rx => {}
            }
        });
    }

    /// Cancel the pending delay, if any
    pub fn cancel(&mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            let _ = cancel_tx.send(());
        }
    }
}

/// State of one kiosk wizard: active screen plus form draft
///
/// The draft is reset whenever the flow returns to its start screen,
/// matching the kiosks' explicit clear-on-main-menu behavior, and on
/// [`FlowController::reset`].
#[derive(Debug)]
pub struct FlowController<S: ScreenFlow, D: Default> {
    current: S,
    previous: Option<S>,
    draft: D,
    processing: bool,
    timer: ProcessingTimer,
}

impl<S: ScreenFlow + 'static, D: Default> FlowController<S, D> {
    /// Create a controller positioned at the flow's start screen
    pub fn new() -> Self {
        Self {
            current: S::start(),
            previous: None,
            draft: D::default(),
            processing: false,
            timer: ProcessingTimer::new(),
        }
    }

    /// Get the active screen
    pub fn current_screen(&self) -> S {
        self.current
    }

    /// Get the previously active screen, if any
    pub fn previous_screen(&self) -> Option<S> {
        self.previous
    }

    /// Whether a processing delay is being shown
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Transition to `target`
    ///
    /// Clears the draft when `target` is the start screen. Jumps
    /// outside the transition table are a programming error caught in
    /// debug builds; release builds stay permissive.
    pub fn go_to(&mut self, target: S) {
        debug_assert!(
            target == self.current || self.current.transitions().contains(&target),
            "flow jump {:?} -> {:?} is not in the transition table",
            self.current,
            target
        );

        if target != self.current {
            self.previous = Some(self.current);
            self.current = target;
        }

        if target == S::start() {
            self.draft = D::default();
        }
    }

    /// Return to the previous screen, or to the start screen
    pub fn go_back(&mut self) {
        self.current = self.previous.take().unwrap_or_else(S::start);

        if self.current == S::start() {
            self.draft = D::default();
        }
    }

    /// Read the form draft
    pub fn draft(&self) -> &D {
        &self.draft
    }

    /// Mutate the form draft
    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    /// Enter the processing visual state and schedule `event`
    ///
    /// Supersedes any pending delay for this flow instance.
    pub fn begin_processing<E: Send + 'static>(
        &mut self,
        delay: Duration,
        tx: mpsc::Sender<E>,
        event: E,
    ) {
        self.processing = true;
        self.timer.start(delay, tx, event);
    }

    /// Leave the processing visual state
    ///
    /// Returns whether a delay was actually being shown. Completion
    /// events that race a `reset()` arrive with `processing` already
    /// cleared, so callers use the return value to discard them.
    pub fn finish_processing(&mut self) -> bool {
        let was_processing = self.processing;
        self.processing = false;
        was_processing
    }

    /// Cancel the pending delay without delivering its event
    pub fn cancel_processing(&mut self) {
        self.processing = false;
        self.timer.cancel();
    }

    /// Return to the start screen and clear all flow state
    pub fn reset(&mut self) {
        self.timer.cancel();
        self.processing = false;
        self.previous = None;
        self.current = S::start();
        self.draft = D::default();
    }
}

impl<S: ScreenFlow + 'static, D: Default> Default for FlowController<S, D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestScreen {
        Menu,
        Entry,
        Summary,
    }

    impl ScreenFlow for TestScreen {
        fn start() -> Self {
            Self::Menu
        }

        fn transitions(&self) -> &'static [Self] {
            match self {
                Self::Menu => &[Self::Entry],
                Self::Entry => &[Self::Menu, Self::Summary],
                Self::Summary => &[Self::Menu],
            }
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct TestDraft {
        amount: String,
    }

    #[test]
    fn test_controller_starts_at_flow_start() {
        let flow: FlowController<TestScreen, TestDraft> = FlowController::new();
        assert_eq!(flow.current_screen(), TestScreen::Menu);
        assert!(flow.previous_screen().is_none());
        assert!(!flow.is_processing());
    }

    #[test]
    fn test_transitions_remember_previous() {
        let mut flow: FlowController<TestScreen, TestDraft> = FlowController::new();

        flow.go_to(TestScreen::Entry);
        assert_eq!(flow.current_screen(), TestScreen::Entry);
        assert_eq!(flow.previous_screen(), Some(TestScreen::Menu));

        flow.go_to(TestScreen::Summary);
        assert_eq!(flow.previous_screen(), Some(TestScreen::Entry));
    }

    #[test]
    fn test_go_back() {
        let mut flow: FlowController<TestScreen, TestDraft> = FlowController::new();

        flow.go_to(TestScreen::Entry);
        flow.go_back();
        assert_eq!(flow.current_screen(), TestScreen::Menu);

        // Back with no history lands on the start screen
        flow.go_back();
        assert_eq!(flow.current_screen(), TestScreen::Menu);
    }

    #[test]
    fn test_draft_cleared_only_on_return_to_start() {
        let mut flow: FlowController<TestScreen, TestDraft> = FlowController::new();

        flow.go_to(TestScreen::Entry);
        flow.draft_mut().amount = "100".to_string();

        flow.go_to(TestScreen::Summary);
        assert_eq!(flow.draft().amount, "100");

        flow.go_to(TestScreen::Menu);
        assert_eq!(flow.draft().amount, "");
    }

    #[test]
    fn test_reset_clears_state() {
        let mut flow: FlowController<TestScreen, TestDraft> = FlowController::new();

        flow.go_to(TestScreen::Entry);
        flow.draft_mut().amount = "250".to_string();
        flow.reset();

        assert_eq!(flow.current_screen(), TestScreen::Menu);
        assert_eq!(*flow.draft(), TestDraft::default());
        assert!(flow.previous_screen().is_none());
        assert!(!flow.is_processing());
    }

    #[test]
    #[should_panic(expected = "not in the transition table")]
    #[cfg(debug_assertions)]
    fn test_off_table_jump_panics_in_debug() {
        let mut flow: FlowController<TestScreen, TestDraft> = FlowController::new();
        flow.go_to(TestScreen::Summary);
    }

    #[tokio::test]
    async fn test_timer_delivers_event() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut timer = ProcessingTimer::new();

        timer.start(Duration::from_millis(10), tx, 7u32);
        let delivered = timeout(Duration::from_secs(1), rx.recv()).await;
        assert_eq!(delivered.expect("timer should fire"), Some(7));
    }

    #[tokio::test]
    async fn test_cancel_suppresses_event() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut timer = ProcessingTimer::new();

        timer.start(Duration::from_millis(20), tx.clone(), 7u32);
        timer.cancel();

        let delivered = timeout(Duration::from_millis(100), rx.recv()).await;
        assert!(delivered.is_err(), "cancelled timer must not deliver");
    }

    #[tokio::test]
    async fn test_new_delay_supersedes_pending_one() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut timer = ProcessingTimer::new();

        timer.start(Duration::from_millis(20), tx.clone(), 1u32);
        timer.start(Duration::from_millis(10), tx.clone(), 2u32);

        let first = timeout(Duration::from_secs(1), rx.recv()).await;
        assert_eq!(first.expect("second timer should fire"), Some(2));

        let second = timeout(Duration::from_millis(100), rx.recv()).await;
        assert!(second.is_err(), "superseded timer must not deliver");
    }

    #[tokio::test]
    async fn test_reset_cancels_processing() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut flow: FlowController<TestScreen, TestDraft> = FlowController::new();

        flow.go_to(TestScreen::Entry);
        flow.begin_processing(Duration::from_millis(20), tx.clone(), 7u32);
        assert!(flow.is_processing());

        flow.reset();
        assert!(!flow.is_processing());

        let delivered = timeout(Duration::from_millis(100), rx.recv()).await;
        assert!(delivered.is_err(), "reset must cancel the pending delay");
    }

    #[tokio::test]
    async fn test_finish_processing_reports_stale_completions() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut flow: FlowController<TestScreen, TestDraft> = FlowController::new();

        flow.go_to(TestScreen::Entry);
        flow.begin_processing(Duration::from_millis(5), tx, 7u32);

        let delivered = timeout(Duration::from_secs(1), rx.recv()).await;
        assert_eq!(delivered.expect("timer should fire"), Some(7));

        assert!(flow.finish_processing());
        // A second completion for the same delay would be stale
        assert!(!flow.finish_processing());
    }
}
