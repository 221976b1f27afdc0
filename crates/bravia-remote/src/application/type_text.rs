//! TypeTextUseCase: types text on the TV's on-screen keyboard.
//!
//! The use case transliterates the text, plans the cursor walk with
//! [`NavigationPlanner`], and then replays the walk as paced key presses on a
//! [`RemoteSink`].  It owns no I/O itself; the sink is injected.
//!
//! # Pacing (for beginners)
//!
//! The TV needs time to move its highlight.  Every arrow key is followed by
//! `step_delay` (150 ms by default); every Confirm gets an extra
//! `confirm_margin` (200 ms) on top, because selecting a character also
//! redraws the search field.  Sending faster than that makes the TV drop
//! presses and the walk ends up on the wrong character.
//!
//! # Failures
//!
//! Typing is best-effort: a key press the sink fails to deliver is logged and
//! counted, and the walk carries on.  Every character's fate ends up in the
//! returned [`TypingReport`], so callers that prefer to give up can check it.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use async_trait::async_trait;
use bravia_core::{
    transliterate, GridPos, LayoutKind, NavCommand, NavigationError, NavigationPlanner, PlanStep,
    RemoteKey, TextPlan, Transliteration,
};
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Default delay after each arrow key.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(150);
/// Default extra delay after each Confirm.
pub const DEFAULT_CONFIRM_MARGIN: Duration = Duration::from_millis(200);

/// Error type for key delivery.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("sink is closed")]
    Closed,
}

/// Delivers remote-control key presses to the TV.
///
/// Infrastructure implementations talk IRCC over HTTP or just log; test
/// implementations record calls.
#[async_trait]
pub trait RemoteSink: Send + Sync {
    /// Presses one fixed remote key.
    async fn send_key(&self, key: RemoteKey) -> Result<(), SinkError>;

    /// Sends a raw IRCC code, e.g. one resolved from the command directory.
    async fn send_raw(&self, code: &str) -> Result<(), SinkError>;
}

/// Delays applied between key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub step_delay: Duration,
    pub confirm_margin: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            step_delay: DEFAULT_STEP_DELAY,
            confirm_margin: DEFAULT_CONFIRM_MARGIN,
        }
    }
}

impl Pacing {
    /// No delays at all.  Useful for dry runs.
    pub const fn immediate() -> Self {
        Self {
            step_delay: Duration::ZERO,
            confirm_margin: Duration::ZERO,
        }
    }

    /// How long to wait after sending `cmd`.
    pub fn delay_after(&self, cmd: NavCommand) -> Duration {
        match cmd {
            NavCommand::Confirm => self.step_delay + self.confirm_margin,
            _ => self.step_delay,
        }
    }

    /// Total wait time for a command stream.
    pub fn total_for(&self, commands: &[NavCommand]) -> Duration {
        commands.iter().map(|c| self.delay_after(*c)).sum()
    }
}

/// What happened to one character of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharOutcome {
    /// The walk and Confirm were sent; `failed_sends` of them did not go through.
    Typed { ch: char, failed_sends: usize },
    /// The keyboard cannot type this character.
    Skipped(char),
    /// The walk to this character exceeded its step budget; nothing was sent.
    Unreachable { ch: char, error: NavigationError },
    /// Cancellation arrived part-way through this character's walk.
    Cancelled(char),
}

/// Summary of one text-send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingReport {
    pub session_id: Uuid,
    pub layout: LayoutKind,
    /// One entry per character processed, in input order.  After a
    /// cancellation the remaining characters have no entry.
    pub outcomes: Vec<CharOutcome>,
    pub commands_sent: usize,
    pub failed_sends: usize,
    pub cancelled: bool,
    /// Where the planner believes the cursor ended up.
    pub end: GridPos,
}

impl TypingReport {
    fn new(session_id: Uuid, layout: LayoutKind) -> Self {
        Self {
            session_id,
            layout,
            outcomes: Vec::new(),
            commands_sent: 0,
            failed_sends: 0,
            cancelled: false,
            end: GridPos::ORIGIN,
        }
    }

    /// The characters whose walk was completed, in order.
    pub fn typed(&self) -> String {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                CharOutcome::Typed { ch, .. } => Some(*ch),
                _ => None,
            })
            .collect()
    }

    /// The characters the keyboard could not type.
    pub fn skipped(&self) -> Vec<char> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                CharOutcome::Skipped(ch) => Some(*ch),
                _ => None,
            })
            .collect()
    }

    /// `true` when every character was typed with no failed sends.
    pub fn is_clean(&self) -> bool {
        !self.cancelled
            && self.outcomes.iter().all(|o| {
                matches!(
                    o,
                    CharOutcome::Typed {
                        failed_sends: 0,
                        ..
                    }
                )
            })
    }
}

/// Handle to a spawned text-send.
///
/// Dropping the handle cancels the task, so a text-send never outlives the
/// code that started it.  Keep the handle, or call [`wait`](Self::wait), for
/// as long as typing should continue.
#[derive(Debug)]
pub struct TypingHandle {
    cancel: Arc<AtomicBool>,
    task: JoinHandle<TypingReport>,
}

impl TypingHandle {
    /// Asks the task to stop before its next key press.  The TV's cursor is
    /// left wherever it is.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// A shareable copy of the cancel flag, e.g. for a Ctrl+C handler.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the task to finish.
    ///
    /// # Errors
    ///
    /// Returns the [`JoinError`] if the task panicked or was aborted.
    pub async fn wait(mut self) -> Result<TypingReport, JoinError> {
        (&mut self.task).await
    }
}

impl Drop for TypingHandle {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}

/// The Type Text use case.
#[derive(Clone)]
pub struct TypeTextUseCase {
    sink: Arc<dyn RemoteSink>,
    pacing: Pacing,
    max_steps: Option<usize>,
}

impl TypeTextUseCase {
    /// Creates a use case with the default per-character step budget.
    pub fn new(sink: Arc<dyn RemoteSink>, pacing: Pacing) -> Self {
        Self {
            sink,
            pacing,
            max_steps: None,
        }
    }

    /// Overrides the per-character step budget; `None` restores the default.
    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Transliterates and plans `text` without sending anything.
    pub fn plan(&self, text: &str) -> (Transliteration, TextPlan) {
        let transliteration = transliterate(text);
        let mut planner = NavigationPlanner::new(transliteration.layout.layout());
        if let Some(max) = self.max_steps {
            planner = planner.with_max_steps(max);
        }
        let plan = planner.plan_text(transliteration.chars.iter().copied());
        (transliteration, plan)
    }

    /// Spawns the text-send on the Tokio runtime and returns its handle.
    pub fn spawn(&self, text: impl Into<String>) -> TypingHandle {
        let use_case = self.clone();
        let text = text.into();
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let task = tokio::spawn(async move { use_case.run(&text, &flag).await });
        TypingHandle { cancel, task }
    }

    /// Types `text`, checking `cancel` before every key press.
    pub async fn run(&self, text: &str, cancel: &AtomicBool) -> TypingReport {
        let session_id = Uuid::new_v4();
        let span = info_span!("typing", session = %session_id);
        self.run_session(session_id, text, cancel)
            .instrument(span)
            .await
    }

    async fn run_session(&self, session_id: Uuid, text: &str, cancel: &AtomicBool) -> TypingReport {
        let (transliteration, plan) = self.plan(text);
        let layout = transliteration.layout;
        info!(
            ?layout,
            chars = transliteration.chars.len(),
            commands = plan.commands().len(),
            "typing started"
        );

        let mut report = TypingReport::new(session_id, layout);
        let mut cursor = GridPos::ORIGIN;

        'steps: for step in plan.steps {
            if cancel.load(Ordering::Relaxed) {
                report.cancelled = true;
                break;
            }

            match step {
                PlanStep::Skip(ch) => {
                    debug!("skipping {ch:?}: not on the {layout:?} keyboard");
                    report.outcomes.push(CharOutcome::Skipped(ch));
                }
                PlanStep::Unreachable { ch, error } => {
                    warn!("skipping {ch:?}: {error}");
                    report.outcomes.push(CharOutcome::Unreachable { ch, error });
                }
                PlanStep::Press(keystroke) => {
                    let mut failed_sends = 0;
                    for cmd in keystroke.commands() {
                        if cancel.load(Ordering::Relaxed) {
                            report.outcomes.push(CharOutcome::Cancelled(keystroke.ch));
                            report.cancelled = true;
                            break 'steps;
                        }

                        let key = RemoteKey::from(cmd);
                        match self.sink.send_key(key).await {
                            Ok(()) => report.commands_sent += 1,
                            Err(e) => {
                                warn!("failed to send {key} for {:?}: {e}", keystroke.ch);
                                failed_sends += 1;
                                report.failed_sends += 1;
                            }
                        }
                        cursor = cmd.apply(cursor);
                        tokio::time::sleep(self.pacing.delay_after(cmd)).await;
                    }
                    report.outcomes.push(CharOutcome::Typed {
                        ch: keystroke.ch,
                        failed_sends,
                    });
                }
            }
        }

        report.end = cursor;
        if report.cancelled {
            info!(sent = report.commands_sent, "typing cancelled at {cursor}");
        } else {
            info!(
                sent = report.commands_sent,
                failed = report.failed_sends,
                "typing finished at {cursor}"
            );
        }
        report
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::time::Instant;

    // ── Test doubles ──────────────────────────────────────────────────────────

    #[derive(Default)]
    struct RecordingSink {
        keys: Mutex<Vec<(RemoteKey, Instant)>>,
        fail_on: Option<RemoteKey>,
        cancel_after: Option<(usize, Arc<AtomicBool>)>,
    }

    #[async_trait]
    impl RemoteSink for RecordingSink {
        async fn send_key(&self, key: RemoteKey) -> Result<(), SinkError> {
            let mut keys = self.keys.lock().unwrap();
            keys.push((key, Instant::now()));
            if let Some((n, flag)) = &self.cancel_after {
                if keys.len() == *n {
                    flag.store(true, Ordering::Relaxed);
                }
            }
            if self.fail_on == Some(key) {
                return Err(SinkError::Transport("injected failure".to_string()));
            }
            Ok(())
        }

        async fn send_raw(&self, _code: &str) -> Result<(), SinkError> {
            Ok(())
        }
    }

    impl RecordingSink {
        fn keys(&self) -> Vec<RemoteKey> {
            self.keys.lock().unwrap().iter().map(|(k, _)| *k).collect()
        }
    }

    fn make_use_case(sink: RecordingSink) -> (TypeTextUseCase, Arc<RecordingSink>) {
        let sink = Arc::new(sink);
        let uc = TypeTextUseCase::new(Arc::clone(&sink) as Arc<dyn RemoteSink>, Pacing::default());
        (uc, sink)
    }

    // ── Pacing ────────────────────────────────────────────────────────────────

    #[test]
    fn test_pacing_defaults() {
        let pacing = Pacing::default();
        assert_eq!(pacing.delay_after(NavCommand::Down), Duration::from_millis(150));
        assert_eq!(pacing.delay_after(NavCommand::Confirm), Duration::from_millis(350));
    }

    #[test]
    fn test_pacing_total_for_stream() {
        let pacing = Pacing::default();
        let total = pacing.total_for(&[NavCommand::Down, NavCommand::Confirm]);
        assert_eq!(total, Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_waits_step_delay_and_confirm_margin() {
        // Arrange
        let (uc, sink) = make_use_case(RecordingSink::default());
        let start = Instant::now();

        // Act: "HI" → Down, Confirm, Right, Confirm
        uc.run("hi", &AtomicBool::new(false)).await;

        // Assert: each key is sent after the previous key's delay has elapsed.
        let offsets: Vec<u64> = sink
            .keys
            .lock()
            .unwrap()
            .iter()
            .map(|(_, t)| (*t - start).as_millis() as u64)
            .collect();
        assert_eq!(offsets, vec![0, 150, 500, 650]);
        assert_eq!(Instant::now() - start, Duration::from_millis(1000));
    }

    // ── Command stream ────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_run_sends_planned_keys_in_order() {
        // Arrange
        let (uc, sink) = make_use_case(RecordingSink::default());

        // Act
        let report = uc.run("Hi", &AtomicBool::new(false)).await;

        // Assert
        assert_eq!(
            sink.keys(),
            vec![RemoteKey::Down, RemoteKey::Confirm, RemoteKey::Right, RemoteKey::Confirm]
        );
        assert_eq!(report.typed(), "HI");
        assert_eq!(report.layout, LayoutKind::Latin);
        assert_eq!(report.commands_sent, 4);
        assert_eq!(report.end, GridPos::new(1, 1));
        assert!(report.is_clean());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_reports_skipped_characters() {
        let (uc, sink) = make_use_case(RecordingSink::default());

        let report = uc.run("a b!", &AtomicBool::new(false)).await;

        assert_eq!(report.skipped(), vec![' ', '!']);
        assert_eq!(report.typed(), "AB");
        assert_eq!(sink.keys().len(), 3); // Confirm, Right, Confirm
        assert!(!report.is_clean());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_japanese_text_uses_japanese_layout() {
        let (uc, sink) = make_use_case(RecordingSink::default());

        let report = uc.run("が", &AtomicBool::new(false)).await;

        assert_eq!(report.layout, LayoutKind::Japanese);
        assert_eq!(report.typed(), "か゛");
        assert_eq!(sink.keys().len(), 12); // 1 Right + Confirm, 9 Right + Confirm
    }

    // ── Failures ──────────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_failed_send_is_counted_and_walk_continues() {
        // Arrange: every Confirm fails to go through.
        let (uc, sink) = make_use_case(RecordingSink {
            fail_on: Some(RemoteKey::Confirm),
            ..Default::default()
        });

        // Act
        let report = uc.run("HI", &AtomicBool::new(false)).await;

        // Assert: all four keys were attempted, two failed.
        assert_eq!(sink.keys().len(), 4);
        assert_eq!(report.commands_sent, 2);
        assert_eq!(report.failed_sends, 2);
        assert_eq!(
            report.outcomes,
            vec![
                CharOutcome::Typed { ch: 'H', failed_sends: 1 },
                CharOutcome::Typed { ch: 'I', failed_sends: 1 },
            ]
        );
        assert!(!report.is_clean());
    }

    #[tokio::test(start_paused = true)]
    async fn test_step_budget_override_marks_character_unreachable() {
        // Arrange: 'G' is six steps right of the origin.
        let (uc, sink) = make_use_case(RecordingSink::default());
        let uc = uc.with_max_steps(Some(3));

        // Act
        let report = uc.run("GA", &AtomicBool::new(false)).await;

        // Assert: G is reported, A is still typed from the unchanged cursor.
        assert!(matches!(report.outcomes[0], CharOutcome::Unreachable { ch: 'G', .. }));
        assert_eq!(report.outcomes[1], CharOutcome::Typed { ch: 'A', failed_sends: 0 });
        assert_eq!(sink.keys(), vec![RemoteKey::Confirm]);
    }

    // ── Cancellation ──────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_start_sends_nothing() {
        let (uc, sink) = make_use_case(RecordingSink::default());

        let report = uc.run("HELLO", &AtomicBool::new(true)).await;

        assert!(report.cancelled);
        assert!(report.outcomes.is_empty());
        assert!(sink.keys().is_empty());
        assert_eq!(report.end, GridPos::ORIGIN);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_mid_walk_stops_before_next_key() {
        // Arrange: the flag is raised by the sink as the third key goes out.
        let cancel = Arc::new(AtomicBool::new(false));
        let (uc, sink) = make_use_case(RecordingSink {
            cancel_after: Some((3, Arc::clone(&cancel))),
            ..Default::default()
        });

        // Act: "HO" → Down, Confirm, Down, Confirm
        let report = uc.run("HO", &cancel).await;

        // Assert: H complete, O interrupted after its Down; cursor stays there.
        assert_eq!(sink.keys(), vec![RemoteKey::Down, RemoteKey::Confirm, RemoteKey::Down]);
        assert!(report.cancelled);
        assert_eq!(
            report.outcomes,
            vec![
                CharOutcome::Typed { ch: 'H', failed_sends: 0 },
                CharOutcome::Cancelled('O'),
            ]
        );
        assert_eq!(report.end, GridPos::new(0, 2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_task_can_be_cancelled_through_handle() {
        // Arrange
        let (uc, sink) = make_use_case(RecordingSink::default());

        // Act: let the first key go out, then cancel during its pacing delay.
        let handle = uc.spawn("ZZZ");
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.cancel();
        let report = handle.wait().await.unwrap();

        // Assert
        assert!(report.cancelled);
        assert_eq!(sink.keys().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_stops_the_task() {
        // Arrange
        let (uc, sink) = make_use_case(RecordingSink::default());

        // Act: drop the handle during the first pacing delay.
        let handle = uc.spawn("ZZZ");
        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(handle);
        tokio::time::sleep(Duration::from_secs(30)).await;

        // Assert
        assert_eq!(sink.keys().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_task_runs_to_completion() {
        let (uc, sink) = make_use_case(RecordingSink::default());

        let handle = uc.spawn("A");
        let report = handle.wait().await.unwrap();

        assert_eq!(report.typed(), "A");
        assert_eq!(sink.keys(), vec![RemoteKey::Confirm]);
    }

    #[test]
    fn test_plan_does_not_send() {
        let (uc, sink) = make_use_case(RecordingSink::default());

        let (t, plan) = uc.plan("h");

        assert_eq!(t.as_string(), "H");
        assert_eq!(plan.commands(), vec![NavCommand::Down, NavCommand::Confirm]);
        assert!(sink.keys().is_empty());
    }
}
