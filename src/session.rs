use std::time::Duration;

use crate::celebration::Celebration;
use crate::comparator::{self, LetterCell};
use crate::passage::{Passage, PassageGenerator};
use crate::timer::{Scheduler, TimerId};
use crate::typing_policy::crosses_word_boundary;

pub const COUNTDOWN_SECS: i64 = 50;
pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Fresh passage, full countdown, timer not started.
    Idle,
    Running,
    /// Countdown ran out; edits are refused until reset.
    Expired,
    /// Input equals the passage; the input is read-only until reset.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Expired,
    WordBoundary,
    ReadOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Accepted,
    /// Accepted, and the input now matches the passage.
    Completed,
    Rejected(Rejection),
}

/// Fires at most once between re-arms.
#[derive(Debug, Default, Clone, Copy)]
pub struct OneShot {
    fired: bool,
}

impl OneShot {
    /// Returns true the first time it is called after construction or [`OneShot::rearm`].
    pub fn fire(&mut self) -> bool {
        !std::mem::replace(&mut self.fired, true)
    }

    pub fn rearm(&mut self) {
        self.fired = false;
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Owns one typing session: passage, input buffer, countdown and the
/// single countdown timer.
pub struct Session {
    generator: PassageGenerator,
    scheduler: Box<dyn Scheduler>,
    celebration: Box<dyn Celebration>,
    passage: Passage,
    input: String,
    countdown: i64,
    timer: Option<TimerId>,
    first_keystroke: OneShot,
}

impl Session {
    pub fn new(
        generator: PassageGenerator,
        scheduler: Box<dyn Scheduler>,
        celebration: Box<dyn Celebration>,
    ) -> Self {
        let passage = generator.generate();
        tracing::info!(
            words = passage.word_count(),
            letters = passage.len(),
            "session created"
        );
        Self {
            generator,
            scheduler,
            celebration,
            passage,
            input: String::new(),
            countdown: COUNTDOWN_SECS,
            timer: None,
            first_keystroke: OneShot::default(),
        }
    }

    /// Replace passage, input and countdown together and cancel the timer.
    pub fn reset(&mut self) {
        self.stop_timer();
        self.input.clear();
        self.passage = self.generator.generate();
        self.countdown = COUNTDOWN_SECS;
        self.first_keystroke.rearm();
        tracing::info!(
            words = self.passage.word_count(),
            letters = self.passage.len(),
            "session reset"
        );
    }

    /// Start the countdown on the first keystroke of a session. Later calls do nothing.
    pub fn on_first_keystroke(&mut self) {
        if self.first_keystroke.fire() {
            self.start_timer();
        }
    }

    /// Deliver a tick from the scheduler. Ticks from a timer this session no
    /// longer owns are dropped. Returns whether the tick was applied.
    pub fn on_timer_fired(&mut self, id: TimerId) -> bool {
        if self.timer != Some(id) {
            tracing::trace!(%id, "stale countdown tick ignored");
            return false;
        }
        self.tick();
        true
    }

    /// Count down one second; stops the timer once the countdown reaches zero.
    pub fn tick(&mut self) {
        if self.timer.is_none() {
            return;
        }
        self.countdown -= 1;
        if self.countdown <= 0 {
            self.stop_timer();
            tracing::info!(typed = self.input.chars().count(), "countdown expired");
        }
    }

    /// Validate a proposed full input buffer and apply it if allowed.
    pub fn handle_input_change(&mut self, new_value: &str) -> EditOutcome {
        if self.is_read_only() {
            return EditOutcome::Rejected(Rejection::ReadOnly);
        }
        if self.countdown <= 0 {
            tracing::debug!("edit refused, countdown expired");
            return EditOutcome::Rejected(Rejection::Expired);
        }
        if crosses_word_boundary(&self.passage, new_value) {
            tracing::debug!(len = new_value.chars().count(), "edit refused at word boundary");
            return EditOutcome::Rejected(Rejection::WordBoundary);
        }

        self.input.clear();
        self.input.push_str(new_value);

        if comparator::is_complete(self.passage.text(), &self.input) {
            self.stop_timer();
            tracing::info!(remaining = self.countdown, "passage completed");
            self.celebration.celebrate();
            return EditOutcome::Completed;
        }
        EditOutcome::Accepted
    }

    /// Per-letter comparison of the current input, computed fresh.
    pub fn letter_cells(&self) -> Vec<LetterCell> {
        comparator::compare(self.passage.text(), &self.input)
    }

    pub fn state(&self) -> SessionState {
        if self.is_completed() {
            SessionState::Completed
        } else if self.countdown <= 0 {
            SessionState::Expired
        } else if self.timer.is_some() {
            SessionState::Running
        } else {
            SessionState::Idle
        }
    }

    pub fn is_completed(&self) -> bool {
        comparator::is_complete(self.passage.text(), &self.input)
    }

    /// Whether the input control accepts edits at all.
    pub fn is_read_only(&self) -> bool {
        self.is_completed()
    }

    pub fn is_expired(&self) -> bool {
        self.countdown <= 0
    }

    pub fn passage(&self) -> &Passage {
        &self.passage
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn countdown(&self) -> i64 {
        self.countdown
    }

    pub fn timer_id(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn scheduler(&self) -> &dyn Scheduler {
        self.scheduler.as_ref()
    }

    fn start_timer(&mut self) {
        self.stop_timer();
        let id = self.scheduler.start_interval(COUNTDOWN_PERIOD);
        tracing::info!(%id, "countdown started");
        self.timer = Some(id);
    }

    fn stop_timer(&mut self) {
        if let Some(id) = self.timer.take() {
            self.scheduler.clear(id);
            tracing::debug!(%id, "countdown stopped");
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop_timer();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("passage", &self.passage.text())
            .field("input", &self.input)
            .field("countdown", &self.countdown)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}
