use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::runtime::AppEvent;

/// Identifies one repeating timer started through a [`Scheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Starts and cancels repeating timers.
pub trait Scheduler {
    fn start_interval(&mut self, period: Duration) -> TimerId;
    /// Cancel a timer. Clearing an unknown or already cleared id is a no-op.
    fn clear(&mut self, id: TimerId);
    fn active_count(&self) -> usize;
}

/// Production scheduler: one thread per interval posting
/// [`AppEvent::Countdown`] into the event loop until cancelled.
pub struct ThreadScheduler {
    tx: Sender<AppEvent>,
    next_id: u64,
    active: HashMap<TimerId, Arc<AtomicBool>>,
}

impl ThreadScheduler {
    pub fn new(tx: Sender<AppEvent>) -> Self {
        Self {
            tx,
            next_id: 0,
            active: HashMap::new(),
        }
    }
}

impl Scheduler for ThreadScheduler {
    fn start_interval(&mut self, period: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let cancelled = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&cancelled);
        let tx = self.tx.clone();
        thread::spawn(move || loop {
            thread::sleep(period);
            if flag.load(Ordering::Acquire) {
                break;
            }
            if tx.send(AppEvent::Countdown(id)).is_err() {
                break;
            }
        });

        self.active.insert(id, cancelled);
        id
    }

    fn clear(&mut self, id: TimerId) {
        if let Some(flag) = self.active.remove(&id) {
            flag.store(true, Ordering::Release);
        }
    }

    fn active_count(&self) -> usize {
        self.active.len()
    }
}

impl Drop for ThreadScheduler {
    fn drop(&mut self) {
        for (_, flag) in self.active.drain() {
            flag.store(true, Ordering::Release);
        }
    }
}

/// Scheduler that never fires on its own; the caller delivers ticks.
/// Used by headless runs and tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    active: BTreeSet<TimerId>,
    started: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.active.contains(&id)
    }

    /// Total number of intervals ever started.
    pub fn started(&self) -> usize {
        self.started
    }
}

impl Scheduler for ManualScheduler {
    fn start_interval(&mut self, _period: Duration) -> TimerId {
        self.next_id += 1;
        self.started += 1;
        let id = TimerId(self.next_id);
        self.active.insert(id);
        id
    }

    fn clear(&mut self, id: TimerId) {
        self.active.remove(&id);
    }

    fn active_count(&self) -> usize {
        self.active.len()
    }
}
