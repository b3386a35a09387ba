//! Virtual-clock scheduler for deterministic tests

use std::{cell::RefCell, collections::BTreeMap, rc::Rc, time::Duration};

use super::{Scheduler, TimerHandle, MIN_TICK_INTERVAL};

#[derive(Debug, Clone, Copy)]
struct ManualTimer {
    period: Duration,
    next_due: Duration,
}

#[derive(Debug, Default)]
struct Inner {
    now: Duration,
    timers: BTreeMap<TimerHandle, ManualTimer>,
    next_handle: u64,
    scheduled: usize,
}

/// Scheduler driven by explicit `advance` calls instead of wall time.
///
/// Clones share the same clock, so a test keeps one handle while the run
/// session owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<Inner>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward, returning every tick that came due in order
    pub fn advance(&self, by: Duration) -> Vec<TimerHandle> {
        let mut inner = self.inner.borrow_mut();
        let target = inner.now + by;
        let mut fired = Vec::new();

        for (&handle, timer) in inner.timers.iter_mut() {
            while timer.next_due <= target {
                fired.push((timer.next_due, handle));
                timer.next_due += timer.period;
            }
        }
        inner.now = target;

        fired.sort();
        fired.into_iter().map(|(_, handle)| handle).collect()
    }

    /// Elapsed virtual time
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of timers that have not been cancelled
    pub fn active_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Total timers ever scheduled
    pub fn scheduled_count(&self) -> usize {
        self.inner.borrow().scheduled
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle {
        let mut inner = self.inner.borrow_mut();
        inner.next_handle += 1;
        inner.scheduled += 1;
        let handle = TimerHandle(inner.next_handle);
        let period = interval.max(MIN_TICK_INTERVAL);
        let next_due = inner.now + period;
        inner.timers.insert(handle, ManualTimer { period, next_due });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.inner.borrow_mut().timers.remove(&handle);
    }
}
