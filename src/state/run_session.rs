//! Counter timer for a running exercise

use std::time::Duration;

use tracing::{debug, info, warn};

use super::ExerciseStore;
use crate::tasks::{Scheduler, TimerHandle};

/// Ticks after which a run halts on its own
pub const DEFAULT_MAX_TICKS: u32 = 20;

/// Where the run modal is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunPhase {
    Idle,
    Open {
        exercise_id: u64,
        count: u32,
    },
    Running {
        exercise_id: u64,
        count: u32,
        timer: TimerHandle,
        interval: Duration,
    },
}

/// One processed tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    pub exercise_id: u64,
    pub count: u32,
    /// The cap was reached and the timer has been cancelled
    pub finished: bool,
}

/// Hook invoked once per tick, where sound or vibration feedback attaches
pub trait TickObserver {
    fn on_tick(&mut self, event: &TickEvent);
}

/// Observer that only logs
#[derive(Debug, Default)]
pub struct LogTicks;

impl TickObserver for LogTicks {
    fn on_tick(&mut self, event: &TickEvent) {
        debug!(
            "Tick {} for exercise {}{}",
            event.count,
            event.exercise_id,
            if event.finished { " (finished)" } else { "" }
        );
    }
}

/// Runs the repeating tick for one selected exercise.
///
/// The session is the only owner of its timer handle: every path out of
/// `Running` cancels it before changing phase.
pub struct RunSession {
    phase: RunPhase,
    scheduler: Box<dyn Scheduler>,
    observer: Box<dyn TickObserver>,
    max_ticks: u32,
}

impl RunSession {
    pub fn new(scheduler: Box<dyn Scheduler>, max_ticks: u32) -> Self {
        Self::with_observer(scheduler, Box::new(LogTicks), max_ticks)
    }

    /// A cap of 0 is raised to 1; every run counts at least one tick
    pub fn with_observer(
        scheduler: Box<dyn Scheduler>,
        observer: Box<dyn TickObserver>,
        max_ticks: u32,
    ) -> Self {
        Self {
            phase: RunPhase::Idle,
            scheduler,
            observer,
            max_ticks: max_ticks.max(1),
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn max_ticks(&self) -> u32 {
        self.max_ticks
    }

    pub fn running_id(&self) -> Option<u64> {
        match self.phase {
            RunPhase::Idle => None,
            RunPhase::Open { exercise_id, .. } | RunPhase::Running { exercise_id, .. } => {
                Some(exercise_id)
            }
        }
    }

    pub fn count(&self) -> u32 {
        match self.phase {
            RunPhase::Idle => 0,
            RunPhase::Open { count, .. } | RunPhase::Running { count, .. } => count,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, RunPhase::Running { .. })
    }

    /// Interval of the active timer, if ticking
    pub fn interval(&self) -> Option<Duration> {
        match self.phase {
            RunPhase::Running { interval, .. } => Some(interval),
            _ => None,
        }
    }

    /// Open the run modal for an exercise
    pub fn open(&mut self, id: u64, store: &ExerciseStore) -> bool {
        if self.phase != RunPhase::Idle {
            debug!("Run open ignored, session already open ({:?})", self.phase);
            return false;
        }
        if store.get(id).is_none() {
            debug!("Run open ignored, exercise {} not found", id);
            return false;
        }
        self.phase = RunPhase::Open {
            exercise_id: id,
            count: 0,
        };
        debug!("Opened run session for exercise {}", id);
        true
    }

    /// Start ticking at the exercise's interval, replacing any active timer
    pub fn start(&mut self, store: &ExerciseStore) -> bool {
        let Some(id) = self.running_id() else {
            debug!("Start ignored, no run session open");
            return false;
        };
        let Some(record) = store.get(id) else {
            warn!("Start ignored, exercise {} no longer exists", id);
            return false;
        };

        self.cancel_timer();

        let interval = record.tick_interval();
        let timer = self.scheduler.schedule_repeating(interval);
        self.phase = RunPhase::Running {
            exercise_id: id,
            count: 0,
            timer,
            interval,
        };
        info!(
            "Started '{}' every {:?}, cap {} ticks",
            record.name, interval, self.max_ticks
        );
        true
    }

    /// Apply a tick from the scheduler.
    ///
    /// Ticks from a timer that is no longer active are dropped.
    pub fn on_tick(&mut self, handle: TimerHandle) -> Option<TickEvent> {
        let RunPhase::Running {
            exercise_id,
            count,
            timer,
            interval,
        } = self.phase
        else {
            debug!("Dropped {} with no active run", handle);
            return None;
        };
        if timer != handle {
            debug!("Dropped stale {} (active {})", handle, timer);
            return None;
        }

        let count = count + 1;
        let finished = count >= self.max_ticks;
        if finished {
            self.scheduler.cancel(timer);
            self.phase = RunPhase::Open { exercise_id, count };
            info!("Exercise {} reached {} ticks, timer halted", exercise_id, count);
        } else {
            self.phase = RunPhase::Running {
                exercise_id,
                count,
                timer,
                interval,
            };
        }

        let event = TickEvent {
            exercise_id,
            count,
            finished,
        };
        self.observer.on_tick(&event);
        Some(event)
    }

    /// Cancel ticking and reset the count, keeping the modal open
    pub fn stop(&mut self) {
        self.cancel_timer();
        if let Some(exercise_id) = self.running_id() {
            self.phase = RunPhase::Open {
                exercise_id,
                count: 0,
            };
            debug!("Stopped run session for exercise {}", exercise_id);
        }
    }

    /// Stop and leave the run modal
    pub fn close(&mut self) {
        self.stop();
        if self.phase != RunPhase::Idle {
            debug!("Closed run session");
        }
        self.phase = RunPhase::Idle;
    }

    fn cancel_timer(&mut self) {
        if let RunPhase::Running {
            exercise_id,
            count,
            timer,
            ..
        } = self.phase
        {
            self.scheduler.cancel(timer);
            self.phase = RunPhase::Open { exercise_id, count };
        }
    }
}

impl Drop for RunSession {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
