//! Repeating timer backends
//!
//! The run session never touches a clock directly. It asks a `Scheduler` for
//! a repeating timer and later receives ticks tagged with that timer's handle.

pub mod manual_clock;
pub mod tick_timer;

use std::{fmt, time::Duration};

// Re-export main types
pub use manual_clock::ManualScheduler;
pub use tick_timer::TokioScheduler;

/// Shortest period a scheduler will honour
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Identifies one scheduled repeating timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(pub u64);

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Cancellable scheduled-repeat abstraction
pub trait Scheduler {
    /// Start firing every `interval` until cancelled
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle;

    /// Stop a timer. Unknown or already cancelled handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}
