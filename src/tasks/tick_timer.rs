//! Tokio-backed repeating timer

use std::{collections::HashMap, time::Duration};

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

use super::{Scheduler, TimerHandle, MIN_TICK_INTERVAL};

/// Spawns one interval task per timer.
///
/// Tasks only report their handle on the tick channel; the owner of the
/// receiver applies the tick, so ticks are processed one at a time.
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    tick_tx: mpsc::UnboundedSender<TimerHandle>,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    next_handle: u64,
}

impl TokioScheduler {
    /// Create a scheduler and the receiving end of its tick channel
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerHandle>) {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tick_tx,
            tasks: HashMap::new(),
            next_handle: 1,
        };
        (scheduler, tick_rx)
    }

    /// Number of timers that have not been cancelled
    pub fn active_timers(&self) -> usize {
        self.tasks.len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        let period = interval.max(MIN_TICK_INTERVAL);
        let tx = self.tick_tx.clone();
        let task = tokio::spawn(async move {
            tick_timer_task(handle, period, tx).await;
        });
        self.tasks.insert(handle, task);

        debug!("Scheduled {} every {:?}", handle, period);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            debug!("Cancelled {}", handle);
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

/// Background task that reports a tick every `period`
async fn tick_timer_task(
    handle: TimerHandle,
    period: Duration,
    tx: mpsc::UnboundedSender<TimerHandle>,
) {
    info!("Starting {} with period {:?}", handle, period);

    // First tick fires one full period after start
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        if tx.send(handle).is_err() {
            debug!("Tick receiver dropped, stopping {}", handle);
            break;
        }
    }
}
