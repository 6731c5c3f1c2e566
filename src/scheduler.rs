use std::time::{Duration, Instant};

/// Opaque identifier of one scheduled tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct TimerHandle(u64);

/// One-shot timer port the engine uses to request its next tick.
///
/// The engine holds at most one pending handle at a time. Cancelling a handle
/// that already fired or was replaced is a no-op.
pub trait TickScheduler {
    fn schedule_once(&mut self, delay: Duration) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

/// Wall-clock scheduler for the interactive shell.
///
/// The shell polls [`DeadlineScheduler::take_due`] and calls `step()` when
/// it returns true.
#[derive(Debug, Default)]
pub struct DeadlineScheduler {
    next_id: u64,
    pending: Option<(TimerHandle, Instant)>,
}

impl DeadlineScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the pending timer if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.pending {
            Some((_, deadline)) if deadline <= now => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Returns how long until the pending timer fires, if any.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }
}

impl TickScheduler for DeadlineScheduler {
    fn schedule_once(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending = Some((handle, Instant::now() + delay));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if matches!(self.pending, Some((pending, _)) if pending == handle) {
            self.pending = None;
        }
    }
}

/// Deterministic scheduler that never waits; tests fire ticks by hand.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Option<(TimerHandle, Duration)>,
    requested: Vec<Duration>,
    cancelled: Vec<TimerHandle>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay of the currently pending tick request.
    #[must_use]
    pub fn pending_delay(&self) -> Option<Duration> {
        self.pending.map(|(_, delay)| delay)
    }

    /// Consumes the pending timer. Returns false when nothing was scheduled.
    pub fn fire(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Every delay requested so far, oldest first.
    #[must_use]
    pub fn requested(&self) -> &[Duration] {
        &self.requested
    }

    /// Handles cancelled while still pending.
    #[must_use]
    pub fn cancelled(&self) -> &[TimerHandle] {
        &self.cancelled
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule_once(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending = Some((handle, delay));
        self.requested.push(delay);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if matches!(self.pending, Some((pending, _)) if pending == handle) {
            self.pending = None;
            self.cancelled.push(handle);
        }
    }
}
