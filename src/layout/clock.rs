//! Cooperative timer queue on a virtual clock.
//!
//! Everything the engine does after `submit` is a timer on this clock: the
//! debounce before a pass, the per-word layout tick, and the attention
//! reschedule. The host advances time; due timers are handed back one at a
//! time in `(deadline, creation order)` so callers can dispatch them without
//! holding a borrow on the queue.

use std::time::Duration;

/// Identifier of a scheduled timer. Never reused within one clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// Identifier of a layout pass, carried by its tick timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PassId(pub u64);

/// What a timer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Start a pass once submissions settle.
    Debounce,
    /// Place the next word of the given pass.
    LayoutTick(PassId),
    /// Highlight a random placed word.
    Attention,
}

#[derive(Debug, Clone)]
struct Timer {
    handle: TimerHandle,
    kind: TimerKind,
    due: Duration,
    interval: Option<Duration>,
}

/// Virtual clock with cancellable one-shot and interval timers.
#[derive(Debug, Default)]
pub struct Clock {
    now: Duration,
    next_handle: u64,
    timers: Vec<Timer>,
}

impl Clock {
    /// Clock at time zero with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fire `kind` once, `delay` from now.
    pub fn schedule_once(&mut self, delay: Duration, kind: TimerKind) -> TimerHandle {
        self.push(delay, kind, None)
    }

    /// Fire `kind` every `interval`, first at `now + interval`.
    ///
    /// A zero interval would starve the queue; callers validate it first.
    pub fn schedule_interval(&mut self, interval: Duration, kind: TimerKind) -> TimerHandle {
        debug_assert!(!interval.is_zero(), "interval timers need a positive period");
        self.push(interval, kind, Some(interval))
    }

    fn push(&mut self, delay: Duration, kind: TimerKind, interval: Option<Duration>) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.push(Timer {
            handle,
            kind,
            due: self.now + delay,
            interval,
        });
        handle
    }

    /// Remove a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    /// Whether `handle` is still scheduled.
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Number of scheduled timers.
    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    /// Earliest deadline, if anything is scheduled.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.due).min()
    }

    /// Take the earliest timer due at or before `until`.
    ///
    /// Moves `now` to the timer's deadline. One-shot timers are removed;
    /// interval timers are re-armed one period later.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerHandle, TimerKind)> {
        let position = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.handle))
            .map(|(i, _)| i)?;

        let timer = &mut self.timers[position];
        self.now = self.now.max(timer.due);
        let fired = (timer.handle, timer.kind);
        match timer.interval {
            Some(interval) => timer.due += interval,
            None => {
                self.timers.swap_remove(position);
            }
        }
        Some(fired)
    }

    /// Move time forward to `to` without firing anything.
    pub fn advance_to(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }
}
