//! Timer collaborator
//!
//! The session arms timers and gets back handles; whoever drives the
//! timer calls `Game::on_timer(handle)` when one fires. `ManualTimer` is
//! a virtual clock for tests and headless runs.

/// Identifies an armed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// Scheduling contract the session depends on
pub trait Timer {
    /// Fire every `interval_ms` until cancelled
    fn schedule_repeating(&mut self, interval_ms: u32) -> TimerHandle;
    /// Fire once after `delay_ms`
    fn schedule_once(&mut self, delay_ms: u32) -> TimerHandle;
    /// Disarm; unknown or already-fired handles are ignored
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone)]
struct Armed {
    handle: TimerHandle,
    due_ms: u64,
    interval_ms: Option<u32>,
}

/// Deterministic virtual clock
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    now_ms: u64,
    next_id: u64,
    armed: Vec<Armed>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of armed timers
    pub fn active(&self) -> usize {
        self.armed.len()
    }

    pub fn is_armed(&self, handle: TimerHandle) -> bool {
        self.armed.iter().any(|a| a.handle == handle)
    }

    /// Interval of a repeating timer
    pub fn interval_of(&self, handle: TimerHandle) -> Option<u32> {
        self.armed
            .iter()
            .find(|a| a.handle == handle)
            .and_then(|a| a.interval_ms)
    }

    /// Pop the earliest timer due at or before `until_ms`.
    ///
    /// The clock moves to its due time; repeating timers are re-armed one
    /// interval later, one-shot timers are removed.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TimerHandle> {
        let index = self
            .armed
            .iter()
            .enumerate()
            .filter(|(_, a)| a.due_ms <= until_ms)
            .min_by_key(|(_, a)| (a.due_ms, a.handle))
            .map(|(i, _)| i)?;

        let due = self.armed[index].due_ms;
        self.now_ms = self.now_ms.max(due);
        let handle = self.armed[index].handle;
        match self.armed[index].interval_ms {
            Some(interval) => self.armed[index].due_ms = due + u64::from(interval.max(1)),
            None => {
                self.armed.swap_remove(index);
            }
        }
        Some(handle)
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn arm(&mut self, delay_ms: u32, interval_ms: Option<u32>) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.armed.push(Armed {
            handle,
            due_ms: self.now_ms + u64::from(delay_ms),
            interval_ms,
        });
        handle
    }
}

impl Timer for ManualTimer {
    fn schedule_repeating(&mut self, interval_ms: u32) -> TimerHandle {
        self.arm(interval_ms, Some(interval_ms))
    }

    fn schedule_once(&mut self, delay_ms: u32) -> TimerHandle {
        self.arm(delay_ms, None)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.armed.retain(|a| a.handle != handle);
    }
}
