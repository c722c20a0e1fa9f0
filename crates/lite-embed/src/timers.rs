//! Timer APIs
//!
//! `setTimeout` on a virtual page clock. The host advances the clock and
//! runs whatever came due.

/// Timer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

/// Timer entry
#[derive(Debug, Clone)]
struct Timer<T> {
    id: TimerId,
    due_ms: u64,
    task: T,
}

/// Timer manager
#[derive(Debug)]
pub struct TimerManager<T> {
    now_ms: u64,
    next_id: u32,
    timers: Vec<Timer<T>>,
}

impl<T> Default for TimerManager<T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_id: 1,
            timers: Vec::new(),
        }
    }
}

impl<T> TimerManager<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current page time in milliseconds
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Add a timeout
    pub fn set_timeout(&mut self, task: T, delay_ms: u64) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            due_ms: self.now_ms + delay_ms,
            task,
        });
        id
    }

    /// Clear a timer
    pub fn clear(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Move the clock forward and take every task that came due, in due
    /// order (ties in scheduling order)
    pub fn advance(&mut self, ms: u64) -> Vec<T> {
        self.now_ms += ms;
        let now = self.now_ms;

        let (mut ready, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.timers).into_iter().partition(|t| t.due_ms <= now);
        self.timers = pending;

        ready.sort_by_key(|t| (t.due_ms, t.id.0));
        ready.into_iter().map(|t| t.task).collect()
    }

    /// Check if there are pending timers
    pub fn has_pending(&self) -> bool {
        !self.timers.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Milliseconds until the next timer fires
    pub fn time_until_next(&self) -> Option<u64> {
        self.timers
            .iter()
            .map(|t| t.due_ms.saturating_sub(self.now_ms))
            .min()
    }
}
