//! One-shot timers and the scheduling capability injected into widgets.
//!
//! Widgets never sleep or spawn. They ask a [`Scheduler`] for a one-shot
//! timer and get back a [`TimerId`]; the shell pumps
//! [`TimerQueue::process_expired`] from its event loop and routes every fired
//! id back to the widget that owns it. Cancelling is a matter of calling
//! [`Scheduler::cancel`] with the id.
//!
//! Time comes from a [`Clock`]. [`SystemClock`] reads the monotonic clock;
//! [`ManualClock`] only moves when told to, which keeps timer-driven
//! behaviour deterministic in tests.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use horizon_combobox_core::{ManualClock, Scheduler, SharedTimerQueue};
//!
//! let clock = Arc::new(ManualClock::new());
//! let timers = SharedTimerQueue::new(clock.clone());
//!
//! let id = timers.schedule_once(Duration::from_millis(500));
//! assert!(timers.process_expired().is_empty());
//!
//! clock.advance(Duration::from_millis(500));
//! assert_eq!(timers.process_expired(), vec![id]);
//! ```

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::TimerError;
use crate::logging::{span_names, targets};

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// A source of monotonic time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// A [`Clock`] backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A [`Clock`] that only advances when told to.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Mutex<Duration>,
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        *self.elapsed.lock() += by;
    }

    /// Time elapsed since the clock was created.
    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.elapsed.lock()
    }
}

/// The scheduling capability handed to widgets.
///
/// Implementations must be cheap to call from an input handler; none of
/// these methods may block.
pub trait Scheduler: Send + Sync {
    /// The scheduler's notion of "now".
    fn now(&self) -> Instant;

    /// Schedule a one-shot timer that fires after `delay`.
    fn schedule_once(&self, delay: Duration) -> TimerId;

    /// Cancel a pending timer.
    ///
    /// Fails if the timer already fired or was already cancelled.
    fn cancel(&self, id: TimerId) -> Result<(), TimerError>;

    /// Check if a timer is still pending.
    fn is_active(&self, id: TimerId) -> bool;
}

/// An entry in the timer queue (min-heap by fire time, FIFO on ties).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Instant,
    sequence: u64,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time && self.sequence == other.sequence
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .fire_time
            .cmp(&self.fire_time)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Manages pending one-shot timers.
pub struct TimerQueue {
    clock: Arc<dyn Clock>,
    /// Pending timers and their fire times.
    timers: SlotMap<TimerId, Instant>,
    /// Priority queue of pending timer fires (min-heap by fire time).
    queue: BinaryHeap<TimerQueueEntry>,
    next_sequence: u64,
}

impl TimerQueue {
    /// Create a new timer queue driven by `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    /// Create a timer queue driven by the system clock.
    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    /// The current instant according to this queue's clock.
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Start a one-shot timer that fires after the specified duration.
    ///
    /// Returns the timer ID that can be used to cancel the timer.
    pub fn start_one_shot(&mut self, duration: Duration) -> TimerId {
        let fire_time = self.clock.now() + duration;
        let id = self.timers.insert(fire_time);
        self.queue.push(TimerQueueEntry {
            id,
            fire_time,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;

        tracing::trace!(target: targets::TIMER, ?id, ?duration, "timer scheduled");
        id
    }

    /// Stop and remove a timer.
    pub fn stop(&mut self, id: TimerId) -> Result<(), TimerError> {
        match self.timers.remove(id) {
            Some(_) => {
                tracing::trace!(target: targets::TIMER, ?id, "timer cancelled");
                Ok(())
            }
            None => Err(TimerError::InvalidTimerId(id)),
        }
    }

    /// Check if a timer is currently pending.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Get the duration until the next timer fires, if any.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        self.discard_stale();
        let now = self.clock.now();
        self.queue
            .peek()
            .map(|entry| entry.fire_time.saturating_duration_since(now))
    }

    /// Remove every timer whose fire time has been reached.
    ///
    /// Returns the ids of the fired timers in fire order.
    pub fn process_expired(&mut self) -> Vec<TimerId> {
        let _span = tracing::trace_span!(span_names::TIMER).entered();
        let now = self.clock.now();
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek().copied() {
            if entry.fire_time > now {
                break;
            }
            self.queue.pop();

            // Cancelled timers leave their heap entry behind.
            if self.timers.remove(entry.id).is_some() {
                tracing::trace!(target: targets::TIMER, id = ?entry.id, "timer fired");
                fired.push(entry.id);
            }
        }

        fired
    }

    /// Get the number of pending timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    fn discard_stale(&mut self) {
        while let Some(entry) = self.queue.peek() {
            if self.timers.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }
    }
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::with_system_clock()
    }
}

/// A thread-safe wrapper around [`TimerQueue`] that implements [`Scheduler`].
pub struct SharedTimerQueue {
    inner: Mutex<TimerQueue>,
}

impl SharedTimerQueue {
    /// Create a shared queue driven by `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(TimerQueue::new(clock)),
        }
    }

    /// Create a shared queue driven by the system clock.
    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.inner.lock().time_until_next()
    }

    pub fn process_expired(&self) -> Vec<TimerId> {
        self.inner.lock().process_expired()
    }

    pub fn active_count(&self) -> usize {
        self.inner.lock().active_count()
    }
}

impl Default for SharedTimerQueue {
    fn default() -> Self {
        Self::with_system_clock()
    }
}

impl Scheduler for SharedTimerQueue {
    fn now(&self) -> Instant {
        self.inner.lock().now()
    }

    fn schedule_once(&self, delay: Duration) -> TimerId {
        self.inner.lock().start_one_shot(delay)
    }

    fn cancel(&self, id: TimerId) -> Result<(), TimerError> {
        self.inner.lock().stop(id)
    }

    fn is_active(&self, id: TimerId) -> bool {
        self.inner.lock().is_active(id)
    }
}
