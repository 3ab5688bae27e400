//! Signal/slot system for Horizon Combobox.
//!
//! Signals are how the interaction core talks back to its presentational
//! shell. Every externally observable change (a committed selection, the list
//! opening, a scroll request) is emitted on a [`Signal`], and the shell
//! connects slots that re-render or forward the notification.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Re-entrancy
//!
//! Slots run synchronously on the emitting thread. The connection table is
//! snapshotted before invocation, so a slot may connect, disconnect or emit
//! on the same signal without deadlocking.
//!
//! # Example
//!
//! ```
//! use horizon_combobox_core::Signal;
//!
//! let active_descendant = Signal::<Option<String>>::new();
//!
//! let conn_id = active_descendant.connect(|id| match id {
//!     Some(id) => println!("aria-activedescendant={id}"),
//!     None => println!("aria-activedescendant removed"),
//! });
//!
//! active_descendant.emit(Some("opt-3".to_string()));
//! active_descendant.disconnect(conn_id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    /// The ID remains valid until the connection is explicitly disconnected or
    /// the signal is dropped.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, all connected slots are invoked in connection
/// order with a reference to the provided arguments.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple like `(String, i32)` for multiple arguments.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connection_count())
            .field("blocked", &self.is_blocked())
            .finish()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    ///
    /// # Example
    ///
    /// ```
    /// use horizon_combobox_core::Signal;
    ///
    /// let signal = Signal::<String>::new();
    /// let id = signal.connect(|s| println!("Got: {}", s));
    /// signal.emit("Hello".to_string());
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Connect a slot with automatic disconnection when the guard is dropped.
    ///
    /// The guard borrows the signal, so it cannot outlive it.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<'_, Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard { signal: self, id }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// If the signal is blocked, this does nothing.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        // Snapshot so slots can touch this signal without deadlocking.
        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

/// A connection guard that automatically disconnects when dropped.
///
/// Created via [`Signal::connect_scoped`].
///
/// # Example
///
/// ```
/// use horizon_combobox_core::Signal;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let signal = Signal::<i32>::new();
/// let counter = Arc::new(AtomicI32::new(0));
/// {
///     let counter_clone = counter.clone();
///     let _guard = signal.connect_scoped(move |&n| {
///         counter_clone.fetch_add(n, Ordering::SeqCst);
///     });
///     signal.emit(42);
/// }
/// signal.emit(43);
/// assert_eq!(counter.load(Ordering::SeqCst), 42);
/// ```
#[must_use = "dropping the guard disconnects the slot immediately"]
pub struct ConnectionGuard<'a, Args: 'static> {
    signal: &'a Signal<Args>,
    id: ConnectionId,
}

impl<Args: 'static> ConnectionGuard<'_, Args> {
    /// The id of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args: 'static> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        self.signal.disconnect(self.id);
    }
}

static_assertions::assert_impl_all!(Signal<String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn recorder<T: Clone + Send + Sync + 'static>(signal: &Signal<T>) -> (ConnectionId, Arc<Mutex<Vec<T>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let id = signal.connect(move |value: &T| sink.lock().push(value.clone()));
        (id, log)
    }

    #[test]
    fn test_slots_run_in_connection_order() {
        let open_changed = Signal::<bool>::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in ["render", "announce"] {
            let order = order.clone();
            open_changed.connect(move |&open| order.lock().push((tag, open)));
        }

        open_changed.emit(true);
        assert_eq!(
            *order.lock(),
            vec![("render", true), ("announce", true)]
        );
    }

    #[test]
    fn test_disconnected_slot_stops_receiving() {
        let search = Signal::<String>::new();
        let (id, log) = recorder(&search);

        search.emit("a".into());
        assert!(search.disconnect(id));
        assert!(!search.disconnect(id));
        search.emit("ab".into());

        assert_eq!(*log.lock(), vec!["a".to_string()]);
    }

    #[test]
    fn test_blocked_signal_drops_emissions() {
        let index = Signal::<usize>::new();
        let (_, log) = recorder(&index);

        index.emit(1);
        index.set_blocked(true);
        assert!(index.is_blocked());
        index.emit(2);
        index.set_blocked(false);
        index.emit(3);

        assert_eq!(*log.lock(), vec![1, 3]);
    }

    #[test]
    fn test_disconnect_all() {
        let focus = Signal::<()>::new();
        focus.connect(|_| {});
        focus.connect(|_| {});

        assert_eq!(focus.connection_count(), 2);
        focus.disconnect_all();
        assert_eq!(focus.connection_count(), 0);
    }

    #[test]
    fn test_scoped_connection_ends_with_guard() {
        let open_changed = Signal::<bool>::new();
        let hits = Arc::new(AtomicUsize::new(0));

        {
            let hits = hits.clone();
            let guard = open_changed.connect_scoped(move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            });
            assert_eq!(open_changed.connection_count(), 1);
            let _ = guard.id();
            open_changed.emit(true);
        }

        open_changed.emit(false);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(open_changed.connection_count(), 0);
    }

    #[test]
    fn test_slot_may_emit_again() {
        let countdown = Arc::new(Signal::<u32>::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let weak = Arc::downgrade(&countdown);
        let hits_clone = hits.clone();
        countdown.connect(move |&n| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
            if n > 0
                && let Some(signal) = weak.upgrade()
            {
                signal.emit(n - 1);
            }
        });

        countdown.emit(2);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }
}
