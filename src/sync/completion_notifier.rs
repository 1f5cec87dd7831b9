//! One-shot, resettable completion signal.
//!
//! A [`CompletionNotifier`] is a boolean flag guarded by a mutex plus a
//! condition variable. [`set`](CompletionNotifier::set) flips the flag and
//! wakes every waiter; [`wait`](CompletionNotifier::wait) parks until the flag
//! is set; [`reset`](CompletionNotifier::reset) re-arms it for the next cycle.
//!
//! The notifier also implements [`Wake`], so it can serve directly as the
//! waker of a root frame: any wake-up of the frame sets the flag.
//!
//! # Example
//!
//! ```
//! use lazy_task::CompletionNotifier;
//! use std::sync::Arc;
//!
//! let notifier = Arc::new(CompletionNotifier::new());
//! let signal = Arc::clone(&notifier);
//! let worker = std::thread::spawn(move || signal.set());
//!
//! notifier.wait();
//! assert!(notifier.is_set());
//! worker.join().unwrap();
//! ```

use std::sync::Arc;
use std::task::Wake;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// One-shot, resettable, thread-safe signal.
#[derive(Debug, Default)]
pub struct CompletionNotifier {
    is_set: Mutex<bool>,
    cv: Condvar,
}

impl CompletionNotifier {
    /// Creates an unset notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_state(false)
    }

    /// Creates a notifier with the given initial state.
    #[must_use]
    pub const fn with_state(initial_set: bool) -> Self {
        Self {
            is_set: Mutex::new(initial_set),
            cv: Condvar::new(),
        }
    }

    /// Sets the flag and wakes every waiter. Setting twice is a no-op.
    pub fn set(&self) {
        let mut is_set = self.is_set.lock();
        *is_set = true;
        self.cv.notify_all();
    }

    /// Clears the flag so the notifier can be waited on again.
    pub fn reset(&self) {
        *self.is_set.lock() = false;
    }

    /// Returns the current flag value without blocking.
    #[must_use]
    pub fn is_set(&self) -> bool {
        *self.is_set.lock()
    }

    /// Blocks until the flag is set.
    pub fn wait(&self) {
        let mut is_set = self.is_set.lock();
        while !*is_set {
            self.cv.wait(&mut is_set);
        }
    }

    /// Blocks until the flag is set or `timeout` elapses.
    ///
    /// Returns true if the flag was set. A timeout too large to express as a
    /// deadline waits without one.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            self.wait();
            return true;
        };
        let mut is_set = self.is_set.lock();
        while !*is_set {
            if self.cv.wait_until(&mut is_set, deadline).timed_out() {
                break;
            }
        }
        *is_set
    }
}

impl Wake for CompletionNotifier {
    fn wake(self: Arc<Self>) {
        self.set();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.set();
    }
}
