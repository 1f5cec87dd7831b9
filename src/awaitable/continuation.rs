//! Continuation references.

use core::fmt;
use std::task::{Context, Waker};

/// A resumption reference to the frame that is waiting on something.
///
/// A continuation does not own the frame it points at; it only knows how to
/// get it resumed. It wraps the [`Waker`] of the awaiting frame, so resuming
/// a continuation asks whoever drives that frame to poll it again.
#[derive(Clone)]
pub struct Continuation {
    waker: Waker,
}

impl Continuation {
    /// Creates a continuation from a waker.
    #[must_use]
    pub const fn new(waker: Waker) -> Self {
        Self { waker }
    }

    /// Captures the continuation of the frame currently being polled.
    #[must_use]
    pub fn from_context(cx: &Context<'_>) -> Self {
        Self::new(cx.waker().clone())
    }

    /// A continuation that resumes nothing.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(Waker::noop().clone())
    }

    /// Resumes the referenced frame, consuming the continuation.
    pub fn resume(self) {
        self.waker.wake();
    }

    /// Resumes the referenced frame without consuming the continuation.
    pub fn resume_by_ref(&self) {
        self.waker.wake_by_ref();
    }

    /// Returns the underlying waker.
    #[must_use]
    pub const fn waker(&self) -> &Waker {
        &self.waker
    }

    /// Returns true if both continuations resume the same frame.
    #[must_use]
    pub fn resumes_same_frame(&self, other: &Self) -> bool {
        self.waker.will_wake(&other.waker)
    }
}

impl From<Waker> for Continuation {
    fn from(waker: Waker) -> Self {
        Self::new(waker)
    }
}

impl fmt::Debug for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuation").finish_non_exhaustive()
    }
}
