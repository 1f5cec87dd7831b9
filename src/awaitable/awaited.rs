//! Future driver for awaiters.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use pin_project::pin_project;

use super::{Awaiter, Continuation, Suspend};

/// A future that drives an [`Awaiter`] through the suspension protocol.
///
/// Every poll is one resumption of the awaiting frame at this suspension
/// point: the ready check runs first, and if it fails the awaiter is asked to
/// suspend again with the frame's current continuation.
#[pin_project]
#[derive(Debug)]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Awaited<A> {
    #[pin]
    awaiter: A,
    done: bool,
}

impl<A: Awaiter> Awaited<A> {
    /// Wraps an awaiter.
    pub const fn new(awaiter: A) -> Self {
        Self {
            awaiter,
            done: false,
        }
    }

    /// Returns true if the result is available without suspending.
    pub fn is_ready(&self) -> bool {
        !self.done && self.awaiter.await_ready()
    }
}

impl<A: Awaiter> Future for Awaited<A> {
    type Output = A::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();
        assert!(!*this.done, "`Awaited` polled after completion");

        if !this.awaiter.await_ready() {
            match this
                .awaiter
                .as_mut()
                .await_suspend(Continuation::from_context(cx))
            {
                Suspend::Resume => {}
                Suspend::Suspended => return Poll::Pending,
                Suspend::Transfer(next) => {
                    next.resume();
                    return Poll::Pending;
                }
            }
        }

        *this.done = true;
        Poll::Ready(this.awaiter.await_resume())
    }
}
