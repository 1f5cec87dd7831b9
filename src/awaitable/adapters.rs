//! Adapters that lift plain values and foreign futures into the awaiter
//! protocol.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use pin_project::pin_project;

use super::{Awaiter, Continuation, Suspend};

/// An awaiter whose result is available immediately.
#[derive(Debug)]
pub struct Ready<T> {
    value: Option<T>,
}

/// Creates an awaiter that yields `value` without suspending.
pub const fn ready<T>(value: T) -> Ready<T> {
    Ready { value: Some(value) }
}

impl<T> Unpin for Ready<T> {}

impl<T> Awaiter for Ready<T> {
    type Output = T;

    fn await_ready(&self) -> bool {
        true
    }

    fn await_suspend(self: Pin<&mut Self>, _continuation: Continuation) -> Suspend {
        Suspend::Resume
    }

    fn await_resume(self: Pin<&mut Self>) -> T {
        self.get_mut()
            .value
            .take()
            .expect("`Ready` resumed more than once")
    }
}

/// Adapts any [`Future`] into an [`Awaiter`].
///
/// The future is polled from `await_suspend` with the awaiting frame's
/// continuation, so its wake-ups resume that frame.
#[pin_project]
pub struct FromFuture<F: Future> {
    #[pin]
    future: F,
    output: Option<F::Output>,
}

/// Adapts a [`Future`] into an [`Awaiter`].
pub const fn from_future<F: Future>(future: F) -> FromFuture<F> {
    FromFuture {
        future,
        output: None,
    }
}

impl<F: Future> Awaiter for FromFuture<F> {
    type Output = F::Output;

    fn await_ready(&self) -> bool {
        self.output.is_some()
    }

    fn await_suspend(self: Pin<&mut Self>, continuation: Continuation) -> Suspend {
        let this = self.project();
        let mut cx = Context::from_waker(continuation.waker());
        match this.future.poll(&mut cx) {
            Poll::Ready(output) => {
                *this.output = Some(output);
                Suspend::Resume
            }
            Poll::Pending => Suspend::Suspended,
        }
    }

    fn await_resume(self: Pin<&mut Self>) -> F::Output {
        self.project()
            .output
            .take()
            .expect("`FromFuture` resumed before its future completed")
    }
}
