//! A bare suspension point.

use std::future::IntoFuture;
use std::pin::Pin;

use crate::awaitable::{Awaited, Awaiter, Continuation, Suspend};

/// Awaiter that suspends once and immediately hands control back to the
/// awaiting frame's continuation.
#[derive(Debug)]
pub struct YieldNow {
    yielded: bool,
}

impl Awaiter for YieldNow {
    type Output = ();

    fn await_ready(&self) -> bool {
        self.yielded
    }

    fn await_suspend(self: Pin<&mut Self>, continuation: Continuation) -> Suspend {
        self.get_mut().yielded = true;
        Suspend::Transfer(continuation)
    }

    fn await_resume(self: Pin<&mut Self>) {}
}

impl IntoFuture for YieldNow {
    type Output = ();
    type IntoFuture = Awaited<Self>;

    fn into_future(self) -> Self::IntoFuture {
        Awaited::new(self)
    }
}

/// Suspends the current task once, yielding control to whoever resumed it.
#[must_use]
pub fn yield_now() -> YieldNow {
    YieldNow { yielded: false }
}
