//! Blocking future handles and their producer side.
//!
//! An [`AsyncFuture`] is the consumer end of a one-shot result produced
//! somewhere else, usually on a pool thread. It offers the familiar blocking
//! API (`is_ready`, `wait`, `wait_for`, `get`) and also implements
//! [`Awaiter`], so a task body can await it directly. Awaiting does not
//! register a waker: the awaiting thread blocks in `await_suspend` until the
//! result arrives and then resumes its frame inline.

use core::fmt;
use std::future::IntoFuture;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::awaitable::{Awaited, Awaiter, Continuation, Suspend};
use crate::error::{Error, Result};
use crate::types::ResultSlot;

/// Outcome of [`AsyncFuture::wait_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FutureStatus {
    /// The result is available.
    Ready,
    /// The timeout elapsed first.
    Timeout,
}

struct Shared<T> {
    slot: Mutex<ResultSlot<T>>,
    ready: Condvar,
}

impl<T> Shared<T> {
    const fn new() -> Self {
        Self {
            slot: Mutex::new(ResultSlot::new()),
            ready: Condvar::new(),
        }
    }

    fn resolve(&self, outcome: Result<T>) {
        let mut slot = self.slot.lock();
        slot.set(outcome);
        self.ready.notify_all();
    }
}

/// Producer side of an [`AsyncFuture`].
///
/// Dropping a promise that was never fulfilled resolves its future with
/// [`Error::BrokenPromise`].
pub struct Promise<T> {
    shared: Option<Arc<Shared<T>>>,
}

impl<T> Promise<T> {
    /// Resolves the future with a value.
    pub fn set_value(mut self, value: T) {
        self.fulfil(Ok(value));
    }

    /// Resolves the future with an error.
    pub fn set_error(mut self, error: Error) {
        self.fulfil(Err(error));
    }

    /// Resolves the future with `outcome`.
    pub fn set(mut self, outcome: Result<T>) {
        self.fulfil(outcome);
    }

    fn fulfil(&mut self, outcome: Result<T>) {
        if let Some(shared) = self.shared.take() {
            shared.resolve(outcome);
        }
    }
}

impl<T> Drop for Promise<T> {
    fn drop(&mut self) {
        if self.shared.is_some() {
            crate::debug!("promise dropped without a result");
            self.fulfil(Err(Error::BrokenPromise));
        }
    }
}

impl<T> fmt::Debug for Promise<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise")
            .field("fulfilled", &self.shared.is_none())
            .finish()
    }
}

/// Handle to a result produced elsewhere.
pub struct AsyncFuture<T> {
    shared: Arc<Shared<T>>,
}

/// Creates a connected promise/future pair.
///
/// # Example
///
/// ```
/// use lazy_task::promise;
///
/// let (promise, future) = promise();
/// std::thread::spawn(move || promise.set_value(5_u32));
/// assert_eq!(future.get().unwrap(), 5);
/// ```
#[must_use]
pub fn promise<T>() -> (Promise<T>, AsyncFuture<T>) {
    let shared = Arc::new(Shared::new());
    (
        Promise {
            shared: Some(Arc::clone(&shared)),
        },
        AsyncFuture { shared },
    )
}

impl<T> AsyncFuture<T> {
    /// Returns true if the result is available (zero-timeout poll).
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.shared.slot.lock().is_filled()
    }

    /// Blocks until the result is available.
    pub fn wait(&self) {
        let mut slot = self.shared.slot.lock();
        while !slot.is_filled() {
            self.shared.ready.wait(&mut slot);
        }
    }

    /// Blocks until the result is available or `timeout` elapses.
    ///
    /// A timeout too large to express as a deadline waits without one.
    pub fn wait_for(&self, timeout: Duration) -> FutureStatus {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            self.wait();
            return FutureStatus::Ready;
        };
        let mut slot = self.shared.slot.lock();
        while !slot.is_filled() {
            if self.shared.ready.wait_until(&mut slot, deadline).timed_out() {
                break;
            }
        }
        if slot.is_filled() {
            FutureStatus::Ready
        } else {
            FutureStatus::Timeout
        }
    }

    /// Blocks until the result is available and returns it.
    pub fn get(self) -> Result<T> {
        self.wait();
        self.shared.slot.lock().take()
    }
}

impl<T> Awaiter for AsyncFuture<T> {
    type Output = Result<T>;

    fn await_ready(&self) -> bool {
        self.is_ready()
    }

    fn await_suspend(self: Pin<&mut Self>, _continuation: Continuation) -> Suspend {
        self.wait();
        Suspend::Resume
    }

    fn await_resume(self: Pin<&mut Self>) -> Result<T> {
        self.shared.slot.lock().take()
    }
}

impl<T> IntoFuture for AsyncFuture<T> {
    type Output = Result<T>;
    type IntoFuture = Awaited<Self>;

    fn into_future(self) -> Self::IntoFuture {
        Awaited::new(self)
    }
}

impl<T> fmt::Debug for AsyncFuture<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncFuture")
            .field("ready", &self.is_ready())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_logging;
    use std::thread;

    fn init_test(test_name: &str) {
        init_test_logging();
        crate::test_phase!(test_name);
    }

    #[test]
    fn value_crosses_threads() {
        init_test("value_crosses_threads");
        let (promise, future) = promise();
        assert!(!future.is_ready());
        let producer = thread::spawn(move || promise.set_value(String::from("remote")));
        future.wait();
        assert!(future.is_ready());
        assert_eq!(future.get().ok().as_deref(), Some("remote"));
        producer.join().unwrap();
        crate::test_complete!("value_crosses_threads");
    }

    #[test]
    fn wait_for_times_out_then_succeeds() {
        init_test("wait_for_times_out_then_succeeds");
        let (promise, future) = promise::<u8>();
        let status = future.wait_for(Duration::from_millis(5));
        crate::assert_with_log!(
            status == FutureStatus::Timeout,
            "unresolved future times out",
            FutureStatus::Timeout,
            status
        );
        promise.set_value(1);
        assert_eq!(future.wait_for(Duration::ZERO), FutureStatus::Ready);
        crate::test_complete!("wait_for_times_out_then_succeeds");
    }

    #[test]
    fn unbounded_wait_for_does_not_overflow() {
        init_test("unbounded_wait_for_does_not_overflow");
        let (resolved_producer, resolved) = promise::<u8>();
        resolved_producer.set_value(1);
        assert_eq!(resolved.wait_for(Duration::MAX), FutureStatus::Ready);

        let (late_producer, pending) = promise::<u8>();
        let producer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            late_producer.set_value(2);
        });
        let status = pending.wait_for(Duration::MAX);
        crate::assert_with_log!(
            status == FutureStatus::Ready,
            "released by the producer",
            FutureStatus::Ready,
            status
        );
        assert_eq!(pending.get().ok(), Some(2));
        producer.join().unwrap();
        crate::test_complete!("unbounded_wait_for_does_not_overflow");
    }

    #[test]
    fn errors_are_delivered_verbatim() {
        init_test("errors_are_delivered_verbatim");
        let (promise, future) = promise::<()>();
        let error = Error::msg("remote failure");
        promise.set_error(error.clone());
        assert!(future.get().unwrap_err().same_payload(&error));
        crate::test_complete!("errors_are_delivered_verbatim");
    }

    #[test]
    fn dropped_promise_breaks_the_future() {
        init_test("dropped_promise_breaks_the_future");
        let (promise, future) = promise::<u8>();
        drop(promise);
        assert!(future.is_ready());
        assert!(matches!(future.get(), Err(Error::BrokenPromise)));
        crate::test_complete!("dropped_promise_breaks_the_future");
    }

    #[test]
    fn awaiting_blocks_then_resumes_inline() {
        init_test("awaiting_blocks_then_resumes_inline");
        let (promise, future) = promise();
        let mut awaited = Box::pin(future.into_future());
        assert!(!awaited.is_ready());

        let producer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            promise.set_value(21_u32);
        });
        let mut cx = std::task::Context::from_waker(std::task::Waker::noop());
        let polled = std::future::Future::poll(awaited.as_mut(), &mut cx);
        assert!(matches!(polled, std::task::Poll::Ready(Ok(21))));
        producer.join().unwrap();
        crate::test_complete!("awaiting_blocks_then_resumes_inline");
    }
}
