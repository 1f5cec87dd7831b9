//! Blocking bridge from synchronous callers into task chains.
//!
//! [`sync_wait`] wraps an awaitable in a root frame, starts it, and parks the
//! calling thread on a [`CompletionNotifier`] between resumptions. The root
//! frame is polled with the notifier as its waker, so every wake-up inside the
//! chain unparks the caller, which then resumes the root. When the root
//! completes it sets the notifier one final time and the caller collects the
//! stored result.

use core::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};

use crate::awaitable::{AwaitResult, IntoAwaiter, co_await};
use crate::error::{Error, Result};
use crate::sync::CompletionNotifier;
use crate::types::{ResultSlot, TaskId};

type RootBody<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Root frame driven by a blocking caller.
///
/// The root owns the awaited value and stores whatever awaiting it produced.
/// It does nothing until [`start`](Self::start) is called.
pub struct SyncWaitTask<'a, T> {
    id: TaskId,
    body: Option<RootBody<'a, T>>,
    result: ResultSlot<T>,
    notifier: Option<Arc<CompletionNotifier>>,
}

/// Builds the root frame for `awaitable` without running anything.
pub fn make_sync_wait_task<'a, A>(awaitable: A) -> SyncWaitTask<'a, AwaitResult<A>>
where
    A: IntoAwaiter,
    A::Awaiter: 'a,
{
    SyncWaitTask {
        id: TaskId::next(),
        body: Some(Box::pin(co_await(awaitable))),
        result: ResultSlot::new(),
        notifier: None,
    }
}

impl<T> SyncWaitTask<'_, T> {
    /// Returns the root id.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Binds `notifier` and resumes the root for the first time.
    ///
    /// The notifier is set whenever the root needs another resumption and
    /// once more when it completes.
    pub fn start(&mut self, notifier: Arc<CompletionNotifier>) -> Result<()> {
        if self.notifier.is_some() {
            return Err(Error::AlreadyStarted);
        }
        crate::debug!(task_id = %self.id, "sync-wait root started");
        self.notifier = Some(notifier);
        self.resume().map(drop)
    }

    /// Resumes the root once. Returns true if it completed.
    pub fn resume(&mut self) -> Result<bool> {
        let notifier = self.notifier.clone().ok_or(Error::NotStarted)?;
        if self.result.is_filled() {
            return Err(Error::ResumedAfterCompletion);
        }
        let body = self.body.as_mut().ok_or(Error::BrokenTask)?;

        let waker = Waker::from(Arc::clone(&notifier));
        let mut cx = Context::from_waker(&waker);
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| body.as_mut().poll(&mut cx))) {
            Ok(Poll::Pending) => return Ok(false),
            Ok(Poll::Ready(value)) => Ok(value),
            Err(payload) => Err(Error::from_panic(payload)),
        };

        self.body = None;
        crate::debug!(
            task_id = %self.id,
            panicked = outcome.is_err(),
            "sync-wait root completed"
        );
        self.result.set(outcome);
        notifier.set();
        Ok(true)
    }

    /// Returns true once the root completed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.result.is_filled()
    }

    /// Moves the result out. Fails with [`Error::NotCompleted`] before
    /// completion.
    pub fn take_result(&mut self) -> Result<T> {
        self.result.take()
    }

    /// Consumes the root and returns its result.
    pub fn result(mut self) -> Result<T> {
        self.take_result()
    }
}

impl<T> fmt::Debug for SyncWaitTask<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncWaitTask")
            .field("id", &self.id)
            .field("started", &self.notifier.is_some())
            .field("complete", &self.is_complete())
            .finish_non_exhaustive()
    }
}

/// Blocks the calling thread until `awaitable` completes and returns the
/// result of awaiting it.
///
/// A panic raised while awaiting is reported as [`Error::Panicked`].
pub fn try_sync_wait<'a, A>(awaitable: A) -> Result<AwaitResult<A>>
where
    A: IntoAwaiter,
    A::Awaiter: 'a,
{
    let notifier = Arc::new(CompletionNotifier::new());
    let mut root = make_sync_wait_task(awaitable);
    root.start(Arc::clone(&notifier))?;

    loop {
        notifier.wait();
        if root.is_complete() {
            break;
        }
        notifier.reset();
        crate::trace!(task_id = %root.id(), "sync-wait root woken");
        root.resume()?;
    }
    root.result()
}

/// Blocks the calling thread until `awaitable` completes and returns the
/// result of awaiting it.
///
/// Awaiting a [`Task`](crate::Task) yields its `Result`, so computation
/// errors come back unchanged.
///
/// # Panics
///
/// A panic raised while awaiting is resumed on the calling thread with its
/// original payload.
///
/// # Example
///
/// ```
/// use lazy_task::{sync_wait, Error, Task};
///
/// let failing: Task<'_, u8> = Task::new(async { Err(Error::msg("nope")) });
/// let err = sync_wait(failing).unwrap_err();
/// assert_eq!(err.to_string(), "nope");
/// ```
pub fn sync_wait<'a, A>(awaitable: A) -> AwaitResult<A>
where
    A: IntoAwaiter,
    A::Awaiter: 'a,
{
    match try_sync_wait(awaitable) {
        Ok(value) => value,
        Err(Error::Panicked { message, payload }) => {
            panic::resume_unwind(payload.take().unwrap_or_else(|| Box::new(message)))
        }
        Err(err) => unreachable!("sync-wait root violated its own protocol: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::awaitable::{from_future, ready};
    use crate::runtime::yield_now;
    use crate::task::Task;
    use crate::test_utils::init_test_logging;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    fn init_test(test_name: &str) {
        init_test_logging();
        crate::test_phase!(test_name);
    }

    /// Completes after another thread flips a flag and wakes the poller.
    struct WokenLater {
        done: Arc<AtomicBool>,
        spawned: bool,
    }

    impl Future for WokenLater {
        type Output = &'static str;

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
            if self.done.load(Ordering::SeqCst) {
                return Poll::Ready("woken");
            }
            if !self.spawned {
                self.spawned = true;
                let done = Arc::clone(&self.done);
                let waker = cx.waker().clone();
                thread::spawn(move || {
                    thread::sleep(Duration::from_millis(10));
                    done.store(true, Ordering::SeqCst);
                    waker.wake();
                });
            }
            Poll::Pending
        }
    }

    fn explode() -> u8 {
        panic!("root blew up")
    }

    fn explode_with_number() -> u8 {
        panic::panic_any(17_u64)
    }

    #[test]
    fn ready_values_complete_on_start() {
        init_test("ready_values_complete_on_start");
        let notifier = Arc::new(CompletionNotifier::new());
        let mut root = make_sync_wait_task(ready(11));
        assert!(!root.is_complete());
        root.start(Arc::clone(&notifier)).unwrap();
        assert!(root.is_complete());
        assert!(notifier.is_set());
        assert_eq!(root.result().ok(), Some(11));
        crate::test_complete!("ready_values_complete_on_start");
    }

    #[test]
    fn protocol_misuse_is_reported() {
        init_test("protocol_misuse_is_reported");
        let mut root = make_sync_wait_task(yield_now());
        assert!(matches!(root.resume(), Err(Error::NotStarted)));
        assert!(matches!(root.take_result(), Err(Error::NotCompleted)));

        let notifier = Arc::new(CompletionNotifier::new());
        root.start(Arc::clone(&notifier)).unwrap();
        assert!(!root.is_complete());
        assert!(matches!(
            root.start(Arc::clone(&notifier)),
            Err(Error::AlreadyStarted)
        ));

        assert_eq!(root.resume().ok(), Some(true));
        assert!(matches!(root.resume(), Err(Error::ResumedAfterCompletion)));
        crate::test_complete!("protocol_misuse_is_reported");
    }

    #[test]
    fn wakes_from_other_threads_drive_the_root() {
        init_test("wakes_from_other_threads_drive_the_root");
        let future = WokenLater {
            done: Arc::new(AtomicBool::new(false)),
            spawned: false,
        };
        let task: Task<'_, &str> = Task::new(async move {
            let value = co_await(from_future(future)).await;
            Ok(value)
        });
        let value = sync_wait(task);
        crate::assert_with_log!(
            value.as_deref().ok() == Some("woken"),
            "root resumed after cross-thread wake",
            Some("woken"),
            value.as_deref().ok()
        );
        crate::test_complete!("wakes_from_other_threads_drive_the_root");
    }

    #[test]
    fn task_errors_pass_through_unchanged() {
        init_test("task_errors_pass_through_unchanged");
        let original = Error::msg("leaf failed");
        let leaf_error = original.clone();
        let leaf: Task<'_, u8> = Task::new(async move { Err(leaf_error) });
        let root: Task<'_, u8> = Task::new(async move { leaf.await });
        let err = sync_wait(root).unwrap_err();
        assert!(err.same_payload(&original));
        crate::test_complete!("task_errors_pass_through_unchanged");
    }

    #[test]
    fn try_sync_wait_reports_panics() {
        init_test("try_sync_wait_reports_panics");
        let task: Task<'_, ()> = Task::new(async {
            yield_now().await;
            Ok(())
        });
        assert!(matches!(try_sync_wait(task), Ok(Ok(()))));

        let err = try_sync_wait(from_future(async { explode() })).unwrap_err();
        let is_panic = matches!(&err, Error::Panicked { message, .. } if message == "root blew up");
        crate::assert_with_log!(is_panic, "panic captured", "root blew up", err);
        crate::test_complete!("try_sync_wait_reports_panics");
    }

    #[test]
    fn sync_wait_resumes_the_original_payload() {
        init_test("sync_wait_resumes_the_original_payload");
        let escaped = panic::catch_unwind(|| {
            sync_wait(from_future(async { explode_with_number() }))
        });
        let payload = escaped.unwrap_err();
        let value = payload.downcast_ref::<u64>().copied();
        crate::assert_with_log!(value == Some(17), "payload type survives", Some(17), value);
        crate::test_complete!("sync_wait_resumes_the_original_payload");
    }

    #[test]
    #[should_panic(expected = "root blew up")]
    fn sync_wait_resumes_panics_on_the_caller() {
        sync_wait(from_future(async { explode() }));
    }
}
