//! The lazy task handle.

use core::fmt;
use std::future::Future;
use std::task::Waker;

use super::frame::Frame;
use super::awaiters::WhenReady;
use crate::awaitable::{Continuation, Suspend};
use crate::error::{Error, Result};
use crate::types::{TaskId, TaskState};

/// A deferred computation producing `Result<T>`.
///
/// Constructing a task never runs its body. The body starts the first time
/// the task is awaited (or [`resume`](Self::resume)d) and from then on runs
/// until its next suspension point. When it completes, the result is stored
/// in the task and the awaiting frame, if any, is resumed.
///
/// Awaiting a task by value yields its `Result<T>`. Awaiting `&mut Task`
/// yields a clone of the result and leaves it in place.
///
/// # Example
///
/// ```
/// use lazy_task::{sync_wait, Task};
///
/// let leaf: Task<'_, u32> = Task::new(async { Ok(1) });
/// let root = Task::new(async move { Ok(leaf.await? + 1) });
/// assert_eq!(sync_wait(root).unwrap(), 2);
/// ```
///
/// # Nesting depth
///
/// An awaited task is polled from inside the body that awaits it, so every
/// resumption of a chain passes through each of its levels on the resuming
/// thread's stack. Chains a thousand levels deep fit in an 8 MiB stack; run
/// deeper chains on a thread with a larger stack or flatten them into a loop.
pub struct Task<'a, T = ()> {
    frame: Option<Box<Frame<'a, T>>>,
}

impl<'a, T> Task<'a, T> {
    /// Creates a task from its body. The body does not run yet.
    pub fn new<F>(body: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'a,
    {
        let frame = Frame::new(Box::pin(body));
        crate::trace!(task_id = %frame.id(), "task created");
        Self {
            frame: Some(Box::new(frame)),
        }
    }

    /// Creates a task without a computation behind it.
    ///
    /// An empty task is always ready; awaiting it yields
    /// [`Error::BrokenTask`].
    #[must_use]
    pub const fn empty() -> Self {
        Self { frame: None }
    }

    /// Returns the task id, or `None` for an empty task.
    #[must_use]
    pub fn id(&self) -> Option<TaskId> {
        self.frame.as_ref().map(|frame| frame.id())
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> TaskState {
        self.frame
            .as_ref()
            .map_or(TaskState::Empty, |frame| frame.state())
    }

    /// Returns true if the task holds no frame.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.frame.is_none()
    }

    /// Returns true if there is nothing left to run: the task is empty or its
    /// body completed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.frame.as_ref().is_none_or(|frame| frame.is_completed())
    }

    /// Resumes the body once and returns the state it stopped in.
    ///
    /// The body is polled with the waker of the awaiting frame if one is
    /// bound. If this resumption completes the body, that frame is resumed.
    pub fn resume(&mut self) -> Result<TaskState> {
        let frame = self.frame.as_deref_mut().ok_or(Error::BrokenTask)?;
        let waker = frame
            .continuation()
            .map_or_else(|| Waker::noop().clone(), |c| c.waker().clone());

        if frame.resume(&waker)?.is_ready() {
            if let Some(continuation) = frame.take_continuation() {
                continuation.resume();
            }
        }
        Ok(frame.state())
    }

    /// Borrows the result.
    ///
    /// Returns [`Error::NotCompleted`] while the body is still running and
    /// the stored error if the body failed.
    pub fn result(&self) -> Result<&T> {
        self.frame
            .as_ref()
            .ok_or(Error::BrokenTask)?
            .result()
            .get()
    }

    /// Moves the result out. A value can be taken once; an error is returned
    /// on every call.
    pub fn take_result(&mut self) -> Result<T> {
        self.frame
            .as_deref_mut()
            .ok_or(Error::BrokenTask)?
            .result_mut()
            .take()
    }

    /// Consumes the task and returns its result.
    pub fn into_result(mut self) -> Result<T> {
        self.take_result()
    }

    /// Moves the task out, leaving an empty task behind.
    #[must_use]
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Returns an awaiter that completes with the task without consuming its
    /// result.
    pub fn when_ready(&mut self) -> WhenReady<'_, 'a, T> {
        WhenReady::new(self)
    }

    /// Suspension step used by the task awaiters.
    ///
    /// Binds `continuation` and resumes the body with its waker. If the body
    /// completes during this resumption, control goes straight back to the
    /// awaiting frame and the continuation is consumed here.
    pub(crate) fn suspend_on(&mut self, continuation: Continuation) -> Suspend {
        let Some(frame) = self.frame.as_deref_mut() else {
            return Suspend::Resume;
        };
        let waker = continuation.waker().clone();
        frame.bind_continuation(continuation);

        match frame.resume(&waker) {
            Ok(poll) if poll.is_pending() => Suspend::Suspended,
            Ok(_) => {
                drop(frame.take_continuation());
                Suspend::Resume
            }
            Err(_) => Suspend::Resume,
        }
    }
}

impl<T> Default for Task<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> fmt::Debug for Task<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id())
            .field("state", &self.state())
            .finish()
    }
}
