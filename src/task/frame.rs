//! Suspended computation frames.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{Context, Poll, Waker};

use crate::awaitable::Continuation;
use crate::error::{Error, Result};
use crate::types::{ResultSlot, TaskId, TaskState};

/// Boxed task body.
pub(crate) type Body<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// The state of a deferred computation between suspension points.
///
/// A frame is owned by exactly one [`Task`](super::Task). The body is dropped
/// as soon as it completes so that everything it captured (child tasks
/// included) is released before the result is read.
pub(crate) struct Frame<'a, T> {
    id: TaskId,
    body: Option<Body<'a, T>>,
    state: TaskState,
    result: ResultSlot<T>,
    continuation: Option<Continuation>,
}

impl<'a, T> Frame<'a, T> {
    pub(crate) fn new(body: Body<'a, T>) -> Self {
        Self {
            id: TaskId::next(),
            body: Some(body),
            state: TaskState::Unstarted,
            result: ResultSlot::new(),
            continuation: None,
        }
    }

    pub(crate) const fn id(&self) -> TaskId {
        self.id
    }

    pub(crate) const fn state(&self) -> TaskState {
        self.state
    }

    pub(crate) const fn is_completed(&self) -> bool {
        matches!(self.state, TaskState::Completed)
    }

    pub(crate) const fn result(&self) -> &ResultSlot<T> {
        &self.result
    }

    pub(crate) fn result_mut(&mut self) -> &mut ResultSlot<T> {
        &mut self.result
    }

    pub(crate) fn continuation(&self) -> Option<&Continuation> {
        self.continuation.as_ref()
    }

    /// Records the frame to resume on completion.
    ///
    /// The continuation is bound once; a later binding only refreshes the
    /// waker when the awaiting frame is now driven by a different one.
    pub(crate) fn bind_continuation(&mut self, continuation: Continuation) {
        match &self.continuation {
            Some(current) if current.resumes_same_frame(&continuation) => {}
            _ => self.continuation = Some(continuation),
        }
    }

    pub(crate) fn take_continuation(&mut self) -> Option<Continuation> {
        self.continuation.take()
    }

    /// Runs the body until its next suspension point or until it completes.
    ///
    /// Returns `Poll::Ready(())` once the frame is terminal. Panics raised by
    /// the body are captured into the result slot.
    pub(crate) fn resume(&mut self, waker: &Waker) -> Result<Poll<()>> {
        if self.is_completed() {
            crate::debug!(task_id = %self.id, "resume rejected: frame already completed");
            return Err(Error::ResumedAfterCompletion);
        }
        let Some(body) = self.body.as_mut() else {
            return Err(Error::BrokenTask);
        };

        crate::trace!(task_id = %self.id, from = %self.state, "resuming task frame");
        self.state = TaskState::Running;

        let mut cx = Context::from_waker(waker);
        let polled = panic::catch_unwind(AssertUnwindSafe(|| body.as_mut().poll(&mut cx)));
        match polled {
            Ok(Poll::Pending) => {
                self.state = TaskState::Suspended;
                crate::trace!(task_id = %self.id, "task frame suspended");
                Ok(Poll::Pending)
            }
            Ok(Poll::Ready(outcome)) => {
                self.complete(outcome);
                Ok(Poll::Ready(()))
            }
            Err(payload) => {
                self.complete(Err(Error::from_panic(payload)));
                Ok(Poll::Ready(()))
            }
        }
    }

    fn complete(&mut self, outcome: Result<T>) {
        self.body = None;
        crate::trace!(
            task_id = %self.id,
            failed = outcome.is_err(),
            "task frame completed"
        );
        self.result.set(outcome);
        self.state = TaskState::Completed;
    }
}

impl<T> Drop for Frame<'_, T> {
    fn drop(&mut self) {
        if self.body.is_some() {
            crate::trace!(task_id = %self.id, state = %self.state, "dropping unfinished task frame");
        }
    }
}
