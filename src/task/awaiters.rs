//! Awaiter implementations for [`Task`].

use std::future::IntoFuture;
use std::pin::Pin;

use super::Task;
use crate::awaitable::{Awaited, Awaiter, Continuation, IntoAwaiter, Suspend};
use crate::error::Result;

/// Awaits a task by value and moves its result out.
#[derive(Debug)]
pub struct TaskAwaiter<'a, T> {
    task: Task<'a, T>,
}

impl<T> Awaiter for TaskAwaiter<'_, T> {
    type Output = Result<T>;

    fn await_ready(&self) -> bool {
        self.task.is_ready()
    }

    fn await_suspend(self: Pin<&mut Self>, continuation: Continuation) -> Suspend {
        self.get_mut().task.suspend_on(continuation)
    }

    fn await_resume(self: Pin<&mut Self>) -> Result<T> {
        self.get_mut().task.take_result()
    }
}

/// Awaits a borrowed task and clones its result.
#[derive(Debug)]
pub struct TaskRefAwaiter<'t, 'a, T> {
    task: &'t mut Task<'a, T>,
}

impl<T: Clone> Awaiter for TaskRefAwaiter<'_, '_, T> {
    type Output = Result<T>;

    fn await_ready(&self) -> bool {
        self.task.is_ready()
    }

    fn await_suspend(self: Pin<&mut Self>, continuation: Continuation) -> Suspend {
        self.get_mut().task.suspend_on(continuation)
    }

    fn await_resume(self: Pin<&mut Self>) -> Result<T> {
        self.task.result().cloned()
    }
}

/// Completes when the task does, leaving its result in place.
///
/// Returned by [`Task::when_ready`].
#[derive(Debug)]
pub struct WhenReady<'t, 'a, T> {
    task: &'t mut Task<'a, T>,
}

impl<'t, 'a, T> WhenReady<'t, 'a, T> {
    pub(crate) fn new(task: &'t mut Task<'a, T>) -> Self {
        Self { task }
    }
}

impl<T> Awaiter for WhenReady<'_, '_, T> {
    type Output = ();

    fn await_ready(&self) -> bool {
        self.task.is_ready()
    }

    fn await_suspend(self: Pin<&mut Self>, continuation: Continuation) -> Suspend {
        self.get_mut().task.suspend_on(continuation)
    }

    fn await_resume(self: Pin<&mut Self>) {}
}

impl<T> IntoFuture for WhenReady<'_, '_, T> {
    type Output = ();
    type IntoFuture = Awaited<Self>;

    fn into_future(self) -> Self::IntoFuture {
        Awaited::new(self)
    }
}

impl<'a, T> IntoAwaiter for Task<'a, T> {
    type Output = Result<T>;
    type Awaiter = TaskAwaiter<'a, T>;

    fn into_awaiter(self) -> Self::Awaiter {
        TaskAwaiter { task: self }
    }
}

impl<'a, T> IntoFuture for Task<'a, T> {
    type Output = Result<T>;
    type IntoFuture = Awaited<TaskAwaiter<'a, T>>;

    fn into_future(self) -> Self::IntoFuture {
        Awaited::new(self.into_awaiter())
    }
}

impl<'t, 'a, T: Clone> IntoAwaiter for &'t mut Task<'a, T> {
    type Output = Result<T>;
    type Awaiter = TaskRefAwaiter<'t, 'a, T>;

    fn into_awaiter(self) -> Self::Awaiter {
        TaskRefAwaiter { task: self }
    }
}

impl<'t, 'a, T: Clone> IntoFuture for &'t mut Task<'a, T> {
    type Output = Result<T>;
    type IntoFuture = Awaited<TaskRefAwaiter<'t, 'a, T>>;

    fn into_future(self) -> Self::IntoFuture {
        Awaited::new(self.into_awaiter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::runtime::yield_now;
    use crate::types::TaskState;
    use std::future::Future;
    use std::task::{Context, Poll, Waker};

    fn poll_once<F: Future + Unpin>(fut: &mut F) -> Poll<F::Output> {
        let mut cx = Context::from_waker(Waker::noop());
        Pin::new(fut).poll(&mut cx)
    }

    #[test]
    fn awaiting_by_value_starts_the_child() {
        let child: Task<'_, u8> = Task::new(async {
            yield_now().await;
            Ok(3)
        });
        let mut fut = Box::pin(child.into_future());
        assert!(poll_once(&mut fut).is_pending());
        assert!(matches!(poll_once(&mut fut), Poll::Ready(Ok(3))));
    }

    #[test]
    fn awaiting_by_reference_keeps_the_result() {
        let mut child: Task<'_, String> = Task::new(async { Ok(String::from("kept")) });
        {
            let mut fut = Box::pin((&mut child).into_future());
            match poll_once(&mut fut) {
                Poll::Ready(Ok(value)) => assert_eq!(value, "kept"),
                other => panic!("unexpected poll outcome: {other:?}"),
            }
        }
        assert_eq!(child.result().map(String::as_str).ok(), Some("kept"));
    }

    #[test]
    fn when_ready_does_not_consume_errors() {
        let mut child: Task<'_, ()> = Task::new(async { Err(Error::msg("late")) });
        {
            let mut fut = Box::pin(child.when_ready().into_future());
            assert!(matches!(poll_once(&mut fut), Poll::Ready(())));
        }
        assert_eq!(child.state(), TaskState::Completed);
        assert!(child.result().is_err());
    }

    #[test]
    fn awaiting_an_empty_task_reports_broken() {
        let mut fut = Box::pin(Task::<u8>::empty().into_future());
        assert!(matches!(poll_once(&mut fut), Poll::Ready(Err(Error::BrokenTask))));
    }
}
