//! Awaitable capability detection.
//!
//! Anything that can be awaited from inside a task body goes through one of
//! two traits:
//!
//! - [`Awaiter`]: the value itself exposes the three suspension operations
//!   (`await_ready`, `await_suspend`, `await_resume`).
//! - [`IntoAwaiter`]: the value converts into something that does. Every
//!   [`Awaiter`] converts into itself, so a single `A: IntoAwaiter` bound
//!   accepts both shapes.
//!
//! Capability is structural: there is no common base type, and a value that
//! satisfies neither trait is rejected at compile time by the unsatisfied
//! bound. [`AwaitResult`] names the type produced by awaiting a value.
//!
//! [`co_await`] (or [`AwaitableExt::co_await`]) is the uniform call site: it
//! wraps any awaitable in an [`Awaited`] future that a task body can `.await`.
//!
//! # Example
//!
//! ```
//! use lazy_task::{co_await, ready, sync_wait, Task};
//!
//! let task: Task<'static, i32> = Task::new(async {
//!     let base = co_await(ready(40)).await;
//!     Ok(base + 2)
//! });
//! assert_eq!(sync_wait(task).unwrap(), 42);
//! ```

mod adapters;
mod awaited;
mod continuation;

use std::pin::Pin;

pub use adapters::{FromFuture, Ready, from_future, ready};
pub use awaited::Awaited;
pub use continuation::Continuation;

/// Outcome of [`Awaiter::await_suspend`].
#[derive(Debug)]
pub enum Suspend {
    /// The awaiter did not suspend; resume the awaiting frame right away.
    Resume,
    /// The awaiter suspended and will resume the continuation when done.
    Suspended,
    /// Suspend and hand control to the given frame.
    Transfer(Continuation),
}

impl From<bool> for Suspend {
    /// `true` means the frame suspended, `false` means resume synchronously.
    fn from(suspended: bool) -> Self {
        if suspended {
            Self::Suspended
        } else {
            Self::Resume
        }
    }
}

impl From<()> for Suspend {
    fn from((): ()) -> Self {
        Self::Suspended
    }
}

impl From<Continuation> for Suspend {
    fn from(next: Continuation) -> Self {
        Self::Transfer(next)
    }
}

/// The suspension protocol.
///
/// A frame awaiting an `Awaiter` first asks [`await_ready`](Self::await_ready).
/// If the result is not available yet it calls
/// [`await_suspend`](Self::await_suspend) with its own continuation, and once
/// it is resumed it asks again. When the awaiter reports ready, or
/// `await_suspend` returns [`Suspend::Resume`], the frame collects the result
/// with [`await_resume`](Self::await_resume).
///
/// Implementations must make `await_ready` return true once the awaited
/// entity reached its terminal state, otherwise the awaiting frame will keep
/// suspending.
pub trait Awaiter {
    /// The result of awaiting.
    type Output;

    /// Returns true if the result is available without suspending.
    fn await_ready(&self) -> bool;

    /// Suspends the awaiting frame, recording `continuation` for later.
    fn await_suspend(self: Pin<&mut Self>, continuation: Continuation) -> Suspend;

    /// Produces the result. Called exactly once.
    fn await_resume(self: Pin<&mut Self>) -> Self::Output;
}

/// Conversion into an [`Awaiter`].
pub trait IntoAwaiter {
    /// The result of awaiting.
    type Output;
    /// The awaiter this value converts into.
    type Awaiter: Awaiter<Output = Self::Output>;

    /// Performs the conversion. Must not start any work.
    fn into_awaiter(self) -> Self::Awaiter;
}

impl<A: Awaiter> IntoAwaiter for A {
    type Output = A::Output;
    type Awaiter = A;

    fn into_awaiter(self) -> Self::Awaiter {
        self
    }
}

/// The type produced by awaiting `A`.
pub type AwaitResult<A> = <A as IntoAwaiter>::Output;

/// Wraps an awaitable so it can be `.await`ed from a task body.
pub fn co_await<A: IntoAwaiter>(awaitable: A) -> Awaited<A::Awaiter> {
    Awaited::new(awaitable.into_awaiter())
}

/// Method form of [`co_await`].
pub trait AwaitableExt: IntoAwaiter + Sized {
    /// Wraps `self` so it can be `.await`ed from a task body.
    fn co_await(self) -> Awaited<Self::Awaiter> {
        co_await(self)
    }
}

impl<A: IntoAwaiter> AwaitableExt for A {}
