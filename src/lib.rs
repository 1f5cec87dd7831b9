//! Lazy tasks with continuation chaining, a blocking sync-wait bridge, and
//! pool-backed futures that plug into the same suspension protocol.
//!
//! # Overview
//!
//! A [`Task`] is a deferred computation. Creating one runs nothing; the body
//! starts when the task is first awaited and runs until it reaches a
//! suspension point it cannot pass yet. Tasks await each other, so a chain
//! `A → B → C` resumes `C` first and completes innermost-first, each result
//! flowing back to the frame that awaited it.
//!
//! [`sync_wait`] connects a chain to ordinary blocking code: it drives the
//! outermost awaitable and parks the calling thread on a
//! [`CompletionNotifier`] until the chain completes.
//!
//! [`dispatch`] runs a closure on a rayon pool right away and hands back an
//! [`AsyncFuture`] that a task body can await.
//!
//! # Core Guarantees
//!
//! - **Laziness**: constructing a task never runs its body
//! - **Single completion**: a result slot is written once; resuming a
//!   completed frame is an error, not undefined behavior
//! - **Verbatim errors**: an error raised at any depth reaches the top of the
//!   chain unchanged; panics are captured as [`Error::Panicked`]
//!
//! # Module Structure
//!
//! - [`awaitable`]: the awaiter protocol and its adapters
//! - [`task`]: lazy tasks
//! - [`runtime`]: sync-wait, dispatch, futures and `yield_now`
//! - [`sync`]: the completion notifier
//! - [`types`]: ids, lifecycle states and result slots
//! - [`config`]: dispatch pool configuration
//! - [`error`](mod@error): error types
//! - [`tracing_compat`]: optional tracing integration (requires `tracing-integration` feature)
//!
//! # Example
//!
//! ```
//! use lazy_task::{sync_wait, Task};
//!
//! let c: Task<'_, i32> = Task::new(async { Ok(0) });
//! let b = Task::new(async move { Ok(c.await? + 1) });
//! let a = Task::new(async move { Ok(b.await? + 1) });
//! assert_eq!(sync_wait(a).unwrap(), 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod awaitable;
pub mod config;
pub mod error;
pub mod runtime;
pub mod sync;
pub mod task;
#[cfg(any(test, feature = "test-internals"))]
pub mod test_utils;
pub mod tracing_compat;
pub mod types;

pub use awaitable::{
    AwaitResult, AwaitableExt, Awaited, Awaiter, Continuation, FromFuture, IntoAwaiter, Ready,
    Suspend, co_await, from_future, ready,
};
pub use config::DispatchConfig;
pub use error::{Error, ErrorKind, PanicPayload, Result};
pub use runtime::{
    AsyncFuture, Dispatcher, FutureStatus, Promise, SyncWaitTask, YieldNow, dispatch,
    make_sync_wait_task, promise, sync_wait, try_sync_wait, yield_now,
};
pub use sync::CompletionNotifier;
pub use task::{Task, TaskAwaiter, TaskRefAwaiter, WhenReady};
pub use types::{TaskId, TaskState};
