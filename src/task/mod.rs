//! Lazy tasks.
//!
//! A [`Task`] owns a suspended computation frame. Tasks compose by awaiting
//! each other: the awaiting frame records itself as the child's continuation
//! and resumes the child, and once the child completes the awaiting frame
//! continues with the child's result. Chains therefore complete
//! innermost-first.

mod awaiters;
mod frame;
mod lazy;

pub use awaiters::{TaskAwaiter, TaskRefAwaiter, WhenReady};
pub use lazy::Task;
