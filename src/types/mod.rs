//! Core types shared by tasks, the sync-wait bridge and the future adapter.
//!
//! - [`id`]: process-unique task identifiers
//! - [`state`]: the task lifecycle state machine
//! - [`result_slot`]: single-write storage for a computation's outcome

pub mod id;
pub mod result_slot;
pub mod state;

pub use id::TaskId;
pub use result_slot::ResultSlot;
pub use state::TaskState;
