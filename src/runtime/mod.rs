//! Driving task chains.
//!
//! - [`sync_wait`](sync_wait()): block a synchronous caller until an
//!   awaitable completes.
//! - [`dispatch`](dispatch()) and [`Dispatcher`]: run work eagerly on a
//!   rayon pool and await the resulting [`AsyncFuture`].
//! - [`yield_now`]: a bare suspension point.

pub mod dispatch;
pub mod future;
pub mod sync_wait;
mod yield_now;

pub use dispatch::{Dispatcher, dispatch};
pub use future::{AsyncFuture, FutureStatus, Promise, promise};
pub use sync_wait::{SyncWaitTask, make_sync_wait_task, sync_wait, try_sync_wait};
pub use yield_now::{YieldNow, yield_now};
