//! Eager background dispatch onto rayon pools.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::future::{AsyncFuture, promise};
use crate::config::DispatchConfig;
use crate::error::{Error, Result};

/// Runs `work` on the global rayon pool and returns a handle to its result.
///
/// The work is submitted immediately; it does not wait to be awaited. A
/// panic inside `work` resolves the future with [`Error::Panicked`].
///
/// # Example
///
/// ```
/// use lazy_task::{dispatch, sync_wait, Task};
///
/// let task: Task<'_, u64> = Task::new(async {
///     let sum = dispatch(|| Ok((1..=10_u64).sum::<u64>())).await?;
///     Ok(sum * 2)
/// });
/// assert_eq!(sync_wait(task).unwrap(), 110);
/// ```
pub fn dispatch<T, F>(work: F) -> AsyncFuture<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let (promise, future) = promise();
    crate::trace!("dispatching work to the global pool");
    rayon::spawn(move || promise.set(run_work(work)));
    future
}

fn run_work<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    panic::catch_unwind(AssertUnwindSafe(work))
        .unwrap_or_else(|payload| Err(Error::from_panic(payload)))
}

/// A dedicated worker pool for background dispatch.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    pool: Arc<rayon::ThreadPool>,
}

impl Dispatcher {
    /// Builds a dispatcher with its own pool.
    pub fn new(config: &DispatchConfig) -> Result<Self> {
        let pool = config.build_pool()?;
        crate::debug!(
            threads = pool.current_num_threads(),
            prefix = %config.thread_name_prefix,
            "dispatcher pool started"
        );
        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Runs `work` on this dispatcher's pool. See [`dispatch`].
    pub fn dispatch<T, F>(&self, work: F) -> AsyncFuture<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (promise, future) = promise();
        self.pool.spawn(move || promise.set(run_work(work)));
        future
    }

    /// Number of worker threads.
    #[must_use]
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}
