//! Shared helpers for the integration suites.

#![allow(dead_code)]

use std::sync::Arc;

use lazy_task::{Task, yield_now};
use parking_lot::Mutex;

pub use lazy_task::test_utils::init_test_logging;

/// Records the order in which chain levels finish.
pub type CompletionLog = Arc<Mutex<Vec<usize>>>;

pub fn init_test(test_name: &str) {
    init_test_logging();
    lazy_task::test_phase!(test_name);
}

/// Builds a chain `depth → depth-1 → … → 0` where level 0 yields once and
/// produces 0 and every other level adds one to its child's value.
pub fn counting_chain(depth: usize, log: &CompletionLog) -> Task<'static, usize> {
    let log = Arc::clone(log);
    if depth == 0 {
        return Task::new(async move {
            yield_now().await;
            log.lock().push(0);
            Ok(0)
        });
    }
    let child = counting_chain(depth - 1, &log);
    Task::new(async move {
        let value = child.await?;
        log.lock().push(depth);
        Ok(value + 1)
    })
}

/// Like [`counting_chain`], but level `fail_at` fails with `error`.
pub fn failing_chain(
    depth: usize,
    fail_at: usize,
    error: &lazy_task::Error,
    log: &CompletionLog,
) -> Task<'static, usize> {
    let log = Arc::clone(log);
    if depth == fail_at {
        let error = error.clone();
        return Task::new(async move {
            yield_now().await;
            Err(error)
        });
    }
    let child = failing_chain(depth - 1, fail_at, error, &log);
    Task::new(async move {
        let value = child.await?;
        log.lock().push(depth);
        Ok(value + 1)
    })
}
