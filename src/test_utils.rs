//! Test helpers: logging initialisation and phase/assertion macros.
//!
//! Available under `cfg(test)` and the `test-internals` feature so that both
//! unit tests and the integration suites in `tests/` log the same way.
//! Set `RUST_LOG=lazy_task=trace` to see task resumption records.

use std::sync::Once;

#[doc(hidden)]
pub use tracing as __tracing;

static INIT: Once = Once::new();

/// Installs a test-friendly tracing subscriber once per process.
///
/// Output goes through the libtest capture writer; the filter comes from
/// `RUST_LOG` and defaults to `info`.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// Logs the start of a test phase.
#[macro_export]
macro_rules! test_phase {
    ($name:expr) => {
        $crate::test_utils::__tracing::info!(phase = %$name, "test phase started");
    };
}

/// Logs the successful completion of a test.
#[macro_export]
macro_rules! test_complete {
    ($name:expr) => {
        $crate::test_utils::__tracing::info!(test = %$name, "test completed");
    };
}

/// Asserts a condition, logging the expected and actual values first.
#[macro_export]
macro_rules! assert_with_log {
    ($cond:expr, $msg:expr, $expected:expr, $actual:expr) => {{
        let passed = $cond;
        $crate::test_utils::__tracing::debug!(
            expected = ?$expected,
            actual = ?$actual,
            passed,
            "{}",
            $msg
        );
        assert!(
            passed,
            "{}: expected {:?}, got {:?}",
            $msg,
            $expected,
            $actual
        );
    }};
}
