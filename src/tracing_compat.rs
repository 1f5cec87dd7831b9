//! Optional tracing integration.
//!
//! With the `tracing-integration` feature these macros forward to `tracing`;
//! without it they expand to nothing, so instrumented hot paths cost nothing.

#[cfg(feature = "tracing-integration")]
#[doc(hidden)]
pub use tracing as __tracing;

/// Emits a trace-level record when `tracing-integration` is enabled.
#[cfg(feature = "tracing-integration")]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        $crate::tracing_compat::__tracing::trace!($($arg)*)
    };
}

/// Emits a trace-level record when `tracing-integration` is enabled.
#[cfg(not(feature = "tracing-integration"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

/// Emits a debug-level record when `tracing-integration` is enabled.
#[cfg(feature = "tracing-integration")]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::tracing_compat::__tracing::debug!($($arg)*)
    };
}

/// Emits a debug-level record when `tracing-integration` is enabled.
#[cfg(not(feature = "tracing-integration"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}
