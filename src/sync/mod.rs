//! Cross-thread synchronization primitives.
//!
//! - [`CompletionNotifier`]: one-shot, resettable signal used to park a
//!   blocking caller until a suspended chain completes.

mod completion_notifier;

pub use completion_notifier::CompletionNotifier;
