//! Error types.
//!
//! Every failure the crate reports flows through [`Error`]. Errors raised by a
//! task body or by background work are stored in a result slot and handed back
//! verbatim when the result is read; the remaining variants describe misuse of
//! the task protocol itself.

use core::fmt;
use std::any::Any;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

/// Shared, type-erased computation error.
pub type BoxError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A task body or background job failed.
    Computation,
    /// A task body or background job panicked.
    Panic,
    /// The task protocol was misused (read too early, started twice, ...).
    Contract,
    /// The awaited entity has no computation behind it.
    BrokenChain,
    /// Invalid configuration.
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Computation => write!(f, "computation"),
            Self::Panic => write!(f, "panic"),
            Self::Contract => write!(f, "contract violation"),
            Self::BrokenChain => write!(f, "broken chain"),
            Self::Config => write!(f, "configuration"),
        }
    }
}

/// Main error type.
///
/// `Error` is cheap to clone: computation errors are reference counted, so a
/// stored error can be re-raised any number of times while keeping the
/// identity of the original payload.
///
/// # Example
///
/// ```
/// use lazy_task::Error;
///
/// #[derive(Debug, PartialEq)]
/// struct Boom(u32);
///
/// impl std::fmt::Display for Boom {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "boom {}", self.0)
///     }
/// }
///
/// impl std::error::Error for Boom {}
///
/// let err = Error::failed(Boom(7));
/// assert_eq!(err.downcast_ref::<Boom>(), Some(&Boom(7)));
/// ```
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// A task body or background job returned an error.
    #[error("{0}")]
    Failed(BoxError),

    /// A task body or background job panicked.
    #[error("task panicked: {message}")]
    Panicked {
        /// Panic message, when the payload was a string.
        message: String,
        /// The original panic payload.
        payload: PanicPayload,
    },

    /// The result was read before the computation completed.
    #[error("result read before the computation completed")]
    NotCompleted,

    /// The value was already moved out of the result slot.
    #[error("result was already taken")]
    ResultTaken,

    /// A sync-wait root was started twice.
    #[error("sync-wait task already started")]
    AlreadyStarted,

    /// A sync-wait root was resumed before it was started.
    #[error("sync-wait task resumed before start")]
    NotStarted,

    /// A frame was resumed after it reached its terminal state.
    #[error("task resumed after completion")]
    ResumedAfterCompletion,

    /// The task holds no frame (default-constructed or moved from).
    #[error("broken task: no computation frame")]
    BrokenTask,

    /// The producing side of a future was dropped without a result.
    #[error("broken promise: producer dropped without a result")]
    BrokenPromise,

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Wraps a computation error, keeping its concrete type for downcasting.
    #[must_use]
    pub fn failed<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Failed(Arc::new(error))
    }

    /// Creates a computation error from a message.
    #[must_use]
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Failed(Arc::new(Message(message.into())))
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Builds a [`Error::Panicked`] from a caught panic payload.
    ///
    /// The payload is kept so it can be re-raised unchanged; the message is
    /// extracted for display.
    #[must_use]
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let any: &(dyn Any + Send) = payload.as_ref();
        let message = if let Some(s) = any.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = any.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self::Panicked {
            message,
            payload: PanicPayload::new(payload),
        }
    }

    /// Moves the original panic payload out of a [`Error::Panicked`].
    ///
    /// Clones of the error share the payload, so only the first call among
    /// them returns it.
    #[must_use]
    pub fn take_panic_payload(&self) -> Option<Box<dyn Any + Send>> {
        match self {
            Self::Panicked { payload, .. } => payload.take(),
            _ => None,
        }
    }

    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Failed(_) => ErrorKind::Computation,
            Self::Panicked { .. } => ErrorKind::Panic,
            Self::NotCompleted
            | Self::ResultTaken
            | Self::AlreadyStarted
            | Self::NotStarted
            | Self::ResumedAfterCompletion => ErrorKind::Contract,
            Self::BrokenTask | Self::BrokenPromise => ErrorKind::BrokenChain,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Returns true if the error reports misuse of the task protocol.
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(self.kind(), ErrorKind::Contract)
    }

    /// Returns true if the awaited entity had no computation behind it.
    #[must_use]
    pub const fn is_broken(&self) -> bool {
        matches!(self.kind(), ErrorKind::BrokenChain)
    }

    /// Downcasts a computation error to its concrete type.
    #[must_use]
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            Self::Failed(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// Returns true if both errors carry the very same computation payload.
    #[must_use]
    pub fn same_payload(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Failed(a), Self::Failed(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// The payload of a captured panic, shared between clones of an [`Error`].
#[derive(Clone, Default)]
pub struct PanicPayload(Arc<Mutex<Option<Box<dyn Any + Send>>>>);

impl PanicPayload {
    /// Wraps a caught panic payload.
    #[must_use]
    pub fn new(payload: Box<dyn Any + Send>) -> Self {
        Self(Arc::new(Mutex::new(Some(payload))))
    }

    /// Moves the payload out. Returns `None` once it was taken.
    #[must_use]
    pub fn take(&self) -> Option<Box<dyn Any + Send>> {
        self.0.lock().take()
    }

    /// Returns true if the payload was already moved out.
    #[must_use]
    pub fn is_taken(&self) -> bool {
        self.0.lock().is_none()
    }
}

impl fmt::Debug for PanicPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanicPayload")
            .field("taken", &self.is_taken())
            .finish()
    }
}

#[derive(Debug)]
struct Message(String);

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Message {}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
