//! Task lifecycle states.

use core::fmt;

/// Lifecycle state of a task.
///
/// ```text
/// Unstarted ──resume──▶ Running ──pending──▶ Suspended
///                          ▲                     │
///                          └──────resume─────────┘
///                          │
///                          └──ready──▶ Completed
/// ```
///
/// `Empty` describes a task that holds no frame at all: default constructed,
/// moved from, or already consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// No frame.
    Empty,
    /// Constructed, body has not run yet.
    Unstarted,
    /// Body is executing.
    Running,
    /// Body is parked at a suspension point.
    Suspended,
    /// Body finished; the result slot is filled.
    Completed,
}

impl TaskState {
    /// Returns true if the state is terminal (`Completed` or `Empty`).
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Empty)
    }

    /// Returns true if the body has run at least once.
    #[must_use]
    pub const fn has_started(self) -> bool {
        matches!(self, Self::Running | Self::Suspended | Self::Completed)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Unstarted => write!(f, "unstarted"),
            Self::Running => write!(f, "running"),
            Self::Suspended => write!(f, "suspended"),
            Self::Completed => write!(f, "completed"),
        }
    }
}
