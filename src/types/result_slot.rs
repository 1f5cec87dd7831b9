//! Single-write storage for a computation's outcome.
//!
//! A [`ResultSlot`] starts out empty and is filled exactly once, either with a
//! value or with an error. Borrowing reads are repeatable. Owning reads move
//! the value out once; the slot remembers that and reports
//! [`Error::ResultTaken`] afterwards. Stored errors are re-raised on every
//! read because [`Error`] is cheap to clone.

use crate::error::{Error, Result};

/// Outcome storage of a task, sync-wait root, or future.
#[derive(Debug)]
pub enum ResultSlot<T> {
    /// Nothing written yet.
    Empty,
    /// Completed with a value.
    Value(T),
    /// Completed with an error.
    Error(Error),
    /// Completed with a value that has since been moved out.
    Taken,
}

impl<T> ResultSlot<T> {
    /// Creates an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self::Empty
    }

    /// Returns true once the slot has been written.
    #[must_use]
    pub const fn is_filled(&self) -> bool {
        !matches!(self, Self::Empty)
    }

    /// Returns true if the slot holds an error.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Writes the outcome.
    ///
    /// # Panics
    ///
    /// Panics if the slot was already written.
    pub fn set(&mut self, outcome: Result<T>) {
        assert!(!self.is_filled(), "result slot written twice");
        *self = match outcome {
            Ok(value) => Self::Value(value),
            Err(error) => Self::Error(error),
        };
    }

    /// Borrows the stored value, or returns the stored error.
    pub fn get(&self) -> Result<&T> {
        match self {
            Self::Empty => Err(Error::NotCompleted),
            Self::Value(value) => Ok(value),
            Self::Error(error) => Err(error.clone()),
            Self::Taken => Err(Error::ResultTaken),
        }
    }

    /// Moves the stored value out, or returns the stored error.
    ///
    /// An error stays in the slot so later reads raise it again.
    pub fn take(&mut self) -> Result<T> {
        match std::mem::replace(self, Self::Taken) {
            Self::Empty => {
                *self = Self::Empty;
                Err(Error::NotCompleted)
            }
            Self::Value(value) => Ok(value),
            Self::Error(error) => {
                *self = Self::Error(error.clone());
                Err(error)
            }
            Self::Taken => Err(Error::ResultTaken),
        }
    }
}

impl<T> Default for ResultSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_logging;

    fn init_test(test_name: &str) {
        init_test_logging();
        crate::test_phase!(test_name);
    }

    #[test]
    fn empty_slot_reports_not_completed() {
        init_test("empty_slot_reports_not_completed");
        let mut slot = ResultSlot::<u32>::new();
        assert!(!slot.is_filled());
        assert!(matches!(slot.get(), Err(Error::NotCompleted)));
        assert!(matches!(slot.take(), Err(Error::NotCompleted)));
        assert!(!slot.is_filled(), "failed take must not fill the slot");
        crate::test_complete!("empty_slot_reports_not_completed");
    }

    #[test]
    fn value_is_borrowed_repeatedly_then_moved_once() {
        init_test("value_is_borrowed_repeatedly_then_moved_once");
        let mut slot = ResultSlot::new();
        slot.set(Ok(String::from("done")));
        assert_eq!(slot.get().map(String::as_str).ok(), Some("done"));
        assert_eq!(slot.get().map(String::as_str).ok(), Some("done"));

        let moved = slot.take();
        crate::assert_with_log!(
            moved.as_deref().ok() == Some("done"),
            "first take moves the value",
            Some("done"),
            moved.as_deref().ok()
        );
        assert!(matches!(slot.take(), Err(Error::ResultTaken)));
        assert!(matches!(slot.get(), Err(Error::ResultTaken)));
        crate::test_complete!("value_is_borrowed_repeatedly_then_moved_once");
    }

    #[test]
    fn error_is_reraised_on_every_read() {
        init_test("error_is_reraised_on_every_read");
        let original = Error::msg("deep failure");
        let mut slot = ResultSlot::<()>::new();
        slot.set(Err(original.clone()));
        assert!(slot.is_error());

        for _ in 0..3 {
            let err = slot.take().unwrap_err();
            assert!(err.same_payload(&original));
        }
        assert!(slot.get().unwrap_err().same_payload(&original));
        crate::test_complete!("error_is_reraised_on_every_read");
    }

    #[test]
    #[should_panic(expected = "result slot written twice")]
    fn double_write_panics() {
        let mut slot = ResultSlot::new();
        slot.set(Ok(1));
        slot.set(Ok(2));
    }
}
