//! Error type shared across the board and engine APIs.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FloodError {
    /// A coordinate fell outside the square board.
    #[error("coordinate ({x}, {y}) is outside the {size}x{size} board")]
    OutOfRange { x: usize, y: usize, size: usize },

    /// An internal consistency rule was broken, such as reclassifying a
    /// water tile as shore or constructing an engine with a bad setting.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_names_the_offender() {
        let err = FloodError::OutOfRange { x: 7, y: 3, size: 5 };
        assert_eq!(err.to_string(), "coordinate (7, 3) is outside the 5x5 board");
    }

    #[test]
    fn errors_compare_by_value() {
        assert_eq!(
            FloodError::InvariantViolation("bad".into()),
            FloodError::InvariantViolation("bad".into())
        );
        assert_ne!(
            FloodError::OutOfRange { x: 0, y: 0, size: 2 },
            FloodError::OutOfRange { x: 0, y: 1, size: 2 }
        );
    }
}
