//! Error types for the Arboretum library.
//!
//! All recoverable failures are represented by the [`ArboretumError`] enum.
//! Lookups that simply miss (an absent key, a prefix with no stored
//! sequence) are not errors and are reported through `bool` or `Option`
//! returns instead. Broken internal invariants are bugs and panic from the
//! `check_invariants` methods rather than surfacing here.
//!
//! # Examples
//!
//! ```
//! use arboretum::error::{ArboretumError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ArboretumError::invalid_range(3, 1, 8))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for Arboretum operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArboretumError {
    /// An index or range outside `[0, len - 1]`, or `left > right`.
    #[error("Invalid range: [{left}, {right}] for length {len}")]
    InvalidRange {
        left: usize,
        right: usize,
        len: usize,
    },

    /// The operator backing a structure cannot answer the request.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// An argument violating the caller's side of a contract.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for operations that may fail with ArboretumError.
pub type Result<T> = std::result::Result<T, ArboretumError>;

impl ArboretumError {
    /// Create a new invalid range error.
    pub fn invalid_range(left: usize, right: usize, len: usize) -> Self {
        ArboretumError::InvalidRange { left, right, len }
    }

    /// Create a new invalid index error (a single-slot range).
    pub fn invalid_index(index: usize, len: usize) -> Self {
        ArboretumError::InvalidRange {
            left: index,
            right: index,
            len,
        }
    }

    /// Create a new unsupported operation error.
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        ArboretumError::UnsupportedOperation(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        ArboretumError::InvalidArgument(msg.into())
    }
}

/// Reject `[left, right]` unless `left <= right < len`.
pub(crate) fn check_range(left: usize, right: usize, len: usize) -> Result<()> {
    if left > right || right >= len {
        return Err(ArboretumError::invalid_range(left, right, len));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = ArboretumError::invalid_range(4, 2, 6);
        assert_eq!(error.to_string(), "Invalid range: [4, 2] for length 6");

        let error = ArboretumError::unsupported("min has no inverse");
        assert_eq!(
            error.to_string(),
            "Unsupported operation: min has no inverse"
        );

        let error = ArboretumError::invalid_argument("symbol 'Z' outside alphabet");
        assert_eq!(
            error.to_string(),
            "Invalid argument: symbol 'Z' outside alphabet"
        );
    }

    #[test]
    fn test_invalid_index_is_single_slot_range() {
        assert_eq!(
            ArboretumError::invalid_index(9, 3),
            ArboretumError::InvalidRange {
                left: 9,
                right: 9,
                len: 3
            }
        );
    }

    #[test]
    fn test_check_range() {
        assert!(check_range(0, 0, 1).is_ok());
        assert!(check_range(1, 3, 4).is_ok());
        assert!(check_range(2, 1, 4).is_err());
        assert!(check_range(0, 4, 4).is_err());
        assert!(check_range(0, 0, 0).is_err());
    }
}
