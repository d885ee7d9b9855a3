//! Error types for the set engines.
//!
//! Only allocation can fail. Every fallible operation reserves the memory it
//! needs before touching the structure, so a returned error always means the
//! receiving set is exactly as it was before the call.
//!
//! Queries outside the valid range (a bucket index past the capacity, a level
//! above the top) are not errors; they answer `0` or `false`. Adding an element
//! that is already present is not an error either.

use std::collections::TryReserveError;
use std::fmt;

/// Represents errors that can occur while growing or copying a set.
///
/// # Examples
///
/// ```rust
/// use setcraft::error::SetError;
///
/// let failure = Vec::<u64>::new().try_reserve(usize::MAX).unwrap_err();
/// let error = SetError::from(failure);
/// assert!(format!("{error}").starts_with("allocation failure"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetError {
    /// An arena or bucket array could not be reserved.
    ///
    /// The set that reported it has been left unchanged.
    AllocationFailure(TryReserveError),
}

impl fmt::Display for SetError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailure(error) => {
                write!(formatter, "allocation failure: {error}")
            }
        }
    }
}

impl std::error::Error for SetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AllocationFailure(error) => Some(error),
        }
    }
}

impl From<TryReserveError> for SetError {
    fn from(error: TryReserveError) -> Self {
        Self::AllocationFailure(error)
    }
}
