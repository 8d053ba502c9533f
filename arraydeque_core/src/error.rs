//! Error taxonomy for deque operations.
//!
//! Every failure is reported synchronously and leaves the deque exactly as it
//! was before the call.

use std::fmt;

/// Result alias used throughout the engine.
pub type DequeResult<T> = Result<T, DequeError>;

/// Errors produced by deque operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DequeError {
    /// `pop`/`popleft` on an empty deque.
    Empty,
    /// Integer index outside `[-len, len)`.
    IndexOutOfRange {
        /// Index as supplied by the caller (before negative remapping).
        index: i64,
        /// Length of the deque at the time of the call.
        len: usize,
    },
    /// Index argument is not an integer (includes slices).
    WrongIndexType(&'static str),
    /// `remove` of a value the deque does not hold.
    ValueNotFound,
    /// Invalid constructor argument (e.g. a negative bound).
    InvalidArgument(String),
}

impl DequeError {
    /// Returns true for failures a dynamic host reports as `IndexError`:
    /// an out-of-range index, or a pop from an empty deque.
    #[inline]
    pub fn raises_index_error(&self) -> bool {
        matches!(self, DequeError::IndexOutOfRange { .. } | DequeError::Empty)
    }
}

impl fmt::Display for DequeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DequeError::Empty => write!(f, "pop from an empty deque"),
            DequeError::IndexOutOfRange { index, len } => {
                write!(f, "deque index {} out of range for length {}", index, len)
            }
            DequeError::WrongIndexType(type_name) => {
                write!(f, "deque indices must be integers, not {}", type_name)
            }
            DequeError::ValueNotFound => write!(f, "deque.remove(x): x not in deque"),
            DequeError::InvalidArgument(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for DequeError {}
