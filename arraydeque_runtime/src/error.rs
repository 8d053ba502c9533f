//! Host-level exceptions.
//!
//! Dynamic entry points raise one of four exception kinds. Core failures
//! lower into them through `From<DequeError>`.

use arraydeque_core::DequeError;
use std::fmt;

/// Result type for dynamic operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// An exception raised by a dynamic operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Wrong argument or operand type.
    TypeError(String),
    /// Right type, unacceptable value.
    ValueError(String),
    /// Empty container or index out of range.
    IndexError(String),
    /// Missing or read-only attribute.
    AttributeError(String),
}

impl RuntimeError {
    /// The exception kind name, as shown in tracebacks.
    pub fn kind(&self) -> &'static str {
        match self {
            RuntimeError::TypeError(_) => "TypeError",
            RuntimeError::ValueError(_) => "ValueError",
            RuntimeError::IndexError(_) => "IndexError",
            RuntimeError::AttributeError(_) => "AttributeError",
        }
    }

    /// The exception message.
    pub fn message(&self) -> &str {
        match self {
            RuntimeError::TypeError(msg)
            | RuntimeError::ValueError(msg)
            | RuntimeError::IndexError(msg)
            | RuntimeError::AttributeError(msg) => msg,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl std::error::Error for RuntimeError {}

impl From<DequeError> for RuntimeError {
    fn from(err: DequeError) -> Self {
        match err {
            DequeError::Empty => RuntimeError::IndexError(err.to_string()),
            DequeError::IndexOutOfRange { .. } => {
                RuntimeError::IndexError("deque index out of range".to_string())
            }
            DequeError::WrongIndexType(_) => RuntimeError::TypeError(err.to_string()),
            DequeError::ValueNotFound => RuntimeError::ValueError(err.to_string()),
            DequeError::InvalidArgument(msg) => RuntimeError::ValueError(msg),
        }
    }
}
