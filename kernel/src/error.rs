use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    /// Book, borrowing, payment or user is absent.
    NotFound,
    /// Business rule violation, e.g. no copies left or a second return.
    InvalidState,
    /// Transactional contention. Safe to retry.
    Conflict,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::NotFound => write!(f, "Resource not found"),
            KernelError::InvalidState => write!(f, "Operation not allowed in current state"),
            KernelError::Conflict => write!(f, "Concurrent modification conflict"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
