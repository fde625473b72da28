mod borrowing;
mod cost;
mod payment;

pub use self::{borrowing::*, cost::*, payment::*};

use std::fmt::Display;

use error_stack::Report;
use kernel::KernelError;

pub(crate) fn not_found(kind: &str, id: impl Display) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("{kind} {id} was not found"))
}
