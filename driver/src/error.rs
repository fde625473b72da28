use std::fmt::Display;

use error_stack::Report;
use kernel::KernelError;

pub(crate) trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

/// An update that matched no stored row.
pub(crate) fn not_found(kind: &str, id: impl Display) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("{kind} {id} does not exist"))
}
