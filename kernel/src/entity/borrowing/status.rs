use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

/// `Overdue` is only ever derived through [`crate::entity::Borrowing::status_as_of`], never stored.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum BorrowingStatus {
    Borrowed,
    Returned,
    #[serde(rename = "Overdue Returned")]
    OverdueReturned,
    Overdue,
}

impl BorrowingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorrowingStatus::Borrowed => "Borrowed",
            BorrowingStatus::Returned => "Returned",
            BorrowingStatus::OverdueReturned => "Overdue Returned",
            BorrowingStatus::Overdue => "Overdue",
        }
    }
}

impl Display for BorrowingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BorrowingStatus {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Borrowed" => Ok(BorrowingStatus::Borrowed),
            "Returned" => Ok(BorrowingStatus::Returned),
            "Overdue Returned" => Ok(BorrowingStatus::OverdueReturned),
            "Overdue" => Ok(BorrowingStatus::Overdue),
            _ => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Unknown borrowing status: {s}"))),
        }
    }
}
