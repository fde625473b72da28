mod cost;
mod date;
mod id;
mod status;

pub use self::{date::*, id::*, status::*};
use destructure::{Destructure, Mutation};
use error_stack::Report;
use time::Date;
use vodca::References;

use crate::entity::{BookId, UserId};
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Borrowing {
    id: BorrowingId,
    book_id: BookId,
    user_id: UserId,
    borrowed_on: BorrowedOn,
    expected_return: ExpectedReturnDate,
    actual_return: Option<ActualReturnDate>,
    status: BorrowingStatus,
}

impl Borrowing {
    pub fn new(
        id: BorrowingId,
        book_id: BookId,
        user_id: UserId,
        borrowed_on: BorrowedOn,
        expected_return: ExpectedReturnDate,
        actual_return: Option<ActualReturnDate>,
        status: BorrowingStatus,
    ) -> Self {
        Self {
            id,
            book_id,
            user_id,
            borrowed_on,
            expected_return,
            actual_return,
            status,
        }
    }

    pub fn open(
        id: BorrowingId,
        book_id: BookId,
        user_id: UserId,
        today: Date,
        expected_return: ExpectedReturnDate,
    ) -> Self {
        Self::new(
            id,
            book_id,
            user_id,
            BorrowedOn::new(today),
            expected_return,
            None,
            BorrowingStatus::Borrowed,
        )
    }

    pub fn is_returned(&self) -> bool {
        self.actual_return.is_some()
    }

    /// Records the return. A borrowing can be closed only once.
    pub fn close(self, today: Date) -> error_stack::Result<Self, KernelError> {
        if self.is_returned() {
            return Err(Report::new(KernelError::InvalidState).attach_printable(format!(
                "Borrowing {} has already been returned",
                self.id.as_ref()
            )));
        }
        let status = if today > *self.expected_return.as_ref() {
            BorrowingStatus::OverdueReturned
        } else {
            BorrowingStatus::Returned
        };
        Ok(self.reconstruct(|borrowing| {
            borrowing.actual_return = Some(ActualReturnDate::new(today));
            borrowing.status = status;
        }))
    }

    /// Marks a returned borrowing as fully settled.
    pub fn settle(mut self) -> Self {
        self.substitute(|borrowing| *borrowing.status = BorrowingStatus::Returned);
        self
    }

    /// Status as seen on `as_of`. Unreturned loans past their date read as `Overdue`.
    pub fn status_as_of(&self, as_of: Date) -> BorrowingStatus {
        if !self.is_returned() && as_of > *self.expected_return.as_ref() {
            BorrowingStatus::Overdue
        } else {
            self.status
        }
    }
}
