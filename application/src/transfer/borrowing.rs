use rust_decimal::Decimal;
use time::Date;
use uuid::Uuid;

use kernel::prelude::entity::{Borrowing, BorrowingStatus, DestructBorrowing};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BorrowingDto {
    pub id: Uuid,
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub date_borrowed: Date,
    pub expected_return_date: Date,
    pub actual_return_date: Option<Date>,
    pub status: BorrowingStatus,
}

impl BorrowingDto {
    /// Snapshot with the status as it reads on `today`.
    pub fn as_of(borrowing: Borrowing, today: Date) -> Self {
        let status = borrowing.status_as_of(today);
        let DestructBorrowing {
            id,
            book_id,
            user_id,
            borrowed_on,
            expected_return,
            actual_return,
            ..
        } = borrowing.into_destruct();
        Self {
            id: id.into(),
            book_id: book_id.into(),
            user_id: user_id.into(),
            date_borrowed: borrowed_on.into(),
            expected_return_date: expected_return.into(),
            actual_return_date: actual_return.map(Into::into),
            status,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CostDto {
    pub borrowing_id: Uuid,
    pub duration_days: i64,
    pub overdue_days: i64,
    pub cost_per_day: Option<Decimal>,
    pub cost: Decimal,
}

#[derive(Debug)]
pub struct CreateBorrowingDto {
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub expected_return_date: Date,
}

#[derive(Debug)]
pub struct ReturnBorrowingDto {
    pub user_id: Uuid,
    pub borrowing_id: Uuid,
}

#[derive(Debug)]
pub struct GetBorrowingDto {
    pub id: Uuid,
}

#[derive(Debug)]
pub struct GetBorrowingsFromUserIdDto {
    pub user_id: Uuid,
}

#[derive(Debug)]
pub struct GetBorrowingsFromEmailDto {
    pub email: String,
}
