use time::Date;

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Borrowing, BorrowingId, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BorrowingQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BorrowingId,
    ) -> error_stack::Result<Option<Borrowing>, KernelError>;

    async fn find_by_id_for_update(
        &self,
        con: &mut Self::Transaction,
        id: &BorrowingId,
    ) -> error_stack::Result<Option<Borrowing>, KernelError>;

    /// Ordered by expected return date.
    async fn find_by_user_id(
        &self,
        con: &mut Self::Transaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError>;

    /// Unreturned borrowings expected back strictly before `date`, ordered by expected return date.
    async fn find_unreturned_due_before(
        &self,
        con: &mut Self::Transaction,
        date: &Date,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError>;
}

pub trait DependOnBorrowingQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BorrowingQuery: BorrowingQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn borrowing_query(&self) -> &Self::BorrowingQuery;
}
