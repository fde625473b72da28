use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{BorrowingId, Payment, PaymentId, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait PaymentQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &PaymentId,
    ) -> error_stack::Result<Option<Payment>, KernelError>;

    async fn find_by_id_for_update(
        &self,
        con: &mut Self::Transaction,
        id: &PaymentId,
    ) -> error_stack::Result<Option<Payment>, KernelError>;

    async fn find_by_borrowing_id(
        &self,
        con: &mut Self::Transaction,
        borrowing_id: &BorrowingId,
    ) -> error_stack::Result<Vec<Payment>, KernelError>;

    /// Payments across every borrowing of the user.
    async fn find_by_user_id(
        &self,
        con: &mut Self::Transaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Payment>, KernelError>;
}

pub trait DependOnPaymentQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type PaymentQuery: PaymentQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn payment_query(&self) -> &Self::PaymentQuery;
}
