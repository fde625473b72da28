use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::Borrowing;
use crate::KernelError;

#[async_trait::async_trait]
pub trait BorrowingModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        borrowing: &Borrowing,
    ) -> error_stack::Result<(), KernelError>;
    async fn update(
        &self,
        con: &mut Self::Transaction,
        borrowing: &Borrowing,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBorrowingModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type BorrowingModifier: BorrowingModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn borrowing_modifier(&self) -> &Self::BorrowingModifier;
}
