use time::Date;

use kernel::interface::query::BorrowingQuery;
use kernel::interface::update::BorrowingModifier;
use kernel::prelude::entity::{Borrowing, BorrowingId, UserId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;
use crate::error::not_found;

pub struct InMemoryBorrowingRepository;

fn sorted(mut borrowings: Vec<Borrowing>) -> Vec<Borrowing> {
    borrowings.sort_by(|a, b| {
        a.expected_return()
            .as_ref()
            .cmp(b.expected_return().as_ref())
            .then_with(|| a.id().as_ref().cmp(b.id().as_ref()))
    });
    borrowings
}

#[async_trait::async_trait]
impl BorrowingQuery for InMemoryBorrowingRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &BorrowingId,
    ) -> error_stack::Result<Option<Borrowing>, KernelError> {
        Ok(con.working.borrowings.get(id).cloned())
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut InMemoryTransaction,
        id: &BorrowingId,
    ) -> error_stack::Result<Option<Borrowing>, KernelError> {
        self.find_by_id(con, id).await
    }

    async fn find_by_user_id(
        &self,
        con: &mut InMemoryTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError> {
        let found = con
            .working
            .borrowings
            .values()
            .filter(|borrowing| borrowing.user_id() == user_id)
            .cloned()
            .collect();
        Ok(sorted(found))
    }

    async fn find_unreturned_due_before(
        &self,
        con: &mut InMemoryTransaction,
        date: &Date,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError> {
        let found = con
            .working
            .borrowings
            .values()
            .filter(|borrowing| {
                !borrowing.is_returned() && borrowing.expected_return().as_ref() < date
            })
            .cloned()
            .collect();
        Ok(sorted(found))
    }
}

#[async_trait::async_trait]
impl BorrowingModifier for InMemoryBorrowingRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        borrowing: &Borrowing,
    ) -> error_stack::Result<(), KernelError> {
        con.working
            .borrowings
            .insert(borrowing.id().clone(), borrowing.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        borrowing: &Borrowing,
    ) -> error_stack::Result<(), KernelError> {
        let stored = con
            .working
            .borrowings
            .get_mut(borrowing.id())
            .ok_or_else(|| not_found("Borrowing", borrowing.id().as_ref()))?;
        *stored = borrowing.clone();
        Ok(())
    }
}
