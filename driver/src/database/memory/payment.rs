use kernel::interface::query::PaymentQuery;
use kernel::interface::update::PaymentModifier;
use kernel::prelude::entity::{BorrowingId, Payment, PaymentId, UserId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;
use crate::error::not_found;

pub struct InMemoryPaymentRepository;

#[async_trait::async_trait]
impl PaymentQuery for InMemoryPaymentRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &PaymentId,
    ) -> error_stack::Result<Option<Payment>, KernelError> {
        Ok(con
            .working
            .payments
            .iter()
            .find(|payment| payment.id() == id)
            .cloned())
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut InMemoryTransaction,
        id: &PaymentId,
    ) -> error_stack::Result<Option<Payment>, KernelError> {
        self.find_by_id(con, id).await
    }

    async fn find_by_borrowing_id(
        &self,
        con: &mut InMemoryTransaction,
        borrowing_id: &BorrowingId,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        Ok(con
            .working
            .payments
            .iter()
            .filter(|payment| payment.borrowing_id() == borrowing_id)
            .cloned()
            .collect())
    }

    async fn find_by_user_id(
        &self,
        con: &mut InMemoryTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        let borrowings = &con.working.borrowings;
        Ok(con
            .working
            .payments
            .iter()
            .filter(|payment| {
                borrowings
                    .get(payment.borrowing_id())
                    .is_some_and(|borrowing| borrowing.user_id() == user_id)
            })
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl PaymentModifier for InMemoryPaymentRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError> {
        con.working.payments.push(payment.clone());
        Ok(())
    }

    /// Rewrites everything except the amount.
    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError> {
        let stored = con
            .working
            .payments
            .iter_mut()
            .find(|stored| stored.id() == payment.id())
            .ok_or_else(|| not_found("Payment", payment.id().as_ref()))?;
        let money_to_pay = *stored.money_to_pay();
        *stored = payment.clone().reconstruct(|p| p.money_to_pay = money_to_pay);
        Ok(())
    }
}
