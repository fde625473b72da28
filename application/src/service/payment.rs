use error_stack::Report;
use tracing::info;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    BookQuery, BorrowingQuery, DependOnBookQuery, DependOnBorrowingQuery, DependOnPaymentQuery,
    DependOnUserQuery, PaymentQuery, UserQuery,
};
use kernel::interface::update::{
    BorrowingModifier, DependOnBorrowingModifier, DependOnPaymentModifier, PaymentModifier,
};
use kernel::prelude::entity::{
    BorrowingId, Money, Payment, PaymentId, SessionId, SessionUrl, UserId,
};
use kernel::KernelError;

use crate::service::not_found;
use crate::transfer::{
    CreatePaymentDto, GetPaymentDto, GetPaymentsFromBorrowingIdDto, GetPaymentsFromUserIdDto,
    PaymentDto, UpdatePaymentDto,
};

#[async_trait::async_trait]
pub trait CreatePaymentService:
    'static
    + Sync
    + Send
    + DependOnBookQuery
    + DependOnBorrowingQuery
    + DependOnBorrowingModifier
    + DependOnPaymentModifier
{
    /// Opens a payment for a borrowing. The amount is fixed here and never recomputed.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    async fn create_payment(
        &self,
        dto: CreatePaymentDto,
    ) -> error_stack::Result<PaymentDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let borrowing = self
            .borrowing_query()
            .find_by_id_for_update(&mut connection, &BorrowingId::new(dto.borrowing_id))
            .await?
            .ok_or_else(|| not_found("Borrowing", dto.borrowing_id))?;

        let money_to_pay = match dto.money_to_pay {
            Some(amount) => {
                let money = Money::new(amount);
                if money.is_negative() {
                    return Err(Report::new(KernelError::InvalidState)
                        .attach_printable(format!("Payment amount {amount} is negative")));
                }
                money
            }
            None => {
                let book = self
                    .book_query()
                    .find_by_id(&mut connection, borrowing.book_id())
                    .await?
                    .ok_or_else(|| not_found("Book", borrowing.book_id().as_ref()))?;
                borrowing.calculate_cost(book.cost_per_day().as_ref())
            }
        };

        let payment = Payment::new(
            PaymentId::new(Uuid::new_v4()),
            borrowing.id().clone(),
            dto.status,
            dto.payment_type,
            money_to_pay,
            dto.session_url.map(SessionUrl::new),
            dto.session_id.map(SessionId::new),
        );
        self.payment_modifier()
            .create(&mut connection, &payment)
            .await?;

        if let Some(settled) = payment.reconcile(&borrowing) {
            self.borrowing_modifier()
                .update(&mut connection, &settled)
                .await?;
            info!(borrowing = %settled.id().as_ref(), "Borrowing settled by payment");
        }

        connection.commit().await?;
        info!(
            payment = %payment.id().as_ref(),
            amount = %payment.money_to_pay().as_ref(),
            "Payment created"
        );

        Ok(PaymentDto::from(payment))
    }
}

impl<T> CreatePaymentService for T where
    T: DependOnBookQuery
        + DependOnBorrowingQuery
        + DependOnBorrowingModifier
        + DependOnPaymentModifier
{
}

#[async_trait::async_trait]
pub trait UpdatePaymentService:
    'static
    + Sync
    + Send
    + DependOnPaymentQuery
    + DependOnPaymentModifier
    + DependOnBorrowingQuery
    + DependOnBorrowingModifier
{
    #[tracing::instrument(skip(self), err(level = "warn"))]
    async fn update_payment(
        &self,
        dto: UpdatePaymentDto,
    ) -> error_stack::Result<PaymentDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let payment = self
            .payment_query()
            .find_by_id_for_update(&mut connection, &PaymentId::new(dto.id))
            .await?
            .ok_or_else(|| not_found("Payment", dto.id))?
            .amend(
                dto.status,
                dto.payment_type,
                dto.session_url.map(SessionUrl::new),
                dto.session_id.map(SessionId::new),
            )?;
        self.payment_modifier()
            .update(&mut connection, &payment)
            .await?;

        let borrowing = self
            .borrowing_query()
            .find_by_id_for_update(&mut connection, payment.borrowing_id())
            .await?
            .ok_or_else(|| not_found("Borrowing", payment.borrowing_id().as_ref()))?;
        if let Some(settled) = payment.reconcile(&borrowing) {
            self.borrowing_modifier()
                .update(&mut connection, &settled)
                .await?;
            info!(borrowing = %settled.id().as_ref(), "Borrowing settled by payment");
        }

        connection.commit().await?;

        Ok(PaymentDto::from(payment))
    }
}

impl<T> UpdatePaymentService for T where
    T: DependOnPaymentQuery
        + DependOnPaymentModifier
        + DependOnBorrowingQuery
        + DependOnBorrowingModifier
{
}

#[async_trait::async_trait]
pub trait GetPaymentService:
    'static + Sync + Send + DependOnPaymentQuery + DependOnBorrowingQuery + DependOnUserQuery
{
    async fn get_payment(&self, dto: GetPaymentDto) -> error_stack::Result<PaymentDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let payment = self
            .payment_query()
            .find_by_id(&mut connection, &PaymentId::new(dto.id))
            .await?
            .ok_or_else(|| not_found("Payment", dto.id))?;

        Ok(PaymentDto::from(payment))
    }

    async fn get_payments_from_borrowing(
        &self,
        dto: GetPaymentsFromBorrowingIdDto,
    ) -> error_stack::Result<Vec<PaymentDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let borrowing_id = BorrowingId::new(dto.borrowing_id);
        self.borrowing_query()
            .find_by_id(&mut connection, &borrowing_id)
            .await?
            .ok_or_else(|| not_found("Borrowing", dto.borrowing_id))?;

        let payments = self
            .payment_query()
            .find_by_borrowing_id(&mut connection, &borrowing_id)
            .await?;

        Ok(payments.into_iter().map(PaymentDto::from).collect())
    }

    async fn get_payments_from_user(
        &self,
        dto: GetPaymentsFromUserIdDto,
    ) -> error_stack::Result<Vec<PaymentDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let user_id = UserId::new(dto.user_id);
        self.user_query()
            .find_by_id(&mut connection, &user_id)
            .await?
            .ok_or_else(|| not_found("User", dto.user_id))?;

        let payments = self
            .payment_query()
            .find_by_user_id(&mut connection, &user_id)
            .await?;

        Ok(payments.into_iter().map(PaymentDto::from).collect())
    }
}

impl<T> GetPaymentService for T where
    T: DependOnPaymentQuery + DependOnBorrowingQuery + DependOnUserQuery
{
}
