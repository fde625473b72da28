use error_stack::Report;
use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::PaymentQuery;
use kernel::interface::update::PaymentModifier;
use kernel::prelude::entity::{
    BorrowingId, Money, Payment, PaymentId, PaymentStatus, PaymentType, SessionId, SessionUrl,
    UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::{not_found, ConvertError};

pub struct PostgresPaymentRepository;

#[async_trait::async_trait]
impl PaymentQuery for PostgresPaymentRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &PaymentId,
    ) -> error_stack::Result<Option<Payment>, KernelError> {
        PgPaymentInternal::find_by_id(con, id).await
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut PostgresTransaction,
        id: &PaymentId,
    ) -> error_stack::Result<Option<Payment>, KernelError> {
        PgPaymentInternal::find_by_id_for_update(con, id).await
    }

    async fn find_by_borrowing_id(
        &self,
        con: &mut PostgresTransaction,
        borrowing_id: &BorrowingId,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        PgPaymentInternal::find_by_borrowing_id(con, borrowing_id).await
    }

    async fn find_by_user_id(
        &self,
        con: &mut PostgresTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        PgPaymentInternal::find_by_user_id(con, user_id).await
    }
}

#[async_trait::async_trait]
impl PaymentModifier for PostgresPaymentRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError> {
        PgPaymentInternal::create(con, payment).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError> {
        PgPaymentInternal::update(con, payment).await
    }
}

#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    borrowing_id: Uuid,
    status: String,
    payment_type: String,
    money_to_pay: Decimal,
    session_url: Option<String>,
    session_id: Option<String>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = Report<KernelError>;
    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(Payment::new(
            PaymentId::new(row.id),
            BorrowingId::new(row.borrowing_id),
            row.status.parse::<PaymentStatus>()?,
            row.payment_type.parse::<PaymentType>()?,
            Money::new(row.money_to_pay),
            row.session_url.map(SessionUrl::new),
            row.session_id.map(SessionId::new),
        ))
    }
}

pub(in crate::database) struct PgPaymentInternal;

impl PgPaymentInternal {
    pub(in crate::database) async fn find_by_id(
        con: &mut PgConnection,
        id: &PaymentId,
    ) -> error_stack::Result<Option<Payment>, KernelError> {
        let row = sqlx::query_as::<_, PaymentRow>(
            // language=postgresql
            r#"
            SELECT id, borrowing_id, status, payment_type, money_to_pay, session_url, session_id
            FROM payments
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Payment::try_from).transpose()
    }

    pub(in crate::database) async fn find_by_id_for_update(
        con: &mut PgConnection,
        id: &PaymentId,
    ) -> error_stack::Result<Option<Payment>, KernelError> {
        let row = sqlx::query_as::<_, PaymentRow>(
            // language=postgresql
            r#"
            SELECT id, borrowing_id, status, payment_type, money_to_pay, session_url, session_id
            FROM payments
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Payment::try_from).transpose()
    }

    pub(in crate::database) async fn find_by_borrowing_id(
        con: &mut PgConnection,
        borrowing_id: &BorrowingId,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            // language=postgresql
            r#"
            SELECT id, borrowing_id, status, payment_type, money_to_pay, session_url, session_id
            FROM payments
            WHERE borrowing_id = $1
            ORDER BY date_paid, id
            "#,
        )
        .bind(borrowing_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Payment::try_from).collect()
    }

    pub(in crate::database) async fn find_by_user_id(
        con: &mut PgConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            // language=postgresql
            r#"
            SELECT p.id, p.borrowing_id, p.status, p.payment_type, p.money_to_pay, p.session_url, p.session_id
            FROM payments p
            JOIN borrowings b ON b.id = p.borrowing_id
            WHERE b.user_id = $1
            ORDER BY p.date_paid, p.id
            "#,
        )
        .bind(user_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Payment::try_from).collect()
    }

    pub(in crate::database) async fn create(
        con: &mut PgConnection,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO payments (id, borrowing_id, status, payment_type, money_to_pay, session_url, session_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(payment.id().as_ref())
        .bind(payment.borrowing_id().as_ref())
        .bind(payment.status().as_str())
        .bind(payment.payment_type().as_str())
        .bind(payment.money_to_pay().as_ref())
        .bind(payment.session_url().as_ref().map(|url| url.as_ref().as_str()))
        .bind(payment.session_id().as_ref().map(|id| id.as_ref().as_str()))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    /// The amount column is never touched after creation.
    pub(in crate::database) async fn update(
        con: &mut PgConnection,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET status = $2, payment_type = $3, session_url = $4, session_id = $5
            WHERE id = $1
            "#,
        )
        .bind(payment.id().as_ref())
        .bind(payment.status().as_str())
        .bind(payment.payment_type().as_str())
        .bind(payment.session_url().as_ref().map(|url| url.as_ref().as_str()))
        .bind(payment.session_id().as_ref().map(|id| id.as_ref().as_str()))
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(not_found("Payment", payment.id().as_ref()));
        }
        Ok(())
    }
}
