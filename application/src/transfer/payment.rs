use rust_decimal::Decimal;
use uuid::Uuid;

use kernel::prelude::entity::{DestructPayment, Payment, PaymentStatus, PaymentType};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PaymentDto {
    pub id: Uuid,
    pub borrowing_id: Uuid,
    pub status: PaymentStatus,
    pub payment_type: PaymentType,
    pub money_to_pay: Decimal,
    pub session_url: Option<String>,
    pub session_id: Option<String>,
}

impl From<Payment> for PaymentDto {
    fn from(value: Payment) -> Self {
        let DestructPayment {
            id,
            borrowing_id,
            status,
            payment_type,
            money_to_pay,
            session_url,
            session_id,
        } = value.into_destruct();
        Self {
            id: id.into(),
            borrowing_id: borrowing_id.into(),
            status,
            payment_type,
            money_to_pay: money_to_pay.into(),
            session_url: session_url.map(Into::into),
            session_id: session_id.map(Into::into),
        }
    }
}

#[derive(Debug)]
pub struct CreatePaymentDto {
    pub borrowing_id: Uuid,
    pub status: PaymentStatus,
    pub payment_type: PaymentType,
    /// Computed from the borrowing when absent.
    pub money_to_pay: Option<Decimal>,
    pub session_url: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug)]
pub struct UpdatePaymentDto {
    pub id: Uuid,
    pub status: PaymentStatus,
    pub payment_type: PaymentType,
    pub session_url: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug)]
pub struct GetPaymentDto {
    pub id: Uuid,
}

#[derive(Debug)]
pub struct GetPaymentsFromBorrowingIdDto {
    pub borrowing_id: Uuid,
}

#[derive(Debug)]
pub struct GetPaymentsFromUserIdDto {
    pub user_id: Uuid,
}
