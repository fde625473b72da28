use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::PaymentDto;
use kernel::prelude::entity::{PaymentStatus, PaymentType};

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    id: Uuid,
    borrowing_id: Uuid,
    status: PaymentStatus,
    #[serde(rename = "type")]
    payment_type: PaymentType,
    money_to_pay: Decimal,
    session_url: Option<String>,
    session_id: Option<String>,
}

impl From<PaymentDto> for PaymentResponse {
    fn from(value: PaymentDto) -> Self {
        Self {
            id: value.id,
            borrowing_id: value.borrowing_id,
            status: value.status,
            payment_type: value.payment_type,
            money_to_pay: value.money_to_pay,
            session_url: value.session_url,
            session_id: value.session_id,
        }
    }
}

pub struct Presenter;

impl Exhaust<PaymentDto> for Presenter {
    type To = Json<PaymentResponse>;
    fn emit(&self, input: PaymentDto) -> Self::To {
        Json(PaymentResponse::from(input))
    }
}

impl Exhaust<Vec<PaymentDto>> for Presenter {
    type To = Json<Vec<PaymentResponse>>;
    fn emit(&self, input: Vec<PaymentDto>) -> Self::To {
        Json(input.into_iter().map(PaymentResponse::from).collect())
    }
}

pub struct Created;

impl Exhaust<PaymentDto> for Created {
    type To = (StatusCode, Json<PaymentResponse>);
    fn emit(&self, input: PaymentDto) -> Self::To {
        (StatusCode::CREATED, Json(PaymentResponse::from(input)))
    }
}
