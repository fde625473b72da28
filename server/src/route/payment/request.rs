use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{
    CreatePaymentDto, GetPaymentDto, GetPaymentsFromBorrowingIdDto, UpdatePaymentDto,
};
use kernel::prelude::entity::{PaymentStatus, PaymentType};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    borrowing_id: Uuid,
    #[serde(default)]
    status: PaymentStatus,
    #[serde(default, rename = "type")]
    payment_type: PaymentType,
    money_to_pay: Option<Decimal>,
    session_url: Option<String>,
    session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePaymentRequest {
    status: PaymentStatus,
    #[serde(rename = "type")]
    payment_type: PaymentType,
    session_url: Option<String>,
    session_id: Option<String>,
}

pub struct BorrowingPayments(pub Uuid);

pub struct Transformer;

impl Intake<CreatePaymentRequest> for Transformer {
    type To = CreatePaymentDto;
    fn emit(&self, req: CreatePaymentRequest) -> Self::To {
        CreatePaymentDto {
            borrowing_id: req.borrowing_id,
            status: req.status,
            payment_type: req.payment_type,
            money_to_pay: req.money_to_pay,
            session_url: req.session_url,
            session_id: req.session_id,
        }
    }
}

impl Intake<(Uuid, UpdatePaymentRequest)> for Transformer {
    type To = UpdatePaymentDto;
    fn emit(&self, (id, req): (Uuid, UpdatePaymentRequest)) -> Self::To {
        UpdatePaymentDto {
            id,
            status: req.status,
            payment_type: req.payment_type,
            session_url: req.session_url,
            session_id: req.session_id,
        }
    }
}

impl Intake<Uuid> for Transformer {
    type To = GetPaymentDto;
    fn emit(&self, id: Uuid) -> Self::To {
        GetPaymentDto { id }
    }
}

impl Intake<BorrowingPayments> for Transformer {
    type To = GetPaymentsFromBorrowingIdDto;
    fn emit(&self, BorrowingPayments(borrowing_id): BorrowingPayments) -> Self::To {
        GetPaymentsFromBorrowingIdDto { borrowing_id }
    }
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;

    use kernel::prelude::entity::{PaymentStatus, PaymentType};

    use crate::controller::Intake;
    use crate::route::payment::request::{CreatePaymentRequest, Transformer};

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let req: CreatePaymentRequest = serde_json::from_str(
            r#"{"borrowing_id": "6f1c2a4e-8b7d-4c3e-9a5f-0d1e2f3a4b5c", "money_to_pay": "12.50"}"#,
        )
        .unwrap();
        let dto = Transformer.emit(req);
        assert_eq!(dto.status, PaymentStatus::Pending);
        assert_eq!(dto.payment_type, PaymentType::Cash);
        assert_eq!(dto.money_to_pay, Some(Decimal::new(1250, 2)));
        assert!(dto.session_url.is_none());
    }
}
