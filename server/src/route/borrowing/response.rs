use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;
use uuid::Uuid;

use application::transfer::{BorrowingDto, CostDto};
use kernel::prelude::entity::BorrowingStatus;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct BorrowingResponse {
    id: Uuid,
    book_id: Uuid,
    user_id: Uuid,
    date_borrowed: Date,
    expected_return_date: Date,
    actual_return_date: Option<Date>,
    status: BorrowingStatus,
}

impl From<BorrowingDto> for BorrowingResponse {
    fn from(value: BorrowingDto) -> Self {
        Self {
            id: value.id,
            book_id: value.book_id,
            user_id: value.user_id,
            date_borrowed: value.date_borrowed,
            expected_return_date: value.expected_return_date,
            actual_return_date: value.actual_return_date,
            status: value.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CostResponse {
    borrowing_id: Uuid,
    duration_days: i64,
    overdue_days: i64,
    cost_per_day: Option<Decimal>,
    cost: Decimal,
}

pub struct Presenter;

impl Exhaust<BorrowingDto> for Presenter {
    type To = Json<BorrowingResponse>;
    fn emit(&self, input: BorrowingDto) -> Self::To {
        Json(BorrowingResponse::from(input))
    }
}

impl Exhaust<Vec<BorrowingDto>> for Presenter {
    type To = Json<Vec<BorrowingResponse>>;
    fn emit(&self, input: Vec<BorrowingDto>) -> Self::To {
        Json(input.into_iter().map(BorrowingResponse::from).collect())
    }
}

impl Exhaust<CostDto> for Presenter {
    type To = Json<CostResponse>;
    fn emit(
        &self,
        CostDto {
            borrowing_id,
            duration_days,
            overdue_days,
            cost_per_day,
            cost,
        }: CostDto,
    ) -> Self::To {
        Json(CostResponse {
            borrowing_id,
            duration_days,
            overdue_days,
            cost_per_day,
            cost,
        })
    }
}

pub struct Created;

impl Exhaust<BorrowingDto> for Created {
    type To = (StatusCode, Json<BorrowingResponse>);
    fn emit(&self, input: BorrowingDto) -> Self::To {
        (StatusCode::CREATED, Json(BorrowingResponse::from(input)))
    }
}
