use serde::Deserialize;
use time::Date;
use uuid::Uuid;

use application::transfer::{
    CreateBorrowingDto, GetBorrowingDto, GetBorrowingsFromEmailDto, ReturnBorrowingDto,
};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateBorrowingRequest {
    user_id: Uuid,
    book_id: Uuid,
    expected_return_date: Date,
}

#[derive(Debug, Deserialize)]
pub struct ReturnBorrowingRequest {
    user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    email: String,
}

pub struct Transformer;

impl Intake<CreateBorrowingRequest> for Transformer {
    type To = CreateBorrowingDto;
    fn emit(
        &self,
        CreateBorrowingRequest {
            user_id,
            book_id,
            expected_return_date,
        }: CreateBorrowingRequest,
    ) -> Self::To {
        CreateBorrowingDto {
            user_id,
            book_id,
            expected_return_date,
        }
    }
}

impl Intake<(Uuid, ReturnBorrowingRequest)> for Transformer {
    type To = ReturnBorrowingDto;
    fn emit(&self, (borrowing_id, req): (Uuid, ReturnBorrowingRequest)) -> Self::To {
        ReturnBorrowingDto {
            user_id: req.user_id,
            borrowing_id,
        }
    }
}

impl Intake<Uuid> for Transformer {
    type To = GetBorrowingDto;
    fn emit(&self, id: Uuid) -> Self::To {
        GetBorrowingDto { id }
    }
}

impl Intake<EmailQuery> for Transformer {
    type To = GetBorrowingsFromEmailDto;
    fn emit(&self, EmailQuery { email }: EmailQuery) -> Self::To {
        GetBorrowingsFromEmailDto { email }
    }
}
