use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use uuid::Uuid;

use application::service::{GetBorrowingService, GetPaymentService};
use application::transfer::{GetBorrowingsFromUserIdDto, GetPaymentsFromUserIdDto};

use crate::controller::{Controller, Intake};
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::borrowing::response::Presenter;
use crate::route::payment::response::Presenter as PaymentPresenter;

pub trait UserRouter {
    fn route_user(self) -> Self;
}

impl UserRouter for Router<AppModule> {
    fn route_user(self) -> Self {
        self.route(
            "/users/:id/borrowings",
            get(
                |State(handler): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(id)
                        .handle(|dto| handler.pgpool().get_borrowings_from_user(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/:id/payments",
            get(
                |State(handler): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, PaymentPresenter)
                        .intake(UserPayments(id))
                        .handle(|dto| handler.pgpool().get_payments_from_user(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}

struct Transformer;

struct UserPayments(Uuid);

impl Intake<Uuid> for Transformer {
    type To = GetBorrowingsFromUserIdDto;
    fn emit(&self, user_id: Uuid) -> Self::To {
        GetBorrowingsFromUserIdDto { user_id }
    }
}

impl Intake<UserPayments> for Transformer {
    type To = GetPaymentsFromUserIdDto;
    fn emit(&self, UserPayments(user_id): UserPayments) -> Self::To {
        GetPaymentsFromUserIdDto { user_id }
    }
}
