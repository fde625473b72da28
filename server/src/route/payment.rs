mod request;
pub(in crate::route) mod response;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use application::service::{CreatePaymentService, GetPaymentService, UpdatePaymentService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::payment::request::{
    BorrowingPayments, CreatePaymentRequest, Transformer, UpdatePaymentRequest,
};
use crate::route::payment::response::{Created, Presenter};

pub trait PaymentRouter {
    fn route_payment(self) -> Self;
}

impl PaymentRouter for Router<AppModule> {
    fn route_payment(self) -> Self {
        self.route(
            "/payments",
            post(
                |State(handler): State<AppModule>, Json(req): Json<CreatePaymentRequest>| async move {
                    Controller::new(Transformer, Created)
                        .intake(req)
                        .handle(|dto| handler.pgpool().create_payment(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/payments/:id",
            get(
                |State(handler): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(id)
                        .handle(|dto| handler.pgpool().get_payment(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .put(
                |State(handler): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<UpdatePaymentRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((id, req))
                        .handle(|dto| handler.pgpool().update_payment(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/borrowings/:id/payments",
            get(
                |State(handler): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(BorrowingPayments(id))
                        .handle(|dto| handler.pgpool().get_payments_from_borrowing(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
