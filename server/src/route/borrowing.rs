mod request;
pub(in crate::route) mod response;

use axum::extract::{Path, Query, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use uuid::Uuid;

use application::service::{
    BorrowBookService, CalculateCostService, GetBorrowingService, ReturnBookService,
};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::borrowing::request::{
    CreateBorrowingRequest, EmailQuery, ReturnBorrowingRequest, Transformer,
};
use crate::route::borrowing::response::{Created, Presenter};

pub trait BorrowingRouter {
    fn route_borrowing(self) -> Self;
}

impl BorrowingRouter for Router<AppModule> {
    fn route_borrowing(self) -> Self {
        self.route(
            "/borrowings",
            post(
                |State(handler): State<AppModule>, Json(req): Json<CreateBorrowingRequest>| async move {
                    Controller::new(Transformer, Created)
                        .intake(req)
                        .handle(|dto| handler.pgpool().borrow_book(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .get(
                |State(handler): State<AppModule>, Query(req): Query<EmailQuery>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| handler.pgpool().get_borrowings_from_email(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/borrowings/overdue",
            get(|State(handler): State<AppModule>| async move {
                Controller::new((), Presenter)
                    .bypass(|| handler.pgpool().get_overdue_borrowings())
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/borrowings/:id",
            get(
                |State(handler): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(id)
                        .handle(|dto| handler.pgpool().get_borrowing(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/borrowings/:id/return",
            patch(
                |State(handler): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<ReturnBorrowingRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((id, req))
                        .handle(|dto| handler.pgpool().return_book(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/borrowings/:id/cost",
            get(
                |State(handler): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(id)
                        .handle(|dto| handler.pgpool().calculate_cost(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
