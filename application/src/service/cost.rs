use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{
    BookQuery, BorrowingQuery, DependOnBookQuery, DependOnBorrowingQuery,
};
use kernel::prelude::entity::BorrowingId;
use kernel::KernelError;

use crate::service::not_found;
use crate::transfer::{CostDto, GetBorrowingDto};

#[async_trait::async_trait]
pub trait CalculateCostService:
    'static + Sync + Send + DependOnBookQuery + DependOnBorrowingQuery
{
    async fn calculate_cost(&self, dto: GetBorrowingDto) -> error_stack::Result<CostDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let borrowing = self
            .borrowing_query()
            .find_by_id(&mut connection, &BorrowingId::new(dto.id))
            .await?
            .ok_or_else(|| not_found("Borrowing", dto.id))?;
        let book = self
            .book_query()
            .find_by_id(&mut connection, borrowing.book_id())
            .await?
            .ok_or_else(|| not_found("Book", borrowing.book_id().as_ref()))?;

        let cost = borrowing.calculate_cost(book.cost_per_day().as_ref());
        Ok(CostDto {
            borrowing_id: dto.id,
            duration_days: borrowing.duration_days(),
            overdue_days: borrowing.overdue_days(),
            cost_per_day: book.cost_per_day().map(Into::into),
            cost: cost.into(),
        })
    }
}

impl<T> CalculateCostService for T where T: DependOnBookQuery + DependOnBorrowingQuery {}
