use error_stack::Report;
use tracing::info;
use uuid::Uuid;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    BookQuery, BorrowingQuery, DependOnBookQuery, DependOnBorrowingQuery, DependOnUserQuery,
    UserQuery,
};
use kernel::interface::update::{
    BookModifier, BorrowingModifier, DependOnBookModifier, DependOnBorrowingModifier,
};
use kernel::prelude::entity::{
    BookId, Borrowing, BorrowingId, ExpectedReturnDate, UserEmail, UserId,
};
use kernel::KernelError;

use crate::service::not_found;
use crate::transfer::{
    BorrowingDto, CreateBorrowingDto, GetBorrowingDto, GetBorrowingsFromEmailDto,
    GetBorrowingsFromUserIdDto, ReturnBorrowingDto,
};

#[async_trait::async_trait]
pub trait BorrowBookService:
    'static
    + Sync
    + Send
    + DependOnClock
    + DependOnUserQuery
    + DependOnBookQuery
    + DependOnBookModifier
    + DependOnBorrowingModifier
{
    /// Takes a copy off the shelf and opens a borrowing in one transaction.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    async fn borrow_book(
        &self,
        dto: CreateBorrowingDto,
    ) -> error_stack::Result<BorrowingDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let today = self.clock().today();

        let user_id = UserId::new(dto.user_id);
        self.user_query()
            .find_by_id(&mut connection, &user_id)
            .await?
            .ok_or_else(|| not_found("User", dto.user_id))?;

        let book_id = BookId::new(dto.book_id);
        let book = self
            .book_query()
            .find_by_id_for_update(&mut connection, &book_id)
            .await?
            .ok_or_else(|| not_found("Book", dto.book_id))?
            .lend()?;
        self.book_modifier().update(&mut connection, &book).await?;

        let borrowing = Borrowing::open(
            BorrowingId::new(Uuid::new_v4()),
            book_id,
            user_id,
            today,
            ExpectedReturnDate::new(dto.expected_return_date),
        );
        self.borrowing_modifier()
            .create(&mut connection, &borrowing)
            .await?;

        connection.commit().await?;
        info!(
            borrowing = %borrowing.id().as_ref(),
            copies_left = book.copies().as_ref(),
            "Book borrowed"
        );

        Ok(BorrowingDto::as_of(borrowing, today))
    }
}

impl<T> BorrowBookService for T where
    T: DependOnClock
        + DependOnUserQuery
        + DependOnBookQuery
        + DependOnBookModifier
        + DependOnBorrowingModifier
{
}

#[async_trait::async_trait]
pub trait ReturnBookService:
    'static
    + Sync
    + Send
    + DependOnClock
    + DependOnUserQuery
    + DependOnBookQuery
    + DependOnBookModifier
    + DependOnBorrowingQuery
    + DependOnBorrowingModifier
{
    /// Closes the borrowing and puts the copy back on the shelf in one transaction.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    async fn return_book(
        &self,
        dto: ReturnBorrowingDto,
    ) -> error_stack::Result<BorrowingDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let today = self.clock().today();

        let user_id = UserId::new(dto.user_id);
        self.user_query()
            .find_by_id(&mut connection, &user_id)
            .await?
            .ok_or_else(|| not_found("User", dto.user_id))?;

        let borrowing_id = BorrowingId::new(dto.borrowing_id);
        let borrowing = self
            .borrowing_query()
            .find_by_id_for_update(&mut connection, &borrowing_id)
            .await?
            .ok_or_else(|| not_found("Borrowing", dto.borrowing_id))?
            .close(today)?;

        let book = self
            .book_query()
            .find_by_id_for_update(&mut connection, borrowing.book_id())
            .await?
            .ok_or_else(|| not_found("Book", borrowing.book_id().as_ref()))?
            .restock();
        self.book_modifier().update(&mut connection, &book).await?;
        self.borrowing_modifier()
            .update(&mut connection, &borrowing)
            .await?;

        connection.commit().await?;
        info!(
            borrowing = %borrowing_id.as_ref(),
            status = %borrowing.status(),
            "Book returned"
        );

        Ok(BorrowingDto::as_of(borrowing, today))
    }
}

impl<T> ReturnBookService for T where
    T: DependOnClock
        + DependOnUserQuery
        + DependOnBookQuery
        + DependOnBookModifier
        + DependOnBorrowingQuery
        + DependOnBorrowingModifier
{
}

#[async_trait::async_trait]
pub trait GetBorrowingService:
    'static + Sync + Send + DependOnClock + DependOnUserQuery + DependOnBorrowingQuery
{
    async fn get_borrowing(
        &self,
        dto: GetBorrowingDto,
    ) -> error_stack::Result<BorrowingDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let borrowing = self
            .borrowing_query()
            .find_by_id(&mut connection, &BorrowingId::new(dto.id))
            .await?
            .ok_or_else(|| not_found("Borrowing", dto.id))?;

        Ok(BorrowingDto::as_of(borrowing, self.clock().today()))
    }

    async fn get_borrowings_from_user(
        &self,
        dto: GetBorrowingsFromUserIdDto,
    ) -> error_stack::Result<Vec<BorrowingDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let user_id = UserId::new(dto.user_id);
        self.user_query()
            .find_by_id(&mut connection, &user_id)
            .await?
            .ok_or_else(|| not_found("User", dto.user_id))?;

        let borrowings = self
            .borrowing_query()
            .find_by_user_id(&mut connection, &user_id)
            .await?;

        let today = self.clock().today();
        Ok(borrowings
            .into_iter()
            .map(|borrowing| BorrowingDto::as_of(borrowing, today))
            .collect())
    }

    async fn get_borrowings_from_email(
        &self,
        dto: GetBorrowingsFromEmailDto,
    ) -> error_stack::Result<Vec<BorrowingDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let email = UserEmail::new(dto.email.trim());
        let user = self
            .user_query()
            .find_by_email(&mut connection, &email)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("No user registered with {}", email.as_ref()))
            })?;

        let borrowings = self
            .borrowing_query()
            .find_by_user_id(&mut connection, user.id())
            .await?;

        let today = self.clock().today();
        Ok(borrowings
            .into_iter()
            .map(|borrowing| BorrowingDto::as_of(borrowing, today))
            .collect())
    }

    /// Unreturned borrowings past their expected date, each reading as `Overdue`.
    async fn get_overdue_borrowings(&self) -> error_stack::Result<Vec<BorrowingDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let today = self.clock().today();

        let borrowings = self
            .borrowing_query()
            .find_unreturned_due_before(&mut connection, &today)
            .await?;

        Ok(borrowings
            .into_iter()
            .map(|borrowing| BorrowingDto::as_of(borrowing, today))
            .collect())
    }
}

impl<T> GetBorrowingService for T where
    T: DependOnClock + DependOnUserQuery + DependOnBorrowingQuery
{
}
