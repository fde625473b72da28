use error_stack::Report;
use sqlx::PgConnection;
use time::Date;
use uuid::Uuid;

use kernel::interface::query::BorrowingQuery;
use kernel::interface::update::BorrowingModifier;
use kernel::prelude::entity::{
    ActualReturnDate, BookId, BorrowedOn, Borrowing, BorrowingId, BorrowingStatus,
    ExpectedReturnDate, UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::{not_found, ConvertError};

pub struct PostgresBorrowingRepository;

#[async_trait::async_trait]
impl BorrowingQuery for PostgresBorrowingRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &BorrowingId,
    ) -> error_stack::Result<Option<Borrowing>, KernelError> {
        PgBorrowingInternal::find_by_id(con, id).await
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut PostgresTransaction,
        id: &BorrowingId,
    ) -> error_stack::Result<Option<Borrowing>, KernelError> {
        PgBorrowingInternal::find_by_id_for_update(con, id).await
    }

    async fn find_by_user_id(
        &self,
        con: &mut PostgresTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError> {
        PgBorrowingInternal::find_by_user_id(con, user_id).await
    }

    async fn find_unreturned_due_before(
        &self,
        con: &mut PostgresTransaction,
        date: &Date,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError> {
        PgBorrowingInternal::find_unreturned_due_before(con, date).await
    }
}

#[async_trait::async_trait]
impl BorrowingModifier for PostgresBorrowingRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        borrowing: &Borrowing,
    ) -> error_stack::Result<(), KernelError> {
        PgBorrowingInternal::create(con, borrowing).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        borrowing: &Borrowing,
    ) -> error_stack::Result<(), KernelError> {
        PgBorrowingInternal::update(con, borrowing).await
    }
}

#[derive(sqlx::FromRow)]
struct BorrowingRow {
    id: Uuid,
    book_id: Uuid,
    user_id: Uuid,
    date_borrowed: Date,
    expected_return_date: Date,
    actual_return_date: Option<Date>,
    status: String,
}

impl TryFrom<BorrowingRow> for Borrowing {
    type Error = Report<KernelError>;
    fn try_from(row: BorrowingRow) -> Result<Self, Self::Error> {
        Ok(Borrowing::new(
            BorrowingId::new(row.id),
            BookId::new(row.book_id),
            UserId::new(row.user_id),
            BorrowedOn::new(row.date_borrowed),
            ExpectedReturnDate::new(row.expected_return_date),
            row.actual_return_date.map(ActualReturnDate::new),
            row.status.parse::<BorrowingStatus>()?,
        ))
    }
}

fn collect(rows: Vec<BorrowingRow>) -> error_stack::Result<Vec<Borrowing>, KernelError> {
    rows.into_iter().map(Borrowing::try_from).collect()
}

pub(in crate::database) struct PgBorrowingInternal;

impl PgBorrowingInternal {
    pub(in crate::database) async fn find_by_id(
        con: &mut PgConnection,
        id: &BorrowingId,
    ) -> error_stack::Result<Option<Borrowing>, KernelError> {
        let row = sqlx::query_as::<_, BorrowingRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, user_id, date_borrowed, expected_return_date, actual_return_date, status
            FROM borrowings
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Borrowing::try_from).transpose()
    }

    pub(in crate::database) async fn find_by_id_for_update(
        con: &mut PgConnection,
        id: &BorrowingId,
    ) -> error_stack::Result<Option<Borrowing>, KernelError> {
        let row = sqlx::query_as::<_, BorrowingRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, user_id, date_borrowed, expected_return_date, actual_return_date, status
            FROM borrowings
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Borrowing::try_from).transpose()
    }

    pub(in crate::database) async fn find_by_user_id(
        con: &mut PgConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError> {
        let rows = sqlx::query_as::<_, BorrowingRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, user_id, date_borrowed, expected_return_date, actual_return_date, status
            FROM borrowings
            WHERE user_id = $1
            ORDER BY expected_return_date, id
            "#,
        )
        .bind(user_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        collect(rows)
    }

    pub(in crate::database) async fn find_unreturned_due_before(
        con: &mut PgConnection,
        date: &Date,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError> {
        let rows = sqlx::query_as::<_, BorrowingRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, user_id, date_borrowed, expected_return_date, actual_return_date, status
            FROM borrowings
            WHERE actual_return_date IS NULL AND expected_return_date < $1
            ORDER BY expected_return_date, id
            "#,
        )
        .bind(date)
        .fetch_all(con)
        .await
        .convert_error()?;
        collect(rows)
    }

    pub(in crate::database) async fn create(
        con: &mut PgConnection,
        borrowing: &Borrowing,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO borrowings (id, book_id, user_id, date_borrowed, expected_return_date, actual_return_date, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(borrowing.id().as_ref())
        .bind(borrowing.book_id().as_ref())
        .bind(borrowing.user_id().as_ref())
        .bind(borrowing.borrowed_on().as_ref())
        .bind(borrowing.expected_return().as_ref())
        .bind(borrowing.actual_return().as_ref().map(|date| *date.as_ref()))
        .bind(borrowing.status().as_str())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    pub(in crate::database) async fn update(
        con: &mut PgConnection,
        borrowing: &Borrowing,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE borrowings
            SET actual_return_date = $2, status = $3
            WHERE id = $1
            "#,
        )
        .bind(borrowing.id().as_ref())
        .bind(borrowing.actual_return().as_ref().map(|date| *date.as_ref()))
        .bind(borrowing.status().as_str())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(not_found("Borrowing", borrowing.id().as_ref()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::BorrowingQuery;
    use kernel::interface::update::BorrowingModifier;
    use kernel::prelude::entity::{Borrowing, BorrowingId, BorrowingStatus, ExpectedReturnDate};
    use kernel::KernelError;

    use crate::database::postgres::fixture;
    use crate::database::postgres::{PostgresBorrowingRepository, PostgresDatabase};
    use crate::error::ConvertError;

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn create_close_and_list() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let user_id = fixture::insert_user(&mut con).await.convert_error()?;
        let (book_id, _) = fixture::insert_book(&mut con, None).await.convert_error()?;
        let today = OffsetDateTime::now_utc().date();

        let late = Borrowing::open(
            BorrowingId::new(Uuid::new_v4()),
            book_id.clone(),
            user_id.clone(),
            today - Duration::days(10),
            ExpectedReturnDate::new(today - Duration::days(3)),
        );
        let on_time = Borrowing::open(
            BorrowingId::new(Uuid::new_v4()),
            book_id,
            user_id.clone(),
            today,
            ExpectedReturnDate::new(today + Duration::days(7)),
        );
        PostgresBorrowingRepository.create(&mut con, &on_time).await?;
        PostgresBorrowingRepository.create(&mut con, &late).await?;

        let listed = PostgresBorrowingRepository
            .find_by_user_id(&mut con, &user_id)
            .await?;
        assert_eq!(listed, vec![late.clone(), on_time.clone()]);

        let overdue = PostgresBorrowingRepository
            .find_unreturned_due_before(&mut con, &today)
            .await?;
        assert!(overdue.contains(&late));
        assert!(!overdue.contains(&on_time));

        let closed = PostgresBorrowingRepository
            .find_by_id_for_update(&mut con, late.id())
            .await?
            .unwrap()
            .close(today)?;
        PostgresBorrowingRepository.update(&mut con, &closed).await?;

        let found = PostgresBorrowingRepository
            .find_by_id(&mut con, late.id())
            .await?
            .unwrap();
        assert_eq!(found.status(), &BorrowingStatus::OverdueReturned);
        assert_eq!(found, closed);
        Ok(())
    }
}
