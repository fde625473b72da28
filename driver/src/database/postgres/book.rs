use error_stack::Report;
use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    AuthorId, Book, BookCover, BookId, BookTitle, CopyCount, CostPerDay, GenreId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::{not_found, ConvertError};

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut PostgresTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id_for_update(con, id).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Transaction = PostgresTransaction;

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::update(con, book).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    title: String,
    author_id: Option<Uuid>,
    genre_ids: Vec<Uuid>,
    cover: String,
    count_books_in_library: i32,
    cost_per_day: Option<Decimal>,
}

impl TryFrom<BookRow> for Book {
    type Error = Report<KernelError>;
    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        Ok(Book::new(
            BookId::new(row.id),
            BookTitle::new(row.title),
            row.author_id.map(AuthorId::new),
            row.genre_ids.into_iter().map(GenreId::new).collect(),
            row.cover.parse::<BookCover>()?,
            CopyCount::new(row.count_books_in_library),
            row.cost_per_day.map(CostPerDay::new),
        ))
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    pub(in crate::database) async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author_id, cover, count_books_in_library, cost_per_day,
                   ARRAY(SELECT genre_id FROM book_genres WHERE book_id = books.id ORDER BY genre_id) AS genre_ids
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Book::try_from).transpose()
    }

    pub(in crate::database) async fn find_by_id_for_update(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author_id, cover, count_books_in_library, cost_per_day,
                   ARRAY(SELECT genre_id FROM book_genres WHERE book_id = books.id ORDER BY genre_id) AS genre_ids
            FROM books
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Book::try_from).transpose()
    }

    pub(in crate::database) async fn update(
        con: &mut PgConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE books
            SET count_books_in_library = $2
            WHERE id = $1
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.copies().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(not_found("Book", book.id().as_ref()));
        }
        Ok(())
    }
}
