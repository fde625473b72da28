use std::ops::{Deref, DerefMut};

use error_stack::{Report, ResultExt};
use sqlx::{Error, PgConnection, Pool, Postgres};

use kernel::interface::clock::DependOnClock;
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnBookQuery, DependOnBorrowingQuery, DependOnPaymentQuery, DependOnUserQuery,
};
use kernel::interface::update::{
    DependOnBookModifier, DependOnBorrowingModifier, DependOnPaymentModifier,
};
use kernel::KernelError;

use crate::clock::SystemClock;
use crate::env;
use crate::error::ConvertError;

pub use self::{book::*, borrowing::*, payment::*, user::*};

mod book;
mod borrowing;
mod payment;
mod user;

static POSTGRES_URL: &str = "POSTGRES_URL";

const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
    clock: SystemClock,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let pool = Pool::connect(&url).await.convert_error()?;
        Ok(Self {
            pool,
            clock: SystemClock,
        })
    }

    pub async fn migrate(&self) -> error_stack::Result<(), KernelError> {
        sqlx::migrate!("../migrations")
            .run(&self.pool)
            .await
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| "Failed to apply migrations")
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let transaction = self.pool.begin().await.convert_error()?;
        Ok(PostgresTransaction(transaction))
    }
}

pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl Deref for PostgresTransaction {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl DependOnClock for PostgresDatabase {
    type Clock = SystemClock;
    fn clock(&self) -> &Self::Clock {
        &self.clock
    }
}

impl DependOnBookQuery for PostgresDatabase {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBookModifier for PostgresDatabase {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

impl DependOnUserQuery for PostgresDatabase {
    type UserQuery = PostgresUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &PostgresUserRepository
    }
}

impl DependOnBorrowingQuery for PostgresDatabase {
    type BorrowingQuery = PostgresBorrowingRepository;
    fn borrowing_query(&self) -> &Self::BorrowingQuery {
        &PostgresBorrowingRepository
    }
}

impl DependOnBorrowingModifier for PostgresDatabase {
    type BorrowingModifier = PostgresBorrowingRepository;
    fn borrowing_modifier(&self) -> &Self::BorrowingModifier {
        &PostgresBorrowingRepository
    }
}

impl DependOnPaymentQuery for PostgresDatabase {
    type PaymentQuery = PostgresPaymentRepository;
    fn payment_query(&self) -> &Self::PaymentQuery {
        &PostgresPaymentRepository
    }
}

impl DependOnPaymentModifier for PostgresDatabase {
    type PaymentModifier = PostgresPaymentRepository;
    fn payment_modifier(&self) -> &Self::PaymentModifier {
        &PostgresPaymentRepository
    }
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                Error::PoolTimedOut => KernelError::Timeout,
                Error::Database(database)
                    if matches!(
                        database.code().as_deref(),
                        Some(SERIALIZATION_FAILURE | DEADLOCK_DETECTED)
                    ) =>
                {
                    KernelError::Conflict
                }
                _ => KernelError::Internal,
            };
            if context != KernelError::Conflict {
                tracing::error!("{error:?}");
            }
            Report::from(error).change_context(context)
        })
    }
}

#[cfg(test)]
mod test {
    use std::borrow::Cow;
    use std::fmt::{Display, Formatter};

    use sqlx::error::{DatabaseError, ErrorKind};
    use sqlx::Error;

    use kernel::KernelError;

    use crate::error::ConvertError;

    #[derive(Debug)]
    struct SqlState(&'static str);

    impl Display for SqlState {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "database error {}", self.0)
        }
    }

    impl std::error::Error for SqlState {}

    impl DatabaseError for SqlState {
        fn message(&self) -> &str {
            "database error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    fn context_of(error: Error) -> KernelError {
        *Err::<(), _>(error)
            .convert_error()
            .unwrap_err()
            .current_context()
    }

    #[test]
    fn contention_is_retryable_conflict() {
        assert_eq!(
            context_of(Error::Database(Box::new(SqlState("40001")))),
            KernelError::Conflict
        );
        assert_eq!(
            context_of(Error::Database(Box::new(SqlState("40P01")))),
            KernelError::Conflict
        );
    }

    #[test]
    fn other_database_errors_are_internal() {
        assert_eq!(
            context_of(Error::Database(Box::new(SqlState("23505")))),
            KernelError::Internal
        );
        assert_eq!(context_of(Error::RowNotFound), KernelError::Internal);
    }

    #[test]
    fn pool_timeout_is_timeout() {
        assert_eq!(context_of(Error::PoolTimedOut), KernelError::Timeout);
    }
}

#[cfg(test)]
pub(in crate::database) mod fixture {
    use rand::Rng;
    use rust_decimal::Decimal;
    use sqlx::PgConnection;
    use uuid::Uuid;

    use kernel::prelude::entity::{BookId, UserId};

    pub async fn insert_user(con: &mut PgConnection) -> Result<UserId, sqlx::Error> {
        let id = Uuid::new_v4();
        // language=postgresql
        sqlx::query("INSERT INTO users (id, email) VALUES ($1, $2)")
            .bind(id)
            .bind(format!("{id}@library.test"))
            .execute(con)
            .await?;
        Ok(UserId::new(id))
    }

    pub async fn insert_book(
        con: &mut PgConnection,
        cost_per_day: Option<Decimal>,
    ) -> Result<(BookId, i32), sqlx::Error> {
        let id = Uuid::new_v4();
        let copies = rand::thread_rng().gen_range(1..10);
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO books (id, title, cover, count_books_in_library, cost_per_day)
            VALUES ($1, $2, 'HARD', $3, $4)
            "#,
        )
        .bind(id)
        .bind("Lisova pisnia")
        .bind(copies)
        .bind(cost_per_day)
        .execute(con)
        .await?;
        Ok((BookId::new(id), copies))
    }
}
