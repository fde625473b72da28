use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::clock::DependOnClock;
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnBookQuery, DependOnBorrowingQuery, DependOnPaymentQuery, DependOnUserQuery,
};
use kernel::interface::update::{
    DependOnBookModifier, DependOnBorrowingModifier, DependOnPaymentModifier,
};
use kernel::prelude::entity::{
    Book, BookId, Borrowing, BorrowingId, Payment, User, UserId,
};
use kernel::KernelError;

use crate::clock::FixedClock;

pub use self::{book::*, borrowing::*, payment::*, user::*};

mod book;
mod borrowing;
mod payment;
mod user;

#[derive(Debug, Clone, Default)]
struct Store {
    books: HashMap<BookId, Book>,
    users: HashMap<UserId, User>,
    borrowings: HashMap<BorrowingId, Borrowing>,
    /// Kept in creation order.
    payments: Vec<Payment>,
}

/// Process-local store. Transactions are serialized: each one holds the whole store
/// and works on a copy that replaces it on commit.
#[derive(Clone)]
pub struct InMemoryDatabase {
    store: Arc<Mutex<Store>>,
    clock: FixedClock,
}

impl InMemoryDatabase {
    pub fn new(clock: FixedClock) -> Self {
        Self {
            store: Arc::new(Mutex::new(Store::default())),
            clock,
        }
    }

    pub async fn insert_book(&self, book: Book) {
        let mut store = self.store.lock().await;
        store.books.insert(book.id().clone(), book);
    }

    pub async fn insert_user(&self, user: User) {
        let mut store = self.store.lock().await;
        store.users.insert(user.id().clone(), user);
    }

    pub async fn book(&self, id: &BookId) -> Option<Book> {
        self.store.lock().await.books.get(id).cloned()
    }

    pub async fn borrowing(&self, id: &BorrowingId) -> Option<Borrowing> {
        self.store.lock().await.borrowings.get(id).cloned()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let guard = Arc::clone(&self.store).lock_owned().await;
        let working = guard.clone();
        Ok(InMemoryTransaction { guard, working })
    }
}

pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<Store>,
    working: Store,
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let InMemoryTransaction { mut guard, working } = self;
        *guard = working;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

impl DependOnClock for InMemoryDatabase {
    type Clock = FixedClock;
    fn clock(&self) -> &Self::Clock {
        &self.clock
    }
}

impl DependOnBookQuery for InMemoryDatabase {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &InMemoryBookRepository
    }
}

impl DependOnBookModifier for InMemoryDatabase {
    type BookModifier = InMemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &InMemoryBookRepository
    }
}

impl DependOnUserQuery for InMemoryDatabase {
    type UserQuery = InMemoryUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &InMemoryUserRepository
    }
}

impl DependOnBorrowingQuery for InMemoryDatabase {
    type BorrowingQuery = InMemoryBorrowingRepository;
    fn borrowing_query(&self) -> &Self::BorrowingQuery {
        &InMemoryBorrowingRepository
    }
}

impl DependOnBorrowingModifier for InMemoryDatabase {
    type BorrowingModifier = InMemoryBorrowingRepository;
    fn borrowing_modifier(&self) -> &Self::BorrowingModifier {
        &InMemoryBorrowingRepository
    }
}

impl DependOnPaymentQuery for InMemoryDatabase {
    type PaymentQuery = InMemoryPaymentRepository;
    fn payment_query(&self) -> &Self::PaymentQuery {
        &InMemoryPaymentRepository
    }
}

impl DependOnPaymentModifier for InMemoryDatabase {
    type PaymentModifier = InMemoryPaymentRepository;
    fn payment_modifier(&self) -> &Self::PaymentModifier {
        &InMemoryPaymentRepository
    }
}
