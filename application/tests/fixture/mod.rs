#![allow(dead_code)]

use rust_decimal::Decimal;
use time::Date;
use uuid::Uuid;

use driver::clock::FixedClock;
use driver::database::InMemoryDatabase;
use kernel::prelude::entity::{
    Book, BookCover, BookId, BookTitle, CopyCount, CostPerDay, User, UserEmail, UserId,
};

pub struct Library {
    pub db: InMemoryDatabase,
    pub clock: FixedClock,
    pub user: UserId,
}

pub async fn library(today: Date) -> Library {
    let clock = FixedClock::new(today);
    let db = InMemoryDatabase::new(clock.clone());
    let user = register(&db, "reader@library.test").await;
    Library { db, clock, user }
}

pub async fn register(db: &InMemoryDatabase, email: &str) -> UserId {
    let id = UserId::new(Uuid::new_v4());
    db.insert_user(User::new(id.clone(), UserEmail::new(email)))
        .await;
    id
}

pub async fn shelve(db: &InMemoryDatabase, copies: i32, cost_per_day: Option<Decimal>) -> BookId {
    let id = BookId::new(Uuid::new_v4());
    db.insert_book(Book::new(
        id.clone(),
        BookTitle::new("Tini zabutykh predkiv"),
        None,
        Vec::new(),
        BookCover::Hard,
        CopyCount::new(copies),
        cost_per_day.map(CostPerDay::new),
    ))
    .await;
    id
}

pub async fn copies(db: &InMemoryDatabase, id: &BookId) -> i32 {
    db.book(id)
        .await
        .map(|book| *book.copies().as_ref())
        .unwrap_or_default()
}
