mod fixture;

use rust_decimal_macros::dec;
use time::macros::date;
use uuid::Uuid;

use application::service::{
    BorrowBookService, CalculateCostService, GetBorrowingService, ReturnBookService,
};
use application::transfer::{
    CreateBorrowingDto, GetBorrowingDto, GetBorrowingsFromEmailDto, GetBorrowingsFromUserIdDto,
    ReturnBorrowingDto,
};
use kernel::prelude::entity::BorrowingStatus;
use kernel::KernelError;

use crate::fixture::{copies, library, register, shelve};

#[tokio::test]
async fn on_time_return_costs_duration() -> error_stack::Result<(), KernelError> {
    let lib = library(date!(2024 - 01 - 10)).await;
    let book = shelve(&lib.db, 3, Some(dec!(10.00))).await;

    let borrowing = lib
        .db
        .borrow_book(CreateBorrowingDto {
            user_id: *lib.user.as_ref(),
            book_id: *book.as_ref(),
            expected_return_date: date!(2024 - 01 - 17),
        })
        .await?;
    assert_eq!(borrowing.status, BorrowingStatus::Borrowed);
    assert_eq!(borrowing.date_borrowed, date!(2024 - 01 - 10));
    assert_eq!(copies(&lib.db, &book).await, 2);

    lib.clock.set(date!(2024 - 01 - 17));
    let returned = lib
        .db
        .return_book(ReturnBorrowingDto {
            user_id: *lib.user.as_ref(),
            borrowing_id: borrowing.id,
        })
        .await?;
    assert_eq!(returned.status, BorrowingStatus::Returned);
    assert_eq!(returned.actual_return_date, Some(date!(2024 - 01 - 17)));
    assert_eq!(copies(&lib.db, &book).await, 3);

    let cost = lib
        .db
        .calculate_cost(GetBorrowingDto { id: borrowing.id })
        .await?;
    assert_eq!(cost.duration_days, 7);
    assert_eq!(cost.overdue_days, 0);
    assert_eq!(cost.cost.to_string(), "70.00");
    Ok(())
}

#[tokio::test]
async fn late_return_bills_overdue_days() -> error_stack::Result<(), KernelError> {
    let lib = library(date!(2024 - 01 - 10)).await;
    let book = shelve(&lib.db, 1, Some(dec!(10.00))).await;

    let borrowing = lib
        .db
        .borrow_book(CreateBorrowingDto {
            user_id: *lib.user.as_ref(),
            book_id: *book.as_ref(),
            expected_return_date: date!(2024 - 01 - 17),
        })
        .await?;

    lib.clock.set(date!(2024 - 01 - 20));
    let returned = lib
        .db
        .return_book(ReturnBorrowingDto {
            user_id: *lib.user.as_ref(),
            borrowing_id: borrowing.id,
        })
        .await?;
    assert_eq!(returned.status, BorrowingStatus::OverdueReturned);

    let cost = lib
        .db
        .calculate_cost(GetBorrowingDto { id: borrowing.id })
        .await?;
    assert_eq!(cost.overdue_days, 3);
    assert_eq!(cost.cost, dec!(100.00));
    Ok(())
}

#[tokio::test]
async fn empty_shelf_rejects_borrow() -> error_stack::Result<(), KernelError> {
    let lib = library(date!(2024 - 02 - 01)).await;
    let book = shelve(&lib.db, 0, None).await;

    let report = lib
        .db
        .borrow_book(CreateBorrowingDto {
            user_id: *lib.user.as_ref(),
            book_id: *book.as_ref(),
            expected_return_date: date!(2024 - 02 - 08),
        })
        .await
        .unwrap_err();
    assert_eq!(report.current_context(), &KernelError::InvalidState);
    assert_eq!(copies(&lib.db, &book).await, 0);

    let borrowings = lib
        .db
        .get_borrowings_from_user(GetBorrowingsFromUserIdDto {
            user_id: *lib.user.as_ref(),
        })
        .await?;
    assert!(borrowings.is_empty());
    Ok(())
}

#[tokio::test]
async fn unknown_user_or_book_is_not_found() {
    let lib = library(date!(2024 - 02 - 01)).await;
    let book = shelve(&lib.db, 2, None).await;

    let report = lib
        .db
        .borrow_book(CreateBorrowingDto {
            user_id: Uuid::new_v4(),
            book_id: *book.as_ref(),
            expected_return_date: date!(2024 - 02 - 08),
        })
        .await
        .unwrap_err();
    assert_eq!(report.current_context(), &KernelError::NotFound);

    let report = lib
        .db
        .borrow_book(CreateBorrowingDto {
            user_id: *lib.user.as_ref(),
            book_id: Uuid::new_v4(),
            expected_return_date: date!(2024 - 02 - 08),
        })
        .await
        .unwrap_err();
    assert_eq!(report.current_context(), &KernelError::NotFound);
    assert_eq!(copies(&lib.db, &book).await, 2);

    let report = lib
        .db
        .get_borrowing(GetBorrowingDto { id: Uuid::new_v4() })
        .await
        .unwrap_err();
    assert_eq!(report.current_context(), &KernelError::NotFound);
}

#[tokio::test]
async fn second_return_fails_and_keeps_count() -> error_stack::Result<(), KernelError> {
    let lib = library(date!(2024 - 03 - 01)).await;
    let book = shelve(&lib.db, 1, None).await;

    let borrowing = lib
        .db
        .borrow_book(CreateBorrowingDto {
            user_id: *lib.user.as_ref(),
            book_id: *book.as_ref(),
            expected_return_date: date!(2024 - 03 - 05),
        })
        .await?;
    let dto = || ReturnBorrowingDto {
        user_id: *lib.user.as_ref(),
        borrowing_id: borrowing.id,
    };
    lib.db.return_book(dto()).await?;

    let report = lib.db.return_book(dto()).await.unwrap_err();
    assert_eq!(report.current_context(), &KernelError::InvalidState);
    assert_eq!(copies(&lib.db, &book).await, 1);
    Ok(())
}

#[tokio::test]
async fn another_user_may_return() -> error_stack::Result<(), KernelError> {
    let lib = library(date!(2024 - 03 - 01)).await;
    let librarian = register(&lib.db, "desk@library.test").await;
    let book = shelve(&lib.db, 1, None).await;

    let borrowing = lib
        .db
        .borrow_book(CreateBorrowingDto {
            user_id: *lib.user.as_ref(),
            book_id: *book.as_ref(),
            expected_return_date: date!(2024 - 03 - 05),
        })
        .await?;
    let returned = lib
        .db
        .return_book(ReturnBorrowingDto {
            user_id: *librarian.as_ref(),
            borrowing_id: borrowing.id,
        })
        .await?;
    assert_eq!(returned.user_id, *lib.user.as_ref());
    assert_eq!(copies(&lib.db, &book).await, 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn last_copy_goes_to_one_borrower() {
    let lib = library(date!(2024 - 04 - 01)).await;
    let book = shelve(&lib.db, 1, None).await;
    let rival = register(&lib.db, "rival@library.test").await;

    let tasks = [lib.user.clone(), rival].map(|user| {
        let db = lib.db.clone();
        let book_id = *book.as_ref();
        tokio::spawn(async move {
            db.borrow_book(CreateBorrowingDto {
                user_id: *user.as_ref(),
                book_id,
                expected_return_date: date!(2024 - 04 - 08),
            })
            .await
        })
    });

    let mut succeeded = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(report) => assert_eq!(report.current_context(), &KernelError::InvalidState),
        }
    }
    assert_eq!(succeeded, 1);
    assert_eq!(copies(&lib.db, &book).await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_returns_restore_every_copy() -> error_stack::Result<(), KernelError> {
    let lib = library(date!(2024 - 04 - 01)).await;
    let book = shelve(&lib.db, 5, None).await;

    let mut borrowings = Vec::new();
    for _ in 0..5 {
        let borrowing = lib
            .db
            .borrow_book(CreateBorrowingDto {
                user_id: *lib.user.as_ref(),
                book_id: *book.as_ref(),
                expected_return_date: date!(2024 - 04 - 08),
            })
            .await?;
        borrowings.push(borrowing.id);
    }
    assert_eq!(copies(&lib.db, &book).await, 0);

    let tasks = borrowings
        .into_iter()
        .map(|borrowing_id| {
            let db = lib.db.clone();
            let user_id = *lib.user.as_ref();
            tokio::spawn(async move {
                db.return_book(ReturnBorrowingDto {
                    user_id,
                    borrowing_id,
                })
                .await
            })
        })
        .collect::<Vec<_>>();
    for task in tasks {
        assert!(task.await.unwrap().is_ok());
    }
    assert_eq!(copies(&lib.db, &book).await, 5);
    Ok(())
}

#[tokio::test]
async fn overdue_is_reported_not_stored() -> error_stack::Result<(), KernelError> {
    let lib = library(date!(2024 - 05 - 01)).await;
    let book = shelve(&lib.db, 3, None).await;

    let late = lib
        .db
        .borrow_book(CreateBorrowingDto {
            user_id: *lib.user.as_ref(),
            book_id: *book.as_ref(),
            expected_return_date: date!(2024 - 05 - 03),
        })
        .await?;
    let due_today = lib
        .db
        .borrow_book(CreateBorrowingDto {
            user_id: *lib.user.as_ref(),
            book_id: *book.as_ref(),
            expected_return_date: date!(2024 - 05 - 05),
        })
        .await?;

    lib.clock.set(date!(2024 - 05 - 05));
    let overdue = lib.db.get_overdue_borrowings().await?;
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].id, late.id);
    assert_eq!(overdue[0].status, BorrowingStatus::Overdue);

    let current = lib
        .db
        .get_borrowing(GetBorrowingDto { id: due_today.id })
        .await?;
    assert_eq!(current.status, BorrowingStatus::Borrowed);

    let stored = lib
        .db
        .borrowing(&kernel::prelude::entity::BorrowingId::new(late.id))
        .await
        .unwrap();
    assert_eq!(stored.status(), &BorrowingStatus::Borrowed);
    Ok(())
}

#[tokio::test]
async fn borrowings_by_email_are_ordered() -> error_stack::Result<(), KernelError> {
    let lib = library(date!(2024 - 06 - 01)).await;
    let book = shelve(&lib.db, 2, None).await;

    for expected in [date!(2024 - 06 - 20), date!(2024 - 06 - 10)] {
        lib.db
            .borrow_book(CreateBorrowingDto {
                user_id: *lib.user.as_ref(),
                book_id: *book.as_ref(),
                expected_return_date: expected,
            })
            .await?;
    }

    let listed = lib
        .db
        .get_borrowings_from_email(GetBorrowingsFromEmailDto {
            email: " Reader@Library.test ".to_string(),
        })
        .await?;
    let dates = listed
        .iter()
        .map(|borrowing| borrowing.expected_return_date)
        .collect::<Vec<_>>();
    assert_eq!(dates, vec![date!(2024 - 06 - 10), date!(2024 - 06 - 20)]);

    let report = lib
        .db
        .get_borrowings_from_email(GetBorrowingsFromEmailDto {
            email: "nobody@library.test".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(report.current_context(), &KernelError::NotFound);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_returns_close_once() -> error_stack::Result<(), KernelError> {
    let lib = library(date!(2024 - 04 - 01)).await;
    let book = shelve(&lib.db, 1, None).await;

    let borrowing = lib
        .db
        .borrow_book(CreateBorrowingDto {
            user_id: *lib.user.as_ref(),
            book_id: *book.as_ref(),
            expected_return_date: date!(2024 - 04 - 08),
        })
        .await?;

    let tasks = [0, 1].map(|_| {
        let db = lib.db.clone();
        let dto = ReturnBorrowingDto {
            user_id: *lib.user.as_ref(),
            borrowing_id: borrowing.id,
        };
        tokio::spawn(async move { db.return_book(dto).await })
    });

    let mut succeeded = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(report) => assert_eq!(report.current_context(), &KernelError::InvalidState),
        }
    }
    assert_eq!(succeeded, 1);
    assert_eq!(copies(&lib.db, &book).await, 1);
    Ok(())
}
