mod id;
mod session;
mod status;

pub use self::{id::*, session::*, status::*};
use destructure::{Destructure, Mutation};
use error_stack::Report;
use vodca::References;

use crate::entity::{Borrowing, BorrowingId, BorrowingStatus, Money};
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Payment {
    id: PaymentId,
    borrowing_id: BorrowingId,
    status: PaymentStatus,
    payment_type: PaymentType,
    money_to_pay: Money,
    session_url: Option<SessionUrl>,
    session_id: Option<SessionId>,
}

impl Payment {
    pub fn new(
        id: PaymentId,
        borrowing_id: BorrowingId,
        status: PaymentStatus,
        payment_type: PaymentType,
        money_to_pay: Money,
        session_url: Option<SessionUrl>,
        session_id: Option<SessionId>,
    ) -> Self {
        Self {
            id,
            borrowing_id,
            status,
            payment_type,
            money_to_pay,
            session_url,
            session_id,
        }
    }

    /// Applies a manual update. `money_to_pay` is a snapshot and stays as it was.
    pub fn amend(
        self,
        status: PaymentStatus,
        payment_type: PaymentType,
        session_url: Option<SessionUrl>,
        session_id: Option<SessionId>,
    ) -> error_stack::Result<Self, KernelError> {
        if self.status == PaymentStatus::Paid && status == PaymentStatus::Pending {
            return Err(Report::new(KernelError::InvalidState).attach_printable(format!(
                "Payment {} has already been settled",
                self.id.as_ref()
            )));
        }
        Ok(self.reconstruct(|payment| {
            payment.status = status;
            payment.payment_type = payment_type;
            payment.session_url = session_url;
            payment.session_id = session_id;
        }))
    }

    /// A paid payment for a returned book settles the borrowing.
    /// Returns the borrowing to persist when its status has to change.
    pub fn reconcile(&self, borrowing: &Borrowing) -> Option<Borrowing> {
        let settled = self.status == PaymentStatus::Paid
            && borrowing.is_returned()
            && borrowing.status() != &BorrowingStatus::Returned;
        settled.then(|| borrowing.clone().settle())
    }
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;
    use time::macros::date;
    use uuid::Uuid;

    use crate::entity::{
        BookId, Borrowing, BorrowingId, BorrowingStatus, ExpectedReturnDate, Money, Payment,
        PaymentId, PaymentStatus, PaymentType, SessionId, UserId,
    };
    use crate::KernelError;

    fn borrowing() -> Borrowing {
        Borrowing::open(
            BorrowingId::new(Uuid::new_v4()),
            BookId::new(Uuid::new_v4()),
            UserId::new(Uuid::new_v4()),
            date!(2024 - 01 - 10),
            ExpectedReturnDate::new(date!(2024 - 01 - 17)),
        )
    }

    fn payment(borrowing: &Borrowing, status: PaymentStatus) -> Payment {
        Payment::new(
            PaymentId::new(Uuid::new_v4()),
            borrowing.id().clone(),
            status,
            PaymentType::Cash,
            Money::new(dec!(70.00)),
            None,
            None,
        )
    }

    #[test]
    fn amend_keeps_amount() {
        let loan = borrowing();
        let paid = payment(&loan, PaymentStatus::Pending)
            .amend(
                PaymentStatus::Paid,
                PaymentType::Card,
                None,
                Some(SessionId::new("cs_test")),
            )
            .unwrap();
        assert_eq!(paid.status(), &PaymentStatus::Paid);
        assert_eq!(paid.payment_type(), &PaymentType::Card);
        assert_eq!(paid.money_to_pay(), &Money::new(dec!(70.00)));
    }

    #[test]
    fn paid_cannot_go_back_to_pending() {
        let loan = borrowing();
        let report = payment(&loan, PaymentStatus::Paid)
            .amend(PaymentStatus::Pending, PaymentType::Cash, None, None)
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::InvalidState);
    }

    #[test]
    fn paid_payment_settles_late_return() {
        let loan = borrowing().close(date!(2024 - 01 - 20)).unwrap();
        assert_eq!(loan.status(), &BorrowingStatus::OverdueReturned);
        let settled = payment(&loan, PaymentStatus::Paid).reconcile(&loan).unwrap();
        assert_eq!(settled.status(), &BorrowingStatus::Returned);
        assert_eq!(settled.actual_return(), loan.actual_return());
    }

    #[test]
    fn pending_payment_changes_nothing() {
        let loan = borrowing().close(date!(2024 - 01 - 20)).unwrap();
        assert!(payment(&loan, PaymentStatus::Pending).reconcile(&loan).is_none());
    }

    #[test]
    fn unreturned_borrowing_is_left_alone() {
        let loan = borrowing();
        assert!(payment(&loan, PaymentStatus::Paid).reconcile(&loan).is_none());
    }
}
