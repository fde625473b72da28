use rust_decimal::Decimal;

use crate::entity::{Borrowing, CostPerDay, Money};

impl Borrowing {
    /// Days between borrowing and the agreed return date, sign ignored.
    pub fn duration_days(&self) -> i64 {
        (*self.expected_return().as_ref() - *self.borrowed_on().as_ref())
            .whole_days()
            .abs()
    }

    pub fn overdue_days(&self) -> i64 {
        let expected = *self.expected_return().as_ref();
        match self.actual_return() {
            Some(actual) if *actual.as_ref() > expected => (*actual.as_ref() - expected).whole_days(),
            _ => 0,
        }
    }

    /// Charge for the loan. Overdue days are billed at the regular daily rate,
    /// and a book without a rate is lent free.
    pub fn calculate_cost(&self, cost_per_day: Option<&CostPerDay>) -> Money {
        let Some(rate) = cost_per_day else {
            return Money::zero();
        };
        let rate = *rate.as_ref();
        let regular = Decimal::from(self.duration_days()) * rate;
        let overdue = Decimal::from(self.overdue_days()) * rate;
        Money::new(regular + overdue)
    }
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;
    use time::macros::date;
    use time::Date;
    use uuid::Uuid;

    use crate::entity::{
        BookId, Borrowing, BorrowingId, CostPerDay, ExpectedReturnDate, Money, UserId,
    };

    fn borrowing(borrowed: Date, expected: Date, returned: Option<Date>) -> Borrowing {
        let borrowing = Borrowing::open(
            BorrowingId::new(Uuid::new_v4()),
            BookId::new(Uuid::new_v4()),
            UserId::new(Uuid::new_v4()),
            borrowed,
            ExpectedReturnDate::new(expected),
        );
        match returned {
            Some(day) => borrowing.close(day).unwrap(),
            None => borrowing,
        }
    }

    #[test]
    fn on_time_return_bills_duration_only() {
        let loan = borrowing(
            date!(2024 - 03 - 01),
            date!(2024 - 03 - 08),
            Some(date!(2024 - 03 - 08)),
        );
        let cost = loan.calculate_cost(Some(&CostPerDay::new(dec!(10.00))));
        assert_eq!(cost, Money::new(dec!(70.00)));
    }

    #[test]
    fn late_return_bills_overdue_days_at_same_rate() {
        let loan = borrowing(
            date!(2024 - 03 - 01),
            date!(2024 - 03 - 08),
            Some(date!(2024 - 03 - 11)),
        );
        assert_eq!(loan.overdue_days(), 3);
        let cost = loan.calculate_cost(Some(&CostPerDay::new(dec!(10.00))));
        assert_eq!(cost, Money::new(dec!(100.00)));
    }

    #[test]
    fn unreturned_loan_has_no_overdue_days() {
        let loan = borrowing(date!(2024 - 03 - 01), date!(2024 - 03 - 08), None);
        assert_eq!(loan.overdue_days(), 0);
    }

    #[test]
    fn duration_ignores_sign() {
        let loan = borrowing(date!(2024 - 03 - 10), date!(2024 - 03 - 07), None);
        assert_eq!(loan.duration_days(), 3);
    }

    #[test]
    fn missing_rate_is_free() {
        let loan = borrowing(date!(2024 - 03 - 01), date!(2024 - 03 - 08), None);
        assert_eq!(loan.calculate_cost(None), Money::zero());
    }

    #[test]
    fn fractional_rate_rounds_to_cents() {
        let loan = borrowing(date!(2024 - 03 - 01), date!(2024 - 03 - 04), None);
        let cost = loan.calculate_cost(Some(&CostPerDay::new(dec!(0.335))));
        assert_eq!(cost.as_ref(), &dec!(1.00));
    }

    #[test]
    fn cost_never_drops_as_lateness_grows() {
        let rate = CostPerDay::new(dec!(3.25));
        let mut previous = Money::zero();
        for late in 0..30 {
            let returned = date!(2024 - 03 - 08) + time::Duration::days(late);
            let loan = borrowing(date!(2024 - 03 - 01), date!(2024 - 03 - 08), Some(returned));
            let cost = loan.calculate_cost(Some(&rate));
            assert!(cost >= previous, "cost dropped at {late} days late");
            previous = cost;
        }
    }
}
