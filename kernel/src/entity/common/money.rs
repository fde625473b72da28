use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Monetary amount with exactly two fractional digits.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Money(Decimal);

impl Money {
    pub fn new(amount: impl Into<Decimal>) -> Self {
        let mut amount = amount
            .into()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        amount.rescale(2);
        Self(amount)
    }

    pub fn zero() -> Self {
        Self::new(Decimal::ZERO)
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;

    use crate::entity::Money;

    #[test]
    fn rounds_half_to_even() {
        assert_eq!(Money::new(dec!(2.345)).as_ref(), &dec!(2.34));
        assert_eq!(Money::new(dec!(2.355)).as_ref(), &dec!(2.36));
    }

    #[test]
    fn keeps_two_places() {
        assert_eq!(Money::new(dec!(70)).as_ref().to_string(), "70.00");
    }
}
