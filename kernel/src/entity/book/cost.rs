use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CostPerDay(Decimal);

impl CostPerDay {
    pub fn new(cost: impl Into<Decimal>) -> Self {
        Self(cost.into())
    }
}
