mod borrowing;
mod payment;

pub use self::{borrowing::*, payment::*};
