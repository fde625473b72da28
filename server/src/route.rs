mod borrowing;
mod payment;
mod user;

pub use self::{borrowing::*, payment::*, user::*};
