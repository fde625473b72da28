mod book;
mod borrowing;
mod payment;
mod user;

pub use self::{book::*, borrowing::*, payment::*, user::*};
