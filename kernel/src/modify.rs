mod book;
mod borrowing;
mod payment;

pub use self::{book::*, borrowing::*, payment::*};
