mod book;
mod borrowing;
mod common;
mod payment;
mod user;

pub use self::{book::*, borrowing::*, common::*, payment::*, user::*};
