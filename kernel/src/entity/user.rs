mod email;
mod id;

pub use self::{email::*, id::*};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, References)]
pub struct User {
    id: UserId,
    email: UserEmail,
}

impl User {
    pub fn new(id: UserId, email: UserEmail) -> Self {
        Self { id, email }
    }
}
