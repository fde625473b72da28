mod author;
mod copies;
mod cost;
mod cover;
mod genre;
mod id;
mod title;

pub use self::{author::*, copies::*, cost::*, cover::*, genre::*, id::*, title::*};
use destructure::{Destructure, Mutation};
use error_stack::Report;
use vodca::References;

use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: Option<AuthorId>,
    genres: Vec<GenreId>,
    cover: BookCover,
    copies: CopyCount,
    cost_per_day: Option<CostPerDay>,
}

impl Book {
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: Option<AuthorId>,
        genres: Vec<GenreId>,
        cover: BookCover,
        copies: CopyCount,
        cost_per_day: Option<CostPerDay>,
    ) -> Self {
        Self {
            id,
            title,
            author,
            genres,
            cover,
            copies,
            cost_per_day,
        }
    }

    /// Takes one copy off the shelf for a new borrowing.
    pub fn lend(self) -> error_stack::Result<Self, KernelError> {
        let Some(remaining) = self.copies.taken() else {
            return Err(Report::new(KernelError::InvalidState)
                .attach_printable(format!("Book {} is not available", self.id.as_ref())));
        };
        Ok(self.reconstruct(|book| book.copies = remaining))
    }

    pub fn restock(mut self) -> Self {
        self.substitute(|book| *book.copies = book.copies.restored());
        self
    }
}
