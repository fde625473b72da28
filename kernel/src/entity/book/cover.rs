use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum BookCover {
    #[serde(rename = "HARD")]
    Hard,
    #[default]
    #[serde(rename = "SOFT")]
    Soft,
}

impl BookCover {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookCover::Hard => "HARD",
            BookCover::Soft => "SOFT",
        }
    }
}

impl Display for BookCover {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookCover {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HARD" => Ok(BookCover::Hard),
            "SOFT" => Ok(BookCover::Soft),
            _ => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Unknown book cover: {s}"))),
        }
    }
}
