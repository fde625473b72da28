use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Copies of a title currently on the shelf. Never negative.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CopyCount(i32);

impl CopyCount {
    pub fn new(count: impl Into<i32>) -> Self {
        Self(count.into())
    }

    pub fn is_available(&self) -> bool {
        self.0 > 0
    }

    pub fn taken(self) -> Option<Self> {
        self.is_available().then(|| Self(self.0 - 1))
    }

    pub fn restored(self) -> Self {
        Self(self.0 + 1)
    }
}
