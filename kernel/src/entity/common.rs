mod money;

pub use self::money::*;
