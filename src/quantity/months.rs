use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Whole number of calendar months.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
#[derive(derive_more::From, derive_more::FromStr)]
pub struct Months(pub u32);

impl Months {
    pub const ONE: Self = Self(1);
    pub const TWO: Self = Self(2);
    pub const THREE: Self = Self(3);
    pub const TWELVE: Self = Self(12);
}

impl Display for Months {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0 == 1 { write!(f, "1 mese") } else { write!(f, "{} mesi", self.0) }
    }
}

impl Debug for Months {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}mo", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Months::ONE.to_string(), "1 mese");
        assert_eq!(Months::TWO.to_string(), "2 mesi");
    }
}
