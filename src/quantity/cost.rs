use std::ops::{Div, Mul};

use crate::quantity::months::Months;

quantity!(
    /// Amount of money in euro.
    Euros,
    suffix: "€",
    precision: 2
);

/// Spread a fee over the months it covers.
impl Div<Months> for Euros {
    type Output = Self;

    fn div(self, rhs: Months) -> Self::Output {
        Self(self.0 / f64::from(rhs.0))
    }
}

impl Mul<Months> for Euros {
    type Output = Self;

    fn mul(self, rhs: Months) -> Self::Output {
        Self(self.0 * f64::from(rhs.0))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_div_months() {
        assert_abs_diff_eq!((Euros(36.0) / Months(3)).0, 12.0);
    }

    #[test]
    fn test_mul_months() {
        assert_abs_diff_eq!((Euros(12.0) * Months(2)).0, 24.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Euros(54.0).to_string(), "54.00 €");
    }

    #[test]
    fn test_ordering() {
        assert!(Euros(-6.0) < Euros::ZERO);
        assert_eq!(Euros(-6.0).abs(), Euros(6.0));
    }
}
