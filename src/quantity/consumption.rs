use std::ops::Mul;

use crate::quantity::{cost::Euros, price::UnitPrice};

quantity!(
    /// Billed energy in the units of the supply: kilowatt-hours or standard cubic meters.
    Consumption,
    suffix: "u",
    precision: 0
);

impl Mul<UnitPrice> for Consumption {
    type Output = Euros;

    fn mul(self, rhs: UnitPrice) -> Self::Output {
        Euros(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_mul_unit_price() {
        assert_abs_diff_eq!((Consumption(200.0) * UnitPrice(0.15)).0, 30.0, epsilon = 1e-9);
    }
}
