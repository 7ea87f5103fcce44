use std::cmp::Ordering;

use crate::quantity::cost::Euros;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Verdict {
    Savings,
    Loss,
    Neutral,
}

/// Difference between the current and the new period cost.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Savings {
    /// Positive when the new offer is cheaper.
    pub amount: Option<Euros>,

    /// Savings relative to the current cost, in percent.
    pub percentage: Option<f64>,

    pub verdict: Verdict,
}

impl Savings {
    pub const UNKNOWN: Self = Self { amount: None, percentage: None, verdict: Verdict::Neutral };

    #[must_use]
    pub fn compute(current_cost: Euros, new_cost: Option<Euros>) -> Self {
        let Some(new_cost) = new_cost else {
            return Self::UNKNOWN;
        };
        let amount = current_cost - new_cost;
        let percentage =
            (current_cost > Euros::ZERO).then(|| amount.0 / current_cost.0 * 100.0);
        let verdict = match amount.cmp(&Euros::ZERO) {
            Ordering::Greater => Verdict::Savings,
            Ordering::Less => Verdict::Loss,
            Ordering::Equal => Verdict::Neutral,
        };
        Self { amount: Some(amount), percentage, verdict }
    }
}
