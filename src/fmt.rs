//! Italian presentation of amounts and verdicts.

use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::{
    core::{
        comparison::Comparison,
        savings::{Savings, Verdict},
    },
    quantity::{cost::Euros, months::Months},
};

/// Euro amount formatted for `it-IT`: `1.234,56 €`.
pub struct ItalianEuros(pub Euros);

impl Display for ItalianEuros {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let formatted = format!("{:.2}", self.0.0.abs());
        let (integer, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
        let grouped = integer
            .as_bytes()
            .rchunks(3)
            .rev()
            .map(|chunk| String::from_utf8_lossy(chunk))
            .join(".");
        let sign = if self.0 < Euros::ZERO && formatted != "0.00" { "-" } else { "" };
        write!(f, "{sign}{grouped},{fraction} €")
    }
}

/// Savings percentage with the sign convention of the verdict: `-` for savings, `+` otherwise.
pub struct SignedPercentage {
    pub percentage: f64,
    pub verdict: Verdict,
}

impl Display for SignedPercentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = match self.verdict {
            Verdict::Savings => "-",
            Verdict::Loss | Verdict::Neutral => "+",
        };
        let magnitude = format!("{:.1}", self.percentage.abs()).replace('.', ",");
        write!(f, "{sign}{magnitude}%")
    }
}

/// One-line verdict of a comparison.
pub struct Headline<'a>(pub &'a Comparison);

impl Display for Headline<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Savings { amount: Some(amount), percentage, verdict } = self.0.savings else {
            return write!(f, "Dati insufficienti per un calcolo preciso.");
        };
        if !self.0.is_conclusive() {
            return write!(f, "Dati insufficienti per un calcolo preciso.");
        }
        match verdict {
            Verdict::Savings => write!(f, "Risparmio di {}", ItalianEuros(amount))?,
            // A zero difference reads as a zero extra cost.
            Verdict::Loss | Verdict::Neutral => {
                write!(f, "Costo extra di {}", ItalianEuros(amount.abs()))?;
            }
        }
        if let Some(percentage) = percentage {
            write!(f, " ({})", SignedPercentage { percentage, verdict })?;
        }
        write!(f, " nel periodo di fatturazione")
    }
}

pub fn fixed_fee_label(period: Months) -> String {
    format!("Quota fissa (per {period})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::estimate::CostEstimate,
        quantity::{consumption::Consumption, price::UnitPrice},
    };

    #[test]
    fn test_italian_euros() {
        assert_eq!(ItalianEuros(Euros(6.0)).to_string(), "6,00 €");
        assert_eq!(ItalianEuros(Euros(1234.567)).to_string(), "1.234,57 €");
        assert_eq!(ItalianEuros(Euros(1_234_567.0)).to_string(), "1.234.567,00 €");
        assert_eq!(ItalianEuros(Euros(-54.0)).to_string(), "-54,00 €");
        assert_eq!(ItalianEuros(Euros(-0.001)).to_string(), "0,00 €");
    }

    #[test]
    fn test_signed_percentage() {
        let savings = SignedPercentage { percentage: 11.111, verdict: Verdict::Savings };
        assert_eq!(savings.to_string(), "-11,1%");
        let loss = SignedPercentage { percentage: -25.0, verdict: Verdict::Loss };
        assert_eq!(loss.to_string(), "+25,0%");
        let neutral = SignedPercentage { percentage: 0.0, verdict: Verdict::Neutral };
        assert_eq!(neutral.to_string(), "+0,0%");
    }

    fn comparison(current: f64, offer: Option<f64>) -> Comparison {
        let estimate = |total: f64| CostEstimate {
            unit_price: UnitPrice::ZERO,
            consumption: Consumption::ZERO,
            fixed_fee: Euros(total),
        };
        Comparison {
            period: Months(2),
            current: estimate(current),
            offer: offer.map(estimate),
            offer_fixed_fee: Euros::ZERO,
            quote: None,
            index_error: None,
            savings: Savings::compute(Euros(current), offer.map(Euros)),
        }
    }

    #[test]
    fn test_headline_savings() {
        assert_eq!(
            Headline(&comparison(54.0, Some(48.0))).to_string(),
            "Risparmio di 6,00 € (-11,1%) nel periodo di fatturazione",
        );
    }

    #[test]
    fn test_headline_loss() {
        assert_eq!(
            Headline(&comparison(40.0, Some(50.0))).to_string(),
            "Costo extra di 10,00 € (+25,0%) nel periodo di fatturazione",
        );
    }

    #[test]
    fn test_headline_no_difference() {
        assert_eq!(
            Headline(&comparison(40.0, Some(40.0))).to_string(),
            "Costo extra di 0,00 € (+0,0%) nel periodo di fatturazione",
        );
    }

    #[test]
    fn test_headline_insufficient_data() {
        let expected = "Dati insufficienti per un calcolo preciso.";
        assert_eq!(Headline(&comparison(54.0, None)).to_string(), expected);
        assert_eq!(Headline(&comparison(0.0, Some(10.0))).to_string(), expected);
    }

    #[test]
    fn test_fixed_fee_label() {
        assert_eq!(fixed_fee_label(Months(2)), "Quota fissa (per 2 mesi)");
        assert_eq!(fixed_fee_label(Months(1)), "Quota fissa (per 1 mese)");
    }
}
