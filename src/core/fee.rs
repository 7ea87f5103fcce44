use std::fmt::{Display, Formatter};

use crate::{
    conventions::DEFAULT_FEE_PERIODICITY,
    core::numeric::parse_numeric,
    prelude::*,
    quantity::{cost::Euros, months::Months},
};

/// How often an offer's fixed fee («CCV/PCV») is charged.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FeePeriodicity {
    Monthly,
    Bimonthly,
    Quarterly,
    Annual,
}

impl FeePeriodicity {
    /// Keywords, matched case-insensitively in this order.
    const KEYWORDS: [(&'static str, Self); 6] = [
        ("mese", Self::Monthly),
        ("mensil", Self::Monthly),
        ("trimestr", Self::Quarterly),
        ("bimestr", Self::Bimonthly),
        ("anno", Self::Annual),
        ("annual", Self::Annual),
    ];

    /// Periodicity stated in the fee text, if any.
    #[must_use]
    pub fn detect(text: &str) -> Option<Self> {
        let lowercase = text.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| lowercase.contains(keyword))
            .map(|(_, periodicity)| *periodicity)
    }

    #[must_use]
    pub const fn months(self) -> Months {
        match self {
            Self::Monthly => Months::ONE,
            Self::Bimonthly => Months::TWO,
            Self::Quarterly => Months::THREE,
            Self::Annual => Months::TWELVE,
        }
    }
}

impl Display for FeePeriodicity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monthly => write!(f, "mensile"),
            Self::Bimonthly => write!(f, "bimestrale"),
            Self::Quarterly => write!(f, "trimestrale"),
            Self::Annual => write!(f, "annuale"),
        }
    }
}

/// Normalise an offer's fixed fee to a monthly amount.
///
/// Only meant for new-offer fees: bill fees are already totalled over the billing period.
/// Unlabelled fees are taken as [`DEFAULT_FEE_PERIODICITY`].
#[must_use]
pub fn monthly_fixed_fee(text: Option<&str>) -> Euros {
    let Some(text) = text else {
        return Euros::ZERO;
    };
    let value = Euros(parse_numeric(Some(text)));
    let periodicity = FeePeriodicity::detect(text).unwrap_or_else(|| {
        debug!(text, "fee periodicity is not stated, assuming {DEFAULT_FEE_PERIODICITY}");
        DEFAULT_FEE_PERIODICITY
    });
    value / periodicity.months()
}

/// Offer fixed fee over an actual billing period.
#[must_use]
pub fn fee_for_period(text: Option<&str>, period: Months) -> Euros {
    monthly_fixed_fee(text) * period
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_monthly() {
        assert_abs_diff_eq!(monthly_fixed_fee(Some("12 €/mese")).0, 12.0);
        assert_abs_diff_eq!(monthly_fixed_fee(Some("Canone mensile 9,90 €")).0, 9.9);
    }

    #[test]
    fn test_quarterly() {
        assert_abs_diff_eq!(monthly_fixed_fee(Some("36 €/trimestre")).0, 12.0);
    }

    #[test]
    fn test_bimonthly() {
        assert_abs_diff_eq!(monthly_fixed_fee(Some("24 € a bimestre")).0, 12.0);
    }

    #[test]
    fn test_unlabelled_is_annual() {
        assert_abs_diff_eq!(monthly_fixed_fee(Some("144 €")).0, 12.0);
        assert_abs_diff_eq!(monthly_fixed_fee(Some("144 €/anno")).0, 12.0);
    }

    #[test]
    fn test_absent() {
        assert_abs_diff_eq!(monthly_fixed_fee(None).0, 0.0);
    }

    #[test]
    fn test_month_keyword_wins() {
        assert_abs_diff_eq!(monthly_fixed_fee(Some("12 €/mese per un anno")).0, 12.0);
    }

    #[test]
    fn test_monthly_is_idempotent() {
        let once = monthly_fixed_fee(Some("12,00 €/mese"));
        let twice = monthly_fixed_fee(Some(&format!("{} €/mese", once.0)));
        assert_abs_diff_eq!(once.0, twice.0);
    }

    #[test]
    fn test_fee_for_period() {
        assert_abs_diff_eq!(fee_for_period(Some("144 €/anno"), Months::TWO).0, 24.0);
        assert_abs_diff_eq!(fee_for_period(Some("36 €/trimestre"), Months::THREE).0, 36.0);
    }

    #[test]
    fn test_detect() {
        assert_eq!(FeePeriodicity::detect("10 €/MESE"), Some(FeePeriodicity::Monthly));
        assert_eq!(FeePeriodicity::detect("144 €"), None);
    }
}
