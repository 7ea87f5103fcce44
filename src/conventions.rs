//! Italian billing conventions, applied whenever a document leaves something unsaid.

use crate::{core::fee::FeePeriodicity, quantity::months::Months};

/// Bimonthly billing is the dominant cadence for Italian households.
pub const DEFAULT_BILLING_PERIOD_MONTHS: Months = Months::TWO;

/// Longest billing period accepted from a date range, inclusive.
pub const MAX_BILLING_PERIOD_MONTHS: Months = Months::TWELVE;

/// Offer disclosure sheets («CTE») state annual fees when the period is not labelled.
pub const DEFAULT_FEE_PERIODICITY: FeePeriodicity = FeePeriodicity::Annual;

/// Billing period keywords, matched case-insensitively in this order.
pub const BILLING_PERIOD_KEYWORDS: [(&str, Months); 4] = [
    ("bimestr", Months::TWO),
    ("trimestr", Months::THREE),
    ("mensil", Months::ONE),
    ("annuale", Months::TWELVE),
];

/// Largest bill or offer document accepted for extraction.
pub const MAX_DOCUMENT_SIZE: u64 = 10 * 1024 * 1024;
