use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

use crate::{
    conventions::{
        BILLING_PERIOD_KEYWORDS,
        DEFAULT_BILLING_PERIOD_MONTHS,
        MAX_BILLING_PERIOD_MONTHS,
    },
    prelude::*,
    quantity::months::Months,
};

static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})").expect("valid regex"));

/// Infer the number of months a bill covers from its period description.
///
/// Keywords win over dates. A `DD/MM/YYYY - DD/MM/YYYY` range counts both boundary months.
/// Anything else, including an out-of-range date span, falls back to
/// [`DEFAULT_BILLING_PERIOD_MONTHS`].
#[must_use]
pub fn resolve_billing_period_months(text: Option<&str>) -> Months {
    let Some(text) = text else {
        return DEFAULT_BILLING_PERIOD_MONTHS;
    };

    let lowercase = text.to_lowercase();
    if let Some((keyword, months)) =
        BILLING_PERIOD_KEYWORDS.iter().find(|(keyword, _)| lowercase.contains(keyword))
    {
        debug!(keyword, ?months, "matched billing period keyword");
        return *months;
    }

    if let Some(months) = months_between_dates(text) {
        debug!(?months, "resolved billing period from the dates");
        return months;
    }

    debug!(text, "unrecognised billing period, assuming the default");
    DEFAULT_BILLING_PERIOD_MONTHS
}

/// Inclusive month count of a range written as exactly two dates.
fn months_between_dates(text: &str) -> Option<Months> {
    let (start, end) = DATE
        .captures_iter(text)
        .map(|captures| -> Option<(i64, i64)> {
            Some((captures[2].parse().ok()?, captures[3].parse().ok()?))
        })
        .collect_tuple()?;
    let ((start_month, start_year), (end_month, end_year)) = (start?, end?);
    let diff = (end_year - start_year) * 12 + (end_month - start_month) + 1;
    let months = Months(u32::try_from(diff).ok()?);
    (months.0 != 0 && months <= MAX_BILLING_PERIOD_MONTHS).then_some(months)
}
