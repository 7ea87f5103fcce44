//! Tariff normalisation and savings calculation.

pub mod comparison;
pub mod estimate;
pub mod fee;
pub mod index;
pub mod numeric;
pub mod period;
pub mod savings;

#[derive(Debug, thiserror::Error)]
pub enum ComparisonError {
    /// Indexed pricing needs to know whether to follow PUN or PSV.
    #[error("supply kind is not specified in the bill")]
    MissingSupplyKind,

    #[error("the {index} market value is unavailable: {reason}")]
    IndexUnavailable { index: index::MarketIndex, reason: String },
}
