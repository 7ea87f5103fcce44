//! Wholesale market indices followed by indexed offers.

use std::fmt::{Display, Formatter};

use async_trait::async_trait;

use crate::{core::ComparisonError, quantity::price::UnitPrice};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum MarketIndex {
    /// Prezzo Unico Nazionale, electricity.
    Pun,

    /// Punto di Scambio Virtuale, gas.
    Psv,
}

impl MarketIndex {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pun => "PUN",
            Self::Psv => "PSV",
        }
    }

    pub const fn full_name(self) -> &'static str {
        match self {
            Self::Pun => "PUN (Prezzo Unico Nazionale)",
            Self::Psv => "PSV (Punto di Scambio Virtuale)",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Self::Pun => "€/kWh",
            Self::Psv => "€/Smc",
        }
    }
}

impl Display for MarketIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Prior-day settled value of a market index.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MarketIndexQuote {
    pub index: MarketIndex,
    pub price: UnitPrice,
}

impl Display for MarketIndexQuote {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5} {}", self.price.0, self.index.unit())
    }
}

/// Source of market index quotes.
///
/// Implementations fail with [`ComparisonError::IndexUnavailable`] and never retry.
#[async_trait]
pub trait MarketIndexLookup: Sync {
    async fn get_quote(&self, index: MarketIndex) -> Result<MarketIndexQuote, ComparisonError>;
}

/// Quote known upfront, for example supplied on the command line.
pub struct FixedQuote(pub UnitPrice);

#[async_trait]
impl MarketIndexLookup for FixedQuote {
    async fn get_quote(&self, index: MarketIndex) -> Result<MarketIndexQuote, ComparisonError> {
        Ok(MarketIndexQuote { index, price: self.0 })
    }
}

/// No quote source is configured.
pub struct Offline;

#[async_trait]
impl MarketIndexLookup for Offline {
    async fn get_quote(&self, index: MarketIndex) -> Result<MarketIndexQuote, ComparisonError> {
        Err(ComparisonError::IndexUnavailable {
            index,
            reason: "no market data source is configured".to_owned(),
        })
    }
}
