use crate::{
    core::{fee::fee_for_period, index::MarketIndexQuote, numeric::parse_numeric},
    quantity::{consumption::Consumption, cost::Euros, months::Months, price::UnitPrice},
    record::{BillRecord, OfferRecord, PricingKind},
};

/// Cost of one side of the comparison over the billing period.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CostEstimate {
    pub unit_price: UnitPrice,
    pub consumption: Consumption,

    /// Fixed fee over the whole billing period.
    pub fixed_fee: Euros,
}

impl CostEstimate {
    #[must_use]
    pub fn total(self) -> Euros {
        self.consumption * self.unit_price + self.fixed_fee
    }
}

#[must_use]
pub fn billed_consumption(bill: &BillRecord) -> Consumption {
    Consumption(parse_numeric(Some(&bill.billed_consumption)))
}

/// Cost of the current contract, straight from the bill.
#[must_use]
pub fn estimate_current(bill: &BillRecord) -> CostEstimate {
    CostEstimate {
        unit_price: UnitPrice(parse_numeric(bill.tariff.unit_price())),
        consumption: billed_consumption(bill),
        fixed_fee: Euros(parse_numeric(bill.tariff.fixed_fee())),
    }
}

/// Resolve the unit price of an offer.
///
/// Indexed offers add their spread to the quote and are unresolvable without one.
/// Offers of unknown pricing are treated as fixed.
#[must_use]
pub fn offer_unit_price(offer: &OfferRecord, quote: Option<MarketIndexQuote>) -> Option<UnitPrice> {
    let price = UnitPrice(parse_numeric(Some(&offer.unit_price)));
    match offer.pricing {
        PricingKind::Indexed => quote.map(|quote| quote.price + price),
        PricingKind::Fixed | PricingKind::Unknown => Some(price),
    }
}

/// Cost of the new offer for the same consumption over the same period.
#[must_use]
pub fn estimate_offer(
    offer: &OfferRecord,
    consumption: Consumption,
    period: Months,
    quote: Option<MarketIndexQuote>,
) -> Option<CostEstimate> {
    Some(CostEstimate {
        unit_price: offer_unit_price(offer, quote)?,
        consumption,
        fixed_fee: fee_for_period(Some(&offer.fixed_fee), period),
    })
}
