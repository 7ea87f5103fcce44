use crate::{
    core::{
        ComparisonError,
        estimate::{CostEstimate, estimate_current, estimate_offer},
        fee::fee_for_period,
        index::{MarketIndexLookup, MarketIndexQuote},
        period::resolve_billing_period_months,
        savings::Savings,
    },
    prelude::*,
    quantity::{cost::Euros, months::Months},
    record::{BillRecord, OfferRecord, PricingKind},
};

/// Current bill against a new offer over the bill's own billing period.
#[derive(Debug)]
pub struct Comparison {
    pub period: Months,
    pub current: CostEstimate,

    /// `None` when the offer's unit price could not be resolved.
    pub offer: Option<CostEstimate>,

    /// Offer fixed fee over the billing period, known even when the offer cost is not.
    pub offer_fixed_fee: Euros,

    pub quote: Option<MarketIndexQuote>,

    /// Why the market index quote is missing.
    pub index_error: Option<ComparisonError>,

    pub savings: Savings,
}

impl Comparison {
    /// Whether both costs are known and the current one is meaningful.
    pub fn is_conclusive(&self) -> bool {
        self.offer.is_some() && self.current.total() > Euros::ZERO
    }
}

/// Compare the bill with the offer.
///
/// The quote is only requested for indexed offers, and only once the bill's supply kind
/// is known. An unavailable quote leaves the offer cost unknown instead of failing.
#[instrument(skip_all, fields(supplier = %bill.current_supplier, offer = %offer.name))]
pub async fn compare(
    bill: &BillRecord,
    offer: &OfferRecord,
    lookup: &dyn MarketIndexLookup,
) -> Result<Comparison, ComparisonError> {
    let period = resolve_billing_period_months(bill.billing_period.as_deref());
    let current = estimate_current(bill);
    info!(?period, current = %current.total(), "estimated the current cost");

    let (quote, index_error) = if offer.pricing == PricingKind::Indexed {
        let index = bill.supply_kind().market_index().ok_or(ComparisonError::MissingSupplyKind)?;
        info!(%index, "fetching the market index…");
        match lookup.get_quote(index).await {
            Ok(quote) => {
                info!(%quote, "fetched the market index");
                (Some(quote), None)
            }
            Err(error) => {
                warn!(%error, "market index is unavailable");
                (None, Some(error))
            }
        }
    } else {
        (None, None)
    };

    let offer_estimate = estimate_offer(offer, current.consumption, period, quote);
    let savings = Savings::compute(current.total(), offer_estimate.map(CostEstimate::total));
    info!(verdict = ?savings.verdict, amount = ?savings.amount, "compared");

    Ok(Comparison {
        period,
        current,
        offer: offer_estimate,
        offer_fixed_fee: fee_for_period(Some(&offer.fixed_fee), period),
        quote,
        index_error,
        savings,
    })
}
