use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use serde::de::DeserializeOwned;

use crate::{
    cli::gemini::GeminiArgs,
    core::{
        comparison::{Comparison, compare},
        index::{FixedQuote, Offline},
    },
    fmt::Headline,
    prelude::*,
    quantity::price::UnitPrice,
    record::{BillRecord, OfferRecord, PricingKind, RawBill, RawOffer},
    tables::{build_bill_table, build_comparison_table},
};

#[derive(Parser)]
pub struct CompareArgs {
    /// Bill JSON as printed by `extract-bill`, possibly edited by hand.
    #[clap(long, env = "BILL_PATH")]
    bill: PathBuf,

    /// Offer JSON as printed by `extract-offer`, possibly edited by hand.
    #[clap(long, env = "OFFER_PATH")]
    offer: PathBuf,

    /// Market index value to use for indexed offers instead of fetching it, €/kWh or €/Smc.
    #[clap(long, env = "INDEX_PRICE")]
    index_price: Option<f64>,

    #[clap(flatten)]
    gemini: GeminiArgs,
}

impl CompareArgs {
    #[instrument(skip_all)]
    pub async fn run(self) -> Result {
        let bill = BillRecord::try_from(read_json::<RawBill>(&self.bill)?)
            .context("the bill is incomplete")?;
        let offer = OfferRecord::try_from(read_json::<RawOffer>(&self.offer)?)
            .context("the offer is incomplete")?;

        println!("{}", build_bill_table(&bill));

        let comparison = self.compare(&bill, &offer).await?;
        if let Some(error) = &comparison.index_error {
            warn!("{error}");
            println!("Dato di mercato non disponibile: {error}");
        }
        println!("{}", build_comparison_table(&bill, &offer, &comparison));
        println!("{}", Headline(&comparison));
        println!(
            "* Stima basata sui costi della materia prima e sulle quote fisse, \
            esclusi tasse, imposte e altri oneri."
        );
        Ok(())
    }

    async fn compare(&self, bill: &BillRecord, offer: &OfferRecord) -> Result<Comparison> {
        let comparison = if let Some(index_price) = self.index_price {
            compare(bill, offer, &FixedQuote(UnitPrice(index_price))).await
        } else if offer.pricing == PricingKind::Indexed {
            compare(bill, offer, &self.gemini.new_client()?).await
        } else {
            compare(bill, offer, &Offline).await
        };
        Ok(comparison?)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read `{}`", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("failed to parse `{}`", path.display()))
}
