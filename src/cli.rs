mod compare;
mod extract;
mod gemini;
mod index;

use clap::{Parser, Subcommand};

pub use self::{
    compare::CompareArgs,
    extract::{ExtractBillArgs, ExtractOfferArgs},
    index::IndexArgs,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract the bill fields from a document and print them as JSON.
    #[clap(name = "extract-bill")]
    ExtractBill(Box<ExtractBillArgs>),

    /// Extract the offer fields from a disclosure sheet («CTE») and print them as JSON.
    #[clap(name = "extract-offer")]
    ExtractOffer(Box<ExtractOfferArgs>),

    /// Fetch yesterday's market index value.
    #[clap(name = "index")]
    Index(Box<IndexArgs>),

    /// Compare the current bill with a new offer over the bill's billing period.
    #[clap(name = "compare")]
    Compare(Box<CompareArgs>),
}
