use clap::Parser;

use crate::{
    cli::gemini::GeminiArgs,
    core::index::{MarketIndex, MarketIndexLookup},
    prelude::*,
};

#[derive(Parser)]
pub struct IndexArgs {
    #[clap(value_enum)]
    index: MarketIndex,

    #[clap(flatten)]
    gemini: GeminiArgs,
}

impl IndexArgs {
    #[instrument(skip_all)]
    pub async fn run(self) -> Result {
        let quote = self.gemini.new_client()?.get_quote(self.index).await?;
        info!(%quote, "gotcha");
        println!("{} {quote}", quote.index);
        Ok(())
    }
}
