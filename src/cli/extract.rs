use std::path::PathBuf;

use clap::Parser;

use crate::{
    api::{BillExtractor, Document, OfferExtractor},
    cli::gemini::GeminiArgs,
    prelude::*,
};

#[derive(Parser)]
pub struct ExtractBillArgs {
    /// Bill document: PDF, PNG, JPEG, or WebP.
    file: PathBuf,

    #[clap(flatten)]
    gemini: GeminiArgs,
}

impl ExtractBillArgs {
    #[instrument(skip_all)]
    pub async fn run(self) -> Result {
        let document = Document::load(&self.file)?;
        let bill = self.gemini.new_client()?.extract_bill(&document).await?;
        println!("{}", serde_json::to_string_pretty(&bill)?);
        Ok(())
    }
}

#[derive(Parser)]
pub struct ExtractOfferArgs {
    /// Offer disclosure sheet: PDF, PNG, JPEG, or WebP.
    file: PathBuf,

    #[clap(flatten)]
    gemini: GeminiArgs,
}

impl ExtractOfferArgs {
    #[instrument(skip_all)]
    pub async fn run(self) -> Result {
        let document = Document::load(&self.file)?;
        let offer = self.gemini.new_client()?.extract_offer(&document).await?;
        println!("{}", serde_json::to_string_pretty(&offer)?);
        Ok(())
    }
}
