#![allow(clippy::doc_markdown)]

mod api;
mod cli;
mod conventions;
mod core;
mod fmt;
mod prelude;
mod quantity;
mod record;
mod tables;

use clap::{Parser, crate_version};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Args, Command},
    prelude::*,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::ExtractBill(args) => args.run().await?,
        Command::ExtractOffer(args) => args.run().await?,
        Command::Index(args) => args.run().await?,
        Command::Compare(args) => args.run().await?,
    }

    info!("done!");
    Ok(())
}
