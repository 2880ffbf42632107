#![allow(clippy::doc_markdown)]

mod api;
mod cli;
mod core;
mod fmt;
mod prelude;
mod quantity;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command, estimate, tariff, weather},
    prelude::*,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Estimate(args) => estimate(&args).await?,
        Command::Tariff(args) => tariff(&args)?,
        Command::Weather(args) => weather(&args).await?,
    }

    info!("done!");
    Ok(())
}
