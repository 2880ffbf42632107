mod appliance;
mod conditions;
mod estimate;
mod output;
mod tariff;
mod weather;
mod weights;

use std::ops::RangeInclusive;

use clap::{Parser, Subcommand};

pub use self::{
    estimate::{Report, estimate},
    tariff::tariff,
    weather::weather,
};
use crate::{
    cli::{estimate::EstimateArgs, tariff::TariffArgs, weather::WeatherArgs},
    prelude::*,
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
    /// Main command: estimate the duty ratio, the energy, and the added electricity cost.
    #[clap(name = "estimate")]
    Estimate(Box<EstimateArgs>),

    /// Show the progressive tariff bill for a monthly usage.
    #[clap(name = "tariff")]
    Tariff(TariffArgs),

    /// Look up the outdoor conditions at the current IP location.
    #[clap(name = "weather")]
    Weather(WeatherArgs),
}

/// Reject a real-valued argument outside its recognised range.
fn ensure_within(name: &str, value: f64, range: RangeInclusive<f64>) -> Result {
    ensure!(
        range.contains(&value),
        "`{name}` must be within {}..={}, got {value}",
        range.start(),
        range.end(),
    );
    Ok(())
}
