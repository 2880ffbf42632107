//! Appliance and tariff arguments.

use clap::Parser;

use crate::{
    cli::ensure_within,
    core::environment::{ApplianceProfile, UsageContext},
    prelude::*,
    quantity::{energy::KilowattHours, power::Kilowatts, rate::KilowattHourRate, time::Hours},
};

#[must_use]
#[derive(Parser)]
pub struct ApplianceArgs {
    /// Rated power consumption in kilowatts.
    #[clap(long = "rated-power-kilowatts", default_value = "0.907", env = "RATED_POWER_KILOWATTS")]
    pub rated_power: Kilowatts,

    /// Nominal coefficient of performance.
    #[clap(long, default_value = "3.52", env = "COP")]
    pub cop: f64,

    /// Daily usage in hours.
    #[clap(
        long = "usage-hours",
        default_value = "8",
        env = "USAGE_HOURS",
        value_parser = clap::value_parser!(u8).range(1..=24),
    )]
    pub usage_hours: u8,
}

impl ApplianceArgs {
    pub fn validate(&self) -> Result {
        ensure_within("rated-power-kilowatts", self.rated_power.value(), 0.1..=5.0)?;
        ensure_within("cop", self.cop, 1.0..=10.0)
    }

    pub fn profile(&self) -> ApplianceProfile {
        ApplianceProfile {
            rated_power: self.rated_power,
            cop: self.cop,
            usage_hours_per_day: Hours::from(f64::from(self.usage_hours)),
        }
    }
}

#[must_use]
#[derive(Parser)]
pub struct UsageArgs {
    /// Flat reference rate per kilowatt-hour.
    #[clap(long = "rate-per-kwh", default_value = "115.9", env = "RATE_PER_KWH")]
    pub flat_rate: KilowattHourRate,

    /// Previous monthly household consumption from the electricity bill.
    #[clap(long = "previous-usage-kwh", default_value = "300", env = "PREVIOUS_USAGE_KWH")]
    pub previous_usage: KilowattHours,
}

impl UsageArgs {
    pub fn validate(&self) -> Result {
        ensure_within("rate-per-kwh", self.flat_rate.value(), 10.0..=500.0)?;
        ensure_within("previous-usage-kwh", self.previous_usage.value(), 0.0..=2000.0)
    }

    pub const fn context(&self) -> UsageContext {
        UsageContext { previous_monthly_usage: self.previous_usage }
    }
}
