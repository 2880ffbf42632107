use chrono::{Datelike, Local};
use clap::Parser;

use crate::{cli::ensure_within, core::duty_ratio::Weights, prelude::*};

/// Month shown when the current one is not a summer month.
const DEFAULT_MONTH: u32 = 7;

#[must_use]
#[derive(Parser)]
pub struct WeightsArgs {
    /// Summer month (6–9) selecting the weights, the current one by default.
    #[clap(long, env = "MONTH", value_parser = clap::value_parser!(u32).range(6..=9))]
    pub month: Option<u32>,

    /// Manual temperature weight, replaces the month's weights.
    #[clap(long, env = "ALPHA", requires = "beta")]
    pub alpha: Option<f64>,

    /// Manual humidity weight, replaces the month's weights.
    #[clap(long, env = "BETA", requires = "alpha")]
    pub beta: Option<f64>,
}

impl WeightsArgs {
    pub fn validate(&self) -> Result {
        if let Some(alpha) = self.alpha {
            ensure_within("alpha", alpha, 0.0..=0.1)?;
        }
        if let Some(beta) = self.beta {
            ensure_within("beta", beta, 0.0..=0.05)?;
        }
        Ok(())
    }

    /// Selected month, or the current one during summer, or July.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.month.unwrap_or_else(|| default_month(Local::now().month()))
    }

    #[must_use]
    pub fn override_weights(&self) -> Option<Weights> {
        Some(Weights { alpha: self.alpha?, beta: self.beta? })
    }
}

const fn default_month(current_month: u32) -> u32 {
    if matches!(current_month, 6..=9) { current_month } else { DEFAULT_MONTH }
}
