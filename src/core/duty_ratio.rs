//! Outdoor compressor unit duty ratio model.

use std::fmt::{Display, Formatter};

use comfy_table::Color;
use serde::{Deserialize, Serialize};

use crate::{
    core::{comfort::DiscomfortIndex, environment::EnvironmentReading},
    fmt::FormattedPercentage,
    prelude::*,
};

/// Weights of the temperature and humidity deltas.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    /// Per degree of indoor temperature above the set-point.
    pub alpha: f64,

    /// Per percent of indoor humidity above the outdoor humidity.
    pub beta: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self { alpha: 0.030, beta: 0.0045 }
    }
}

impl Weights {
    /// Hand-tuned summer weights, `None` outside June–September.
    #[must_use]
    pub const fn for_month(month: u32) -> Option<Self> {
        match month {
            6 => Some(Self { alpha: 0.028, beta: 0.0045 }),
            7 => Some(Self { alpha: 0.032, beta: 0.0055 }),
            8 => Some(Self { alpha: 0.035, beta: 0.0040 }),
            9 => Some(Self { alpha: 0.025, beta: 0.0030 }),
            _ => None,
        }
    }

    #[must_use]
    pub fn for_month_or_default(month: u32) -> Self {
        Self::for_month(month).unwrap_or_default()
    }
}

/// Fraction of time the compressor runs, always within `[MIN, MAX]`.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DutyRatio(f64);

impl DutyRatio {
    /// The compressor never stops completely.
    pub const MIN: f64 = 0.1;

    pub const MAX: f64 = 1.0;

    #[must_use]
    pub fn clamped(ratio: f64) -> Self {
        Self(ratio.clamp(Self::MIN, Self::MAX))
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn as_percent(self) -> f64 {
        self.0 * 100.0
    }
}

impl Display for DutyRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&FormattedPercentage(self.0), f)
    }
}

/// Presentation band of a duty ratio percentage.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DutyRatioBand {
    Low,
    Medium,
    High,
}

impl DutyRatioBand {
    #[must_use]
    pub fn classify(percent: f64) -> Self {
        if percent < 60.0 {
            Self::Low
        } else if percent < 80.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Low => Color::Green,
            Self::Medium => Color::DarkYellow,
            Self::High => Color::Red,
        }
    }
}

const BASE_RATIO: f64 = 0.45;

/// Outdoor temperature above which the outdoor and tropical-night factors apply.
const HOT_OUTDOOR_THRESHOLD: f64 = 25.0;

const OUTDOOR_FACTOR_PER_DEGREE: f64 = 0.015;
const TROPICAL_NIGHT_FACTOR: f64 = 0.05;
const DISCOMFORT_THRESHOLD: f64 = 75.0;
const DISCOMFORT_FACTOR_PER_POINT: f64 = 0.01;

/// Estimate the compressor duty ratio.
///
/// A month in June–September replaces the given weights with the month's own pair.
#[must_use]
pub fn estimate_duty_ratio(
    environment: &EnvironmentReading,
    weights: Weights,
    month: Option<u32>,
) -> DutyRatio {
    let weights = month.and_then(Weights::for_month).unwrap_or(weights);

    let delta_t = environment.temperature_delta().0;
    let delta_h = environment.humidity_delta().0;
    let outdoor_temperature = environment.outdoor.temperature.0;

    let outdoor_factor =
        OUTDOOR_FACTOR_PER_DEGREE * (outdoor_temperature - HOT_OUTDOOR_THRESHOLD).max(0.0);
    let night_factor =
        if outdoor_temperature >= HOT_OUTDOOR_THRESHOLD { TROPICAL_NIGHT_FACTOR } else { 0.0 };
    let discomfort_index =
        DiscomfortIndex::new(environment.indoor.temperature, environment.indoor.humidity);
    let discomfort_factor =
        ((discomfort_index.0 - DISCOMFORT_THRESHOLD) * DISCOMFORT_FACTOR_PER_POINT).max(0.0);

    let ratio = BASE_RATIO
        + weights.alpha * delta_t
        + weights.beta * delta_h
        + outdoor_factor
        + night_factor
        + discomfort_factor;
    debug!(
        ?weights,
        outdoor_factor,
        night_factor,
        discomfort_factor,
        ratio,
        "estimated the duty ratio"
    );
    DutyRatio::clamped(ratio)
}
