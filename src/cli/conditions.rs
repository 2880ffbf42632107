//! Indoor and outdoor condition arguments.

use clap::Parser;

use crate::{
    api::environment::ManualConditions,
    cli::ensure_within,
    core::environment::Conditions,
    prelude::*,
    quantity::{humidity::Percent, temperature::Celsius},
};

#[must_use]
#[derive(Parser)]
pub struct IndoorArgs {
    /// Current indoor temperature in °C.
    #[clap(id = "indoor_temperature", long = "indoor-temperature", default_value = "28", env = "INDOOR_TEMPERATURE")]
    pub temperature: Celsius,

    /// Current indoor relative humidity in percent.
    #[clap(id = "indoor_humidity", long = "indoor-humidity", default_value = "65", env = "INDOOR_HUMIDITY")]
    pub humidity: Percent,

    /// Air-conditioner set-point in °C.
    #[clap(long = "set-point", default_value = "24", env = "SET_POINT")]
    pub set_point: Celsius,
}

impl IndoorArgs {
    pub fn validate(&self) -> Result {
        ensure_within("indoor-temperature", self.temperature.0, 16.0..=35.0)?;
        ensure_within("indoor-humidity", self.humidity.0, 0.0..=100.0)?;
        ensure_within("set-point", self.set_point.0, 16.0..=30.0)
    }

    pub const fn conditions(&self) -> Conditions {
        Conditions { temperature: self.temperature, humidity: self.humidity }
    }
}

#[must_use]
#[derive(Parser)]
pub struct OutdoorArgs {
    /// Outdoor temperature in °C, looked up when omitted.
    #[clap(id = "outdoor_temperature", long = "outdoor-temperature", env = "OUTDOOR_TEMPERATURE")]
    pub temperature: Option<Celsius>,

    /// Outdoor relative humidity in percent, looked up when omitted.
    #[clap(id = "outdoor_humidity", long = "outdoor-humidity", env = "OUTDOOR_HUMIDITY")]
    pub humidity: Option<Percent>,

    /// Do not look the outdoor conditions up, use the manual values or the defaults.
    #[clap(long, env = "OFFLINE")]
    pub offline: bool,
}

impl OutdoorArgs {
    pub fn validate(&self) -> Result {
        if let Some(temperature) = self.temperature {
            ensure_within("outdoor-temperature", temperature.0, -30.0..=50.0)?;
        }
        if let Some(humidity) = self.humidity {
            ensure_within("outdoor-humidity", humidity.0, 0.0..=100.0)?;
        }
        Ok(())
    }

    pub const fn manual(&self) -> ManualConditions {
        ManualConditions { temperature: self.temperature, humidity: self.humidity }
    }
}
