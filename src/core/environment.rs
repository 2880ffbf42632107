use serde::{Deserialize, Serialize};

use crate::quantity::{
    energy::KilowattHours,
    humidity::Percent,
    power::Kilowatts,
    temperature::Celsius,
    time::Hours,
};

/// Temperature and relative humidity at one place.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    pub temperature: Celsius,
    pub humidity: Percent,
}

impl Conditions {
    pub const fn new(temperature: f64, humidity: f64) -> Self {
        Self { temperature: Celsius(temperature), humidity: Percent(humidity) }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentReading {
    pub indoor: Conditions,
    pub outdoor: Conditions,
    pub set_point: Celsius,
}

impl EnvironmentReading {
    /// Indoor temperature above the set-point.
    pub fn temperature_delta(&self) -> Celsius {
        self.indoor.temperature - self.set_point
    }

    /// Indoor humidity above the outdoor humidity.
    pub fn humidity_delta(&self) -> Percent {
        self.indoor.humidity - self.outdoor.humidity
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct ApplianceProfile {
    pub rated_power: Kilowatts,

    /// Nominal coefficient of performance.
    pub cop: f64,

    pub usage_hours_per_day: Hours,
}

/// Household consumption the appliance usage is added on top of.
#[must_use]
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct UsageContext {
    pub previous_monthly_usage: KilowattHours,
}
