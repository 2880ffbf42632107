use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinates {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinates {
    type Err = Error;

    /// Parse `latitude,longitude`.
    fn from_str(s: &str) -> Result<Self> {
        let (latitude, longitude) =
            s.split_once(',').with_context(|| format!("`{s}` is not `latitude,longitude`"))?;
        let latitude: f64 = latitude.trim().parse().context("invalid latitude")?;
        let longitude: f64 = longitude.trim().parse().context("invalid longitude")?;
        ensure!((-90.0..=90.0).contains(&latitude), "latitude {latitude} is out of range");
        ensure!((-180.0..=180.0).contains(&longitude), "longitude {longitude} is out of range");
        Ok(Self { latitude, longitude })
    }
}
