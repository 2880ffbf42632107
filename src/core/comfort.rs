use std::fmt::{Display, Formatter};

use comfy_table::Color;
use serde::{Deserialize, Serialize};

use crate::quantity::{self, humidity::Percent, temperature::Celsius};

/// Combined temperature and humidity discomfort scalar.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscomfortIndex(pub f64);

impl DiscomfortIndex {
    /// `DI = 0.81·T + 0.01·H·(0.99·T − 14.3) + 46.3`
    pub fn new(temperature: Celsius, humidity: Percent) -> Self {
        let (t, h) = (temperature.0, humidity.0);
        Self(0.81 * t + 0.01 * h * (0.99 * t - 14.3) + 46.3)
    }

    #[must_use]
    pub fn round_to(self, decimals: usize) -> Self {
        Self(quantity::round_to(self.0, decimals))
    }

    pub fn level(self) -> DiscomfortLevel {
        DiscomfortLevel::classify(self)
    }
}

impl Display for DiscomfortIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscomfortLevel {
    Comfortable,
    Moderate,
    Uncomfortable,
    VeryUncomfortable,
}

impl DiscomfortLevel {
    pub fn classify(index: DiscomfortIndex) -> Self {
        match index.0 {
            index if index < 68.0 => Self::Comfortable,
            index if index < 75.0 => Self::Moderate,
            index if index < 80.0 => Self::Uncomfortable,
            _ => Self::VeryUncomfortable,
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Comfortable => Color::Green,
            Self::Moderate => Color::DarkYellow,
            Self::Uncomfortable => Color::Yellow,
            Self::VeryUncomfortable => Color::Red,
        }
    }
}

impl Display for DiscomfortLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Comfortable => write!(f, "comfortable"),
            Self::Moderate => write!(f, "moderate"),
            Self::Uncomfortable => write!(f, "uncomfortable"),
            Self::VeryUncomfortable => write!(f, "very uncomfortable"),
        }
    }
}
