use std::{
    fmt::{Debug, Display, Formatter},
    ops::Div,
};

use itertools::Itertools;

use crate::quantity::{Quantity, energy::KilowattHours, rate::KilowattHourRate};

/// Amount of money in won.
pub type Cost = Quantity<0, 0, 1>;

impl Display for Cost {
    /// Whole won, truncated, with thousands separators.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let value = self.value().trunc();
        let digits = format!("{:.0}", value.abs()).chars().collect_vec();
        let grouped = digits.rchunks(3).rev().map(|chunk| chunk.iter().collect::<String>()).join(",");
        let sign = if value < 0.0 { "-" } else { "" };
        write!(f, "{sign}{grouped} ₩")
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}₩", self.0)
    }
}

impl Div<KilowattHours> for Cost {
    type Output = KilowattHourRate;

    fn div(self, rhs: KilowattHours) -> Self::Output {
        Quantity(self.0 / rhs.0)
    }
}
