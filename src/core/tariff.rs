//! Three-tier progressive residential tariff.

use serde::{Deserialize, Serialize};

use crate::quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate};

#[derive(Copy, Clone, Debug)]
pub struct Tier {
    pub number: u8,

    /// Inclusive upper bound of the monthly usage, `None` for the last tier.
    pub upper_bound: Option<KilowattHours>,

    /// Fixed monthly charge when the total usage falls into this tier.
    pub base_charge: Cost,

    /// Rate applied to the usage within this tier only.
    pub rate: KilowattHourRate,
}

pub const TIERS: [Tier; 3] = [
    Tier {
        number: 1,
        upper_bound: Some(KilowattHours::new(200.0)),
        base_charge: Cost::new(1130.0),
        rate: KilowattHourRate::new(115.9),
    },
    Tier {
        number: 2,
        upper_bound: Some(KilowattHours::new(400.0)),
        base_charge: Cost::new(2710.0),
        rate: KilowattHourRate::new(206.6),
    },
    Tier {
        number: 3,
        upper_bound: None,
        base_charge: Cost::new(7300.0),
        rate: KilowattHourRate::new(307.3),
    },
];

impl Tier {
    /// Tier the monthly total falls into, lower tier on a boundary.
    #[must_use]
    pub fn containing(total: KilowattHours) -> &'static Self {
        TIERS
            .iter()
            .find(|tier| tier.upper_bound.is_none_or(|upper_bound| total <= upper_bound))
            .unwrap_or(&TIERS[TIERS.len() - 1])
    }

    /// Inclusive lower bound of the monthly usage.
    #[must_use]
    pub fn lower_bound(&self) -> KilowattHours {
        TIERS
            .iter()
            .take_while(|tier| tier.number < self.number)
            .filter_map(|tier| tier.upper_bound)
            .last()
            .unwrap_or(KilowattHours::ZERO)
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct TariffCharge {
    pub total_usage: KilowattHours,
    pub tier: u8,
    pub base_charge: Cost,
    pub usage_charge: Cost,
    pub total_charge: Cost,

    /// Total charge per kilowatt-hour, the first tier rate for zero usage.
    pub average_rate: KilowattHourRate,
}

/// Bill the monthly total: each tier's rate applies only to the usage within that tier.
pub fn apply_progressive_tariff(total_usage: KilowattHours) -> TariffCharge {
    let tier = Tier::containing(total_usage);

    let mut usage_charge = Cost::ZERO;
    let mut lower_bound = KilowattHours::ZERO;
    for current in &TIERS {
        match current.upper_bound {
            Some(upper_bound) if total_usage > upper_bound => {
                usage_charge += (upper_bound - lower_bound) * current.rate;
                lower_bound = upper_bound;
            }
            _ => {
                usage_charge += (total_usage - lower_bound) * current.rate;
                break;
            }
        }
    }

    let total_charge = tier.base_charge + usage_charge;
    let average_rate = if total_usage > KilowattHours::ZERO {
        total_charge / total_usage
    } else {
        TIERS[0].rate
    };
    TariffCharge {
        total_usage,
        tier: tier.number,
        base_charge: tier.base_charge,
        usage_charge,
        total_charge,
        average_rate,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_zero_usage() {
        let charge = apply_progressive_tariff(KilowattHours::ZERO);
        assert_eq!(charge.tier, 1);
        assert_abs_diff_eq!(charge.total_charge.value(), 1130.0);
        assert_abs_diff_eq!(charge.average_rate.value(), 115.9);
    }

    #[test]
    fn test_first_tier() {
        let charge = apply_progressive_tariff(KilowattHours::new(190.0));
        assert_eq!(charge.tier, 1);
        assert_abs_diff_eq!(charge.total_charge.value(), 1130.0 + 190.0 * 115.9, epsilon = 1e-6);
        assert_abs_diff_eq!(
            charge.average_rate.value(),
            (1130.0 + 190.0 * 115.9) / 190.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_boundary_belongs_to_lower_tier() {
        let charge = apply_progressive_tariff(KilowattHours::new(200.0));
        assert_eq!(charge.tier, 1);
        assert_abs_diff_eq!(charge.total_charge.value(), 1130.0 + 23180.0, epsilon = 1e-6);

        let charge = apply_progressive_tariff(KilowattHours::new(400.0));
        assert_eq!(charge.tier, 2);
        assert_abs_diff_eq!(charge.total_charge.value(), 2710.0 + 23180.0 + 41320.0, epsilon = 1e-6);
    }

    #[test]
    fn test_continuity_above_boundary() {
        let at = apply_progressive_tariff(KilowattHours::new(200.0));
        let above = apply_progressive_tariff(KilowattHours::new(200.000_001));
        assert_eq!(above.tier, 2);
        // Only the base charge and the marginal kilowatt-hours differ:
        assert_abs_diff_eq!(
            (above.usage_charge - at.usage_charge).value(),
            0.000_001 * 206.6,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!((above.base_charge - at.base_charge).value(), 2710.0 - 1130.0);
    }

    #[test]
    fn test_tier_crossing() {
        let previous = apply_progressive_tariff(KilowattHours::new(190.0));
        let new = apply_progressive_tariff(KilowattHours::new(210.0));
        assert_eq!((previous.tier, new.tier), (1, 2));
        assert_abs_diff_eq!(previous.base_charge.value(), 1130.0);
        assert_abs_diff_eq!(new.base_charge.value(), 2710.0);
        assert_abs_diff_eq!(new.usage_charge.value(), 200.0 * 115.9 + 10.0 * 206.6, epsilon = 1e-6);
        assert_abs_diff_eq!(new.total_charge.value(), 27_956.0, epsilon = 1e-6);
    }

    #[test]
    fn test_third_tier() {
        let charge = apply_progressive_tariff(KilowattHours::new(500.0));
        assert_eq!(charge.tier, 3);
        assert_abs_diff_eq!(
            charge.total_charge.value(),
            7300.0 + 200.0 * 115.9 + 200.0 * 206.6 + 100.0 * 307.3,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_usage_charge_is_monotonic() {
        let mut previous = Cost::ZERO;
        for usage in 0..=1000 {
            let charge = apply_progressive_tariff(KilowattHours::from(f64::from(usage)));
            assert!(charge.usage_charge >= previous);
            previous = charge.usage_charge;
        }
    }

    #[test]
    fn test_lower_bound() {
        assert_eq!(TIERS[0].lower_bound(), KilowattHours::ZERO);
        assert_eq!(TIERS[1].lower_bound(), KilowattHours::new(200.0));
        assert_eq!(TIERS[2].lower_bound(), KilowattHours::new(400.0));
    }

    #[test]
    fn test_containing() {
        assert_eq!(Tier::containing(KilowattHours::new(0.0)).number, 1);
        assert_eq!(Tier::containing(KilowattHours::new(200.5)).number, 2);
        assert_eq!(Tier::containing(KilowattHours::new(2000.0)).number, 3);
    }
}
