//! Rule-based operation advice.

use std::fmt::{Display, Formatter};

use comfy_table::Color;
use serde::{Deserialize, Serialize};

use crate::{
    core::{calculator::CalculationResult, environment::EnvironmentReading},
    quantity::{cost::Cost, humidity::Percent, rate::KilowattHourRate, temperature::Celsius},
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub const fn color(self) -> Color {
        match self {
            Self::Success => Color::Green,
            Self::Info => Color::Blue,
            Self::Warning => Color::DarkYellow,
            Self::Error => Color::Red,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationMode {
    StrongDehumidify,
    Dehumidify,
    StandardCooling,

    /// Fan only or low cooling.
    GentleCooling,
}

impl OperationMode {
    pub const fn severity(self) -> Severity {
        match self {
            Self::StrongDehumidify => Severity::Warning,
            Self::Dehumidify | Self::StandardCooling => Severity::Info,
            Self::GentleCooling => Severity::Success,
        }
    }
}

impl Display for OperationMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrongDehumidify => write!(f, "Dehumidify mode strongly recommended"),
            Self::Dehumidify => write!(f, "Dehumidify mode recommended"),
            Self::StandardCooling => write!(f, "Standard cooling"),
            Self::GentleCooling => write!(f, "Low cooling or fan only"),
        }
    }
}

/// First matching rule wins.
pub fn recommend_mode(
    indoor_humidity: Percent,
    indoor_temperature: Celsius,
    set_point: Celsius,
) -> OperationMode {
    let humidity = indoor_humidity.0;
    let delta = (indoor_temperature - set_point).0;
    if humidity >= 70.0 {
        OperationMode::StrongDehumidify
    } else if humidity >= 60.0 {
        OperationMode::Dehumidify
    } else if humidity >= 50.0 && delta > 3.0 {
        OperationMode::StandardCooling
    } else if humidity < 50.0 && delta < 2.0 {
        OperationMode::GentleCooling
    } else {
        OperationMode::StandardCooling
    }
}

/// Additional monthly charge above which the bill is considered excessive.
const EXCESSIVE_CHARGE: Cost = Cost::new(50_000.0);

const HIGH_DUTY_RATIO_PERCENT: f64 = 70.0;
const HIGH_HUMIDITY: f64 = 70.0;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Advisory {
    TierCrossing { from: u8, to: u8 },
    ExcessiveCharge { additional_charge: Cost, average_rate: KilowattHourRate },
    HighDutyRatio { percent: f64 },
    HighHumidity { humidity: Percent },
}

impl Advisory {
    pub const fn severity(&self) -> Severity {
        match self {
            Self::TierCrossing { to, .. } if *to >= 3 => Severity::Error,
            Self::TierCrossing { .. } | Self::HighDutyRatio { .. } | Self::HighHumidity { .. } => {
                Severity::Warning
            }
            Self::ExcessiveCharge { .. } => Severity::Error,
        }
    }
}

impl Display for Advisory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TierCrossing { from, to } => {
                write!(f, "The monthly usage moves up from tier {from} to tier {to}")?;
                if *to >= 3 {
                    write!(f, ", expect a steep bill increase")?;
                }
                Ok(())
            }
            Self::ExcessiveCharge { additional_charge, average_rate } => write!(
                f,
                "The air conditioner adds {additional_charge} to the monthly bill: \
                 a higher tier may apply, consider a set-point of 26–28 °C \
                 (average rate is now {average_rate})",
            ),
            Self::HighDutyRatio { percent } => write!(
                f,
                "The duty ratio is high ({percent:.1}%): raise the set-point by 1–2 °C, \
                 use a fan alongside, close windows and curtains, \
                 and use the dehumidify mode in humid weather",
            ),
            Self::HighHumidity { humidity } => write!(
                f,
                "The humidity is very high ({humidity}): prefer the dehumidify mode, \
                 keep windows closed and ventilate briefly, avoid drying laundry indoors",
            ),
        }
    }
}

/// Collect every advisory that applies to the calculation.
pub fn advise(environment: &EnvironmentReading, result: &CalculationResult) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    let (previous_tier, new_tier) = (result.previous.tier, result.new.tier);
    if previous_tier == 1 && new_tier >= 2 {
        advisories.push(Advisory::TierCrossing { from: 1, to: 2 });
    } else if previous_tier <= 2 && new_tier >= 3 {
        advisories.push(Advisory::TierCrossing { from: 2, to: 3 });
    }

    if result.additional_charge > EXCESSIVE_CHARGE {
        advisories.push(Advisory::ExcessiveCharge {
            additional_charge: result.additional_charge,
            average_rate: result.new.average_rate,
        });
    }

    if result.duty_ratio_percent > HIGH_DUTY_RATIO_PERCENT {
        advisories.push(Advisory::HighDutyRatio { percent: result.duty_ratio_percent });
    } else if environment.indoor.humidity.0 > HIGH_HUMIDITY {
        advisories.push(Advisory::HighHumidity { humidity: environment.indoor.humidity });
    }

    advisories
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        core::{
            calculator::Calculator,
            environment::{ApplianceProfile, Conditions, UsageContext},
        },
        quantity::{energy::KilowattHours, power::Kilowatts, time::Hours},
    };

    fn mode(humidity: f64, indoor: f64, set_point: f64) -> OperationMode {
        recommend_mode(Percent(humidity), Celsius(indoor), Celsius(set_point))
    }

    #[test]
    fn test_recommend_mode() {
        assert_eq!(mode(70.0, 24.0, 24.0), OperationMode::StrongDehumidify);
        assert_eq!(mode(69.9, 30.0, 24.0), OperationMode::Dehumidify);
        assert_eq!(mode(60.0, 24.0, 24.0), OperationMode::Dehumidify);
        assert_eq!(mode(55.0, 28.0, 24.0), OperationMode::StandardCooling);
        assert_eq!(mode(45.0, 25.0, 24.0), OperationMode::GentleCooling);
        assert_eq!(mode(55.0, 26.0, 24.0), OperationMode::StandardCooling);
        assert_eq!(mode(45.0, 27.0, 24.0), OperationMode::StandardCooling);
    }

    #[test]
    fn test_recommend_mode_boundaries() {
        // Exactly 3 degrees is not "more than 3":
        assert_eq!(mode(50.0, 27.0, 24.0), OperationMode::StandardCooling);
        // Exactly 2 degrees is not "less than 2":
        assert_eq!(mode(49.0, 26.0, 24.0), OperationMode::StandardCooling);
        assert_eq!(mode(49.0, 25.9, 24.0), OperationMode::GentleCooling);
    }

    fn advise_on(indoor: Conditions, rated_power: f64, previous_usage: f64) -> Vec<Advisory> {
        let environment = EnvironmentReading {
            indoor,
            outdoor: Conditions::new(32.0, 75.0),
            set_point: Celsius(24.0),
        };
        let result = Calculator::builder()
            .environment(environment)
            .appliance(ApplianceProfile {
                rated_power: Kilowatts::new(rated_power),
                cop: 3.52,
                usage_hours_per_day: Hours::new(8.0),
            })
            .flat_rate(KilowattHourRate::new(115.9))
            .month(7)
            .usage(UsageContext { previous_monthly_usage: KilowattHours::new(previous_usage) })
            .build()
            .calculate();
        advise(&environment, &result)
    }

    #[test]
    fn test_reference_scenario_advisories() {
        let advisories = advise_on(Conditions::new(28.0, 65.0), 0.907, 300.0);
        assert_eq!(advisories.len(), 2);
        assert_eq!(advisories[0], Advisory::TierCrossing { from: 2, to: 3 });
        assert!(matches!(advisories[1], Advisory::HighDutyRatio { .. }));
    }

    #[test]
    fn test_first_tier_crossing() {
        let advisories = advise_on(Conditions::new(25.0, 50.0), 0.2, 190.0);
        assert_eq!(advisories, vec![Advisory::TierCrossing { from: 1, to: 2 }]);
    }

    #[test]
    fn test_jump_from_first_to_third_tier_reports_first_crossing() {
        let advisories = advise_on(Conditions::new(28.0, 65.0), 1.5, 190.0);
        assert_eq!(advisories[0], Advisory::TierCrossing { from: 1, to: 2 });
        assert!(!advisories.contains(&Advisory::TierCrossing { from: 2, to: 3 }));
    }

    #[test]
    fn test_duty_ratio_rounded_to_threshold_is_not_high() {
        // The raw ratio is 0.7005, which is stored just below 70.05 %:
        let environment = EnvironmentReading {
            indoor: Conditions::new(24.0, 43.0),
            outdoor: Conditions::new(33.0, 40.0),
            set_point: Celsius(22.0),
        };
        let result = Calculator::builder()
            .environment(environment)
            .appliance(ApplianceProfile {
                rated_power: Kilowatts::new(0.907),
                cop: 3.52,
                usage_hours_per_day: Hours::new(8.0),
            })
            .flat_rate(KilowattHourRate::new(115.9))
            .month(7)
            .usage(UsageContext { previous_monthly_usage: KilowattHours::new(300.0) })
            .build()
            .calculate();
        assert_abs_diff_eq!(result.duty_ratio_percent, 70.0);
        assert!(
            !advise(&environment, &result)
                .iter()
                .any(|advisory| matches!(advisory, Advisory::HighDutyRatio { .. }))
        );
    }

    #[test]
    fn test_excessive_charge() {
        let advisories = advise_on(Conditions::new(28.0, 65.0), 3.0, 300.0);
        assert!(advisories.iter().any(|advisory| matches!(advisory, Advisory::ExcessiveCharge { .. })));
    }

    #[test]
    fn test_high_humidity_without_high_duty_ratio() {
        let environment = EnvironmentReading {
            indoor: Conditions::new(24.0, 80.0),
            outdoor: Conditions::new(20.0, 90.0),
            set_point: Celsius(26.0),
        };
        let result = Calculator::builder()
            .environment(environment)
            .appliance(ApplianceProfile {
                rated_power: Kilowatts::new(0.5),
                cop: 3.52,
                usage_hours_per_day: Hours::new(1.0),
            })
            .flat_rate(KilowattHourRate::new(115.9))
            .usage(UsageContext { previous_monthly_usage: KilowattHours::ZERO })
            .build()
            .calculate();
        assert_eq!(advise(&environment, &result), vec![Advisory::HighHumidity {
            humidity: Percent(80.0)
        }]);
    }

    #[test]
    fn test_severity() {
        assert_eq!(Advisory::TierCrossing { from: 1, to: 2 }.severity(), Severity::Warning);
        assert_eq!(Advisory::TierCrossing { from: 2, to: 3 }.severity(), Severity::Error);
        assert_eq!(OperationMode::GentleCooling.severity(), Severity::Success);
    }
}
