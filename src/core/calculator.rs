use bon::{Builder, bon};
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        comfort::DiscomfortIndex,
        duty_ratio::{DutyRatio, Weights, estimate_duty_ratio},
        environment::{ApplianceProfile, EnvironmentReading, UsageContext},
        tariff::{TariffCharge, apply_progressive_tariff},
    },
    prelude::*,
    quantity::{
        self,
        cost::Cost,
        energy::KilowattHours,
        humidity::Percent,
        rate::KilowattHourRate,
        time::Hours,
    },
};

/// Billing period the daily figures are scaled to.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Outdoor temperature above which the efficiency degrades.
const DERATING_THRESHOLD: f64 = 35.0;

/// Efficiency loss per degree above the threshold.
const DERATING_PER_DEGREE: f64 = 0.01;

/// The derated efficiency never drops below this share of the nominal one.
const MIN_DERATING_FACTOR: f64 = 0.1;

/// Humidity the dehumidification converges to.
const TARGET_HUMIDITY: f64 = 50.0;

#[derive(Builder)]
pub struct Calculator {
    environment: EnvironmentReading,
    appliance: ApplianceProfile,

    /// Flat reference rate, not used for the progressive billing.
    flat_rate: KilowattHourRate,

    #[builder(default)]
    weights: Weights,

    /// Calendar month, its weights take precedence over [`Calculator::weights`].
    month: Option<u32>,

    usage: UsageContext,
}

impl Calculator {
    /// Estimate the appliance energy and the cost it adds to the monthly bill.
    #[instrument(skip_all)]
    pub fn calculate(&self) -> CalculationResult {
        let ratio = estimate_duty_ratio(&self.environment, self.weights, self.month);
        let compressor_hours = self.appliance.usage_hours_per_day * ratio.get();

        let adjusted_cop = self.appliance.cop * self.derating_factor();
        let effective_power = self.appliance.rated_power * (self.appliance.cop / adjusted_cop);

        let daily_energy = effective_power * compressor_hours;
        let flat_rate_daily_cost = daily_energy * self.flat_rate;
        let monthly_energy = daily_energy * DAYS_PER_MONTH;

        let previous = apply_progressive_tariff(self.usage.previous_monthly_usage);
        let new = apply_progressive_tariff(self.usage.previous_monthly_usage + monthly_energy);
        let additional_charge = new.total_charge - previous.total_charge;

        let indoor = self.environment.indoor;
        let discomfort_before = DiscomfortIndex::new(indoor.temperature, indoor.humidity);
        let humidity_after = Self::humidity_after(indoor.humidity, ratio);
        let discomfort_after = DiscomfortIndex::new(self.environment.set_point, humidity_after);

        info!(
            %ratio,
            %daily_energy,
            %monthly_energy,
            previous_tier = previous.tier,
            new_tier = new.tier,
            %additional_charge,
            "calculated"
        );

        CalculationResult::builder()
            .duty_ratio(ratio)
            .compressor_hours(compressor_hours)
            .daily_energy(daily_energy)
            .monthly_energy(monthly_energy)
            .adjusted_cop(adjusted_cop)
            .discomfort_before(discomfort_before)
            .discomfort_after(discomfort_after)
            .humidity_after(humidity_after)
            .flat_rate_daily_cost(flat_rate_daily_cost)
            .previous(previous)
            .new(new)
            .additional_charge(additional_charge)
            .build()
    }

    /// Share of the nominal efficiency left at the current outdoor temperature.
    fn derating_factor(&self) -> f64 {
        let excess = (self.environment.outdoor.temperature.0 - DERATING_THRESHOLD).max(0.0);
        (1.0 - DERATING_PER_DEGREE * excess).max(MIN_DERATING_FACTOR)
    }

    /// Heuristic dehumidification proportional to the duty ratio.
    fn humidity_after(indoor_humidity: Percent, ratio: DutyRatio) -> Percent {
        let h = indoor_humidity.0;
        Percent(h - (h - TARGET_HUMIDITY) * ratio.get() * 0.5)
    }
}

/// Calculation output, rounded to the presentation precision.
#[must_use]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalculationResult {
    pub duty_ratio_percent: f64,
    pub compressor_hours: Hours,
    pub daily_energy: KilowattHours,
    pub monthly_energy: KilowattHours,
    pub adjusted_cop: f64,
    pub discomfort_before: DiscomfortIndex,
    pub discomfort_after: DiscomfortIndex,
    pub humidity_after: Percent,

    /// Daily energy at the flat reference rate.
    pub flat_rate_daily_cost: Cost,
    pub flat_rate_monthly_cost: Cost,

    /// Bill for the previous usage alone.
    pub previous: BillSummary,

    /// Bill for the previous usage plus the appliance.
    pub new: BillSummary,

    /// Charge attributable to the appliance.
    pub additional_charge: Cost,
    pub daily_additional_charge: Cost,
}

#[bon]
impl CalculationResult {
    #[builder]
    fn new(
        duty_ratio: DutyRatio,
        compressor_hours: Hours,
        daily_energy: KilowattHours,
        monthly_energy: KilowattHours,
        adjusted_cop: f64,
        discomfort_before: DiscomfortIndex,
        discomfort_after: DiscomfortIndex,
        humidity_after: Percent,
        flat_rate_daily_cost: Cost,
        previous: TariffCharge,
        new: TariffCharge,
        additional_charge: Cost,
    ) -> Self {
        let flat_rate_daily_cost = flat_rate_daily_cost.trunc();
        Self {
            duty_ratio_percent: quantity::round_to(duty_ratio.as_percent(), 1),
            compressor_hours: compressor_hours.round_to(2),
            daily_energy: daily_energy.round_to(2),
            monthly_energy: monthly_energy.round_to(2),
            adjusted_cop: quantity::round_to(adjusted_cop, 2),
            discomfort_before: discomfort_before.round_to(1),
            discomfort_after: discomfort_after.round_to(1),
            humidity_after: Percent(quantity::round_to(humidity_after.0, 1)),
            flat_rate_daily_cost,
            flat_rate_monthly_cost: flat_rate_daily_cost * DAYS_PER_MONTH,
            previous: previous.into(),
            new: new.into(),
            additional_charge: additional_charge.trunc(),
            daily_additional_charge: (additional_charge / DAYS_PER_MONTH).trunc(),
        }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct BillSummary {
    pub total_usage: KilowattHours,
    pub tier: u8,
    pub total_charge: Cost,
    pub average_rate: KilowattHourRate,
}

impl From<TariffCharge> for BillSummary {
    fn from(charge: TariffCharge) -> Self {
        Self {
            total_usage: charge.total_usage.round_to(2),
            tier: charge.tier,
            total_charge: charge.total_charge.trunc(),
            average_rate: charge.average_rate.round_to(1),
        }
    }
}
