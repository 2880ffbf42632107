use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    api::environment::Source,
    cli::Report,
    core::{
        advisor::{Advisory, OperationMode},
        calculator::CalculationResult,
        comfort::DiscomfortIndex,
        duty_ratio::DutyRatioBand,
        environment::Conditions,
        tariff::{TIERS, TariffCharge},
    },
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

const fn month_name(month: u32) -> &'static str {
    match month {
        6 => "June (early summer)",
        7 => "July (monsoon)",
        8 => "August (heatwave)",
        9 => "September (late summer)",
        _ => "off-season",
    }
}

fn discomfort_cell(index: DiscomfortIndex) -> Cell {
    let level = index.level();
    Cell::new(format!("{index} ({level})")).fg(level.color())
}

#[must_use]
pub fn build_summary_table(report: &Report) -> Table {
    let environment = &report.environment;
    let mut table = new_table();
    table.set_header(vec!["Condition", "Value"]);
    table.add_row(vec![
        Cell::new("Indoor − set-point"),
        Cell::new(environment.temperature_delta()).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Indoor − outdoor humidity"),
        Cell::new(environment.humidity_delta()).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Outdoor"),
        Cell::new(format!("{}, {}", environment.outdoor.temperature, environment.outdoor.humidity))
            .set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Outdoor source").add_attribute(Attribute::Dim),
        Cell::new(report.outdoor_source).fg(match report.outdoor_source {
            Source::Manual => Color::Reset,
            Source::Lookup => Color::Green,
            Source::Fallback => Color::DarkYellow,
        }),
    ]);
    table.add_row(vec![Cell::new("Month"), Cell::new(month_name(report.month))]);
    table.add_row(vec![
        Cell::new("Weights").add_attribute(Attribute::Dim),
        Cell::new(format!("α={:.3} β={:.4}", report.weights.alpha, report.weights.beta)),
    ]);
    table
}

#[must_use]
pub fn build_result_table(result: &CalculationResult) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        Cell::new("Duty ratio"),
        Cell::new(format!("{:.1}%", result.duty_ratio_percent))
            .set_alignment(CellAlignment::Right)
            .fg(DutyRatioBand::classify(result.duty_ratio_percent).color()),
    ]);
    table.add_row(vec![
        Cell::new("Compressor run time"),
        Cell::new(format!("{} per day", result.compressor_hours)).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Daily energy"),
        Cell::new(result.daily_energy).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Monthly energy"),
        Cell::new(result.monthly_energy).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Adjusted COP"),
        Cell::new(format!("{:.2}", result.adjusted_cop)).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Flat rate cost").add_attribute(Attribute::Dim),
        Cell::new(format!(
            "{} per day, {} per month",
            result.flat_rate_daily_cost, result.flat_rate_monthly_cost,
        ))
        .set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Progressive cost"),
        Cell::new(format!(
            "{} per day, {} per month",
            result.daily_additional_charge, result.additional_charge,
        ))
        .set_alignment(CellAlignment::Right)
        .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Discomfort before"), discomfort_cell(result.discomfort_before)]);
    table.add_row(vec![Cell::new("Discomfort after"), discomfort_cell(result.discomfort_after)]);
    table.add_row(vec![
        Cell::new("Humidity after").add_attribute(Attribute::Dim),
        Cell::new(result.humidity_after).set_alignment(CellAlignment::Right),
    ]);
    table
}

#[must_use]
pub fn build_bill_table(result: &CalculationResult) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Bill", "Usage", "Tier", "Charge", "Average rate"]);
    for (label, bill) in [("Previous", &result.previous), ("With air conditioner", &result.new)] {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(bill.total_usage).set_alignment(CellAlignment::Right),
            Cell::new(bill.tier).set_alignment(CellAlignment::Right).fg(match bill.tier {
                1 => Color::Green,
                2 => Color::DarkYellow,
                _ => Color::Red,
            }),
            Cell::new(bill.total_charge).set_alignment(CellAlignment::Right),
            Cell::new(bill.average_rate).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_advice_table(mode: OperationMode, advisories: &[Advisory]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Advice"]);
    table.add_row(vec![Cell::new(mode).fg(mode.severity().color())]);
    for advisory in advisories {
        table.add_row(vec![Cell::new(advisory).fg(advisory.severity().color())]);
    }
    table
}

#[must_use]
pub fn build_tariff_table() -> Table {
    let mut table = new_table();
    table.set_header(vec!["Tier", "From", "Up to", "Base charge", "Rate"]);
    for tier in &TIERS {
        table.add_row(vec![
            Cell::new(tier.number),
            Cell::new(tier.lower_bound()).set_alignment(CellAlignment::Right),
            Cell::new(tier.upper_bound.map_or_else(|| "…".to_string(), |bound| bound.to_string()))
                .set_alignment(CellAlignment::Right),
            Cell::new(tier.base_charge).set_alignment(CellAlignment::Right),
            Cell::new(tier.rate).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_tariff_charge_table(charge: &TariffCharge) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Usage", "Tier", "Base", "Usage charge", "Total", "Average rate"]);
    table.add_row(vec![
        Cell::new(charge.total_usage),
        Cell::new(charge.tier),
        Cell::new(charge.base_charge).add_attribute(Attribute::Dim),
        Cell::new(charge.usage_charge).add_attribute(Attribute::Dim),
        Cell::new(charge.total_charge).add_attribute(Attribute::Bold),
        Cell::new(charge.average_rate),
    ]);
    table
}

#[must_use]
pub fn build_conditions_table(conditions: &Conditions) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Temperature", "Humidity"]);
    table.add_row(vec![Cell::new(conditions.temperature), Cell::new(conditions.humidity)]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            advisor::{advise, recommend_mode},
            calculator::Calculator,
            duty_ratio::Weights,
            environment::{ApplianceProfile, EnvironmentReading, UsageContext},
            tariff::apply_progressive_tariff,
        },
        quantity::{
            energy::KilowattHours,
            power::Kilowatts,
            rate::KilowattHourRate,
            temperature::Celsius,
            time::Hours,
        },
    };

    fn report() -> Report {
        let environment = EnvironmentReading {
            indoor: Conditions::new(28.0, 65.0),
            outdoor: Conditions::new(32.0, 75.0),
            set_point: Celsius(24.0),
        };
        let weights = Weights::for_month_or_default(7);
        let result = Calculator::builder()
            .environment(environment)
            .appliance(ApplianceProfile {
                rated_power: Kilowatts::new(0.907),
                cop: 3.52,
                usage_hours_per_day: Hours::new(8.0),
            })
            .flat_rate(KilowattHourRate::new(115.9))
            .weights(weights)
            .month(7)
            .usage(UsageContext { previous_monthly_usage: KilowattHours::new(300.0) })
            .build()
            .calculate();
        Report {
            month: 7,
            outdoor_source: Source::Fallback,
            mode: recommend_mode(
                environment.indoor.humidity,
                environment.indoor.temperature,
                environment.set_point,
            ),
            weights,
            environment,
            advisories: advise(&environment, &result),
            result,
        }
    }

    #[test]
    fn test_summary_table() {
        let rendered = build_summary_table(&report()).to_string();
        for expected in ["4.0 °C", "-10.0%", "July (monsoon)", "fallback (lookup failed)", "α=0.032"] {
            assert!(rendered.contains(expected), "{expected} is missing from:\n{rendered}");
        }
    }

    #[test]
    fn test_result_table() {
        let rendered = build_result_table(&report().result).to_string();
        for expected in ["70.5%", "5.64 h per day", "5.12 kWh", "153.47 kWh", "77.7 (uncomfortable)"] {
            assert!(rendered.contains(expected), "{expected} is missing from:\n{rendered}");
        }
    }

    #[test]
    fn test_bill_table() {
        let rendered = build_bill_table(&report().result).to_string();
        for expected in ["With air conditioner", "46,550 ₩", "155.2 ₩/kWh", "453.47 kWh"] {
            assert!(rendered.contains(expected), "{expected} is missing from:\n{rendered}");
        }
    }

    #[test]
    fn test_advice_table() {
        let report = report();
        let rendered = build_advice_table(report.mode, &report.advisories).to_string();
        assert!(rendered.contains(&report.mode.to_string()), "{rendered}");
    }

    #[test]
    fn test_tariff_table_lists_every_tier() {
        let rendered = build_tariff_table().to_string();
        for rate in ["115.9", "206.6", "307.3"] {
            assert!(rendered.contains(rate), "{rate} is missing from:\n{rendered}");
        }
    }

    #[test]
    fn test_tariff_charge_table() {
        let charge = apply_progressive_tariff(KilowattHours::new(210.0));
        let rendered = build_tariff_charge_table(&charge).to_string();
        assert!(rendered.contains("27,956 ₩"), "{rendered}");
    }

    #[test]
    fn test_tariff_charge_table_truncates_won() {
        let charge = apply_progressive_tariff(KilowattHours::new(200.7));
        let rendered = build_tariff_charge_table(&charge).to_string();
        assert!(rendered.contains("26,034 ₩"), "{rendered}");
    }
}
