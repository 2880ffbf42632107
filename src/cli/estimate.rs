use clap::Parser;
use serde::Serialize;

use crate::{
    api::environment::{self, EnvironmentProvider, Lookup, Source},
    cli::{
        appliance::{ApplianceArgs, UsageArgs},
        conditions::{IndoorArgs, OutdoorArgs},
        output::OutputArgs,
        weights::WeightsArgs,
    },
    core::{
        advisor::{Advisory, OperationMode, advise, recommend_mode},
        calculator::{CalculationResult, Calculator},
        duty_ratio::Weights,
        environment::EnvironmentReading,
    },
    prelude::*,
    tables::{
        build_advice_table,
        build_bill_table,
        build_result_table,
        build_summary_table,
    },
};

#[derive(Parser)]
pub struct EstimateArgs {
    #[clap(flatten)]
    pub indoor: IndoorArgs,

    #[clap(flatten)]
    pub outdoor: OutdoorArgs,

    #[clap(flatten)]
    pub appliance: ApplianceArgs,

    #[clap(flatten)]
    pub usage: UsageArgs,

    #[clap(flatten)]
    pub weights: WeightsArgs,

    #[clap(flatten)]
    pub output: OutputArgs,
}

impl EstimateArgs {
    fn validate(&self) -> Result {
        self.indoor.validate()?;
        self.outdoor.validate()?;
        self.appliance.validate()?;
        self.usage.validate()?;
        self.weights.validate()
    }
}

/// Everything the estimate command reports.
#[derive(Serialize)]
pub struct Report {
    pub month: u32,
    pub outdoor_source: Source,
    pub mode: OperationMode,
    pub weights: Weights,
    pub environment: EnvironmentReading,
    pub result: CalculationResult,
    pub advisories: Vec<Advisory>,
}

#[instrument(skip_all)]
pub async fn estimate(args: &EstimateArgs) -> Result {
    args.validate()?;

    let lookup = if args.outdoor.offline { None } else { Some(Lookup::try_new()?) };
    let provider = lookup.as_ref().map(|lookup| lookup as &dyn EnvironmentProvider);
    let (outdoor, outdoor_source) = environment::resolve(provider, args.outdoor.manual()).await;
    info!(?outdoor, ?outdoor_source, "resolved the outdoor conditions");

    let environment = EnvironmentReading {
        indoor: args.indoor.conditions(),
        outdoor,
        set_point: args.indoor.set_point,
    };

    // Manual weights are used as is, otherwise the month picks them:
    let month = args.weights.month();
    let override_weights = args.weights.override_weights();
    let weights = override_weights.unwrap_or_else(|| Weights::for_month_or_default(month));

    let result = Calculator::builder()
        .environment(environment)
        .appliance(args.appliance.profile())
        .flat_rate(args.usage.flat_rate)
        .weights(weights)
        .maybe_month(override_weights.is_none().then_some(month))
        .usage(args.usage.context())
        .build()
        .calculate();

    let report = Report {
        month,
        outdoor_source,
        mode: recommend_mode(
            environment.indoor.humidity,
            environment.indoor.temperature,
            environment.set_point,
        ),
        weights,
        environment,
        advisories: advise(&environment, &result),
        result,
    };

    match args.output.format.serialize(&report)? {
        Some(serialized) => println!("{serialized}"),
        None => {
            println!("{}", build_summary_table(&report));
            println!("{}", build_result_table(&report.result));
            println!("{}", build_bill_table(&report.result));
            println!("{}", build_advice_table(report.mode, &report.advisories));
        }
    }
    Ok(())
}
