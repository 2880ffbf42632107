use clap::Parser;

use crate::{
    api::environment::{EnvironmentProvider, Lookup},
    cli::output::OutputArgs,
    prelude::*,
    tables::build_conditions_table,
};

#[derive(Parser)]
pub struct WeatherArgs {
    #[clap(flatten)]
    pub output: OutputArgs,
}

#[instrument(skip_all)]
pub async fn weather(args: &WeatherArgs) -> Result {
    let conditions = Lookup::try_new()?
        .get_outdoor_conditions()
        .await
        .context("failed to look the outdoor conditions up")?;
    match args.output.format.serialize(&conditions)? {
        Some(serialized) => println!("{serialized}"),
        None => println!("{}", build_conditions_table(&conditions)),
    }
    Ok(())
}
