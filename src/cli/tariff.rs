use clap::Parser;

use crate::{
    cli::{ensure_within, output::OutputArgs},
    core::tariff::apply_progressive_tariff,
    prelude::*,
    quantity::energy::KilowattHours,
    tables::{build_tariff_charge_table, build_tariff_table},
};

#[derive(Parser)]
pub struct TariffArgs {
    /// Total monthly usage to bill.
    #[clap(long = "total-kwh", env = "TOTAL_KWH")]
    pub total_usage: KilowattHours,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[instrument(skip_all, fields(total_usage = %args.total_usage))]
pub fn tariff(args: &TariffArgs) -> Result {
    ensure_within("total-kwh", args.total_usage.value(), 0.0..=f64::MAX)?;
    let charge = apply_progressive_tariff(args.total_usage);
    info!(charge.tier, total_charge = %charge.total_charge, "billed");
    match args.output.format.serialize(&charge)? {
        Some(serialized) => println!("{serialized}"),
        None => {
            println!("{}", build_tariff_table());
            println!("{}", build_tariff_charge_table(&charge));
        }
    }
    Ok(())
}
