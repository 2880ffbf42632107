use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::prelude::*;

#[must_use]
#[derive(Parser)]
pub struct OutputArgs {
    /// Output format.
    #[clap(long = "output", default_value = "table", env = "OUTPUT")]
    pub format: OutputFormat,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables.
    Table,

    Json,

    Toml,
}

impl OutputFormat {
    /// Serialize the report for the machine-readable formats, `None` for tables.
    pub fn serialize<T: Serialize>(self, report: &T) -> Result<Option<String>> {
        match self {
            Self::Table => Ok(None),
            Self::Json => Ok(Some(
                serde_json::to_string_pretty(report).context("failed to serialize to JSON")?,
            )),
            Self::Toml => {
                Ok(Some(toml::to_string(report).context("failed to serialize to TOML")?))
            }
        }
    }
}
