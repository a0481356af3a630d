//! Greeks command implementation

use std::io::{self, Write};

use clap::Args;
use pricer_core::types::{OptionParameters, OptionType};
use pricer_models::analytical::{greeks_option, GreeksResult};
use serde::Serialize;
use tracing::info;

use super::{parameter_rows, write_key_values, OptionArgs, OutputFormat};
use crate::config::CliConfig;
use crate::Result;

/// Arguments of `bsheat greeks`
#[derive(Debug, Clone, Args)]
pub struct GreeksArgs {
    #[command(flatten)]
    pub option: OptionArgs,

    /// Option right (call, put); defaults to the configured type
    #[arg(short, long)]
    pub option_type: Option<OptionType>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct GreeksReport<'a> {
    parameters: &'a OptionParameters,
    greeks: &'a GreeksResult,
}

/// Run the greeks command
pub fn run(args: &GreeksArgs, config: &CliConfig) -> Result<()> {
    let option_type = args.option_type.unwrap_or(config.option.option_type);
    let params = args.option.resolve(&config.option, option_type)?;
    info!(
        option_type = %option_type,
        spot = params.spot_price(),
        strike = params.strike_price(),
        maturity = params.time_to_maturity(),
        "Computing Greeks"
    );

    let greeks = greeks_option(&params)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&mut out, &params, &greeks, args.format)?;

    info!("Greeks complete");
    Ok(())
}

/// Writes the Greeks in the requested format.
pub fn render<W: Write>(
    out: &mut W,
    params: &OptionParameters,
    greeks: &GreeksResult,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let mut rows = parameter_rows(params);
            rows.push(("Option type", params.option_type().to_string()));
            rows.push(("Delta", format!("{:.4}", greeks.delta)));
            rows.push(("Gamma", format!("{:.4}", greeks.gamma)));
            rows.push(("Theta (per day)", format!("{:.4}", greeks.theta)));
            rows.push(("Vega (per 1%)", format!("{:.4}", greeks.vega)));
            rows.push(("Rho (per 1%)", format!("{:.4}", greeks.rho)));
            write_key_values(out, &rows)?;
        }
        OutputFormat::Json => {
            let report = GreeksReport {
                parameters: params,
                greeks,
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(["option_type", "delta", "gamma", "theta", "vega", "rho"])?;
            writer.write_record([
                params.option_type().to_string(),
                greeks.delta.to_string(),
                greeks.gamma.to_string(),
                greeks.theta.to_string(),
                greeks.vega.to_string(),
                greeks.rho.to_string(),
            ])?;
            writer.flush()?;
        }
    }
    Ok(())
}
