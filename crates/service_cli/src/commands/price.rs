//! Price command implementation
//!
//! Prices the European call and put for one parameter set.

use std::io::{self, Write};

use clap::Args;
use pricer_core::types::OptionParameters;
use pricer_models::analytical::{price_option, PricingResult};
use serde::Serialize;
use tracing::info;

use super::{format_currency, parameter_rows, write_key_values, OptionArgs, OutputFormat};
use crate::config::CliConfig;
use crate::Result;

/// Arguments of `bsheat price`
#[derive(Debug, Clone, Args)]
pub struct PriceArgs {
    #[command(flatten)]
    pub option: OptionArgs,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct PriceReport<'a> {
    parameters: &'a OptionParameters,
    call_price: f64,
    put_price: f64,
}

/// Run the price command
pub fn run(args: &PriceArgs, config: &CliConfig) -> Result<()> {
    let params = args
        .option
        .resolve(&config.option, config.option.option_type)?;
    info!(
        spot = params.spot_price(),
        strike = params.strike_price(),
        maturity = params.time_to_maturity(),
        rate = params.risk_free_rate(),
        volatility = params.volatility(),
        format = %args.format,
        "Pricing option"
    );

    let result = price_option(&params)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&mut out, &params, &result, args.format)?;

    info!("Pricing complete");
    Ok(())
}

/// Writes the prices in the requested format.
pub fn render<W: Write>(
    out: &mut W,
    params: &OptionParameters,
    result: &PricingResult,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let mut rows = parameter_rows(params);
            rows.push(("CALL value", format_currency(result.call_price)));
            rows.push(("PUT value", format_currency(result.put_price)));
            write_key_values(out, &rows)?;
        }
        OutputFormat::Json => {
            let report = PriceReport {
                parameters: params,
                call_price: result.call_price,
                put_price: result.put_price,
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record([
                "spot_price",
                "strike_price",
                "time_to_maturity",
                "risk_free_rate",
                "volatility",
                "call_price",
                "put_price",
            ])?;
            writer.write_record([
                params.spot_price().to_string(),
                params.strike_price().to_string(),
                params.time_to_maturity().to_string(),
                params.risk_free_rate().to_string(),
                params.volatility().to_string(),
                result.call_price.to_string(),
                result.put_price.to_string(),
            ])?;
            writer.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::OptionType;

    fn reference() -> (OptionParameters, PricingResult) {
        let params =
            OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
        let result = price_option(&params).unwrap();
        (params, result)
    }

    fn render_to_string(format: OutputFormat) -> String {
        let (params, result) = reference();
        let mut out = Vec::new();
        render(&mut out, &params, &result, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_table_output() {
        let text = render_to_string(OutputFormat::Table);
        assert!(text.contains("Spot price        $100.00"));
        assert!(text.contains("Risk-free rate    5.00%"));
        assert!(text.contains("Volatility        20.00%"));
        assert!(text.contains("CALL value        $10.45"));
        assert!(text.contains("PUT value         $5.57"));
    }

    #[test]
    fn test_json_output() {
        let text = render_to_string(OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_relative_eq!(
            value["call_price"].as_f64().unwrap(),
            10.450583572185565,
            epsilon = 1e-9
        );
        assert_eq!(value["parameters"]["strike_price"], 100.0);
        assert_eq!(value["parameters"]["option_type"], "call");
    }

    #[test]
    fn test_csv_output() {
        let text = render_to_string(OutputFormat::Csv);
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("spot_price,strike_price,time_to_maturity,risk_free_rate,volatility,call_price,put_price")
        );
        assert!(lines.next().unwrap().starts_with("100,100,1,0.05,0.2,10.45"));
    }
}
