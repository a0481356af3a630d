//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Shared here: option
//! flags, output format selection and display formatting.

pub mod greeks;
pub mod price;
pub mod surface;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use clap::Args;
use pricer_core::types::{OptionParameters, OptionType};

use crate::config::OptionDefaults;
use crate::Result;

/// Output format of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!(
                "Unknown format: {}. Supported: json, csv, table",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Black-Scholes inputs; unset flags fall back to the `[option]` config section.
#[derive(Debug, Clone, Default, Args)]
pub struct OptionArgs {
    /// Current price of the underlying (S)
    #[arg(short, long)]
    pub spot: Option<f64>,

    /// Strike price (K)
    #[arg(short = 'k', long)]
    pub strike: Option<f64>,

    /// Time to maturity in years (T)
    #[arg(short = 't', long)]
    pub maturity: Option<f64>,

    /// Continuously compounded risk-free rate (r), e.g. 0.05
    #[arg(short, long, allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Annualised volatility (σ), e.g. 0.2
    #[arg(short, long)]
    pub volatility: Option<f64>,
}

impl OptionArgs {
    /// Overlays the flags on `defaults` and validates the result.
    pub fn resolve(
        &self,
        defaults: &OptionDefaults,
        option_type: OptionType,
    ) -> Result<OptionParameters> {
        Ok(OptionParameters::new(
            self.spot.unwrap_or(defaults.spot_price),
            self.strike.unwrap_or(defaults.strike_price),
            self.maturity.unwrap_or(defaults.time_to_maturity),
            self.rate.unwrap_or(defaults.risk_free_rate),
            self.volatility.unwrap_or(defaults.volatility),
            option_type,
        )?)
    }
}

/// `$1,234.56` style; negatives as `-$1.23`.
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// Fraction as a percentage: `0.05` → `5.00%`.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Writes `label  value` lines with the values aligned.
pub(crate) fn write_key_values<W: Write>(out: &mut W, rows: &[(&str, String)]) -> Result<()> {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in rows {
        writeln!(out, "{:<width$}  {}", label, value, width = width)?;
    }
    Ok(())
}

/// Input rows shared by the price and greeks tables.
pub(crate) fn parameter_rows(params: &OptionParameters) -> Vec<(&'static str, String)> {
    vec![
        ("Spot price", format_currency(params.spot_price())),
        ("Strike price", format_currency(params.strike_price())),
        ("Time to maturity", format!("{} years", params.time_to_maturity())),
        ("Risk-free rate", format_percent(params.risk_free_rate())),
        ("Volatility", format_percent(params.volatility())),
    ]
}
