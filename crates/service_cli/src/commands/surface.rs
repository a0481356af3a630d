//! Surface command implementation
//!
//! Generates the call and put price heatmaps over a spot × volatility mesh.
//! Table output paints each cell with a 24-bit ANSI background unless
//! `--plain` is given.

use std::io::{self, Write};

use clap::Args;
use pricer_core::types::OptionType;
use pricer_models::surface::colour::{legend_colours, prefers_light_label};
use pricer_models::surface::{generate_surface, ColourMapper, ColourScheme, PriceSurface, SurfaceRange};
use serde::Serialize;
use tracing::info;

use super::{format_currency, format_percent, OutputFormat};
use crate::config::CliConfig;
use crate::Result;

/// Arguments of `bsheat surface`
#[derive(Debug, Clone, Default, Args)]
pub struct SurfaceArgs {
    /// Centre the spot axis on this price (0.7·S to 1.3·S)
    #[arg(short, long)]
    pub spot: Option<f64>,

    /// Strike price (K)
    #[arg(short = 'k', long)]
    pub strike: Option<f64>,

    /// Time to maturity in years (T)
    #[arg(short = 't', long)]
    pub maturity: Option<f64>,

    /// Continuously compounded risk-free rate (r)
    #[arg(short, long, allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Lowest spot on the horizontal axis
    #[arg(long)]
    pub min_spot: Option<f64>,

    /// Highest spot on the horizontal axis
    #[arg(long)]
    pub max_spot: Option<f64>,

    /// Lowest volatility on the vertical axis
    #[arg(long)]
    pub min_vol: Option<f64>,

    /// Highest volatility on the vertical axis
    #[arg(long)]
    pub max_vol: Option<f64>,

    /// Mesh resolution per axis (2..=20, larger values are clamped)
    #[arg(short = 'n', long)]
    pub steps: Option<usize>,

    /// Colour scheme (gradient, palette)
    #[arg(long)]
    pub colours: Option<ColourScheme>,

    /// Disable ANSI colours in table output
    #[arg(long)]
    pub plain: bool,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

impl SurfaceArgs {
    /// Builds the mesh: explicit bounds > `--spot` band > `[surface]` config.
    pub fn range(&self, config: &CliConfig) -> SurfaceRange {
        let strike_price = self.strike.unwrap_or(config.option.strike_price);
        let time_to_maturity = self.maturity.unwrap_or(config.option.time_to_maturity);
        let risk_free_rate = self.rate.unwrap_or(config.option.risk_free_rate);

        let (default_min_spot, default_max_spot) = match self.spot {
            Some(spot) => {
                let band =
                    SurfaceRange::around_spot(spot, strike_price, time_to_maturity, risk_free_rate);
                (band.min_spot, band.max_spot)
            }
            None => (config.surface.min_spot, config.surface.max_spot),
        };

        SurfaceRange {
            strike_price,
            time_to_maturity,
            risk_free_rate,
            min_spot: self.min_spot.unwrap_or(default_min_spot),
            max_spot: self.max_spot.unwrap_or(default_max_spot),
            min_vol: self.min_vol.unwrap_or(config.surface.min_vol),
            max_vol: self.max_vol.unwrap_or(config.surface.max_vol),
            steps: self.steps.unwrap_or(config.surface.steps),
        }
    }
}

#[derive(Debug, Serialize)]
struct GridReport<'a> {
    option_type: OptionType,
    max: f64,
    prices: &'a [Vec<f64>],
    colours: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct SurfaceReport<'a> {
    range: &'a SurfaceRange,
    colour_scheme: ColourScheme,
    spot_axis: &'a [f64],
    vol_axis: &'a [f64],
    call: GridReport<'a>,
    put: GridReport<'a>,
    legend: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CellRecord {
    option_type: OptionType,
    volatility: f64,
    spot: f64,
    price: f64,
    colour: String,
}

/// Run the surface command
pub fn run(args: &SurfaceArgs, config: &CliConfig) -> Result<()> {
    let range = args.range(config);
    let scheme = args.colours.unwrap_or(config.surface.colours);
    info!(
        strike = range.strike_price,
        min_spot = range.min_spot,
        max_spot = range.max_spot,
        min_vol = range.min_vol,
        max_vol = range.max_vol,
        steps = range.steps,
        colours = %scheme,
        "Generating heatmap"
    );

    let surface = generate_surface(&range)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Table => write_table(&mut out, &surface, scheme, !args.plain)?,
        OutputFormat::Json => write_json(&mut out, &range, &surface, scheme)?,
        OutputFormat::Csv => write_csv(&mut out, &surface, scheme)?,
    }

    info!(steps = surface.steps(), "Heatmap complete");
    Ok(())
}

fn grid_of(surface: &PriceSurface, option_type: OptionType) -> (&[Vec<f64>], f64) {
    match option_type {
        OptionType::Call => (surface.call_grid(), surface.call_max()),
        OptionType::Put => (surface.put_grid(), surface.put_max()),
    }
}

fn colour_grid(grid: &[Vec<f64>], max: f64, mapper: ColourMapper) -> Vec<Vec<String>> {
    grid.iter()
        .map(|row| row.iter().map(|&v| mapper.colour_for(v, max).to_hex()).collect())
        .collect()
}

/// Writes both heatmaps as text grids, highest volatility first.
pub fn write_table<W: Write>(
    out: &mut W,
    surface: &PriceSurface,
    scheme: ColourScheme,
    ansi: bool,
) -> Result<()> {
    const CELL: usize = 10;

    for option_type in [OptionType::Call, OptionType::Put] {
        let (grid, max) = grid_of(surface, option_type);
        let mapper = ColourMapper::new(scheme, option_type);

        writeln!(
            out,
            "{} PRICE HEATMAP (max {})",
            option_type.to_string().to_uppercase(),
            format_currency(max)
        )?;
        write!(out, "{:>8}", "vol\\spot")?;
        for &spot in surface.spot_axis() {
            write!(out, "{:>width$}", format!("{:.2}", spot), width = CELL)?;
        }
        writeln!(out)?;

        for (row, &vol) in grid.iter().zip(surface.vol_axis()).rev() {
            write!(out, "{:>8}", format_percent(vol))?;
            for &value in row {
                let label = format!("{:>width$.2}", value, width = CELL);
                if ansi {
                    let bg = mapper.colour_for(value, max);
                    let fg = if prefers_light_label(value, max) { 255 } else { 0 };
                    write!(
                        out,
                        "\x1b[48;2;{};{};{}m\x1b[38;2;{fg};{fg};{fg}m{}\x1b[0m",
                        bg.r, bg.g, bg.b, label
                    )?;
                } else {
                    write!(out, "{}", label)?;
                }
            }
            writeln!(out)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes the mesh, both grids, cell colours and the legend strip as JSON.
pub fn write_json<W: Write>(
    out: &mut W,
    range: &SurfaceRange,
    surface: &PriceSurface,
    scheme: ColourScheme,
) -> Result<()> {
    let grid_report = |option_type| {
        let (prices, max) = grid_of(surface, option_type);
        GridReport {
            option_type,
            max,
            prices,
            colours: colour_grid(prices, max, ColourMapper::new(scheme, option_type)),
        }
    };

    let report = SurfaceReport {
        range,
        colour_scheme: scheme,
        spot_axis: surface.spot_axis(),
        vol_axis: surface.vol_axis(),
        call: grid_report(OptionType::Call),
        put: grid_report(OptionType::Put),
        legend: legend_colours(surface.steps())
            .iter()
            .map(ToString::to_string)
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

/// Writes one record per cell: call grid first, rows then columns.
pub fn write_csv<W: Write>(out: &mut W, surface: &PriceSurface, scheme: ColourScheme) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for option_type in [OptionType::Call, OptionType::Put] {
        let (grid, max) = grid_of(surface, option_type);
        let mapper = ColourMapper::new(scheme, option_type);
        for (row, &volatility) in grid.iter().zip(surface.vol_axis()) {
            for (&price, &spot) in row.iter().zip(surface.spot_axis()) {
                writer.serialize(CellRecord {
                    option_type,
                    volatility,
                    spot,
                    price,
                    colour: mapper.colour_for(price, max).to_hex(),
                })?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}
