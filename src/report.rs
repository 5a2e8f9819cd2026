//! Rendering of pricing comparisons for the terminal.
//!
//! Text mode reproduces the classic three-line summary with prices rounded to
//! cents; the structured modes keep full precision for scripts and tests.

use crate::error::{PricingError, PricingResult};
use crate::models::utils::round_to_cents;
use crate::pricing::config::{OutputConfig, OutputFormat};
use crate::pricing::types::{ConvergencePoint, PricingComparison};
use std::fmt::Write as _;

const COMPARISON_HEADER: [&str; 14] = [
    "spot",
    "strike",
    "rate",
    "volatility",
    "time",
    "paths",
    "mc_price",
    "mc_std_error",
    "mc_ci_low",
    "mc_ci_high",
    "bs_price",
    "abs_error",
    "percent_error",
    "mc_implied_vol",
];

const CONVERGENCE_HEADER: [&str; 6] = [
    "paths",
    "mc_price",
    "bs_price",
    "abs_error",
    "std_error",
    "percent_error",
];

/// Format a comparison according to `output`.
pub fn render_comparison(
    comparison: &PricingComparison,
    output: &OutputConfig,
) -> PricingResult<String> {
    match output.format {
        OutputFormat::Text => Ok(render_text(comparison, &output.currency)),
        OutputFormat::KeyValue => Ok(fields(comparison, output.confidence_level)?
            .iter()
            .map(|(k, v)| format!("{}={}\n", k, v))
            .collect()),
        OutputFormat::Csv => {
            let row = fields(comparison, output.confidence_level)?;
            let values: Vec<&str> = row.iter().map(|(_, v)| v.as_str()).collect();
            write_csv(&COMPARISON_HEADER, &[values])
        }
    }
}

/// The three human-readable summary lines.
pub fn render_text(comparison: &PricingComparison, currency: &str) -> String {
    format!(
        "Monte Carlo European Call Option Price: {}{:.2}\n\
         Black-Scholes European Call Option Price: {}{:.2}\n\
         Error: {:.2}%\n",
        currency,
        round_to_cents(comparison.mc_price()),
        currency,
        round_to_cents(comparison.bs_price),
        round_to_cents(comparison.percent_error),
    )
}

/// Format a convergence study as an aligned table, `key=value` lines or csv.
pub fn render_convergence(
    points: &[ConvergencePoint],
    format: OutputFormat,
) -> PricingResult<String> {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            let _ = writeln!(
                out,
                "{:>12} {:>12} {:>12} {:>12} {:>12} {:>10}",
                "Paths", "MC Price", "BS Price", "Abs Error", "Std Error", "Error %"
            );
            let _ = writeln!(out, "{}", "-".repeat(75));
            for p in points {
                let _ = writeln!(
                    out,
                    "{:>12} {:>12.6} {:>12.6} {:>12.6} {:>12.6} {:>10.4}",
                    p.paths, p.mc_price, p.bs_price, p.abs_error, p.std_error, p.percent_error
                );
            }
            Ok(out)
        }
        OutputFormat::KeyValue => Ok(points
            .iter()
            .map(|p| {
                CONVERGENCE_HEADER
                    .iter()
                    .zip(convergence_values(p))
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect::<Vec<_>>()
                    .join(" ")
                    + "\n"
            })
            .collect()),
        OutputFormat::Csv => {
            let rows: Vec<Vec<String>> = points.iter().map(convergence_values).collect();
            let rows: Vec<Vec<&str>> = rows
                .iter()
                .map(|r| r.iter().map(String::as_str).collect())
                .collect();
            write_csv(&CONVERGENCE_HEADER, &rows)
        }
    }
}

fn fields(
    comparison: &PricingComparison,
    confidence_level: f64,
) -> PricingResult<Vec<(&'static str, String)>> {
    let p = &comparison.params;
    let sim = &comparison.simulation;
    let (ci_low, ci_high) = sim.confidence_interval(confidence_level)?;
    let implied = comparison
        .mc_implied_vol
        .map(format_number)
        .unwrap_or_default();

    let values = vec![
        format_number(p.spot),
        format_number(p.strike),
        format_number(p.rate),
        format_number(p.volatility),
        format_number(p.time),
        sim.paths.to_string(),
        format_number(sim.price),
        format_number(sim.std_error),
        format_number(ci_low),
        format_number(ci_high),
        format_number(comparison.bs_price),
        format_number(comparison.abs_error()),
        format_number(comparison.percent_error),
        implied,
    ];
    Ok(COMPARISON_HEADER.iter().copied().zip(values).collect())
}

fn convergence_values(p: &ConvergencePoint) -> Vec<String> {
    vec![
        p.paths.to_string(),
        format_number(p.mc_price),
        format_number(p.bs_price),
        format_number(p.abs_error),
        format_number(p.std_error),
        format_number(p.percent_error),
    ]
}

/// Shortest text that parses back to the same `f64`. Very small or very
/// large magnitudes switch to exponent form so a far out-of-the-money price
/// does not print as hundreds of zeros.
fn format_number(x: f64) -> String {
    let magnitude = x.abs();
    if x != 0.0 && magnitude.is_finite() && !(1e-6..1e15).contains(&magnitude) {
        format!("{:e}", x)
    } else {
        x.to_string()
    }
}

fn write_csv(header: &[&str], rows: &[Vec<&str>]) -> PricingResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| PricingError::Output(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| PricingError::Output(e.to_string()))
}
