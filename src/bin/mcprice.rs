//! `mcprice` - price a European call by Black-Scholes and Monte Carlo
//!
//! ```text
//! mcprice                                   # S=100 K=100 r=5% σ=20% T=0.1, 10^6 paths
//! mcprice --strike 110 --paths 10000000 --seed 42
//! mcprice --config run.toml --format csv
//! mcprice --preset research --convergence
//! ```
//!
//! Flags override values from `--config`; logs go to stderr (`RUST_LOG`).

use anyhow::{Context, Result};
use clap::Parser;
use mc_option_lib::pricing::pipeline::decade_path_counts;
use mc_option_lib::report::{render_comparison, render_convergence};
use mc_option_lib::{
    convergence_study, OutputFormat, PricingConfig, PricingRun, SimulationConfig,
};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Compare Monte Carlo and Black-Scholes prices of a European call
#[derive(Parser, Debug)]
#[command(name = "mcprice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Spot price of the underlying [default: 100]
    #[arg(long, allow_negative_numbers = true)]
    spot: Option<f64>,

    /// Strike price [default: 100]
    #[arg(long, allow_negative_numbers = true)]
    strike: Option<f64>,

    /// Continuously-compounded risk-free rate [default: 0.05]
    #[arg(long, allow_negative_numbers = true)]
    rate: Option<f64>,

    /// Annualised volatility [default: 0.2]
    #[arg(long, allow_negative_numbers = true)]
    vol: Option<f64>,

    /// Time to maturity in years [default: 0.1]
    #[arg(long, allow_negative_numbers = true)]
    time: Option<f64>,

    /// Number of Monte Carlo paths [default: 1000000]
    #[arg(long)]
    paths: Option<usize>,

    /// Seed for a reproducible simulation
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: text, key-value or csv [default: text]
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Currency symbol for text output [default: £]
    #[arg(long)]
    currency: Option<String>,

    /// Simulation size preset: production, fast, research or minimal
    #[arg(long)]
    preset: Option<String>,

    /// TOML run file with [option], [simulation] and [output] tables
    #[arg(short, long)]
    config: Option<String>,

    /// Also print a convergence table over decades of path counts
    #[arg(long)]
    convergence: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// File values first, then preset, then individual flags.
    fn resolve_config(&self) -> Result<PricingConfig> {
        let mut cfg = match &self.config {
            Some(path) => PricingConfig::from_file(path)
                .with_context(|| format!("failed to load run file {}", path))?,
            None => PricingConfig::default(),
        };

        if let Some(name) = &self.preset {
            let seed = cfg.simulation.seed;
            cfg.simulation = SimulationConfig::preset(name)?;
            cfg.simulation.seed = seed;
        }

        let option = &mut cfg.option;
        if let Some(v) = self.spot {
            option.spot = v;
        }
        if let Some(v) = self.strike {
            option.strike = v;
        }
        if let Some(v) = self.rate {
            option.rate = v;
        }
        if let Some(v) = self.vol {
            option.volatility = v;
        }
        if let Some(v) = self.time {
            option.time = v;
        }
        if let Some(n) = self.paths {
            cfg.simulation.paths = n;
        }
        if let Some(seed) = self.seed {
            cfg.simulation.seed = Some(seed);
        }
        if let Some(format) = self.format {
            cfg.output.format = format;
        }
        if let Some(currency) = &self.currency {
            cfg.output.currency = currency.clone();
        }

        cfg.validate().context("invalid pricing parameters")?;
        Ok(cfg)
    }
}

fn run(cli: &Cli) -> Result<String> {
    let cfg = cli.resolve_config()?;
    debug!(?cfg, "resolved run configuration");

    let comparison = PricingRun::new(cfg.option, cfg.simulation.clone())
        .run()
        .context("pricing failed")?;
    let mut out = render_comparison(&comparison, &cfg.output)?;

    if cli.convergence {
        let counts = decade_path_counts(cfg.simulation.paths);
        let points = convergence_study(&cfg.option, &counts, cfg.simulation.seed)
            .context("convergence study failed")?;
        if cfg.output.format == OutputFormat::Text {
            out.push('\n');
        }
        out.push_str(&render_convergence(&points, cfg.output.format)?);
    }
    Ok(out)
}

/// Write the report or the error chain and map the outcome to an exit status.
fn finish(result: Result<String>, out: &mut impl Write, err: &mut impl Write) -> u8 {
    match result {
        Ok(report) => match out.write_all(report.as_bytes()).and_then(|_| out.flush()) {
            Ok(()) => 0,
            Err(e) => {
                let _ = writeln!(err, "error: failed to write output: {}", e);
                1
            }
        },
        Err(e) => {
            let _ = writeln!(err, "error: {:#}", e);
            1
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let status = finish(run(&cli), &mut io::stdout().lock(), &mut io::stderr().lock());
    ExitCode::from(status)
}
