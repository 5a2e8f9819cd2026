// demos/convergence_demo.rs

//! Demonstration of Monte Carlo convergence towards the Black-Scholes price
//!
//! This example shows how to:
//! 1. Price the reference contract with both models
//! 2. Watch the simulation error shrink as the path count grows
//! 3. Measure the spread of estimates across independent seeds

use anyhow::Result;
use mc_option_lib::{
    compare_pricers, convergence_study, default_configs, seed_dispersion, OptionParameters,
};

fn main() -> Result<()> {
    println!("Monte Carlo vs Black-Scholes Convergence Demo");
    println!("=============================================");

    let params = OptionParameters::new(100.0, 100.0, 0.05, 0.2, 0.1)?;
    println!(
        "Contract: S={} K={} r={} σ={} T={}",
        params.spot, params.strike, params.rate, params.volatility, params.time
    );

    println!("\nStep 1: Single comparison at 10^6 paths...");
    let comparison = compare_pricers(&params, &default_configs::fast().with_seed(42))?;
    let (lo, hi) = comparison.simulation.confidence_interval(0.95)?;
    println!("  Monte Carlo price:   {:.6}", comparison.mc_price());
    println!("  95% interval:        [{:.6}, {:.6}]", lo, hi);
    println!("  Black-Scholes price: {:.6}", comparison.bs_price);
    println!("  Error:               {:.4}%", comparison.percent_error);
    if let Some(iv) = comparison.mc_implied_vol {
        println!("  Implied vol of MC:   {:.4}%", iv * 100.0);
    }

    println!("\nStep 2: Error against path count...");
    let counts = [1_000, 10_000, 100_000, 1_000_000];
    let points = convergence_study(&params, &counts, Some(7))?;
    println!(
        "{:<10} {:<12} {:<12} {:<12}",
        "Paths", "MC Price", "Abs Error", "Std Error"
    );
    println!("{}", "-".repeat(50));
    for p in &points {
        println!(
            "{:<10} {:<12.6} {:<12.6} {:<12.6}",
            p.paths, p.mc_price, p.abs_error, p.std_error
        );
    }

    println!("\nStep 3: Spread across 20 seeds...");
    let seeds: Vec<u64> = (0..20).collect();
    for &paths in &[1_000usize, 100_000] {
        let sd = seed_dispersion(&params, paths, &seeds)?;
        println!("  {:>7} paths: sd = {:.6}", paths, sd);
    }
    println!("  (expect roughly a 10x reduction for 100x more paths)");

    Ok(())
}
