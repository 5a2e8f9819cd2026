
use mc_option_lib::report::{render_comparison, render_convergence, render_text};
use mc_option_lib::{
    compare_pricers, convergence_study, OutputConfig, OutputFormat, PricingConfig, PricingRun,
};
use std::collections::HashMap;
use test_utils::{create_test_config, reference_params};

/// Text report has the three expected lines, rounded to cents
#[test]
fn test_text_report_for_reference_run() {
    let comparison = compare_pricers(&reference_params(), &create_test_config()).unwrap();
    let text = render_text(&comparison, "£");
    println!("{}", text);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Monte Carlo European Call Option Price: £"));
    assert_eq!(lines[1], "Black-Scholes European Call Option Price: £2.77");
    assert!(lines[2].starts_with("Error: ") && lines[2].ends_with('%'));
    assert!(!text.contains("NaN") && !text.contains("inf"));

    // every displayed number has exactly two decimals
    let mc_value = lines[0].rsplit('£').next().unwrap();
    assert_eq!(mc_value.split('.').nth(1).unwrap().len(), 2);
}

/// Key-value output parses back to the run's full-precision numbers
#[test]
fn test_key_value_report_parses() {
    let comparison = compare_pricers(&reference_params(), &create_test_config()).unwrap();
    let out = render_comparison(
        &comparison,
        &OutputConfig {
            format: OutputFormat::KeyValue,
            ..OutputConfig::default()
        },
    )
    .unwrap();

    let map: HashMap<&str, &str> = out.lines().filter_map(|l| l.split_once('=')).collect();
    let mc: f64 = map["mc_price"].parse().unwrap();
    let bs: f64 = map["bs_price"].parse().unwrap();
    let err: f64 = map["percent_error"].parse().unwrap();
    let lo: f64 = map["mc_ci_low"].parse().unwrap();
    let hi: f64 = map["mc_ci_high"].parse().unwrap();

    assert_eq!(mc, comparison.mc_price());
    assert_eq!(bs, comparison.bs_price);
    assert!((err - (mc - bs).abs() / bs * 100.0).abs() < 1e-9);
    assert!(lo < mc && mc < hi);
    assert_eq!(map["paths"], "100000");
}

/// CSV comparison and convergence outputs are readable with a csv reader
#[test]
fn test_csv_reports_are_well_formed() {
    let comparison = compare_pricers(&reference_params(), &create_test_config()).unwrap();
    let out = render_comparison(
        &comparison,
        &OutputConfig {
            format: OutputFormat::Csv,
            ..OutputConfig::default()
        },
    )
    .unwrap();

    let mut reader = csv::Reader::from_reader(out.as_bytes());
    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 1);

    let points = convergence_study(&reference_params(), &[1_000, 10_000], Some(4)).unwrap();
    let table = render_convergence(&points, OutputFormat::Csv).unwrap();
    let mut reader = csv::Reader::from_reader(table.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "paths");
    let paths: Vec<usize> = reader
        .records()
        .map(|r| r.unwrap()[0].parse().unwrap())
        .collect();
    assert_eq!(paths, vec![1_000, 10_000]);
}

/// A TOML run file drives the whole pipeline
#[test]
fn test_toml_config_end_to_end() {
    let cfg = PricingConfig::from_toml_str(
        r#"
        [option]
        spot = 100.0
        strike = 110.0
        volatility = 0.25
        time = 0.5

        [simulation]
        paths = 50000
        seed = 12

        [output]
        format = "key-value"
        confidence_level = 0.99
        "#,
    )
    .unwrap();
    cfg.validate().unwrap();

    let comparison = PricingRun::new(cfg.option, cfg.simulation.clone())
        .run()
        .unwrap();
    assert_eq!(comparison.params.strike, 110.0);
    assert_eq!(comparison.params.rate, 0.05); // default kept
    assert!(comparison.z_score().unwrap() < 5.0);

    let out = render_comparison(&comparison, &cfg.output).unwrap();
    assert!(out.lines().any(|l| l == "strike=110"));
}
