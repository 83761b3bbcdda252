
use std::fs;

use bsm_greeks::{
    default_configs, sweep_spot, visualize, write_csv, BlackScholesEngine, DriverConfig,
    OptionType, OutputField, Precision, PricingError, PricingInputs, SpotGrid,
};
use test_utils::reference_inputs;

#[test]
fn standard_sweep_spans_zero_to_twice_spot() {
    let inputs = reference_inputs(OptionType::Call);
    let grid = SpotGrid::around(inputs.spot, 100);
    let sweep = sweep_spot(&BlackScholesEngine::default(), &inputs, &grid).unwrap();

    assert_eq!(sweep.len(), 100);
    let spots = sweep.spots();
    assert_eq!(spots.first(), Some(&0.01));
    assert_eq!(spots.last(), Some(&200.0));

    // Deep in the money the call behaves like the forward
    let delta = sweep.series(OutputField::Delta);
    assert_eq!(delta.points.first().unwrap().1, 0.0);
    assert_eq!(delta.points.last().unwrap().1, 1.0);
}

#[test]
fn sweep_matches_single_evaluations() {
    let inputs = reference_inputs(OptionType::Put);
    let engine = BlackScholesEngine::new(Precision::Full);
    let sweep = sweep_spot(&engine, &inputs, &SpotGrid::new(50.0, 150.0, 11)).unwrap();

    for point in &sweep.points {
        let single = bsm_greeks::price_unrounded(&inputs.with_spot(point.spot)).unwrap();
        assert_eq!(point.result, single);
    }
}

#[test]
fn invalid_base_inputs_abort_the_sweep() {
    let inputs = PricingInputs {
        volatility: 0.0,
        ..reference_inputs(OptionType::Call)
    };
    let err = sweep_spot(
        &BlackScholesEngine::default(),
        &inputs,
        &SpotGrid::around(100.0, 10),
    )
    .unwrap_err();
    assert!(err.downcast_ref::<PricingError>().is_some());
}

#[test]
fn visualize_writes_one_chart_per_field() {
    let dir = tempfile::tempdir().unwrap();
    let config = DriverConfig {
        output_dir: dir.path().join("plots"),
        ..default_configs::quick()
    };

    let (sweep, charts) = visualize(&reference_inputs(OptionType::Put), &config).unwrap();
    assert_eq!(sweep.len(), 25);

    let names: Vec<String> = charts
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "option_price.svg",
            "delta.svg",
            "gamma.svg",
            "theta.svg",
            "vega.svg",
            "rho.svg"
        ]
    );
    for chart in &charts {
        let svg = fs::read_to_string(chart).unwrap();
        assert!(svg.contains("<svg"), "{} is not an SVG", chart.display());
    }
}

#[test]
fn visualize_rejects_invalid_inputs_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("plots");
    let config = DriverConfig {
        output_dir: out.clone(),
        ..DriverConfig::default()
    };
    let inputs = PricingInputs {
        strike: -100.0,
        ..reference_inputs(OptionType::Call)
    };

    assert!(visualize(&inputs, &config).is_err());
    assert!(!out.exists());
}

#[test]
fn configured_fields_limit_the_charts() {
    let dir = tempfile::tempdir().unwrap();
    let config = DriverConfig::from_toml_str(&format!(
        "output_dir = {:?}\n[sweep]\nsamples = 10\n[plot]\nfields = [\"gamma\", \"d1\"]\n",
        dir.path().join("charts").display().to_string()
    ))
    .unwrap();

    let (_, charts) = visualize(&reference_inputs(OptionType::Call), &config).unwrap();
    assert_eq!(charts.len(), 2);
    assert!(charts[0].ends_with("gamma.svg"));
    assert!(charts[1].ends_with("d1.svg"));
}

#[test]
fn csv_export_round_trips_through_reader() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sweep.csv");
    let inputs = reference_inputs(OptionType::Call);
    let sweep = sweep_spot(
        &BlackScholesEngine::default(),
        &inputs,
        &SpotGrid::around(inputs.spot, 100),
    )
    .unwrap();

    write_csv(&sweep, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.len(), 9);
    assert_eq!(&headers[0], "spot");
    assert_eq!(&headers[3], "price");

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 100);
    let last_price: f64 = rows[99][3].parse().unwrap();
    assert_eq!(last_price, sweep.points[99].result.price);
}
