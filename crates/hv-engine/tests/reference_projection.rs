//! Projection of the reference rooftop retrofit, end to end.

use hv_engine::{ComparisonMetric, ProjectionConfig, project};
use hv_project::{SystemRole, default_form_data, default_specification, resolve};
use hv_results::CalculationResults;

#[test]
fn reference_scenario() {
    let spec = resolve(&default_form_data(), &default_specification());
    let results = CalculationResults::reference();
    let p = project(&spec, &results, &ProjectionConfig::default());

    assert_eq!(p.analysis_period_years, 15);
    assert_eq!(p.results.annual_kwh_savings, 23_000.0);
    assert_eq!(p.results.annual_cost_savings, 2_760.0);

    assert_eq!(p.energy_series.len(), 15);
    assert_eq!(p.energy_point(1).unwrap().baseline, 98_000.0);
    assert_eq!(p.energy_point(2).unwrap().baseline, 99_960.0);

    let compare_y1 = p.lifecycle.year(SystemRole::Compare, 1).unwrap();
    assert_eq!(compare_y1.capex, 5_000.0);
    assert_eq!(compare_y1.energy, 9_000.0);
    assert_eq!(compare_y1.maintenance, 680.0);

    let baseline_y2 = p.lifecycle.year(SystemRole::Baseline, 2).unwrap();
    assert_eq!(baseline_y2.energy, 11_995.0);
    assert_eq!(baseline_y2.capex, 0.0);
}

#[test]
fn savings_percent_and_totals() {
    let spec = default_specification();
    let p = project(
        &spec,
        &CalculationResults::reference(),
        &ProjectionConfig::default(),
    );

    assert!((p.energy_savings_percent - 23_000.0 / 98_000.0 * 100.0).abs() < 1e-9);

    let expected_baseline: f64 = p
        .lifecycle
        .baseline
        .iter()
        .map(|y| y.energy + y.maintenance + y.capex)
        .sum();
    assert_eq!(p.lifecycle_totals.baseline, expected_baseline);

    let row = p
        .comparison
        .iter()
        .find(|r| r.metric == ComparisonMetric::LifecycleCost)
        .unwrap();
    assert_eq!(row.baseline, p.lifecycle_totals.baseline);
    assert_eq!(row.compare, p.lifecycle_totals.compare);
    assert_eq!(row.delta, row.compare - row.baseline);
}

#[test]
fn higher_escalation_grows_later_years() {
    let spec = default_specification();
    let results = CalculationResults::reference();
    let base = project(&spec, &results, &ProjectionConfig::default());
    let steep = project(
        &spec,
        &results,
        &ProjectionConfig {
            cost_escalation_rate: 0.05,
            ..ProjectionConfig::default()
        },
    );

    let year15 = |p: &hv_engine::ProjectionResult| {
        p.lifecycle
            .year(SystemRole::Baseline, 15)
            .map(|y| y.energy)
            .unwrap()
    };
    assert!(year15(&steep) > year15(&base));
    // Energy series is unaffected by the cost rate.
    assert_eq!(base.energy_series, steep.energy_series);
}
