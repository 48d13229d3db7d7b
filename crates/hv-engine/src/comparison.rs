//! Side-by-side comparison rows for the detailed results table.

use hv_core::{Real, finite_or_zero};
use hv_results::CalculationResults;
use serde::{Deserialize, Serialize};

use crate::projection::Co2Split;
use crate::series::LifecycleTotals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonMetric {
    AnnualEnergy,
    AnnualCost,
    Payback,
    LifecycleCost,
    Co2,
}

impl ComparisonMetric {
    pub const ALL: [ComparisonMetric; 5] = [
        ComparisonMetric::AnnualEnergy,
        ComparisonMetric::AnnualCost,
        ComparisonMetric::Payback,
        ComparisonMetric::LifecycleCost,
        ComparisonMetric::Co2,
    ];

    pub fn label(self, analysis_period_years: u32) -> String {
        match self {
            ComparisonMetric::AnnualEnergy => "Annual Energy (kWh)".to_string(),
            ComparisonMetric::AnnualCost => "Annual Cost ($)".to_string(),
            ComparisonMetric::Payback => "Payback (years)".to_string(),
            ComparisonMetric::LifecycleCost => {
                format!("Lifecycle Cost ({analysis_period_years} yrs)")
            }
            ComparisonMetric::Co2 => "CO₂ (tons/year)".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub metric: ComparisonMetric,
    pub baseline: Real,
    pub compare: Real,
    /// `compare - baseline`; always 0 for payback.
    pub delta: Real,
}

impl ComparisonRow {
    fn new(metric: ComparisonMetric, baseline: Real, compare: Real) -> Self {
        let baseline = finite_or_zero(baseline);
        let compare = finite_or_zero(compare);
        let delta = match metric {
            ComparisonMetric::Payback => 0.0,
            _ => finite_or_zero(compare - baseline),
        };
        Self {
            metric,
            baseline,
            compare,
            delta,
        }
    }
}

/// One row per [`ComparisonMetric`], in table order.
pub fn comparison_rows(
    results: &CalculationResults,
    lifecycle: &LifecycleTotals,
    co2: &Co2Split,
) -> Vec<ComparisonRow> {
    ComparisonMetric::ALL
        .into_iter()
        .map(|metric| match metric {
            ComparisonMetric::AnnualEnergy => ComparisonRow::new(
                metric,
                results.baseline_annual_kwh,
                results.compare_annual_kwh,
            ),
            ComparisonMetric::AnnualCost => ComparisonRow::new(
                metric,
                results.baseline_annual_cost,
                results.compare_annual_cost,
            ),
            ComparisonMetric::Payback => ComparisonRow::new(
                metric,
                results.simple_payback_years,
                results.simple_payback_years,
            ),
            ComparisonMetric::LifecycleCost => {
                ComparisonRow::new(metric, lifecycle.baseline, lifecycle.compare)
            }
            ComparisonMetric::Co2 => ComparisonRow::new(metric, co2.baseline, co2.compare),
        })
        .collect()
}
