//! Lifecycle projection.
//!
//! Annual figures are escalated across the analysis period:
//! `value(year) = round(base * (1 + rate)^(year - 1))`, so year 1 is the
//! base figure itself. Energy and cost escalate independently.
//!
//! The nine scalar KPIs pass through from the calculation service. The
//! engine derives the savings percentage, the CO₂ split, lifecycle totals
//! and comparison rows. No output field is ever NaN or infinite: non-finite
//! inputs are clamped to zero and every division is guarded.

use hv_core::{Real, escalation_factor, finite_or_zero, round_half_up, safe_ratio};
use hv_project::ProjectSpecification;
use hv_results::CalculationResults;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::comparison::{ComparisonRow, comparison_rows};
use crate::config::ProjectionConfig;
use crate::series::{EnergyPoint, LifecyclePoint, LifecycleSeries, LifecycleTotals};

/// Base-year figures the series are escalated from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesBasis {
    pub baseline_annual_kwh: Real,
    pub compare_annual_kwh: Real,
    pub baseline_annual_cost: Real,
    pub compare_annual_cost: Real,
    /// Baseline-system maintenance per year; not escalated.
    pub maintenance_cost_per_year: Real,
}

impl SeriesBasis {
    pub fn from_results(results: &CalculationResults, maintenance_cost_per_year: Real) -> Self {
        Self {
            baseline_annual_kwh: results.baseline_annual_kwh,
            compare_annual_kwh: results.compare_annual_kwh,
            baseline_annual_cost: results.baseline_annual_cost,
            compare_annual_cost: results.compare_annual_cost,
            maintenance_cost_per_year,
        }
    }

    fn sanitized(&self) -> Self {
        Self {
            baseline_annual_kwh: finite_or_zero(self.baseline_annual_kwh),
            compare_annual_kwh: finite_or_zero(self.compare_annual_kwh),
            baseline_annual_cost: finite_or_zero(self.baseline_annual_cost),
            compare_annual_cost: finite_or_zero(self.compare_annual_cost),
            maintenance_cost_per_year: finite_or_zero(self.maintenance_cost_per_year),
        }
    }
}

/// CO₂ attributed to each system (tons/year).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Co2Split {
    /// Tons of CO₂ per kWh saved; 0 when nothing is saved.
    pub factor: Real,
    pub baseline: Real,
    pub compare: Real,
}

impl Co2Split {
    pub fn from_results(results: &CalculationResults) -> Self {
        let reduction = finite_or_zero(results.co2_reduction_tons_per_year);
        let factor = safe_ratio(reduction, results.annual_kwh_savings);
        let baseline = if factor != 0.0 {
            finite_or_zero(finite_or_zero(results.baseline_annual_kwh) * factor)
        } else {
            reduction
        };
        Self {
            factor,
            baseline,
            compare: finite_or_zero(baseline - reduction),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub analysis_period_years: u32,
    /// Scalar KPIs as reported by the calculation service.
    pub results: CalculationResults,
    /// `annual_kwh_savings / baseline_annual_kwh * 100`, 0 when baseline is 0.
    pub energy_savings_percent: Real,
    pub co2: Co2Split,
    pub energy_series: Vec<EnergyPoint>,
    pub lifecycle: LifecycleSeries,
    pub lifecycle_totals: LifecycleTotals,
    pub comparison: Vec<ComparisonRow>,
}

impl ProjectionResult {
    pub fn energy_point(&self, year: u32) -> hv_core::HvResult<&EnergyPoint> {
        crate::series::point_for_year(&self.energy_series, year, "energy series year")
    }
}

pub fn energy_series(basis: &SeriesBasis, years: u32, rate: Real) -> Vec<EnergyPoint> {
    (1..=years)
        .map(|year| {
            let f = escalation_factor(rate, year);
            EnergyPoint {
                year,
                baseline: round_half_up(basis.baseline_annual_kwh * f),
                inv: round_half_up(basis.compare_annual_kwh * f),
            }
        })
        .collect()
}

pub fn lifecycle_series(
    basis: &SeriesBasis,
    years: u32,
    config: &ProjectionConfig,
) -> LifecycleSeries {
    let baseline_maintenance = round_half_up(basis.maintenance_cost_per_year);
    let compare_maintenance =
        round_half_up(basis.maintenance_cost_per_year * config.compare_maintenance_factor);
    let capex = finite_or_zero(config.compare_capex);

    let mut series = LifecycleSeries {
        baseline: Vec::with_capacity(years as usize),
        compare: Vec::with_capacity(years as usize),
    };
    for year in 1..=years {
        let f = escalation_factor(config.cost_escalation_rate, year);
        series.baseline.push(LifecyclePoint {
            year,
            energy: round_half_up(basis.baseline_annual_cost * f),
            maintenance: baseline_maintenance,
            capex: 0.0,
        });
        series.compare.push(LifecyclePoint {
            year,
            energy: round_half_up(basis.compare_annual_cost * f),
            maintenance: compare_maintenance,
            capex: if year == 1 { capex } else { 0.0 },
        });
    }
    series
}

/// Project from an explicit series basis.
///
/// The series come from `basis`; the KPIs come from `results`. The two
/// normally agree, see [`project`].
pub fn project_with_basis(
    basis: &SeriesBasis,
    results: &CalculationResults,
    analysis_period_years: u32,
    config: &ProjectionConfig,
) -> ProjectionResult {
    let basis = basis.sanitized();
    let results = results.sanitized();

    let energy_series = energy_series(&basis, analysis_period_years, config.energy_escalation_rate);
    let lifecycle = lifecycle_series(&basis, analysis_period_years, config);
    let lifecycle_totals = lifecycle.totals();

    let energy_savings_percent =
        finite_or_zero(safe_ratio(results.annual_kwh_savings, results.baseline_annual_kwh) * 100.0);
    let co2 = Co2Split::from_results(&results);
    let comparison = comparison_rows(&results, &lifecycle_totals, &co2);

    debug!(
        years = analysis_period_years,
        energy_savings_percent,
        lifecycle_baseline = lifecycle_totals.baseline,
        lifecycle_compare = lifecycle_totals.compare,
        "projection computed"
    );

    ProjectionResult {
        analysis_period_years,
        results,
        energy_savings_percent,
        co2,
        energy_series,
        lifecycle,
        lifecycle_totals,
        comparison,
    }
}

/// Project a resolved specification using the service's annual figures as
/// the series basis and the specification's maintenance cost.
pub fn project(
    spec: &ProjectSpecification,
    results: &CalculationResults,
    config: &ProjectionConfig,
) -> ProjectionResult {
    let basis = SeriesBasis::from_results(results, spec.maintenance_cost_per_year);
    project_with_basis(&basis, results, spec.analysis_period_years, config)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn basis() -> impl Strategy<Value = SeriesBasis> {
        (
            0.0_f64..1.0e7,
            0.0_f64..1.0e7,
            0.0_f64..1.0e6,
            0.0_f64..1.0e6,
            0.0_f64..1.0e5,
        )
            .prop_map(|(bk, ck, bc, cc, m)| SeriesBasis {
                baseline_annual_kwh: bk,
                compare_annual_kwh: ck,
                baseline_annual_cost: bc,
                compare_annual_cost: cc,
                maintenance_cost_per_year: m,
            })
    }

    proptest! {
        #[test]
        fn energy_series_matches_closed_form(b in basis(), years in 1u32..40) {
            let series = energy_series(&b, years, 0.02);
            prop_assert_eq!(series.len(), years as usize);
            for (i, point) in series.iter().enumerate() {
                let year = i as u32 + 1;
                prop_assert_eq!(point.year, year);
                let expected = round_half_up(b.baseline_annual_kwh * 1.02_f64.powi(year as i32 - 1));
                prop_assert_eq!(point.baseline, expected);
            }
        }

        #[test]
        fn lifecycle_invariants_hold(b in basis(), years in 1u32..40) {
            let config = ProjectionConfig::default();
            let series = lifecycle_series(&b, years, &config);
            let expected_compare = round_half_up(b.maintenance_cost_per_year * 0.85);
            for (i, (base, cmp)) in series.baseline.iter().zip(&series.compare).enumerate() {
                prop_assert_eq!(base.capex, 0.0);
                if i == 0 {
                    prop_assert_eq!(cmp.capex, config.compare_capex);
                } else {
                    prop_assert_eq!(cmp.capex, 0.0);
                }
                prop_assert_eq!(cmp.maintenance, expected_compare);
                prop_assert_eq!(base.maintenance, round_half_up(b.maintenance_cost_per_year));
            }
        }

        #[test]
        fn no_output_is_ever_non_finite(
            bk in proptest::num::f64::ANY,
            savings in proptest::num::f64::ANY,
            co2 in proptest::num::f64::ANY,
        ) {
            let mut results = CalculationResults::reference();
            results.baseline_annual_kwh = bk;
            results.annual_kwh_savings = savings;
            results.co2_reduction_tons_per_year = co2;
            let basis = SeriesBasis::from_results(&results, 800.0);
            let p = project_with_basis(&basis, &results, 15, &ProjectionConfig::default());
            prop_assert!(p.energy_savings_percent.is_finite());
            prop_assert!(p.co2.factor.is_finite());
            prop_assert!(p.co2.baseline.is_finite());
            prop_assert!(p.co2.compare.is_finite());
            for row in &p.comparison {
                prop_assert!(row.baseline.is_finite() && row.compare.is_finite() && row.delta.is_finite());
            }
            for e in &p.energy_series {
                prop_assert!(e.baseline.is_finite() && e.inv.is_finite());
            }
        }
    }
}
