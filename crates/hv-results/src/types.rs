//! Result data types.

use hv_core::{Real, Tolerances, finite_or_zero, nearly_equal};
use serde::{Deserialize, Serialize};

use crate::{ResultsError, ResultsResult};

/// Scalar results returned by the calculation service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationResults {
    pub baseline_annual_kwh: Real,
    pub compare_annual_kwh: Real,
    pub annual_kwh_savings: Real,
    pub baseline_annual_cost: Real,
    pub compare_annual_cost: Real,
    pub annual_cost_savings: Real,
    pub simple_payback_years: Real,
    pub lifecycle_savings: Real,
    pub co2_reduction_tons_per_year: Real,
}

/// Inputs to [`CalculationResults::from_annual`]; savings are derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnualFigures {
    pub baseline_kwh: Real,
    pub compare_kwh: Real,
    pub baseline_cost: Real,
    pub compare_cost: Real,
    pub simple_payback_years: Real,
    pub lifecycle_savings: Real,
    pub co2_reduction_tons_per_year: Real,
}

impl CalculationResults {
    /// Build results whose savings are exactly `baseline - compare`.
    pub fn from_annual(f: AnnualFigures) -> Self {
        Self {
            baseline_annual_kwh: f.baseline_kwh,
            compare_annual_kwh: f.compare_kwh,
            annual_kwh_savings: f.baseline_kwh - f.compare_kwh,
            baseline_annual_cost: f.baseline_cost,
            compare_annual_cost: f.compare_cost,
            annual_cost_savings: f.baseline_cost - f.compare_cost,
            simple_payback_years: f.simple_payback_years,
            lifecycle_savings: f.lifecycle_savings,
            co2_reduction_tons_per_year: f.co2_reduction_tons_per_year,
        }
    }

    /// Figures for the reference rooftop retrofit.
    pub fn reference() -> Self {
        Self::from_annual(AnnualFigures {
            baseline_kwh: 98_000.0,
            compare_kwh: 75_000.0,
            baseline_cost: 11_760.0,
            compare_cost: 9_000.0,
            simple_payback_years: 3.6,
            lifecycle_savings: 55_000.0,
            co2_reduction_tons_per_year: 10.4,
        })
    }

    /// Copy with every non-finite field replaced by zero.
    pub fn sanitized(&self) -> Self {
        Self {
            baseline_annual_kwh: finite_or_zero(self.baseline_annual_kwh),
            compare_annual_kwh: finite_or_zero(self.compare_annual_kwh),
            annual_kwh_savings: finite_or_zero(self.annual_kwh_savings),
            baseline_annual_cost: finite_or_zero(self.baseline_annual_cost),
            compare_annual_cost: finite_or_zero(self.compare_annual_cost),
            annual_cost_savings: finite_or_zero(self.annual_cost_savings),
            simple_payback_years: finite_or_zero(self.simple_payback_years),
            lifecycle_savings: finite_or_zero(self.lifecycle_savings),
            co2_reduction_tons_per_year: finite_or_zero(self.co2_reduction_tons_per_year),
        }
    }

    /// Check that the reported savings agree with the annual figures.
    ///
    /// Pairs with a non-finite operand are not compared; those fields are
    /// zeroed by [`CalculationResults::sanitized`] downstream.
    pub fn check_consistency(&self) -> ResultsResult<()> {
        let tol = Tolerances {
            abs: 1e-6,
            rel: 1e-9,
        };
        let agrees = |expected: Real, actual: Real| {
            !expected.is_finite() || !actual.is_finite() || nearly_equal(expected, actual, tol)
        };
        let expected_kwh = self.baseline_annual_kwh - self.compare_annual_kwh;
        if !agrees(expected_kwh, self.annual_kwh_savings) {
            return Err(ResultsError::Inconsistent {
                what: "annual_kwh_savings",
                expected: expected_kwh,
                actual: self.annual_kwh_savings,
            });
        }
        let expected_cost = self.baseline_annual_cost - self.compare_annual_cost;
        if !agrees(expected_cost, self.annual_cost_savings) {
            return Err(ResultsError::Inconsistent {
                what: "annual_cost_savings",
                expected: expected_cost,
                actual: self.annual_cost_savings,
            });
        }
        Ok(())
    }
}
