//! Display formatting for KPI cards, comparison tables and the report.
//!
//! Formatting only; every figure is computed by the engine.

use hv_core::{Real, finite_or_zero, round_half_up, round_to};
use hv_engine::{ComparisonMetric, ComparisonRow, ProjectionResult};
use hv_project::cop::{COP_FALLBACK_HELPER_TEXT, format_optional_cop};
use hv_project::{SystemFormData, SystemSpec};

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn format_grouped(v: Real, decimals: u32, prefix: &str) -> String {
    let rounded = round_to(finite_or_zero(v), decimals);
    let negative = rounded < 0.0;
    let text = format!("{:.*}", decimals as usize, rounded.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(prefix);
    out.push_str(&group_digits(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Whole number with thousands separators: `98000 -> "98,000"`.
pub fn format_number(v: Real) -> String {
    format_grouped(round_half_up(v), 0, "")
}

/// One decimal place: `3.6 -> "3.6"`, `23.4694 -> "23.5"`.
pub fn format_decimal(v: Real) -> String {
    format_grouped(v, 1, "")
}

/// Whole dollars: `2760 -> "$2,760"`, `-2760 -> "-$2,760"`.
pub fn format_currency(v: Real) -> String {
    format_grouped(round_half_up(v), 0, "$")
}

/// Utility rate with two or three decimals: `0.12 -> "$0.12"`, `0.115 -> "$0.115"`.
pub fn format_rate(v: Real) -> String {
    let three = format_grouped(v, 3, "$");
    match three.strip_suffix('0') {
        Some(two) => two.to_string(),
        None => three,
    }
}

/// "COP @47°F" cell: the rated value, the low-ambient fallback, or "—".
pub fn cop47_display(system: &SystemSpec) -> String {
    system.heating_cop().to_string()
}

/// "COP @17°F" cell.
pub fn cop17_display(system: &SystemSpec) -> String {
    format_optional_cop(system.cop17)
}

/// Helper line shown under the COP @47°F field while only COP @17°F is entered.
pub fn cop_helper_text(system: &SystemFormData) -> Option<&'static str> {
    system.uses_cop_fallback().then_some(COP_FALLBACK_HELPER_TEXT)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: String,
    pub note: String,
}

/// The four headline cards of the results step.
pub fn kpi_cards(projection: &ProjectionResult) -> Vec<KpiCard> {
    let r = &projection.results;
    let years = projection.analysis_period_years;
    vec![
        KpiCard {
            title: "Annual Energy Savings",
            value: format!(
                "{}% • {}/yr",
                format_decimal(projection.energy_savings_percent),
                format_currency(r.annual_cost_savings)
            ),
            note: "Source: Project analysis (mock)".to_string(),
        },
        KpiCard {
            title: "Payback Period",
            value: format!("{} years", format_decimal(r.simple_payback_years)),
            note: format!("Based on {years}-year analysis"),
        },
        KpiCard {
            title: "Lifecycle Cost Savings",
            value: format!(
                "{} over {years} years",
                format_currency(r.lifecycle_savings)
            ),
            note: "Includes energy & maintenance".to_string(),
        },
        KpiCard {
            title: "CO₂ Reduction",
            value: format!(
                "{} tons/year",
                format_decimal(r.co2_reduction_tons_per_year)
            ),
            note: "Source: EPA eGRID factor (mock)".to_string(),
        },
    ]
}

fn format_metric_value(metric: ComparisonMetric, v: Real) -> String {
    match metric {
        ComparisonMetric::AnnualEnergy => format_number(v),
        ComparisonMetric::AnnualCost | ComparisonMetric::LifecycleCost => format_currency(v),
        ComparisonMetric::Payback | ComparisonMetric::Co2 => format_decimal(v),
    }
}

/// A comparison row ready for a table: label plus three display cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonLine {
    pub label: String,
    pub baseline: String,
    pub compare: String,
    pub delta: String,
}

pub fn comparison_lines(rows: &[ComparisonRow], analysis_period_years: u32) -> Vec<ComparisonLine> {
    rows.iter()
        .map(|row| ComparisonLine {
            label: row.metric.label(analysis_period_years),
            baseline: format_metric_value(row.metric, row.baseline),
            compare: format_metric_value(row.metric, row.compare),
            delta: format_metric_value(row.metric, row.delta),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hv_engine::{ProjectionConfig, project};
    use hv_project::{FieldValue, default_specification};
    use hv_results::CalculationResults;

    #[test]
    fn numbers_are_grouped() {
        assert_eq!(format_number(98_000.0), "98,000");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1_234_567.4), "1,234,567");
        assert_eq!(format_number(-23_000.0), "-23,000");
        assert_eq!(format_number(f64::NAN), "0");
    }

    #[test]
    fn currency_and_decimals() {
        assert_eq!(format_currency(2_760.0), "$2,760");
        assert_eq!(format_currency(-2_760.0), "-$2,760");
        assert_eq!(format_currency(55_000.0), "$55,000");
        assert_eq!(format_decimal(3.6), "3.6");
        assert_eq!(format_decimal(23_000.0 / 98_000.0 * 100.0), "23.5");
        assert_eq!(format_decimal(0.0), "0.0");
    }

    #[test]
    fn rates_keep_two_or_three_decimals() {
        assert_eq!(format_rate(0.12), "$0.12");
        assert_eq!(format_rate(0.115), "$0.115");
        assert_eq!(format_rate(0.1), "$0.10");
    }

    #[test]
    fn cop_cells() {
        let mut system = default_specification().baseline_system;
        assert_eq!(cop47_display(&system), "3.2");
        assert_eq!(cop17_display(&system), "2.1");

        system.cop47 = None;
        assert_eq!(cop47_display(&system), "— (using COP @17°F = 2.1)");

        system.cop17 = None;
        assert_eq!(cop47_display(&system), "—");
        assert_eq!(cop17_display(&system), "—");
    }

    #[test]
    fn helper_text_only_for_cop17_only() {
        let mut form = SystemFormData::default();
        assert_eq!(cop_helper_text(&form), None);
        form.cop17 = FieldValue::text("2.1");
        assert_eq!(cop_helper_text(&form), Some(COP_FALLBACK_HELPER_TEXT));
    }

    #[test]
    fn reference_kpi_cards() {
        let p = project(
            &default_specification(),
            &CalculationResults::reference(),
            &ProjectionConfig::default(),
        );
        let values: Vec<String> = kpi_cards(&p).into_iter().map(|c| c.value).collect();
        assert_eq!(
            values,
            vec![
                "23.5% • $2,760/yr",
                "3.6 years",
                "$55,000 over 15 years",
                "10.4 tons/year",
            ]
        );
    }

    #[test]
    fn comparison_lines_use_metric_formats() {
        let p = project(
            &default_specification(),
            &CalculationResults::reference(),
            &ProjectionConfig::default(),
        );
        let lines = comparison_lines(&p.comparison, p.analysis_period_years);
        assert_eq!(lines[0].label, "Annual Energy (kWh)");
        assert_eq!(lines[0].baseline, "98,000");
        assert_eq!(lines[0].delta, "-23,000");
        assert_eq!(lines[1].compare, "$9,000");
        assert_eq!(lines[2].delta, "0.0");
        assert_eq!(lines[3].label, "Lifecycle Cost (15 yrs)");
    }
}
