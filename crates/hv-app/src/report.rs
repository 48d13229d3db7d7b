//! Printable summary of a completed analysis, rendered as plain text.

use std::fmt::Write as _;

use chrono::NaiveDate;
use hv_project::ProjectSpecification;
use hv_results::CalculationResults;

use crate::format::{
    comparison_lines, cop17_display, cop47_display, format_currency, format_decimal,
    format_number, format_rate,
};
use crate::session::Analysis;

pub const REPORT_TITLE: &str = "Energy Savings & Lifecycle Cost Summary";

/// One-line executive summary.
pub fn summary_sentence(spec: &ProjectSpecification, results: &CalculationResults) -> String {
    format!(
        "{} saves {}/yr and pays back in {} years.",
        spec.compare_system.system_type,
        format_currency(results.annual_cost_savings),
        format_decimal(results.simple_payback_years)
    )
}

/// Labelled inputs listed under "Key Assumptions".
pub fn assumptions(spec: &ProjectSpecification) -> Vec<(&'static str, String)> {
    vec![
        ("Electric Rate", format!("{}/kWh", format_rate(spec.electric_rate))),
        ("Annual Hours", format_number(spec.hours_per_year)),
        (
            "Analysis Period",
            format!("{} years", spec.analysis_period_years),
        ),
        ("COP @47°F (Baseline)", cop47_display(&spec.baseline_system)),
        ("COP @17°F (Baseline)", cop17_display(&spec.baseline_system)),
        ("COP @47°F (Proposed)", cop47_display(&spec.compare_system)),
        ("COP @17°F (Proposed)", cop17_display(&spec.compare_system)),
    ]
}

fn report_kpis(analysis: &Analysis) -> Vec<(&'static str, String)> {
    let r = analysis.results();
    vec![
        (
            "Annual Savings",
            format!("{}/yr", format_currency(r.annual_cost_savings)),
        ),
        (
            "Energy Savings",
            format!(
                "{}%",
                format_decimal(analysis.projection.energy_savings_percent)
            ),
        ),
        (
            "Payback",
            format!("{} yrs", format_decimal(r.simple_payback_years)),
        ),
        ("Lifecycle Savings", format_currency(r.lifecycle_savings)),
    ]
}

/// Render the summary for `analysis`, dated `generated_on`.
pub fn render_report(analysis: &Analysis, generated_on: NaiveDate) -> String {
    let spec = &analysis.spec;
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{REPORT_TITLE}");
    let _ = writeln!(
        out,
        "{} • {}, {} • Climate Zone {}",
        spec.project_name, spec.location.city, spec.location.state, spec.location.climate_zone
    );
    let _ = writeln!(out, "{}", generated_on.format("%-m/%-d/%Y"));
    out.push('\n');

    let _ = writeln!(out, "Executive Summary");
    let _ = writeln!(out, "{}", summary_sentence(spec, analysis.results()));
    out.push('\n');

    for (label, value) in report_kpis(analysis) {
        let _ = writeln!(out, "{label:<20}{value}");
    }
    out.push('\n');

    let _ = writeln!(out, "Key Assumptions");
    for (label, value) in assumptions(spec) {
        let _ = writeln!(out, "  {label:<24}{value}");
    }
    out.push('\n');

    let _ = writeln!(out, "Detailed Results");
    let _ = writeln!(
        out,
        "  {:<26}{:>14}{:>14}{:>14}",
        "Metric", "Baseline", "Proposed", "Δ (Savings)"
    );
    let lines = comparison_lines(
        &analysis.projection.comparison,
        analysis.projection.analysis_period_years,
    );
    for line in lines {
        let _ = writeln!(
            out,
            "  {:<26}{:>14}{:>14}{:>14}",
            line.label, line.baseline, line.compare, line.delta
        );
    }

    out
}

/// Render the summary dated today (local time).
pub fn render_report_today(analysis: &Analysis) -> String {
    render_report(analysis, chrono::Local::now().date_naive())
}
