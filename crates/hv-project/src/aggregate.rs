//! Input aggregation: partial form data plus defaults to a complete specification.
//!
//! Resolution never fails. A field that is missing, blank, unparsable,
//! non-finite or out of range takes the default instead.

use tracing::debug;

use crate::form::{FieldValue, SystemFormData, WizardFormData};
use crate::schema::{
    ANALYSIS_PERIOD_YEARS, BuildingType, Location, ProjectSpecification, Rebate, SystemSpec,
};

fn text_or(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn positive_or(value: &FieldValue, default: f64, field: &'static str) -> f64 {
    match value.as_number().filter(|v| *v > 0.0) {
        Some(v) => v,
        None => {
            if value.is_present() {
                debug!(field, ?value, default, "unusable input, using default");
            }
            default
        }
    }
}

fn non_negative_or(value: &FieldValue, default: f64, field: &'static str) -> f64 {
    match value.as_number().filter(|v| *v >= 0.0) {
        Some(v) => v,
        None => {
            if value.is_present() {
                debug!(field, ?value, default, "unusable input, using default");
            }
            default
        }
    }
}

fn unit_count_or(value: &FieldValue, default: u32) -> u32 {
    value
        .as_number()
        .filter(|v| *v >= 1.0 && v.fract() == 0.0 && *v <= f64::from(u32::MAX))
        .map(|v| v as u32)
        .unwrap_or(default)
}

fn optional_positive(value: &FieldValue) -> Option<f64> {
    value.as_number().filter(|v| *v > 0.0)
}

fn optional_non_negative(value: &FieldValue) -> Option<f64> {
    value.as_number().filter(|v| *v >= 0.0)
}

/// The location is taken as a unit: all four fields from the form when a
/// ZIP was entered, otherwise all four from the defaults.
fn resolve_location(partial: &WizardFormData, default: &Location) -> Location {
    let zip = partial.zip.trim();
    if zip.is_empty() {
        return default.clone();
    }
    Location {
        zip: zip.to_string(),
        city: partial.city.trim().to_string(),
        state: partial.state.trim().to_string(),
        climate_zone: partial.climate_zone.trim().to_string(),
    }
}

fn resolve_system(form: &SystemFormData, default: &SystemSpec, capacity_tons: f64) -> SystemSpec {
    SystemSpec {
        system_type: text_or(&form.system_type, &default.system_type),
        capacity_tons,
        units: unit_count_or(&form.units, default.units),
        eer: optional_positive(&form.eer),
        ieer: optional_positive(&form.ieer),
        cop47: optional_positive(&form.cop47),
        cop17: optional_positive(&form.cop17),
    }
}

/// Merge the entered fields with `defaults` into a complete specification.
///
/// Compare capacity always equals the resolved baseline capacity, and the
/// rebate amount is zero unless the rebate is applied. Optional ratings
/// (EER, IEER, COP) resolve to absent rather than to a default.
pub fn resolve(partial: &WizardFormData, defaults: &ProjectSpecification) -> ProjectSpecification {
    let building_type = partial
        .building_type
        .parse::<BuildingType>()
        .unwrap_or(defaults.building_type);

    let capacity_tons = positive_or(
        &partial.baseline_system.capacity_tons,
        defaults.baseline_system.capacity_tons,
        "baseline_system.capacity_tons",
    );

    let rebate_amount = non_negative_or(&partial.rebate.amount, 0.0, "rebate.amount");
    let rebate = Rebate {
        applied: partial.rebate.apply_rebate,
        amount: if partial.rebate.apply_rebate {
            rebate_amount
        } else {
            0.0
        },
        source: partial.rebate.source.trim().to_string(),
    };

    ProjectSpecification {
        project_name: text_or(&partial.project_name, &defaults.project_name),
        location: resolve_location(partial, &defaults.location),
        building_type,
        hours_per_year: positive_or(
            &partial.hours_per_year,
            defaults.hours_per_year,
            "hours_per_year",
        ),
        electric_rate: positive_or(
            &partial.electric_rate,
            defaults.electric_rate,
            "electric_rate",
        ),
        gas_rate: optional_non_negative(&partial.gas_rate),
        maintenance_cost_per_year: non_negative_or(
            &partial.maintenance_cost_per_year,
            defaults.maintenance_cost_per_year,
            "maintenance_cost_per_year",
        ),
        analysis_period_years: ANALYSIS_PERIOD_YEARS,
        baseline_system: resolve_system(
            &partial.baseline_system,
            &defaults.baseline_system,
            capacity_tons,
        ),
        compare_system: resolve_system(
            &partial.compare_system,
            &defaults.compare_system,
            capacity_tons,
        ),
        rebate,
    }
}
