//! Reference project used to pre-fill a new session and to back-fill
//! anything the user leaves blank.

use crate::form::{FieldValue, RebateFormData, SystemFormData, WizardFormData};
use crate::schema::{
    ANALYSIS_PERIOD_YEARS, BuildingType, Location, ProjectSpecification, Rebate, SystemSpec,
};

pub const DEFAULT_HOURS_PER_YEAR: f64 = 3500.0;
pub const DEFAULT_ELECTRIC_RATE: f64 = 0.12;
pub const DEFAULT_MAINTENANCE_COST: f64 = 800.0;
pub const DEFAULT_CAPACITY_TONS: f64 = 10.0;
pub const DEFAULT_REBATE_AMOUNT: f64 = 1500.0;

pub fn default_specification() -> ProjectSpecification {
    ProjectSpecification {
        project_name: "Lincoln HS Rooftop Retrofit".to_string(),
        location: Location {
            zip: "75001".to_string(),
            city: "Plano".to_string(),
            state: "TX".to_string(),
            climate_zone: "3A".to_string(),
        },
        building_type: BuildingType::School,
        hours_per_year: DEFAULT_HOURS_PER_YEAR,
        electric_rate: DEFAULT_ELECTRIC_RATE,
        gas_rate: None,
        maintenance_cost_per_year: DEFAULT_MAINTENANCE_COST,
        analysis_period_years: ANALYSIS_PERIOD_YEARS,
        baseline_system: SystemSpec {
            system_type: "BE HP".to_string(),
            capacity_tons: DEFAULT_CAPACITY_TONS,
            units: 1,
            eer: None,
            ieer: None,
            cop47: Some(3.2),
            cop17: Some(2.1),
        },
        compare_system: SystemSpec {
            system_type: "INV HP".to_string(),
            capacity_tons: DEFAULT_CAPACITY_TONS,
            units: 1,
            eer: None,
            ieer: None,
            cop47: Some(3.2),
            cop17: Some(2.1),
        },
        rebate: Rebate {
            applied: true,
            amount: DEFAULT_REBATE_AMOUNT,
            source: "EcoRebates".to_string(),
        },
    }
}

fn system_form(spec: &SystemSpec) -> SystemFormData {
    SystemFormData {
        system_type: spec.system_type.clone(),
        capacity_tons: FieldValue::Number(spec.capacity_tons),
        units: FieldValue::Number(f64::from(spec.units)),
        ..SystemFormData::default()
    }
}

/// Form state of a fresh session.
///
/// Efficiency ratings start blank; the user supplies them on the system step.
pub fn default_form_data() -> WizardFormData {
    let spec = default_specification();
    WizardFormData {
        project_name: spec.project_name.clone(),
        zip: spec.location.zip.clone(),
        city: spec.location.city.clone(),
        state: spec.location.state.clone(),
        climate_zone: spec.location.climate_zone.clone(),
        building_type: spec.building_type.label().to_string(),
        hours_per_year: FieldValue::Number(spec.hours_per_year),
        electric_rate: FieldValue::Number(spec.electric_rate),
        gas_rate: FieldValue::Empty,
        maintenance_cost_per_year: FieldValue::Number(spec.maintenance_cost_per_year),
        baseline_system: system_form(&spec.baseline_system),
        compare_system: system_form(&spec.compare_system),
        rebate: RebateFormData {
            apply_rebate: spec.rebate.applied,
            amount: FieldValue::Number(spec.rebate.amount),
            source: spec.rebate.source.clone(),
        },
    }
}
