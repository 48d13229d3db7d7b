//! Wizard step validation.
//!
//! Step checks collect field-keyed messages; any message blocks progression.
//! Document checks return the first structural problem found.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::form::{FieldValue, WizardFormData};
use crate::location::lookup_zip;
use crate::schema::{BuildingType, SystemRole};
use crate::ProjectDocument;

pub const MSG_ZIP_REQUIRED: &str = "ZIP code is required";
pub const MSG_ZIP_NOT_FOUND: &str = "ZIP code not found. Please enter a valid ZIP code.";
pub const MSG_BUILDING_TYPE_REQUIRED: &str = "Building type is required";
pub const MSG_ELECTRIC_RATE_REQUIRED: &str = "Electricity rate is required";
pub const MSG_ELECTRIC_RATE_POSITIVE: &str = "Electricity rate must be greater than 0";
pub const MSG_CAPACITY_REQUIRED: &str = "Capacity is required";
pub const MSG_UNITS_MIN: &str = "Units must be at least 1";
pub const MSG_COP_NOT_NUMERIC: &str = "Please enter a valid numeric COP (e.g., 3.2).";
pub const MSG_COP_NOT_POSITIVE: &str = "COP must be greater than zero.";

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

/// Field-level messages keyed by field path (`zip`, `baseline.units`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn remove(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        f.write_str(&parts.join("; "))
    }
}

pub fn system_field_key(role: SystemRole, field: &str) -> String {
    format!("{}.{}", role.key(), field)
}

fn validate_electric_rate(value: &FieldValue) -> Option<&'static str> {
    if !value.is_present() {
        return Some(MSG_ELECTRIC_RATE_REQUIRED);
    }
    match value.as_number() {
        Some(v) if v > 0.0 => None,
        _ => Some(MSG_ELECTRIC_RATE_POSITIVE),
    }
}

/// Check a single COP entry as it is typed. Blank is allowed.
pub fn validate_cop_input(value: &FieldValue) -> Option<&'static str> {
    if !value.is_present() {
        return None;
    }
    match value.as_number() {
        None => Some(MSG_COP_NOT_NUMERIC),
        Some(v) if v <= 0.0 => Some(MSG_COP_NOT_POSITIVE),
        Some(_) => None,
    }
}

/// Project step: a known ZIP, a building type and a positive electricity
/// rate are required.
pub fn validate_project_step(form: &WizardFormData) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let zip = form.zip.trim();
    if zip.is_empty() {
        errors.insert("zip", MSG_ZIP_REQUIRED);
    } else if lookup_zip(zip).is_none() {
        errors.insert("zip", MSG_ZIP_NOT_FOUND);
    }

    let building_type = form.building_type.trim();
    if building_type.is_empty() {
        errors.insert("building_type", MSG_BUILDING_TYPE_REQUIRED);
    } else if building_type.parse::<BuildingType>().is_err() {
        errors.insert(
            "building_type",
            format!("Unknown building type '{building_type}'"),
        );
    }

    if let Some(msg) = validate_electric_rate(&form.electric_rate) {
        errors.insert("electric_rate", msg);
    }

    errors
}

/// System step: baseline capacity and unit count are required, and any
/// entered COP must be a positive number.
pub fn validate_system_step(form: &WizardFormData) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let baseline = &form.baseline_system;

    match baseline.capacity_tons.as_number() {
        Some(v) if v > 0.0 => {}
        _ => errors.insert(
            system_field_key(SystemRole::Baseline, "capacity_tons"),
            MSG_CAPACITY_REQUIRED,
        ),
    }

    match baseline.units.as_number() {
        Some(v) if v >= 1.0 => {}
        _ => errors.insert(
            system_field_key(SystemRole::Baseline, "units"),
            MSG_UNITS_MIN,
        ),
    }

    for role in [SystemRole::Baseline, SystemRole::Compare] {
        let system = form.system(role);
        for (name, value) in [("cop47", &system.cop47), ("cop17", &system.cop17)] {
            if let Some(msg) = validate_cop_input(value) {
                errors.insert(system_field_key(role, name), msg);
            }
        }
    }

    errors
}

/// Structural checks for a saved form document.
pub fn validate_document(doc: &ProjectDocument) -> Result<(), ValidationError> {
    if doc.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: doc.version,
        });
    }

    let units = &doc.form.baseline_system.units;
    if let Some(v) = units.as_number() {
        if v.fract() != 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "baseline_system.units".to_string(),
                value: v.to_string(),
                reason: "unit count must be a whole number".to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_form_data;

    #[test]
    fn default_form_passes_both_steps() {
        let form = default_form_data();
        assert!(validate_project_step(&form).is_empty());
        assert!(validate_system_step(&form).is_empty());
    }

    #[test]
    fn project_step_requires_fields() {
        let form = WizardFormData::default();
        let errors = validate_project_step(&form);
        assert_eq!(errors.get("zip"), Some(MSG_ZIP_REQUIRED));
        assert_eq!(errors.get("building_type"), Some(MSG_BUILDING_TYPE_REQUIRED));
        assert_eq!(errors.get("electric_rate"), Some(MSG_ELECTRIC_RATE_REQUIRED));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn unknown_zip_fails_project_step() {
        let mut form = default_form_data();
        form.zip = "00000".to_string();
        assert_eq!(
            validate_project_step(&form).get("zip"),
            Some(MSG_ZIP_NOT_FOUND)
        );

        form.zip = " 98101 ".to_string();
        assert!(validate_project_step(&form).get("zip").is_none());
    }

    #[test]
    fn electric_rate_must_be_positive() {
        let mut form = default_form_data();
        form.electric_rate = FieldValue::Number(0.0);
        assert_eq!(
            validate_project_step(&form).get("electric_rate"),
            Some(MSG_ELECTRIC_RATE_POSITIVE)
        );
        form.electric_rate = FieldValue::text("-0.1");
        assert_eq!(
            validate_project_step(&form).get("electric_rate"),
            Some(MSG_ELECTRIC_RATE_POSITIVE)
        );
    }

    #[test]
    fn system_step_requires_capacity_and_units() {
        let mut form = default_form_data();
        form.baseline_system.capacity_tons = FieldValue::Empty;
        form.baseline_system.units = FieldValue::Number(0.0);
        let errors = validate_system_step(&form);
        assert_eq!(
            errors.get("baseline.capacity_tons"),
            Some(MSG_CAPACITY_REQUIRED)
        );
        assert_eq!(errors.get("baseline.units"), Some(MSG_UNITS_MIN));
    }

    #[test]
    fn cop_entries_are_checked() {
        assert_eq!(validate_cop_input(&FieldValue::text("")), None);
        assert_eq!(validate_cop_input(&FieldValue::text("3.2")), None);
        assert_eq!(
            validate_cop_input(&FieldValue::text("abc")),
            Some(MSG_COP_NOT_NUMERIC)
        );
        assert_eq!(
            validate_cop_input(&FieldValue::text("0")),
            Some(MSG_COP_NOT_POSITIVE)
        );

        let mut form = default_form_data();
        form.compare_system.cop17 = FieldValue::text("-1");
        let errors = validate_system_step(&form);
        assert_eq!(errors.get("compare.cop17"), Some(MSG_COP_NOT_POSITIVE));
    }

    #[test]
    fn future_document_version_is_rejected() {
        let doc = ProjectDocument {
            version: crate::LATEST_VERSION + 1,
            form: default_form_data(),
        };
        assert!(matches!(
            validate_document(&doc),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn field_errors_display_in_key_order() {
        let mut errors = FieldErrors::new();
        errors.insert("zip", MSG_ZIP_REQUIRED);
        errors.insert("electric_rate", MSG_ELECTRIC_RATE_REQUIRED);
        assert_eq!(
            errors.to_string(),
            "electric_rate: Electricity rate is required; zip: ZIP code is required"
        );
    }
}
