//! Wizard form data: field values exactly as entered, before resolution.

use serde::{Deserialize, Serialize};

use crate::schema::SystemRole;

/// A form field value as entered.
///
/// Text fields keep the raw string so that a half-typed value like `"3."`
/// round-trips unchanged; resolution parses it later.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    /// False for `Empty` and for blank text.
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Number(_) => true,
            FieldValue::Text(s) => !s.trim().is_empty(),
            FieldValue::Empty => false,
        }
    }

    /// Finite numeric reading of the field, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v).filter(|v| v.is_finite()),
            FieldValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
            }
            FieldValue::Empty => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemFormData {
    pub system_type: String,
    pub capacity_tons: FieldValue,
    pub units: FieldValue,
    pub eer: FieldValue,
    pub ieer: FieldValue,
    pub cop47: FieldValue,
    pub cop17: FieldValue,
}

impl SystemFormData {
    /// True when only the low-ambient rating was entered.
    pub fn uses_cop_fallback(&self) -> bool {
        !self.cop47.is_present() && self.cop17.is_present()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RebateFormData {
    pub apply_rebate: bool,
    pub amount: FieldValue,
    pub source: String,
}

/// Everything the wizard collects, field by field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardFormData {
    pub project_name: String,
    pub zip: String,
    pub city: String,
    pub state: String,
    pub climate_zone: String,
    pub building_type: String,
    pub hours_per_year: FieldValue,
    pub electric_rate: FieldValue,
    pub gas_rate: FieldValue,
    pub maintenance_cost_per_year: FieldValue,
    pub baseline_system: SystemFormData,
    pub compare_system: SystemFormData,
    pub rebate: RebateFormData,
}

impl WizardFormData {
    pub fn system(&self, role: SystemRole) -> &SystemFormData {
        match role {
            SystemRole::Baseline => &self.baseline_system,
            SystemRole::Compare => &self.compare_system,
        }
    }

    /// Set the baseline capacity and mirror it onto the compare system.
    ///
    /// Compare capacity is never edited directly. Clearing the baseline
    /// field leaves the compare value untouched.
    pub fn set_baseline_capacity(&mut self, value: impl Into<FieldValue>) {
        let value = value.into();
        if value.is_present() {
            self.compare_system.capacity_tons = value.clone();
        }
        self.baseline_system.capacity_tons = value;
    }

    /// Replace the location fields in one step.
    pub fn set_location(&mut self, city: &str, state: &str, climate_zone: &str) {
        self.city = city.to_string();
        self.state = state.to_string();
        self.climate_zone = climate_zone.to_string();
    }

    pub fn clear_location(&mut self) {
        self.set_location("", "", "");
    }
}
