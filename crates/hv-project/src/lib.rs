//! hv-project: project schema, form data, input aggregation and validation.

pub mod aggregate;
pub mod cop;
pub mod defaults;
pub mod form;
pub mod location;
pub mod schema;
pub mod validate;

pub use aggregate::resolve;
pub use cop::{CopResolution, resolve_cop};
pub use defaults::{default_form_data, default_specification};
pub use form::{FieldValue, RebateFormData, SystemFormData, WizardFormData};
pub use location::{LocationInfo, lookup_zip};
pub use schema::*;
pub use validate::{
    FieldErrors, ValidationError, validate_document, validate_project_step, validate_system_step,
};

use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

/// On-disk wrapper around a saved wizard form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDocument {
    pub version: u32,
    pub form: WizardFormData,
}

impl ProjectDocument {
    pub fn new(form: WizardFormData) -> Self {
        Self {
            version: LATEST_VERSION,
            form,
        }
    }
}
