//! Form file loading and saving, and engine config loading.

use std::path::Path;

use hv_engine::ProjectionConfig;
use hv_project::{ProjectDocument, WizardFormData, validate_document};
use tracing::info;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFormat {
    Yaml,
    Json,
}

impl FormFormat {
    /// Pick the format from the file extension; anything but `.json` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FormFormat::Json,
            _ => FormFormat::Yaml,
        }
    }
}

/// Load a saved wizard form from YAML or JSON.
pub fn load_form(path: &Path) -> AppResult<WizardFormData> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ProjectFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let doc: ProjectDocument = match FormFormat::from_path(path) {
        FormFormat::Yaml => serde_yaml::from_str(&content)
            .map_err(|e| AppError::Project(format!("Failed to parse form YAML: {}", e)))?,
        FormFormat::Json => serde_json::from_str(&content)
            .map_err(|e| AppError::Project(format!("Failed to parse form JSON: {}", e)))?,
    };
    validate_document(&doc).map_err(|e| AppError::Project(e.to_string()))?;

    info!(path = %path.display(), version = doc.version, "form loaded");
    Ok(doc.form)
}

/// Save a wizard form as YAML or JSON.
pub fn save_form(path: &Path, form: &WizardFormData) -> AppResult<()> {
    let doc = ProjectDocument::new(form.clone());
    validate_document(&doc).map_err(|e| AppError::Project(e.to_string()))?;

    let content = match FormFormat::from_path(path) {
        FormFormat::Yaml => serde_yaml::to_string(&doc)
            .map_err(|e| AppError::Project(format!("Failed to serialize form: {}", e)))?,
        FormFormat::Json => serde_json::to_string_pretty(&doc)
            .map_err(|e| AppError::Project(format!("Failed to serialize form: {}", e)))?,
    };

    std::fs::write(path, content).map_err(|e| AppError::ProjectFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Engine parameters from a YAML file, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> AppResult<ProjectionConfig> {
    match path {
        Some(path) => {
            let config = ProjectionConfig::load_yaml(path)?;
            info!(path = %path.display(), "projection config loaded");
            Ok(config)
        }
        None => Ok(ProjectionConfig::default()),
    }
}
