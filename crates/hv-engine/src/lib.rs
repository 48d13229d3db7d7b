//! hv-engine: lifecycle cost and savings projection.
//!
//! Turns a resolved project specification plus the calculation service's
//! annual figures into escalated per-year series, derived KPIs and
//! side-by-side comparison rows. Pure computation, no I/O beyond config
//! loading.

pub mod comparison;
pub mod config;
pub mod export;
pub mod projection;
pub mod series;

pub use comparison::{ComparisonMetric, ComparisonRow, comparison_rows};
pub use config::ProjectionConfig;
pub use export::{energy_series_csv, lifecycle_series_csv};
pub use projection::{Co2Split, ProjectionResult, SeriesBasis, project, project_with_basis};
pub use series::{EnergyPoint, LifecyclePoint, LifecycleSeries, LifecycleTotals};

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration: {field} = {value} ({reason})")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
