//! Calculation service boundary.
//!
//! The service turns a resolved specification into the nine scalar KPIs.
//! Requests are idempotent; failures are opaque and surface to the user as
//! a single generic message.

use std::time::Duration;

use hv_project::ProjectSpecification;
use hv_results::CalculationResults;
use tracing::{debug, info};

/// Message shown to the user for any calculation failure.
pub const CALCULATION_FAILED_MESSAGE: &str = "An error occurred during calculation";

/// Wizard default for the simulated service latency.
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_secs(2);

/// Opaque service failure. The detail is logged, never shown.
#[derive(Debug, Clone, thiserror::Error)]
#[error("calculation service error: {detail}")]
pub struct CalculationError {
    pub detail: String,
}

impl CalculationError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

pub trait CalculationService: Send + Sync {
    fn name(&self) -> &str;

    fn calculate(&self, spec: &ProjectSpecification) -> Result<CalculationResults, CalculationError>;
}

/// Stand-in for the calculation backend.
///
/// Returns the reference figures for every request after `delay`.
#[derive(Debug, Clone)]
pub struct MockCalculationService {
    delay: Duration,
    results: CalculationResults,
}

impl Default for MockCalculationService {
    fn default() -> Self {
        Self::new(DEFAULT_MOCK_DELAY)
    }
}

impl MockCalculationService {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            results: CalculationResults::reference(),
        }
    }

    /// No simulated latency.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Serve `results` instead of the reference figures.
    pub fn with_results(mut self, results: CalculationResults) -> Self {
        self.results = results;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl CalculationService for MockCalculationService {
    fn name(&self) -> &str {
        "mock"
    }

    fn calculate(
        &self,
        spec: &ProjectSpecification,
    ) -> Result<CalculationResults, CalculationError> {
        info!(
            project = %spec.project_name,
            delay_ms = self.delay.as_millis() as u64,
            "mock calculation requested"
        );
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        debug!(results = ?self.results, "mock calculation complete");
        Ok(self.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hv_project::default_specification;

    #[test]
    fn mock_is_idempotent() {
        let service = MockCalculationService::instant();
        let spec = default_specification();
        let a = service.calculate(&spec).unwrap();
        let b = service.calculate(&spec).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, CalculationResults::reference());
    }

    #[test]
    fn default_mock_uses_wizard_delay() {
        assert_eq!(MockCalculationService::default().delay(), DEFAULT_MOCK_DELAY);
    }

    #[test]
    fn error_detail_is_kept_for_logs() {
        let err = CalculationError::new("upstream timeout");
        assert!(err.to_string().contains("upstream timeout"));
    }
}
