//! Wizard session: form state, step tracking and the calculation lifecycle.
//!
//! At most one calculation is in flight per session. [`WizardSession::begin_calculation`]
//! issues a [`CalculationTicket`] bound to the content hash of the resolved
//! specification; the response is only applied if that hash still matches the
//! form when it arrives.

use std::sync::Arc;

use hv_engine::{ProjectionConfig, ProjectionResult, project};
use hv_project::{
    FieldErrors, FieldValue, LocationInfo, ProjectSpecification, WizardFormData,
    default_form_data, default_specification, lookup_zip, resolve, validate_project_step,
    validate_system_step,
};
use hv_results::{CalculationResults, RequestId, compute_request_id};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calc_service::{CALCULATION_FAILED_MESSAGE, CalculationError, CalculationService};
use crate::error::{AppError, AppResult};
use crate::worker::CalculationWorker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    Project,
    System,
    Results,
}

impl WizardStep {
    /// 1-based position shown in the step indicator.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Project => 1,
            WizardStep::System => 2,
            WizardStep::Results => 3,
        }
    }
}

/// Proof that a calculation was started. Consumed on completion.
///
/// The nonce is fresh per begin, so a ticket from before a reset never
/// matches a later request for the same form.
#[derive(Debug)]
pub struct CalculationTicket {
    request_id: RequestId,
    nonce: Uuid,
}

impl CalculationTicket {
    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CalculationState {
    Idle,
    Pending { request_id: RequestId, nonce: Uuid },
    Succeeded,
    Failed { message: String },
}

impl CalculationState {
    pub fn is_pending(&self) -> bool {
        matches!(self, CalculationState::Pending { .. })
    }
}

/// A completed calculation and everything derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub request_id: RequestId,
    pub spec: ProjectSpecification,
    pub projection: ProjectionResult,
    /// RFC 3339 completion time.
    pub completed_at: String,
}

impl Analysis {
    pub fn results(&self) -> &CalculationResults {
        &self.projection.results
    }
}

/// A calculation running on a background worker.
pub struct PendingCalculation {
    ticket: CalculationTicket,
    spec: ProjectSpecification,
    worker: CalculationWorker,
}

impl PendingCalculation {
    pub fn request_id(&self) -> &RequestId {
        self.ticket.request_id()
    }

    pub fn spec(&self) -> &ProjectSpecification {
        &self.spec
    }

    /// Block until the worker reports.
    pub fn wait(self) -> (CalculationTicket, Result<CalculationResults, CalculationError>) {
        let outcome = self
            .worker
            .wait()
            .and_then(|message| message.into_outcome());
        (self.ticket, outcome)
    }

    /// Non-blocking: the outcome if the worker has reported, otherwise `self` back.
    pub fn try_finish(
        self,
    ) -> Result<(CalculationTicket, Result<CalculationResults, CalculationError>), Self> {
        match self.worker.poll() {
            Some(message) => Ok((self.ticket, message.into_outcome())),
            None => Err(self),
        }
    }
}

pub struct WizardSession {
    id: String,
    step: WizardStep,
    form: WizardFormData,
    field_errors: FieldErrors,
    state: CalculationState,
    analysis: Option<Analysis>,
    config: ProjectionConfig,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new(ProjectionConfig::default())
    }
}

impl WizardSession {
    pub fn new(config: ProjectionConfig) -> Self {
        let id = Uuid::new_v4().to_string();
        info!(session = %id, "wizard session created");
        Self {
            id,
            step: WizardStep::Project,
            form: default_form_data(),
            field_errors: FieldErrors::new(),
            state: CalculationState::Idle,
            analysis: None,
            config,
        }
    }

    /// Start from saved form data instead of the defaults.
    pub fn with_form(config: ProjectionConfig, form: WizardFormData) -> Self {
        let mut session = Self::new(config);
        session.form = form;
        session
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn form(&self) -> &WizardFormData {
        &self.form
    }

    /// Direct field access. Baseline capacity should go through
    /// [`WizardSession::set_baseline_capacity`] so the compare value follows.
    pub fn form_mut(&mut self) -> &mut WizardFormData {
        &mut self.form
    }

    pub fn set_baseline_capacity(&mut self, value: impl Into<FieldValue>) {
        self.form.set_baseline_capacity(value);
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn state(&self) -> &CalculationState {
        &self.state
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Enter a postal code and fill in the location it maps to.
    ///
    /// An empty code clears the location without an error. An unknown code
    /// clears it and records a field error.
    pub fn set_zip(&mut self, zip: &str) -> AppResult<Option<LocationInfo>> {
        self.form.zip = zip.to_string();
        let trimmed = zip.trim();

        if trimmed.is_empty() {
            self.form.clear_location();
            self.field_errors.remove("zip");
            return Ok(None);
        }

        match lookup_zip(trimmed) {
            Some(info) => {
                debug!(zip = trimmed, city = %info.city, "location resolved");
                self.form
                    .set_location(&info.city, &info.state, &info.climate_zone);
                self.field_errors.remove("zip");
                Ok(Some(info))
            }
            None => {
                warn!(zip = trimmed, "postal code not found");
                self.form.clear_location();
                self.field_errors
                    .insert("zip", hv_project::validate::MSG_ZIP_NOT_FOUND);
                Err(AppError::LocationNotFound {
                    zip: trimmed.to_string(),
                })
            }
        }
    }

    /// Move forward one step.
    ///
    /// Leaving the project step requires it to validate. Reaching the
    /// results step requires a completed analysis.
    pub fn advance(&mut self) -> AppResult<WizardStep> {
        match self.step {
            WizardStep::Project => {
                self.check(validate_project_step(&self.form))?;
                self.step = WizardStep::System;
            }
            WizardStep::System => {
                if self.analysis.is_none() {
                    return Err(AppError::NoResults);
                }
                self.step = WizardStep::Results;
            }
            WizardStep::Results => {}
        }
        debug!(session = %self.id, step = self.step.number(), "step advanced");
        Ok(self.step)
    }

    pub fn back(&mut self) -> WizardStep {
        self.step = match self.step {
            WizardStep::Project | WizardStep::System => WizardStep::Project,
            WizardStep::Results => WizardStep::System,
        };
        self.step
    }

    /// The form resolved against the reference defaults.
    pub fn resolved_spec(&self) -> ProjectSpecification {
        resolve(&self.form, &default_specification())
    }

    /// Identity of the form as it would be submitted now.
    pub fn current_request_id(&self) -> RequestId {
        compute_request_id(&self.resolved_spec())
    }

    /// Validate, resolve and mark a calculation as in flight.
    pub fn begin_calculation(&mut self) -> AppResult<(CalculationTicket, ProjectSpecification)> {
        if self.state.is_pending() {
            return Err(AppError::CalculationInFlight);
        }

        let mut errors = validate_project_step(&self.form);
        for (field, message) in validate_system_step(&self.form).iter() {
            errors.insert(field, message);
        }
        self.check(errors)?;

        let spec = self.resolved_spec();
        let request_id = compute_request_id(&spec);
        let nonce = Uuid::new_v4();
        info!(session = %self.id, request = request_id.short(), "calculation pending");
        self.state = CalculationState::Pending {
            request_id: request_id.clone(),
            nonce,
        };
        Ok((CalculationTicket { request_id, nonce }, spec))
    }

    /// Apply the outcome of the calculation identified by `ticket`.
    ///
    /// Results whose savings disagree with their annual figures count as a
    /// failed calculation.
    ///
    /// The response is discarded if the session was reset or the form
    /// changed since the ticket was issued; the session returns to idle and
    /// any earlier analysis is kept.
    pub fn complete_calculation(
        &mut self,
        ticket: CalculationTicket,
        outcome: Result<CalculationResults, CalculationError>,
    ) -> AppResult<&Analysis> {
        let pending_matches = matches!(
            &self.state,
            CalculationState::Pending { request_id, nonce }
                if *request_id == ticket.request_id && *nonce == ticket.nonce
        );
        if !pending_matches {
            warn!(request = ticket.request_id.short(), "response for a request no longer pending");
            return Err(AppError::StaleResponse {
                request_id: ticket.request_id.to_string(),
            });
        }

        let spec = self.resolved_spec();
        if compute_request_id(&spec) != ticket.request_id {
            warn!(
                request = ticket.request_id.short(),
                "form changed while calculating, response discarded"
            );
            self.state = CalculationState::Idle;
            return Err(AppError::StaleResponse {
                request_id: ticket.request_id.to_string(),
            });
        }

        let checked = outcome.map_err(|err| err.detail).and_then(|results| {
            results
                .check_consistency()
                .map(|()| results)
                .map_err(|err| err.to_string())
        });
        let results = match checked {
            Ok(results) => results,
            Err(detail) => {
                warn!(session = %self.id, %detail, "calculation failed");
                self.state = CalculationState::Failed {
                    message: CALCULATION_FAILED_MESSAGE.to_string(),
                };
                return Err(AppError::CalculationFailed {
                    message: CALCULATION_FAILED_MESSAGE.to_string(),
                });
            }
        };

        let projection = project(&spec, &results, &self.config);
        info!(
            session = %self.id,
            request = ticket.request_id.short(),
            savings_kwh = projection.results.annual_kwh_savings,
            "calculation succeeded"
        );
        self.state = CalculationState::Succeeded;
        self.step = WizardStep::Results;
        Ok(&*self.analysis.insert(Analysis {
            request_id: ticket.request_id,
            spec,
            projection,
            completed_at: chrono::Utc::now().to_rfc3339(),
        }))
    }

    /// Run the service on the calling thread.
    pub fn calculate(&mut self, service: &dyn CalculationService) -> AppResult<&Analysis> {
        let (ticket, spec) = self.begin_calculation()?;
        let outcome = service.calculate(&spec);
        self.complete_calculation(ticket, outcome)
    }

    /// Start the service on a background worker.
    pub fn spawn_calculation(
        &mut self,
        service: Arc<dyn CalculationService>,
    ) -> AppResult<PendingCalculation> {
        let (ticket, spec) = self.begin_calculation()?;
        let worker = CalculationWorker::start(service, ticket.request_id().clone(), spec.clone());
        Ok(PendingCalculation {
            ticket,
            spec,
            worker,
        })
    }

    /// Discard all form data and results and return to the first step.
    pub fn reset(&mut self) {
        info!(session = %self.id, "session reset");
        self.step = WizardStep::Project;
        self.form = default_form_data();
        self.field_errors = FieldErrors::new();
        self.state = CalculationState::Idle;
        self.analysis = None;
    }

    fn check(&mut self, errors: FieldErrors) -> AppResult<()> {
        if errors.is_empty() {
            self.field_errors = FieldErrors::new();
            Ok(())
        } else {
            debug!(session = %self.id, count = errors.len(), "validation blocked progress");
            self.field_errors = errors.clone();
            Err(AppError::Validation(errors))
        }
    }
}
