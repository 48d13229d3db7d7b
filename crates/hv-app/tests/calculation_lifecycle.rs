//! Calculation state machine: in-flight rejection, stale responses,
//! failures and background execution.

use std::sync::Arc;
use std::time::Duration;

use hv_app::{
    AppError, CALCULATION_FAILED_MESSAGE, CalculationError, CalculationService, CalculationState,
    MockCalculationService, WizardSession,
};
use hv_project::{FieldValue, ProjectSpecification};
use hv_results::{AnnualFigures, CalculationResults};

struct FailingService;

impl CalculationService for FailingService {
    fn name(&self) -> &str {
        "failing"
    }

    fn calculate(&self, _spec: &ProjectSpecification) -> Result<CalculationResults, CalculationError> {
        Err(CalculationError::new("backend unavailable"))
    }
}

fn alternate_results() -> CalculationResults {
    CalculationResults::from_annual(AnnualFigures {
        baseline_kwh: 50_000.0,
        compare_kwh: 40_000.0,
        baseline_cost: 6_000.0,
        compare_cost: 4_800.0,
        simple_payback_years: 4.2,
        lifecycle_savings: 18_000.0,
        co2_reduction_tons_per_year: 4.5,
    })
}

#[test]
fn second_request_while_pending_is_rejected() {
    let mut session = WizardSession::default();
    let (ticket, spec) = session.begin_calculation().unwrap();
    assert!(session.state().is_pending());

    assert!(matches!(
        session.begin_calculation(),
        Err(AppError::CalculationInFlight)
    ));

    let outcome = MockCalculationService::instant().calculate(&spec);
    session.complete_calculation(ticket, outcome).unwrap();
    assert_eq!(session.state(), &CalculationState::Succeeded);
}

#[test]
fn response_for_changed_form_is_discarded() {
    let mut session = WizardSession::default();
    let (ticket, _) = session.begin_calculation().unwrap();

    session.form_mut().electric_rate = FieldValue::Number(0.2);

    let err = session
        .complete_calculation(ticket, Ok(CalculationResults::reference()))
        .unwrap_err();
    assert!(matches!(err, AppError::StaleResponse { .. }));
    assert_eq!(session.state(), &CalculationState::Idle);
    assert!(session.analysis().is_none());
}

#[test]
fn response_after_reset_is_discarded() {
    let mut session = WizardSession::default();
    let (ticket, _) = session.begin_calculation().unwrap();
    session.reset();

    let err = session
        .complete_calculation(ticket, Ok(CalculationResults::reference()))
        .unwrap_err();
    assert!(matches!(err, AppError::StaleResponse { .. }));
    assert!(session.analysis().is_none());
}

#[test]
fn ticket_from_before_reset_does_not_complete_new_request() {
    let mut session = WizardSession::default();
    let (old_ticket, _) = session.begin_calculation().unwrap();
    session.reset();
    let (new_ticket, _) = session.begin_calculation().unwrap();
    assert_eq!(old_ticket.request_id(), new_ticket.request_id());

    let err = session
        .complete_calculation(old_ticket, Err(CalculationError::new("late failure")))
        .unwrap_err();
    assert!(matches!(err, AppError::StaleResponse { .. }));
    assert!(session.state().is_pending());

    session
        .complete_calculation(new_ticket, Ok(CalculationResults::reference()))
        .unwrap();
    assert_eq!(session.state(), &CalculationState::Succeeded);
}

#[test]
fn inconsistent_results_are_treated_as_failure() {
    let mut session = WizardSession::default();
    let (ticket, _) = session.begin_calculation().unwrap();

    let mut results = CalculationResults::reference();
    results.annual_kwh_savings = 1.0;
    let err = session
        .complete_calculation(ticket, Ok(results))
        .unwrap_err();
    assert!(matches!(err, AppError::CalculationFailed { .. }));
    assert_eq!(
        session.state(),
        &CalculationState::Failed {
            message: CALCULATION_FAILED_MESSAGE.to_string()
        }
    );
    assert!(session.analysis().is_none());
}

#[test]
fn prior_analysis_survives_until_replaced() {
    let mut session = WizardSession::default();
    session
        .calculate(&MockCalculationService::instant())
        .unwrap();
    let first = session.analysis().unwrap().clone();

    let (ticket, _) = session.begin_calculation().unwrap();
    assert_eq!(session.analysis(), Some(&first));

    let second = session
        .complete_calculation(ticket, Ok(alternate_results()))
        .unwrap();
    assert_eq!(second.results().annual_kwh_savings, 10_000.0);
    assert_ne!(session.analysis(), Some(&first));
}

#[test]
fn failure_keeps_no_partial_results_and_allows_retry() {
    let mut session = WizardSession::default();
    let err = session.calculate(&FailingService).unwrap_err();
    assert_eq!(err.to_string(), CALCULATION_FAILED_MESSAGE);
    assert!(session.analysis().is_none());

    session
        .calculate(&MockCalculationService::instant())
        .unwrap();
    assert_eq!(session.state(), &CalculationState::Succeeded);
}

#[test]
fn background_worker_completes() {
    let mut session = WizardSession::default();
    let service = Arc::new(MockCalculationService::new(Duration::from_millis(20)));
    let pending = session.spawn_calculation(service).unwrap();
    assert!(session.state().is_pending());
    assert_eq!(pending.request_id(), &session.current_request_id());

    let (ticket, outcome) = pending.wait();
    let analysis = session.complete_calculation(ticket, outcome).unwrap();
    assert_eq!(analysis.results(), &CalculationResults::reference());
}

#[test]
fn background_worker_failure_is_reported() {
    let mut session = WizardSession::default();
    let pending = session.spawn_calculation(Arc::new(FailingService)).unwrap();
    let (ticket, outcome) = pending.wait();
    assert!(outcome.is_err());
    assert!(matches!(
        session.complete_calculation(ticket, outcome),
        Err(AppError::CalculationFailed { .. })
    ));
}
