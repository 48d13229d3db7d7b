//! Application service layer for the retrofit analyzer.
//!
//! Owns the wizard session, the calculation service boundary and the
//! presentation adapters, so the CLI (or any other front end) only wires
//! input and output.

pub mod calc_service;
pub mod error;
pub mod format;
pub mod project_service;
pub mod report;
pub mod session;
pub mod worker;

pub use calc_service::{
    CALCULATION_FAILED_MESSAGE, CalculationError, CalculationService, DEFAULT_MOCK_DELAY,
    MockCalculationService,
};
pub use error::{AppError, AppResult};
pub use format::{ComparisonLine, KpiCard, comparison_lines, kpi_cards};
pub use project_service::{FormFormat, load_config, load_form, save_form};
pub use report::{render_report, render_report_today, summary_sentence};
pub use session::{
    Analysis, CalculationState, CalculationTicket, PendingCalculation, WizardSession, WizardStep,
};
pub use worker::{CalculationWorker, WorkerMessage};
