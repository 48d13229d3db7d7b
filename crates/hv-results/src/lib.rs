//! hv-results: calculation results and request identity.

pub mod hash;
pub mod types;

pub use hash::{RequestId, compute_request_id};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("Inconsistent results: {what} (expected {expected}, got {actual})")]
    Inconsistent {
        what: &'static str,
        expected: f64,
        actual: f64,
    },
}
