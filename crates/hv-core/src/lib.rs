//! hv-core: numeric foundation for the retrofit analyzer.
//!
//! Contains:
//! - numeric (Real + tolerances + rounding and division guards)
//! - error (shared error types)

pub mod error;
pub mod numeric;

pub use error::{HvError, HvResult};
pub use numeric::*;
