//! Heating COP resolution.
//!
//! COP @47°F is the standard rating point. When only the low-ambient
//! COP @17°F is known it stands in for the rated value, and the
//! substitution is flagged so it can be surfaced next to the figure.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown beside the COP @47°F field when only COP @17°F was entered.
pub const COP_FALLBACK_HELPER_TEXT: &str = "No COP @47°F provided — system will use COP @17°F for heating calculations unless overridden.";

/// Placeholder for a value that could not be resolved.
pub const UNRESOLVED: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CopResolution {
    /// COP @47°F was provided.
    Rated(f64),
    /// COP @47°F missing; COP @17°F substituted.
    LowAmbientFallback(f64),
    /// Neither rating point available.
    Unresolved,
}

impl CopResolution {
    pub fn value(self) -> Option<f64> {
        match self {
            CopResolution::Rated(v) | CopResolution::LowAmbientFallback(v) => Some(v),
            CopResolution::Unresolved => None,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, CopResolution::LowAmbientFallback(_))
    }
}

fn usable(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite() && *x > 0.0)
}

pub fn resolve_cop(cop47: Option<f64>, cop17: Option<f64>) -> CopResolution {
    match (usable(cop47), usable(cop17)) {
        (Some(rated), _) => CopResolution::Rated(rated),
        (None, Some(low)) => CopResolution::LowAmbientFallback(low),
        (None, None) => CopResolution::Unresolved,
    }
}

/// Display form for the "COP @47°F" cell of the summary.
impl fmt::Display for CopResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopResolution::Rated(v) => write!(f, "{v:.1}"),
            CopResolution::LowAmbientFallback(v) => {
                write!(f, "{UNRESOLVED} (using COP @17°F = {v:.1})")
            }
            CopResolution::Unresolved => f.write_str(UNRESOLVED),
        }
    }
}

/// Display form for a plain optional rating (e.g. the "COP @17°F" cell).
pub fn format_optional_cop(v: Option<f64>) -> String {
    match usable(v) {
        Some(x) => format!("{x:.1}"),
        None => UNRESOLVED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rated_value_wins() {
        let r = resolve_cop(Some(3.2), Some(2.1));
        assert_eq!(r, CopResolution::Rated(3.2));
        assert!(!r.is_fallback());
        assert_eq!(r.to_string(), "3.2");
    }

    #[test]
    fn low_ambient_substitutes_when_rated_missing() {
        let r = resolve_cop(None, Some(2.1));
        assert_eq!(r, CopResolution::LowAmbientFallback(2.1));
        assert!(r.is_fallback());
        assert_eq!(r.value(), Some(2.1));
        assert_eq!(r.to_string(), "— (using COP @17°F = 2.1)");
    }

    #[test]
    fn nothing_known_is_unresolved() {
        let r = resolve_cop(None, None);
        assert_eq!(r.value(), None);
        assert_eq!(r.to_string(), "—");
        assert_eq!(format_optional_cop(None), "—");
    }

    #[test]
    fn non_positive_ratings_are_ignored() {
        assert_eq!(
            resolve_cop(Some(0.0), Some(2.1)),
            CopResolution::LowAmbientFallback(2.1)
        );
        assert_eq!(resolve_cop(Some(f64::NAN), None), CopResolution::Unresolved);
    }
}
