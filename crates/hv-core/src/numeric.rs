/// Floating point type used throughout the analyzer
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Clamp NaN and infinities to zero.
#[inline]
pub fn finite_or_zero(v: Real) -> Real {
    if v.is_finite() { v } else { 0.0 }
}

/// Round half up to the nearest integer (`2.5 -> 3`, `-2.5 -> -2`).
///
/// Non-finite input yields 0.
pub fn round_half_up(v: Real) -> Real {
    finite_or_zero((finite_or_zero(v) + 0.5).floor())
}

/// Round half up to `decimals` places. Used for display values only.
pub fn round_to(v: Real, decimals: u32) -> Real {
    let scale = 10f64.powi(decimals as i32);
    finite_or_zero(round_half_up(v * scale) / scale)
}

/// `num / den`, or 0 when the denominator is zero or the quotient is not finite.
pub fn safe_ratio(num: Real, den: Real) -> Real {
    if den == 0.0 {
        return 0.0;
    }
    finite_or_zero(num / den)
}

/// Compounding factor `(1 + rate)^(year - 1)`; year 1 (and year 0) is unescalated.
pub fn escalation_factor(rate: Real, year: u32) -> Real {
    let periods = year.saturating_sub(1) as i32;
    finite_or_zero((1.0 + finite_or_zero(rate)).powi(periods))
}
