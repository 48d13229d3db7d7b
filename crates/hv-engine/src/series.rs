//! Per-year series types.

use hv_core::{HvError, HvResult, Real, finite_or_zero};
use hv_project::SystemRole;
use serde::{Deserialize, Serialize};

/// Annual energy use of both systems in one year (kWh).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyPoint {
    pub year: u32,
    pub baseline: Real,
    pub inv: Real,
}

/// One system's cost breakdown in one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifecyclePoint {
    pub year: u32,
    pub energy: Real,
    pub maintenance: Real,
    pub capex: Real,
}

impl LifecyclePoint {
    pub fn total(&self) -> Real {
        finite_or_zero(self.energy + self.maintenance + self.capex)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LifecycleSeries {
    pub baseline: Vec<LifecyclePoint>,
    pub compare: Vec<LifecyclePoint>,
}

impl LifecycleSeries {
    pub fn system(&self, role: SystemRole) -> &[LifecyclePoint] {
        match role {
            SystemRole::Baseline => &self.baseline,
            SystemRole::Compare => &self.compare,
        }
    }

    /// Cost breakdown for a 1-indexed year.
    pub fn year(&self, role: SystemRole, year: u32) -> HvResult<&LifecyclePoint> {
        point_for_year(self.system(role), year, "lifecycle series year")
    }

    /// Sum of energy, maintenance and capex over every year.
    pub fn total(&self, role: SystemRole) -> Real {
        finite_or_zero(self.system(role).iter().map(LifecyclePoint::total).sum())
    }

    pub fn totals(&self) -> LifecycleTotals {
        LifecycleTotals {
            baseline: self.total(SystemRole::Baseline),
            compare: self.total(SystemRole::Compare),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifecycleTotals {
    pub baseline: Real,
    pub compare: Real,
}

impl LifecycleTotals {
    pub fn delta(&self) -> Real {
        finite_or_zero(self.compare - self.baseline)
    }
}

/// Point for a 1-indexed year in a series indexed from year 1.
pub fn point_for_year<'a, T>(
    points: &'a [T],
    year: u32,
    what: &'static str,
) -> HvResult<&'a T> {
    let index = (year as usize).wrapping_sub(1);
    points.get(index).ok_or(HvError::IndexOob {
        what,
        index: year as usize,
        len: points.len(),
    })
}
