//! Resolved project schema: the fully-populated input to the projection engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every analysis covers this many years.
pub const ANALYSIS_PERIOD_YEARS: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingType {
    School,
    Retail,
    Hotel,
    Restaurant,
    Healthcare,
    Government,
    Office,
    Other,
}

impl BuildingType {
    pub const ALL: [BuildingType; 8] = [
        BuildingType::School,
        BuildingType::Retail,
        BuildingType::Hotel,
        BuildingType::Restaurant,
        BuildingType::Healthcare,
        BuildingType::Government,
        BuildingType::Office,
        BuildingType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BuildingType::School => "School",
            BuildingType::Retail => "Retail",
            BuildingType::Hotel => "Hotel",
            BuildingType::Restaurant => "Restaurant",
            BuildingType::Healthcare => "Healthcare",
            BuildingType::Government => "Government",
            BuildingType::Office => "Office",
            BuildingType::Other => "Other",
        }
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBuildingType(pub String);

impl fmt::Display for UnknownBuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown building type '{}'", self.0)
    }
}

impl std::error::Error for UnknownBuildingType {}

impl FromStr for BuildingType {
    type Err = UnknownBuildingType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        BuildingType::ALL
            .into_iter()
            .find(|b| b.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownBuildingType(trimmed.to_string()))
    }
}

/// Which side of the comparison a system sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemRole {
    Baseline,
    Compare,
}

impl SystemRole {
    pub fn key(self) -> &'static str {
        match self {
            SystemRole::Baseline => "baseline",
            SystemRole::Compare => "compare",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    pub zip: String,
    pub city: String,
    pub state: String,
    pub climate_zone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSpec {
    pub system_type: String,
    pub capacity_tons: f64,
    pub units: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eer: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ieer: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cop47: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cop17: Option<f64>,
}

impl SystemSpec {
    /// Heating COP at the rated point, falling back to the low-ambient value.
    pub fn heating_cop(&self) -> crate::cop::CopResolution {
        crate::cop::resolve_cop(self.cop47, self.cop17)
    }
}

/// Rebate as it counts toward the analysis.
///
/// `amount` is already the effective amount: zero unless `applied`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rebate {
    pub applied: bool,
    pub amount: f64,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSpecification {
    pub project_name: String,
    pub location: Location,
    pub building_type: BuildingType,
    pub hours_per_year: f64,
    pub electric_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_rate: Option<f64>,
    pub maintenance_cost_per_year: f64,
    pub analysis_period_years: u32,
    pub baseline_system: SystemSpec,
    pub compare_system: SystemSpec,
    pub rebate: Rebate,
}

impl ProjectSpecification {
    pub fn system(&self, role: SystemRole) -> &SystemSpec {
        match role {
            SystemRole::Baseline => &self.baseline_system,
            SystemRole::Compare => &self.compare_system,
        }
    }
}
