//! CSV rendering of the projection series.

use crate::series::{EnergyPoint, LifecycleSeries};

pub fn energy_series_csv(series: &[EnergyPoint]) -> String {
    let mut csv = String::from("year,baseline_kwh,inv_kwh\n");
    for point in series {
        csv.push_str(&format!("{},{},{}\n", point.year, point.baseline, point.inv));
    }
    csv
}

/// Both systems side by side, one row per year.
pub fn lifecycle_series_csv(series: &LifecycleSeries) -> String {
    let mut csv = String::from(
        "year,baseline_energy,baseline_maintenance,baseline_capex,\
         compare_energy,compare_maintenance,compare_capex\n",
    );
    for (b, c) in series.baseline.iter().zip(&series.compare) {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            b.year, b.energy, b.maintenance, b.capex, c.energy, c.maintenance, c.capex
        ));
    }
    csv
}
