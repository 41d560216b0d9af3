//! Dashboard summary.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{total_cost, Intervention, Vehicle};

/// Fleet-wide figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// Number of registered vehicles.
    pub total_vehicles: usize,
    /// Vehicles currently in service.
    pub operational: usize,
    /// Vehicles out of service.
    pub non_operational: usize,
    /// Share of operational vehicles, rounded to the nearest percent.
    /// Zero when the fleet is empty.
    pub operational_percent: u32,
    /// Sum of all intervention costs.
    pub total_spend: Decimal,
    /// Number of interventions on record.
    pub intervention_count: usize,
    /// Most recently logged interventions, newest first.
    pub recent: Vec<Intervention>,
}

impl DashboardSummary {
    /// Summarize the fleet, keeping up to `recent` latest interventions.
    ///
    /// "Latest" is by insertion order, not by intervention date.
    #[must_use]
    pub fn compute(vehicles: &[Vehicle], interventions: &[Intervention], recent: usize) -> Self {
        let total_vehicles = vehicles.len();
        let operational = vehicles.iter().filter(|v| v.operational).count();

        Self {
            total_vehicles,
            operational,
            non_operational: total_vehicles - operational,
            operational_percent: percent(operational, total_vehicles),
            total_spend: total_cost(interventions.iter().map(|i| i.cost)),
            intervention_count: interventions.len(),
            recent: interventions.iter().rev().take(recent).cloned().collect(),
        }
    }
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let rounded = (part * 100 + whole / 2) / whole;
    u32::try_from(rounded).unwrap_or(100)
}
