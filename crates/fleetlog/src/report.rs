//! Spending reports.
//!
//! A report filters the intervention log by vehicle and by a trailing
//! calendar period, then sums costs overall and per vehicle name.

use std::str::FromStr;

use chrono::{Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::Intervention;

/// Trailing window a report covers, counted back from today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// No date restriction.
    #[default]
    All,
    /// The last calendar month.
    Month,
    /// The last three calendar months.
    Quarter,
    /// The last calendar year.
    Year,
}

impl Period {
    /// First day included in the window ending on `today`.
    ///
    /// Returns `None` for [`Period::All`]. Offsets that land past the end of
    /// a shorter month are clamped to its last day (31 March minus one month
    /// is 29 February in a leap year).
    #[must_use]
    pub fn start(self, today: NaiveDate) -> Option<NaiveDate> {
        let months = match self {
            Self::All => return None,
            Self::Month => 1,
            Self::Quarter => 3,
            Self::Year => 12,
        };
        Some(
            today
                .checked_sub_months(Months::new(months))
                .unwrap_or(NaiveDate::MIN),
        )
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Month => write!(f, "month"),
            Self::Quarter => write!(f, "quarter"),
            Self::Year => write!(f, "year"),
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            other => Err(format!("unknown period: {other}")),
        }
    }
}

/// Which interventions a report includes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// Only interventions on this vehicle id.
    pub vehicle_id: Option<String>,
    /// Only interventions dated within this window.
    pub period: Period,
}

impl ReportFilter {
    /// Filter on a period, any vehicle.
    #[must_use]
    pub fn for_period(period: Period) -> Self {
        Self {
            vehicle_id: None,
            period,
        }
    }

    /// Restrict to a single vehicle.
    #[must_use]
    pub fn vehicle(mut self, vehicle_id: impl Into<String>) -> Self {
        self.vehicle_id = Some(vehicle_id.into());
        self
    }
}

/// Spending attributed to one vehicle name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleSpend {
    /// Name recorded on the interventions.
    pub vehicle_name: String,
    /// Summed cost.
    pub amount: Decimal,
}

/// Result of a spending report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpendingReport {
    /// Period the report covers.
    pub period: Period,
    /// First included day, if the period is bounded.
    pub since: Option<NaiveDate>,
    /// Vehicle the report was restricted to.
    pub vehicle_id: Option<String>,
    /// Number of interventions included.
    pub count: usize,
    /// Sum of costs over the included interventions.
    pub total: Decimal,
    /// Per-vehicle-name sums, in order of first appearance.
    pub by_vehicle: Vec<VehicleSpend>,
}

impl SpendingReport {
    /// Build a report over `interventions` as of `today`.
    ///
    /// Groups are keyed by the recorded vehicle name, so two vehicles that
    /// shared a name when their interventions were logged land in one group.
    /// Sums saturate at `Decimal::MAX`.
    #[must_use]
    pub fn build(interventions: &[Intervention], filter: &ReportFilter, today: NaiveDate) -> Self {
        let since = filter.period.start(today);

        let mut count = 0;
        let mut total = Decimal::ZERO;
        let mut by_vehicle: Vec<VehicleSpend> = Vec::new();

        let included = interventions.iter().filter(|i| {
            filter
                .vehicle_id
                .as_deref()
                .map_or(true, |id| i.vehicle_id == id)
                && since.map_or(true, |start| i.date >= start)
        });

        for intervention in included {
            count += 1;
            total = total.saturating_add(intervention.cost);
            match by_vehicle
                .iter_mut()
                .find(|g| g.vehicle_name == intervention.vehicle_name)
            {
                Some(group) => group.amount = group.amount.saturating_add(intervention.cost),
                None => by_vehicle.push(VehicleSpend {
                    vehicle_name: intervention.vehicle_name.clone(),
                    amount: intervention.cost,
                }),
            }
        }

        Self {
            period: filter.period,
            since,
            vehicle_id: filter.vehicle_id.clone(),
            count,
            total,
            by_vehicle,
        }
    }

    /// Whether no intervention matched the filter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Bar lengths for a chart `width` characters wide.
    ///
    /// The largest group gets the full width; the others are scaled
    /// proportionally and rounded. Groups with no spending get no bar.
    #[must_use]
    pub fn bar_lengths(&self, width: usize) -> Vec<usize> {
        let max = self
            .by_vehicle
            .iter()
            .map(|g| g.amount)
            .max()
            .unwrap_or(Decimal::ZERO);
        if max <= Decimal::ZERO {
            return vec![0; self.by_vehicle.len()];
        }

        let width = Decimal::from(width);
        self.by_vehicle
            .iter()
            .map(|g| {
                (g.amount / max * width)
                    .round()
                    .to_usize()
                    .unwrap_or(0)
            })
            .collect()
    }
}
