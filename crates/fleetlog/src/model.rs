//! Core record types for fleetlog.
//!
//! This module defines the two persisted entities, [`Vehicle`] and
//! [`Intervention`], the candidate types submitted to create them, and the
//! id generator shared by both collections.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Label stamped on an intervention whose vehicle id does not resolve.
pub const UNKNOWN_VEHICLE: &str = "Unknown vehicle";

/// Largest cost accepted for a single intervention.
///
/// Keeps sums over any realistic log far inside `Decimal`'s range.
pub const MAX_COST: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0); // 10^12

/// A vehicle in the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Unique identifier, assigned at creation.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Kind of vehicle (free text).
    #[serde(rename = "type")]
    pub vehicle_type: String,

    /// Registration plate.
    pub registration_number: String,

    /// Whether the vehicle is currently in service.
    #[serde(default = "default_operational")]
    pub operational: bool,
}

fn default_operational() -> bool {
    true
}

/// A maintenance intervention logged against a vehicle.
///
/// `vehicle_name` is copied from the vehicle when the intervention is
/// created and is never refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intervention {
    /// Unique identifier, assigned at creation.
    pub id: String,

    /// Id of the vehicle this intervention was performed on.
    pub vehicle_id: String,

    /// Name of the vehicle at the time the intervention was recorded.
    pub vehicle_name: String,

    /// Day the intervention took place.
    pub date: NaiveDate,

    /// Who carried out the work.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician: Option<String>,

    /// What was done.
    pub description: String,

    /// Amount spent.
    pub cost: Decimal,
}

/// Fields submitted to register a vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicle {
    /// Display name.
    pub name: String,
    /// Kind of vehicle.
    pub vehicle_type: String,
    /// Registration plate.
    pub registration_number: String,
    /// Whether the vehicle is in service.
    pub operational: bool,
}

impl NewVehicle {
    /// Create an operational vehicle candidate.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        vehicle_type: impl Into<String>,
        registration_number: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            vehicle_type: vehicle_type.into(),
            registration_number: registration_number.into(),
            operational: true,
        }
    }

    /// Set the operational flag.
    #[must_use]
    pub fn operational(mut self, operational: bool) -> Self {
        self.operational = operational;
        self
    }

    /// Check that every required field is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        require_text("type", &self.vehicle_type)?;
        require_text("registration number", &self.registration_number)?;
        Ok(())
    }

    /// Turn the candidate into a stored record with the given id.
    #[must_use]
    pub fn into_vehicle(self, id: String) -> Vehicle {
        Vehicle {
            id,
            name: self.name,
            vehicle_type: self.vehicle_type,
            registration_number: self.registration_number,
            operational: self.operational,
        }
    }
}

/// Fields submitted to log an intervention.
///
/// Required fields are optional here so that a missing value is reported as
/// a validation error rather than being impossible to express.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewIntervention {
    /// Id of the vehicle worked on.
    pub vehicle_id: String,
    /// Day of the intervention.
    pub date: Option<NaiveDate>,
    /// Who carried out the work.
    pub technician: Option<String>,
    /// What was done.
    pub description: String,
    /// Amount spent.
    pub cost: Option<Decimal>,
}

impl NewIntervention {
    /// Check that every required field is present and the cost is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first missing or invalid field.
    pub fn validate(&self) -> Result<()> {
        require_text("vehicle", &self.vehicle_id)?;
        if self.date.is_none() {
            return Err(Error::validation("date", "is required"));
        }
        require_text("description", &self.description)?;
        match self.cost {
            None => Err(Error::validation("cost", "is required")),
            Some(cost) if cost.is_sign_negative() && !cost.is_zero() => {
                Err(Error::validation("cost", "must not be negative"))
            }
            Some(cost) if cost > MAX_COST => Err(Error::validation(
                "cost",
                format!("must not exceed {MAX_COST}"),
            )),
            Some(_) => Ok(()),
        }
    }

    /// Turn a validated candidate into a stored record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the candidate is incomplete.
    pub fn into_intervention(self, id: String, vehicle_name: String) -> Result<Intervention> {
        self.validate()?;
        let (Some(date), Some(cost)) = (self.date, self.cost) else {
            return Err(Error::validation("date", "is required"));
        };
        Ok(Intervention {
            id,
            vehicle_id: self.vehicle_id,
            vehicle_name,
            date,
            technician: self.technician.filter(|t| !t.trim().is_empty()),
            description: self.description,
            cost,
        })
    }
}

fn require_text(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    Ok(())
}

/// Sum of costs, saturating at `Decimal::MAX` instead of panicking.
///
/// Records read back from storage are not re-validated, so a hand-edited
/// slot may hold costs above [`MAX_COST`].
#[must_use]
pub fn total_cost(costs: impl IntoIterator<Item = Decimal>) -> Decimal {
    costs
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Generate a time-based id that is not already taken.
///
/// The id is the millisecond timestamp `now_millis`, bumped past the largest
/// numeric id in `taken` so ids stay unique and increasing even when several
/// records are created within the same millisecond. If the largest id is
/// `i64::MAX` the timestamp gets a numeric suffix instead.
#[must_use]
pub fn next_id<'a>(taken: impl IntoIterator<Item = &'a str>, now_millis: i64) -> String {
    let taken: Vec<&str> = taken.into_iter().collect();
    let newest = taken.iter().filter_map(|id| id.parse::<i64>().ok()).max();

    match newest {
        Some(newest) if newest >= now_millis => match newest.checked_add(1) {
            Some(id) => id.to_string(),
            None => suffixed_id(&taken, now_millis),
        },
        _ => now_millis.to_string(),
    }
}

fn suffixed_id(taken: &[&str], now_millis: i64) -> String {
    let mut suffix = taken.len();
    loop {
        let candidate = format!("{now_millis}-{suffix}");
        if !taken.contains(&candidate.as_str()) {
            return candidate;
        }
        suffix += 1;
    }
}
