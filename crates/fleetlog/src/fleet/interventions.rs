//! Intervention log operations.

use tracing::{info, warn};

use super::{now_millis, Fleet};
use crate::error::Result;
use crate::model::{next_id, Intervention, NewIntervention, UNKNOWN_VEHICLE};
use crate::storage::{Slot, SlotStore};

impl<S: SlotStore> Fleet<S> {
    /// All interventions, in insertion order.
    #[must_use]
    pub fn interventions(&self) -> &[Intervention] {
        &self.interventions
    }

    /// Interventions logged against one vehicle, in insertion order.
    pub fn interventions_for<'a>(
        &'a self,
        vehicle_id: &'a str,
    ) -> impl Iterator<Item = &'a Intervention> + 'a {
        self.interventions
            .iter()
            .filter(move |i| i.vehicle_id == vehicle_id)
    }

    /// Log an intervention.
    ///
    /// The vehicle's current name is copied onto the record. If the vehicle
    /// id does not resolve, the record is still accepted and labelled
    /// [`UNKNOWN_VEHICLE`].
    ///
    /// # Errors
    ///
    /// Returns a validation error if vehicle, date, description or cost is
    /// missing or the cost is negative, or a storage error if the collection
    /// cannot be written.
    pub fn add_intervention(&mut self, candidate: NewIntervention) -> Result<Intervention> {
        if let Err(err) = candidate.validate() {
            warn!("Rejected intervention: {}", err);
            return Err(err);
        }

        let vehicle_name = self.vehicle(&candidate.vehicle_id).map_or_else(
            || {
                warn!(
                    "Vehicle {} not found, recording intervention as '{}'",
                    candidate.vehicle_id, UNKNOWN_VEHICLE
                );
                UNKNOWN_VEHICLE.to_string()
            },
            |v| v.name.clone(),
        );

        let id = next_id(
            self.interventions.iter().map(|i| i.id.as_str()),
            now_millis(),
        );
        let intervention = candidate.into_intervention(id, vehicle_name)?;

        let mut updated = self.interventions.clone();
        updated.push(intervention.clone());
        self.persist(Slot::Interventions, &updated)?;
        self.interventions = updated;

        info!(
            "Logged intervention {} on {} ({})",
            intervention.id, intervention.vehicle_name, intervention.cost
        );
        Ok(intervention)
    }

    /// Remove an intervention.
    ///
    /// Returns `true` if an intervention was removed, `false` if the id was
    /// unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be written.
    pub fn remove_intervention(&mut self, id: &str) -> Result<bool> {
        let updated: Vec<Intervention> = self
            .interventions
            .iter()
            .filter(|i| i.id != id)
            .cloned()
            .collect();
        if updated.len() == self.interventions.len() {
            return Ok(false);
        }

        self.persist(Slot::Interventions, &updated)?;
        self.interventions = updated;

        info!("Removed intervention {}", id);
        Ok(true)
    }
}
