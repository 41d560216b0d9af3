//! Vehicle registry operations.

use tracing::{info, warn};

use super::integrity::ensure_vehicle_unreferenced;
use super::{now_millis, Fleet};
use crate::error::Result;
use crate::model::{next_id, NewVehicle, Vehicle};
use crate::storage::{Slot, SlotStore};

impl<S: SlotStore> Fleet<S> {
    /// All vehicles, in insertion order.
    #[must_use]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Look up a vehicle by id.
    #[must_use]
    pub fn vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// Register a vehicle.
    ///
    /// # Errors
    ///
    /// Returns a validation error if name, type or registration number is
    /// empty, or a storage error if the collection cannot be written.
    pub fn add_vehicle(&mut self, candidate: NewVehicle) -> Result<Vehicle> {
        if let Err(err) = candidate.validate() {
            warn!("Rejected vehicle: {}", err);
            return Err(err);
        }

        let id = next_id(self.vehicles.iter().map(|v| v.id.as_str()), now_millis());
        let vehicle = candidate.into_vehicle(id);

        let mut updated = self.vehicles.clone();
        updated.push(vehicle.clone());
        self.persist(Slot::Vehicles, &updated)?;
        self.vehicles = updated;

        info!("Added vehicle {} ({})", vehicle.name, vehicle.id);
        Ok(vehicle)
    }

    /// Remove a vehicle.
    ///
    /// Returns `true` if a vehicle was removed, `false` if the id was unknown.
    ///
    /// # Errors
    ///
    /// Returns a referential integrity error if any intervention references
    /// the vehicle, or a storage error if the collection cannot be written.
    pub fn remove_vehicle(&mut self, id: &str) -> Result<bool> {
        ensure_vehicle_unreferenced(id, &self.interventions)?;

        let updated: Vec<Vehicle> = self
            .vehicles
            .iter()
            .filter(|v| v.id != id)
            .cloned()
            .collect();
        if updated.len() == self.vehicles.len() {
            return Ok(false);
        }

        self.persist(Slot::Vehicles, &updated)?;
        self.vehicles = updated;

        info!("Removed vehicle {}", id);
        Ok(true)
    }
}
