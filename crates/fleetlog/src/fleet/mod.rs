//! The fleet repository.
//!
//! [`Fleet`] owns the vehicle and intervention collections and is the only
//! component that talks to the store. It is built from an injected
//! [`SlotStore`], reads both slots once, and writes a whole slot back after
//! every accepted mutation. A mutation is applied to a copy of the
//! collection first, so a failed write leaves the in-memory state untouched.
//!
//! Concurrent sessions are last-write-wins at collection granularity.

pub mod integrity;
mod interventions;
mod vehicles;

use chrono::{NaiveDate, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use crate::dashboard::DashboardSummary;
use crate::error::{Error, Result};
use crate::model::{Intervention, Vehicle};
use crate::report::{ReportFilter, SpendingReport};
use crate::storage::{Slot, SlotStore};

/// Repository over the two fleet collections.
#[derive(Debug)]
pub struct Fleet<S> {
    store: S,
    vehicles: Vec<Vehicle>,
    interventions: Vec<Intervention>,
}

impl<S: SlotStore> Fleet<S> {
    /// Load the fleet from a store.
    ///
    /// # Errors
    ///
    /// Returns an error if a slot cannot be read or decoded.
    pub fn load(store: S) -> Result<Self> {
        let vehicles = read_collection(&store, Slot::Vehicles)?;
        let interventions = read_collection(&store, Slot::Interventions)?;
        debug!(
            "Loaded {} vehicle(s) and {} intervention(s)",
            vehicles.len(),
            interventions.len()
        );
        Ok(Self {
            store,
            vehicles,
            interventions,
        })
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the repository and hand back the store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Spending report over the intervention log.
    #[must_use]
    pub fn report(&self, filter: &ReportFilter, today: NaiveDate) -> SpendingReport {
        SpendingReport::build(&self.interventions, filter, today)
    }

    /// Dashboard summary with up to `recent` latest interventions.
    #[must_use]
    pub fn dashboard(&self, recent: usize) -> DashboardSummary {
        DashboardSummary::compute(&self.vehicles, &self.interventions, recent)
    }

    /// Delete both collections.
    ///
    /// Both slots are removed in one storage transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written; the repository is
    /// left unchanged in that case.
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear_slots(&Slot::ALL)?;
        info!(
            "Reset fleet ({} vehicle(s), {} intervention(s) removed)",
            self.vehicles.len(),
            self.interventions.len()
        );
        self.vehicles.clear();
        self.interventions.clear();
        Ok(())
    }

    fn persist<T: Serialize>(&self, slot: Slot, items: &[T]) -> Result<()> {
        let payload = serde_json::to_string(items)?;
        self.store.write_slot(slot, &payload)
    }
}

fn read_collection<S: SlotStore, T: DeserializeOwned>(store: &S, slot: Slot) -> Result<Vec<T>> {
    match store.read_slot(slot)? {
        None => Ok(Vec::new()),
        Some(payload) => {
            serde_json::from_str(&payload).map_err(|source| Error::CorruptSlot {
                slot: slot.key(),
                source,
            })
        }
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
