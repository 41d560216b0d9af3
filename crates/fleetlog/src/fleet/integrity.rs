//! Referential integrity between vehicles and interventions.
//!
//! Interventions reference vehicles by id only; the store has no foreign
//! keys. Every path that deletes a vehicle must go through
//! [`ensure_vehicle_unreferenced`].

use tracing::warn;

use crate::error::{Error, Result};
use crate::model::Intervention;

/// Refuse to proceed if any intervention references `vehicle_id`.
///
/// # Errors
///
/// Returns [`Error::ReferentialIntegrity`] carrying the number of
/// referencing interventions.
pub fn ensure_vehicle_unreferenced(vehicle_id: &str, interventions: &[Intervention]) -> Result<()> {
    let references = interventions
        .iter()
        .filter(|i| i.vehicle_id == vehicle_id)
        .count();

    if references > 0 {
        warn!(
            "Refusing to remove vehicle {}: {} intervention(s) reference it",
            vehicle_id, references
        );
        return Err(Error::referential_integrity(vehicle_id, references));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn intervention(id: &str, vehicle_id: &str) -> Intervention {
        Intervention {
            id: id.to_string(),
            vehicle_id: vehicle_id.to_string(),
            vehicle_name: "Jeep".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            technician: None,
            description: "Brakes".to_string(),
            cost: Decimal::from(10),
        }
    }

    #[test]
    fn test_unreferenced_vehicle_passes() {
        let interventions = vec![intervention("1", "a")];
        assert!(ensure_vehicle_unreferenced("b", &interventions).is_ok());
        assert!(ensure_vehicle_unreferenced("b", &[]).is_ok());
    }

    #[test]
    fn test_referenced_vehicle_counts_references() {
        let interventions = vec![
            intervention("1", "a"),
            intervention("2", "b"),
            intervention("3", "a"),
        ];
        match ensure_vehicle_unreferenced("a", &interventions) {
            Err(Error::ReferentialIntegrity {
                vehicle_id,
                interventions,
            }) => {
                assert_eq!(vehicle_id, "a");
                assert_eq!(interventions, 2);
            }
            other => panic!("expected referential integrity error, got {other:?}"),
        }
    }
}
