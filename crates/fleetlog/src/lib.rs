//! `fleetlog` - A single-user fleet maintenance tracker
//!
//! This library keeps a registry of vehicles and a log of the maintenance
//! interventions performed on them, persists both in a local `SQLite` file,
//! and derives spending reports and a dashboard summary from them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fleet;
pub mod logging;
pub mod model;
pub mod render;
pub mod report;
pub mod storage;

pub use config::Config;
pub use dashboard::DashboardSummary;
pub use error::{Error, Result};
pub use fleet::Fleet;
pub use logging::init_logging;
pub use model::{Intervention, NewIntervention, NewVehicle, Vehicle};
pub use report::{Period, ReportFilter, SpendingReport};
pub use storage::{SlotStore, Storage, StorageStats};
