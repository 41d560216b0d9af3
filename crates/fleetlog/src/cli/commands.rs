//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::report::Period;

/// Vehicle registry commands.
#[derive(Debug, Subcommand)]
pub enum VehicleCommand {
    /// Register a vehicle
    Add(AddVehicleCommand),

    /// List registered vehicles
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show a vehicle and its interventions
    Show {
        /// Vehicle id
        id: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Remove a vehicle that has no interventions
    Remove {
        /// Vehicle id
        id: String,
    },
}

/// Arguments for registering a vehicle.
#[derive(Debug, Args)]
pub struct AddVehicleCommand {
    /// Display name
    #[arg(short, long)]
    pub name: String,

    /// Kind of vehicle (e.g. "Truck", "4x4")
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub vehicle_type: String,

    /// Registration plate
    #[arg(short, long)]
    pub registration: String,

    /// Register the vehicle as out of service
    #[arg(long)]
    pub out_of_service: bool,
}

/// Intervention log commands.
#[derive(Debug, Subcommand)]
pub enum InterventionCommand {
    /// Log a maintenance intervention
    Add(AddInterventionCommand),

    /// List logged interventions
    List {
        /// Only interventions on this vehicle
        #[arg(long, value_name = "ID")]
        vehicle: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Remove an intervention
    Remove {
        /// Intervention id
        id: String,
    },
}

/// Arguments for logging an intervention.
#[derive(Debug, Args)]
pub struct AddInterventionCommand {
    /// Id of the vehicle worked on
    #[arg(long, value_name = "ID")]
    pub vehicle: String,

    /// Day of the intervention (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: NaiveDate,

    /// Who carried out the work
    #[arg(short, long)]
    pub technician: Option<String>,

    /// What was done
    #[arg(short = 'D', long)]
    pub description: String,

    /// Amount spent
    #[arg(long, allow_hyphen_values = true)]
    pub cost: Decimal,
}

/// Report command arguments.
#[derive(Debug, Args)]
pub struct ReportCommand {
    /// Only interventions on this vehicle
    #[arg(long, value_name = "ID")]
    pub vehicle: Option<String>,

    /// Trailing period to cover (defaults to `report.default_period`)
    #[arg(short, long, value_enum)]
    pub period: Option<PeriodArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Dashboard command arguments.
#[derive(Debug, Args)]
pub struct DashboardCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Reset command arguments.
#[derive(Debug, Args)]
pub struct ResetCommand {
    /// Confirm deletion of every vehicle and intervention
    #[arg(short, long)]
    pub yes: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Report period argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PeriodArg {
    /// No date restriction
    All,
    /// The last month
    Month,
    /// The last three months
    Quarter,
    /// The last year
    Year,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::All => Self::All,
            PeriodArg::Month => Self::Month,
            PeriodArg::Quarter => Self::Quarter,
            PeriodArg::Year => Self::Year,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
