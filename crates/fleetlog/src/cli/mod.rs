//! Command-line interface for fleetlog.
//!
//! This module provides the CLI structure for the `fleetlog` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddInterventionCommand, AddVehicleCommand, ConfigCommand, DashboardCommand,
    InterventionCommand, OutputFormat, PeriodArg, ReportCommand, ResetCommand, VehicleCommand,
};

use crate::logging::Verbosity;

/// fleetlog - Track vehicles and their maintenance spending
///
/// Keeps a registry of vehicles and a log of maintenance interventions,
/// and reports what the fleet costs to keep running.
#[derive(Debug, Parser)]
#[command(name = "fleetlog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the vehicle registry
    #[command(subcommand)]
    Vehicle(VehicleCommand),

    /// Manage the intervention log
    #[command(subcommand)]
    Intervention(InterventionCommand),

    /// Report maintenance spending
    Report(ReportCommand),

    /// Show fleet status at a glance
    Dashboard(DashboardCommand),

    /// Delete all vehicles and interventions
    Reset(ResetCommand),

    /// Show application and storage information
    About,

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rust_decimal::Decimal;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "fleetlog");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(parse(&["fleetlog", "-q", "about"]).verbosity(), Verbosity::Quiet);
        assert_eq!(parse(&["fleetlog", "about"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["fleetlog", "-v", "about"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["fleetlog", "-vv", "about"]).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["fleetlog", "-c", "/custom/config.toml", "dashboard"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_vehicle_add() {
        let cli = parse(&[
            "fleetlog",
            "vehicle",
            "add",
            "--name",
            "Truck 1",
            "--type",
            "Truck",
            "--registration",
            "AB-123",
            "--out-of-service",
        ]);
        match cli.command {
            Command::Vehicle(VehicleCommand::Add(args)) => {
                assert_eq!(args.name, "Truck 1");
                assert_eq!(args.vehicle_type, "Truck");
                assert_eq!(args.registration, "AB-123");
                assert!(args.out_of_service);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_vehicle_list_format() {
        let cli = parse(&["fleetlog", "vehicle", "list", "-f", "json"]);
        assert!(matches!(
            cli.command,
            Command::Vehicle(VehicleCommand::List {
                format: OutputFormat::Json
            })
        ));
    }

    #[test]
    fn test_parse_intervention_add() {
        let cli = parse(&[
            "fleetlog",
            "intervention",
            "add",
            "--vehicle",
            "17",
            "--date",
            "2024-06-05",
            "--description",
            "Oil change",
            "--cost",
            "45.50",
        ]);
        match cli.command {
            Command::Intervention(InterventionCommand::Add(args)) => {
                assert_eq!(args.vehicle, "17");
                assert_eq!(args.date.to_string(), "2024-06-05");
                assert!(args.technician.is_none());
                assert_eq!(args.cost, "45.50".parse::<Decimal>().unwrap());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_negative_cost_reaches_validation() {
        let cli = parse(&[
            "fleetlog",
            "intervention",
            "add",
            "--vehicle",
            "17",
            "--date",
            "2024-06-05",
            "--description",
            "Refund",
            "--cost",
            "-5",
        ]);
        match cli.command {
            Command::Intervention(InterventionCommand::Add(args)) => {
                assert_eq!(args.cost, Decimal::from(-5));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_intervention_bad_date() {
        let result = Cli::try_parse_from([
            "fleetlog",
            "intervention",
            "add",
            "--vehicle",
            "17",
            "--date",
            "05/06/2024",
            "--description",
            "Oil",
            "--cost",
            "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_report() {
        let cli = parse(&["fleetlog", "report", "--period", "quarter", "--vehicle", "3"]);
        match cli.command {
            Command::Report(args) => {
                assert_eq!(args.period, Some(PeriodArg::Quarter));
                assert_eq!(args.vehicle.as_deref(), Some("3"));
                assert_eq!(args.format, OutputFormat::Plain);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_report_defaults_period_to_config() {
        let cli = parse(&["fleetlog", "report"]);
        assert!(matches!(
            cli.command,
            Command::Report(ReportCommand { period: None, .. })
        ));
    }

    #[test]
    fn test_parse_reset_requires_flag_for_confirmation() {
        let cli = parse(&["fleetlog", "reset"]);
        assert!(matches!(cli.command, Command::Reset(ResetCommand { yes: false })));

        let cli = parse(&["fleetlog", "reset", "--yes"]);
        assert!(matches!(cli.command, Command::Reset(ResetCommand { yes: true })));
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = parse(&["fleetlog", "config", "validate", "--file", "/tmp/f.toml"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }
}
