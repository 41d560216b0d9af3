//! `fleetlog` - CLI for the fleet maintenance tracker
//!
//! This binary parses the command line, loads configuration, opens the fleet
//! database and dispatches to one handler per command.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;

use fleetlog::cli::{
    AddInterventionCommand, AddVehicleCommand, Cli, Command, ConfigCommand, InterventionCommand,
    OutputFormat, ReportCommand, VehicleCommand,
};
use fleetlog::model::total_cost;
use fleetlog::{
    init_logging, render, Config, Fleet, NewIntervention, NewVehicle, ReportFilter, Storage,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    match cli.command {
        Command::Vehicle(cmd) => handle_vehicle(&config, cmd),
        Command::Intervention(cmd) => handle_intervention(&config, cmd),
        Command::Report(cmd) => handle_report(&config, &cmd),
        Command::Dashboard(cmd) => handle_dashboard(&config, cmd.json),
        Command::Reset(cmd) => handle_reset(&config, cmd.yes),
        Command::About => handle_about(&config),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_fleet(config: &Config) -> Result<Fleet<Storage>> {
    let path = config.database_path();
    let storage = Storage::open(&path)
        .with_context(|| format!("failed to open fleet database at {}", path.display()))?;
    Ok(Fleet::load(storage)?)
}

fn handle_vehicle(config: &Config, cmd: VehicleCommand) -> Result<()> {
    let mut fleet = open_fleet(config)?;
    let display = &config.display;

    match cmd {
        VehicleCommand::Add(AddVehicleCommand {
            name,
            vehicle_type,
            registration,
            out_of_service,
        }) => {
            let vehicle = fleet.add_vehicle(
                NewVehicle::new(name, vehicle_type, registration).operational(!out_of_service),
            )?;
            println!("Added vehicle {} ({})", vehicle.name, vehicle.id);
        }
        VehicleCommand::List { format } => match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(fleet.vehicles())?),
            OutputFormat::Table => print!("{}", render::vehicle_table(fleet.vehicles())),
            OutputFormat::Plain => print!("{}", render::vehicle_lines(fleet.vehicles())),
        },
        VehicleCommand::Show { id, json } => {
            let Some(vehicle) = fleet.vehicle(&id) else {
                bail!("no vehicle with id {id}");
            };
            let interventions: Vec<_> = fleet.interventions_for(&id).collect();
            if json {
                let details = serde_json::json!({
                    "vehicle": vehicle,
                    "interventions": interventions,
                    "total": total_cost(interventions.iter().map(|i| i.cost)),
                });
                println!("{}", serde_json::to_string_pretty(&details)?);
            } else {
                print!(
                    "{}",
                    render::vehicle_details(vehicle, &interventions, display)
                );
            }
        }
        VehicleCommand::Remove { id } => {
            if fleet.remove_vehicle(&id)? {
                println!("Removed vehicle {id}");
            } else {
                bail!("no vehicle with id {id}");
            }
        }
    }
    Ok(())
}

fn handle_intervention(config: &Config, cmd: InterventionCommand) -> Result<()> {
    let mut fleet = open_fleet(config)?;
    let display = &config.display;

    match cmd {
        InterventionCommand::Add(AddInterventionCommand {
            vehicle,
            date,
            technician,
            description,
            cost,
        }) => {
            let intervention = fleet.add_intervention(NewIntervention {
                vehicle_id: vehicle,
                date: Some(date),
                technician,
                description,
                cost: Some(cost),
            })?;
            println!(
                "Logged intervention {} on {} ({})",
                intervention.id,
                intervention.vehicle_name,
                render::amount(intervention.cost, display)
            );
        }
        InterventionCommand::List { vehicle, format } => {
            let selected: Vec<_> = match &vehicle {
                Some(id) => fleet.interventions_for(id).collect(),
                None => fleet.interventions().iter().collect(),
            };
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&selected)?),
                OutputFormat::Table => {
                    print!("{}", render::intervention_table(selected, display));
                }
                OutputFormat::Plain => {
                    print!("{}", render::intervention_lines(selected, display));
                }
            }
        }
        InterventionCommand::Remove { id } => {
            if fleet.remove_intervention(&id)? {
                println!("Removed intervention {id}");
            } else {
                bail!("no intervention with id {id}");
            }
        }
    }
    Ok(())
}

fn handle_report(config: &Config, cmd: &ReportCommand) -> Result<()> {
    let fleet = open_fleet(config)?;

    let filter = ReportFilter {
        vehicle_id: cmd.vehicle.clone(),
        period: cmd
            .period
            .map_or(config.report.default_period, Into::into),
    };
    let report = fleet.report(&filter, Local::now().date_naive());

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print!("{}", render::report_table(&report, &config.display)),
        OutputFormat::Plain => print!("{}", render::report_chart(&report, &config.display)),
    }
    Ok(())
}

fn handle_dashboard(config: &Config, json: bool) -> Result<()> {
    let fleet = open_fleet(config)?;
    let summary = fleet.dashboard(config.dashboard.recent_interventions);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render::dashboard(&summary, &config.display));
    }
    Ok(())
}

fn handle_reset(config: &Config, yes: bool) -> Result<()> {
    if !yes {
        println!("This will permanently delete every vehicle and intervention.");
        println!("Use --yes to confirm.");
        return Ok(());
    }

    let mut fleet = open_fleet(config)?;
    let vehicles = fleet.vehicles().len();
    let interventions = fleet.interventions().len();
    fleet.reset()?;
    println!("Deleted {vehicles} vehicle(s) and {interventions} intervention(s).");
    Ok(())
}

fn handle_about(config: &Config) -> Result<()> {
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    println!();

    let path = config.database_path();
    let storage = Storage::open(&path)
        .with_context(|| format!("failed to open fleet database at {}", path.display()))?;
    let stats = storage.stats()?;

    println!("Database:        {}", path.display());
    println!("Schema version:  {}", stats.schema_version);
    println!("Size:            {} bytes", stats.db_size_bytes);
    for slot in &stats.slots {
        let label = format!("{}:", slot.slot);
        match slot.updated_at {
            Some(updated_at) if slot.present => println!(
                "Slot {label:<14} {} bytes, updated {}",
                slot.payload_bytes,
                updated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
            ),
            _ => println!("Slot {label:<14} empty"),
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:     {}", config.database_path().display());
                println!();
                println!("[Display]");
                println!("  Currency:          {}", config.display.currency);
                println!("  Date format:       {}", config.display.date_format);
                println!("  Chart width:       {}", config.display.chart_width);
                println!();
                println!("[Dashboard]");
                println!(
                    "  Recent items:      {}",
                    config.dashboard.recent_interventions
                );
                println!();
                println!("[Report]");
                println!("  Default period:    {}", config.report.default_period);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_file(&path)
                .with_context(|| format!("configuration at {} is invalid", path.display()))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
