//! printcost - track 3D print jobs and their cost from the command line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use printcost::config::{fallback_store_path, ServerConfig};
use printcost::report::{density_hint, density_placeholder, money, render_materials, render_table};
use printcost::{
    open_gateway, AutoBackup, JobField, JobUpdate, Ledger, SettingsField, SettingsUpdate,
};

/// Track 3D print jobs and estimate their cost and selling price.
#[derive(Parser, Debug)]
#[command(name = "printcost")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding data.json and its backups
    #[arg(short, long, env = "PRINTCOST_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Local store used when the data directory is unavailable
    #[arg(long, env = "PRINTCOST_FALLBACK")]
    fallback: Option<PathBuf>,

    /// Disable the local fallback store
    #[arg(long)]
    no_fallback: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show all jobs with their costs
    List,

    /// Show one job in detail
    Show { id: u64 },

    /// Add a job
    Add {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        material: Option<String>,
        /// Filament price per kilogram
        #[arg(long)]
        price_kg: Option<String>,
        /// Filament weight in grams
        #[arg(long)]
        weight_g: Option<String>,
        /// Print time as H:MM
        #[arg(long)]
        time: Option<String>,
        /// Linear density override in g/m
        #[arg(long)]
        density: Option<String>,
    },

    /// Copy a job under a new id
    Duplicate { id: u64 },

    /// Delete a job
    Delete { id: u64 },

    /// Reset a job's fields, keeping its id
    Clear { id: u64 },

    /// Set one field of a job (name, material, priceKg, weightG, printTime, customDensity)
    Set {
        id: u64,
        field: String,
        /// New value; omit to clear the density override
        value: Option<String>,
    },

    /// Change global settings
    Settings {
        /// Printer power draw in watts
        #[arg(long)]
        printer_power: Option<String>,
        /// Electricity price per kWh
        #[arg(long)]
        electricity_price: Option<String>,
        /// Currency symbol; empty restores the default
        #[arg(long)]
        currency: Option<String>,
    },

    /// Export settings and jobs as JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace settings and jobs with exported JSON
    Import {
        /// Input file, or - for stdin
        input: PathBuf,
    },

    /// List preset materials
    Materials,

    /// Host the data directory: validate credentials and take periodic backups
    Daemon {
        #[arg(long, env = "PRINTCOST_USERNAME", default_value = "admin")]
        username: String,
        #[arg(long, env = "PRINTCOST_PASSWORD", default_value = "admin", hide_env_values = true)]
        password: String,
        /// Permit the default admin/admin credentials
        #[arg(long, env = "PRINTCOST_ALLOW_DEFAULT_CREDENTIALS")]
        allow_default_credentials: bool,
        /// Seconds between automatic backups
        #[arg(long, default_value = "3600")]
        backup_interval: u64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let fallback = if args.no_fallback {
        None
    } else {
        match args.fallback.clone() {
            Some(path) => Some(path),
            None => match fallback_store_path() {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("{}", e);
                    None
                }
            },
        }
    };

    match args.command {
        Command::Daemon {
            username,
            password,
            allow_default_credentials,
            backup_interval,
        } => {
            let config = ServerConfig {
                username,
                password,
                allow_default_credentials,
                backup_interval: Duration::from_secs(backup_interval),
            };
            run_daemon(&args.data_dir, &config)
        }
        command => {
            let (gateway, _) = open_gateway(&args.data_dir, fallback.as_deref());
            let mut ledger = Ledger::open(gateway).context("Failed to start the save worker")?;
            if let Some(warning) = ledger.warning() {
                warn!("{}", warning);
            }

            run_command(&mut ledger, command)?;

            ledger.flush();
            if let Some(warning) = ledger.warning() {
                error!("{}", warning);
            }
            Ok(())
        }
    }
}

fn run_daemon(data_dir: &Path, config: &ServerConfig) -> Result<()> {
    if let Err(e) = config.validate() {
        anyhow::bail!("Refusing to start: {}", e);
    }

    let (_, backups) = open_gateway(data_dir, None);
    info!("Serving {}", backups.source().display());
    let timer = AutoBackup::start(backups, config.backup_interval)
        .context("Failed to start the backup timer")?;
    timer.wait();
    Ok(())
}

fn apply_job_input(ledger: &mut Ledger, id: u64, field: JobField, raw: &str) {
    ledger.update_job(id, JobUpdate::from_input(field, raw));
}

fn run_command(ledger: &mut Ledger, command: Command) -> Result<()> {
    match command {
        Command::List => print!("{}", render_table(ledger.state())),

        Command::Show { id } => {
            let (Some(job), Some(costs)) = (ledger.job(id), ledger.costs(id)) else {
                anyhow::bail!("No job with id {}", id);
            };
            let symbol = &ledger.settings().currency_symbol;
            println!("Job {}: {}", job.id, job.name);
            println!("  Material:        {} (override placeholder {})", job.material, density_placeholder(job));
            println!("  {}", density_hint(job));
            println!("  Print time:      {} ({} min)", job.print_time, costs.time_minutes);
            match costs.filament_length {
                Some(length) => println!("  Filament length: {} m", length),
                None => println!("  Filament length: -"),
            }
            println!("  Material price:  {}", money(costs.material_price, symbol));
            println!("  Electricity:     {}", money(costs.electricity_cost, symbol));
            println!("  Total cost:      {}", money(costs.total_cost, symbol));
            println!("  Selling price:   {}", money(costs.selling_price, symbol));
        }

        Command::Add {
            name,
            material,
            price_kg,
            weight_g,
            time,
            density,
        } => {
            let id = ledger.add_job();
            let fields = [
                (JobField::Name, name),
                (JobField::Material, material),
                (JobField::PriceKg, price_kg),
                (JobField::WeightG, weight_g),
                (JobField::PrintTime, time),
                (JobField::CustomDensity, density),
            ];
            for (field, value) in fields {
                if let Some(value) = value {
                    apply_job_input(ledger, id, field, &value);
                }
            }
            println!("{}", id);
        }

        Command::Duplicate { id } => match ledger.duplicate_job(id) {
            Some(new_id) => println!("{}", new_id),
            None => warn!("No job with id {}", id),
        },

        Command::Delete { id } => {
            if !ledger.delete_job(id) {
                warn!("No job with id {}", id);
            }
        }

        Command::Clear { id } => {
            if !ledger.clear_job(id) {
                warn!("No job with id {}", id);
            }
        }

        Command::Set { id, field, value } => {
            let field: JobField = field.parse()?;
            let value = value.unwrap_or_default();
            let Some(costs) = ledger.update_job(id, JobUpdate::from_input(field, &value)) else {
                anyhow::bail!("No job with id {}", id);
            };
            info!(
                "Job {}: total {}, selling price {}",
                id, costs.total_cost, costs.selling_price
            );
        }

        Command::Settings {
            printer_power,
            electricity_price,
            currency,
        } => {
            let fields = [
                (SettingsField::PrinterPower, printer_power),
                (SettingsField::ElectricityPrice, electricity_price),
                (SettingsField::CurrencySymbol, currency),
            ];
            for (field, value) in fields {
                if let Some(value) = value {
                    ledger.update_settings(SettingsUpdate::from_input(field, &value));
                }
            }
            let settings = ledger.settings();
            println!(
                "Printer power: {} W, electricity: {} per kWh, currency: {}",
                settings.printer_power, settings.electricity_price, settings.currency_symbol
            );
        }

        Command::Export { output } => {
            let json = ledger.export()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Exported to {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Command::Import { input } => {
            let text = if input.as_os_str() == "-" {
                std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?
            } else {
                std::fs::read_to_string(&input)
                    .with_context(|| format!("Failed to read {}", input.display()))?
            };
            ledger
                .import(&text)
                .with_context(|| format!("Import of {} rejected", input.display()))?;
            info!("Data imported successfully");
        }

        Command::Materials => print!("{}", render_materials()),

        Command::Daemon { .. } => anyhow::bail!("The daemon does not run against an open ledger"),
    }

    Ok(())
}
