use crate::aircraft::SubtypeResolver;
use crate::config::{FlightConfig, SubtypeMappings, WorkpackageConfig};
use crate::error::GenerateError;
use crate::maintenance::MaintenancePlanner;
use crate::maintenance::workpackage::{FixedCount, PackageCountSource, WorkPackage};
use crate::store::{FlightStore, JsonFileStore};
use crate::turnaround::generator::{TurnaroundDuration, TurnaroundGenerator, TurnaroundRequest};
use crate::turnaround::pairing::TurnaroundPair;
use chrono::Local;
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::path::PathBuf;
use std::str::FromStr;
use tabled::Tabled;
use tabled::settings::{Alignment, Style};
use tracing_subscriber::EnvFilter;

mod aircraft;
mod config;
mod error;
mod flight;
mod maintenance;
mod store;
mod time;
mod turnaround;

#[derive(Parser)]
#[command(about = "Seed turnaround flights and maintenance work packages")]
struct Args {
    /// Configuration profile (test, uat, prod)
    #[arg(short, long, env = "TESTING_ENVIRONMENT", default_value = "test")]
    environment: String,

    /// Directory holding the JSON configuration documents
    #[arg(long, value_name = "DIR", default_value = "config")]
    config_dir: PathBuf,

    /// Directory the seed files are written to
    #[arg(long, value_name = "DIR", default_value = "seed")]
    seed_dir: PathBuf,

    /// Seed for the random source, for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate arrival/departure pairs at one station
    Flights {
        /// Turnaround station, e.g. HEL, AMD, SIN, AMS
        #[arg(short, long)]
        location: Option<String>,
        /// Days from today the turnarounds start on
        #[arg(long, allow_hyphen_values = true)]
        day_offset: Option<i64>,
        /// Days on the ground, 0 for a same-day turnaround
        #[arg(short, long)]
        duration: Option<String>,
        /// Number of turnarounds
        #[arg(short, long)]
        count: Option<usize>,
    },
    /// Plan work packages into the turnarounds of the flight seed file
    Workpackages {
        /// Packages per turnaround; asked per registration when omitted
        #[arg(short, long)]
        packages: Option<usize>,
    },
}

/// Tab-completes station codes at the location prompt.
#[derive(Helper, Hinter, Highlighter, Validator)]
struct StationHelper {
    stations: Vec<String>,
}

impl Completer for StationHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = line.trim().to_uppercase();
        let candidates = self
            .stations
            .iter()
            .filter(|station| station.starts_with(&prefix))
            .map(|station| Pair {
                display: station.clone(),
                replacement: station.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

struct Prompter {
    editor: Editor<StationHelper, DefaultHistory>,
}

impl Prompter {
    fn new(stations: Vec<String>) -> rustyline::Result<Self> {
        let config = rustyline::Config::builder()
            .completion_type(rustyline::CompletionType::List)
            .build();
        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(StationHelper { stations }));
        Ok(Prompter { editor })
    }

    fn ask(&mut self, prompt: &str) -> rustyline::Result<String> {
        self.editor.readline(prompt).map(|line| line.trim().to_string())
    }

    fn ask_parsed<T: FromStr>(&mut self, prompt: &str) -> rustyline::Result<T> {
        loop {
            let line = self.ask(prompt)?;
            match line.parse() {
                Ok(value) => return Ok(value),
                Err(_) => println!("{}", format!("'{}' is not a valid number", line).yellow()),
            }
        }
    }
}

/// Asks for the package count of each turnaround; an aborted prompt means none.
struct PromptCount {
    prompter: Prompter,
}

impl PackageCountSource for PromptCount {
    fn packages_for(&mut self, pair: &TurnaroundPair<'_>) -> Option<usize> {
        let prompt = format!(
            "Enter number of workpackages for Registration {}: ",
            pair.registration()
        );
        match self.prompter.ask_parsed(&prompt) {
            Ok(count) => Some(count),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => None,
            Err(err) => {
                println!("Error: {:?}", err);
                None
            }
        }
    }
}

#[derive(Tabled)]
struct PackageRow {
    aircraft: String,
    station: String,
    start: String,
    end: String,
    #[tabled(rename = "work orders")]
    work_orders: usize,
    subtype: String,
}

impl From<&WorkPackage> for PackageRow {
    fn from(wp: &WorkPackage) -> Self {
        PackageRow {
            aircraft: wp.aircraft.clone(),
            station: wp.station.clone(),
            start: wp.expected_start_date_time.to_string(),
            end: wp.expected_end_date_time.to_string(),
            work_orders: wp.work_orders.len(),
            subtype: wp.aircraft_sub_type.clone(),
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();
    println!("Using environment: {}", args.environment.bold());

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut store = JsonFileStore::new(&args.seed_dir);

    match args.command {
        Command::Flights {
            location,
            day_offset,
            duration,
            count,
        } => {
            let config = FlightConfig::load(&args.config_dir, &args.environment)?;
            let mut prompter = Prompter::new(config.stations.clone())?;

            let location = match location {
                Some(location) => location,
                None => prompter.ask("Enter turnaround location (e.g., HEL, AMD, SIN, AMS): ")?,
            };
            let day_offset = match day_offset {
                Some(days) => days,
                None => prompter.ask_parsed("Enter after how many days to generate turnaround (0 for today): ")?,
            };
            let duration = match duration {
                Some(duration) => duration,
                None => prompter.ask("Enter turnaround duration (0 for same day, 1 for next day, ...): ")?,
            };
            let count = match count {
                Some(count) => count,
                None => prompter.ask_parsed("How many turnarounds to generate?: ")?,
            };

            let request = TurnaroundRequest {
                location,
                duration: TurnaroundDuration::parse_lenient(&duration),
                count,
                day_offset,
            };
            let mut generator = TurnaroundGenerator::new(config);
            let flights = generator.generate(&mut rng, &request, Local::now().date_naive(), &mut store)?;

            if flights.is_empty() {
                println!("No flights generated.");
            } else {
                let mut table = tabled::Table::new(&flights);
                table.with(Style::rounded());
                table.with(Alignment::left());
                println!("{}", table);
            }
            println!(
                "{}",
                format!("Generated {} flights into {}", flights.len(), store.flights_path().display()).green()
            );
        }
        Command::Workpackages { packages } => {
            let config = WorkpackageConfig::load(&args.config_dir, &args.environment);
            let subtypes = SubtypeResolver::from_file(
                &SubtypeMappings::path(&args.config_dir),
                &config.aircraft_subtypes,
                &args.environment,
            );
            let flights = store.load_flights()?;
            let planner = MaintenancePlanner::new(&config, &subtypes);

            let planned = match packages {
                Some(count) => planner.plan_into(&mut rng, &flights, &mut FixedCount(count), &mut store),
                None => {
                    let mut counts = PromptCount {
                        prompter: Prompter::new(Vec::new())?,
                    };
                    planner.plan_into(&mut rng, &flights, &mut counts, &mut store)
                }
            };

            match planned {
                Ok(workpackages) => {
                    if !workpackages.is_empty() {
                        let rows: Vec<PackageRow> = workpackages.iter().map(PackageRow::from).collect();
                        let mut table = tabled::Table::new(&rows);
                        table.with(Style::rounded());
                        table.with(Alignment::left());
                        println!("{}", table);
                    }
                    println!(
                        "{}",
                        format!(
                            "Successfully wrote {} workpackages to {}",
                            workpackages.len(),
                            store.workpackages_path().display()
                        )
                        .green()
                    );
                }
                Err(GenerateError::Cancelled) => {
                    println!("{}", "Cancelled, workpackages left unchanged".yellow());
                }
                Err(GenerateError::Store(e)) => {
                    tracing::error!(error = %e, "failed to write work packages");
                    println!("{}", format!("Failed to write workpackages: {}", e).red());
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
    Ok(())
}
