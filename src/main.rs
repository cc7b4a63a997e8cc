use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use u_seating::export;
use u_seating::generator::{generate_sample, DemandGenerator};
use u_seating::loader::{load_customers_file, load_seating_file, write_customers_csv};
use u_seating::models::{AncillaryCap, ConflictReporting, SimulationOptions};
use u_seating::scheduler::{Simulation, SimulationKpi};

#[derive(Parser)]
#[command(
    name = "u-seating",
    about = "Tick-driven restaurant seat allocation",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a seating simulation and write its frames
    Run {
        /// Customer CSV file
        #[arg(short, long)]
        customers: PathBuf,
        /// Seat configuration JSON file
        #[arg(short, long)]
        seats: PathBuf,
        /// Cap on shared baby chairs (overrides the seat file)
        #[arg(long)]
        baby_chairs: Option<u32>,
        /// Cap on shared wheelchair spots (overrides the seat file)
        #[arg(long)]
        wheelchairs: Option<u32>,
        /// When to report families that could not be seated
        #[arg(long, value_enum, default_value_t = Conflicts::First)]
        conflicts: Conflicts,
        /// Stop after this tick even if families are still present
        #[arg(long)]
        max_ticks: Option<u64>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Summary)]
        format: Format,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate a customer CSV file
    Generate {
        /// Number of families
        #[arg(short = 'n', long, default_value_t = 20)]
        count: u32,
        /// Random seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Evenly spaced fixed demand instead of random demand
        #[arg(long)]
        sample: bool,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Conflicts {
    /// Once per family, on its arrival tick
    First,
    /// On every tick the family stays unseated
    Every,
}

impl From<Conflicts> for ConflictReporting {
    fn from(c: Conflicts) -> Self {
        match c {
            Conflicts::First => ConflictReporting::FirstOnly,
            Conflicts::Every => ConflictReporting::EveryTick,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Frames as JSON
    Json,
    /// Event messages, one per line
    Log,
    /// Event table
    Csv,
    /// KPI summary
    Summary,
}

const DEFAULT_LOG: &str = "u_seating=info";

struct RunArgs {
    customers: PathBuf,
    seats: PathBuf,
    baby_chairs: Option<u32>,
    wheelchairs: Option<u32>,
    options: SimulationOptions,
    format: Format,
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            customers,
            seats,
            baby_chairs,
            wheelchairs,
            conflicts,
            max_ticks,
            format,
            output,
        } => {
            let mut options = SimulationOptions::new().with_conflict_reporting(conflicts.into());
            if let Some(t) = max_ticks {
                options = options.with_max_ticks(t);
            }
            run(RunArgs {
                customers,
                seats,
                baby_chairs,
                wheelchairs,
                options,
                format,
                output,
            })
        }
        Commands::Generate {
            count,
            seed,
            sample,
            output,
        } => generate(count, seed, sample, output.as_deref()),
    }
}

/// `RUST_LOG` directives when set and valid, `u_seating=info` otherwise.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG))
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let mut config = load_seating_file(&args.seats)
        .with_context(|| format!("loading seats from {}", args.seats.display()))?;
    if let Some(max) = args.baby_chairs {
        config.baby_chairs = AncillaryCap::Limited(max);
    }
    if let Some(max) = args.wheelchairs {
        config.wheelchairs = AncillaryCap::Limited(max);
    }

    let report = load_customers_file(&args.customers)
        .with_context(|| format!("loading customers from {}", args.customers.display()))?;
    if !report.is_clean() {
        warn!(count = report.rejected_count(), "customer records rejected");
    }

    let outcome = Simulation::new(&config, report.families)?
        .with_options(args.options)
        .run();

    if !outcome.unseated.is_empty() {
        let ids: Vec<String> = outcome
            .unseated
            .iter()
            .map(|f| f.family_id.to_string())
            .collect();
        warn!(families = %ids.join(","), "families never seated");
    }

    let mut out = open_output(args.output.as_deref())?;
    match args.format {
        Format::Json => writeln!(out, "{}", export::to_json(&outcome.frames)?)?,
        Format::Log => write!(out, "{}", export::to_text_log(&outcome.frames))?,
        Format::Csv => export::write_events_csv(&outcome.frames, &mut out)?,
        Format::Summary => {
            let kpi = SimulationKpi::calculate(&outcome.frames);
            write_summary(&mut out, &kpi, report.rejected.len() + outcome.rejected.len())?;
        }
    }
    out.flush()?;
    Ok(())
}

fn write_summary(out: &mut dyn Write, kpi: &SimulationKpi, rejected: usize) -> io::Result<()> {
    writeln!(out, "End time:        {}", kpi.end_time)?;
    writeln!(out, "Arrivals:        {}", kpi.arrivals)?;
    writeln!(out, "Seated:          {}", kpi.seated)?;
    writeln!(out, "Departed:        {}", kpi.departed)?;
    writeln!(out, "Never seated:    {}", kpi.never_seated)?;
    writeln!(out, "Rejected:        {}", rejected)?;
    writeln!(out, "Waiting events:  {}", kpi.conflict_events)?;
    writeln!(out, "Avg wait:        {:.2}", kpi.avg_wait)?;
    writeln!(out, "Max wait:        {}", kpi.max_wait)?;
    writeln!(out, "Peak queue:      {}", kpi.peak_queue)?;
    writeln!(out, "Avg utilization: {:.1}%", kpi.avg_utilization * 100.0)?;

    let mut seats: Vec<(&String, &f64)> = kpi.utilization_by_seat.iter().collect();
    seats.sort_by(|a, b| a.0.cmp(b.0));
    for (id, u) in seats {
        writeln!(out, "  {:<8} {:.1}%", id, u * 100.0)?;
    }
    Ok(())
}

fn generate(count: u32, seed: u64, sample: bool, output: Option<&Path>) -> anyhow::Result<()> {
    let families = if sample {
        generate_sample(count)
    } else {
        let mut rng = StdRng::seed_from_u64(seed);
        DemandGenerator::new().generate(count, &mut rng)
    };
    info!(count = families.len(), sample, "generated customers");

    let out = open_output(output)?;
    write_customers_csv(&families, out)?;
    Ok(())
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => {
            let file =
                File::create(p).with_context(|| format!("creating {}", p.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout())),
    })
}
