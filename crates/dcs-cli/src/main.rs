//! Control-surface CLI for the drone conflict-detection system.
//!
//! Session state lives in a data directory as CSV/JSON files; every
//! command loads the session, applies one core operation, and saves.

mod sim;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dcs_core::{DetectionConfig, LifecycleController};
use dcs_store::Session;

/// Drone mission admission and conflict detection.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Session data directory
    #[arg(long, default_value = "data", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a fresh population of simulated missions (replaces the session)
    Generate {
        /// Number of missions to generate
        #[arg(long, default_value_t = 1000)]
        count: usize,
    },
    /// Ingest missions from a mission CSV file into the registry
    Ingest { file: PathBuf },
    /// Generate a safe primary candidate
    GeneratePrimary,
    /// Generate a primary candidate that crosses many active missions
    ConflictCase {
        /// Maximum number of missions to cross
        #[arg(long, default_value_t = 30)]
        conflicts: usize,
    },
    /// Load a primary candidate from a mission CSV file
    UploadPrimary { file: PathBuf },
    /// Drop the unresolved primary candidate
    ClearPrimary,
    /// Run conflict detection for the primary against the airspace
    Detect {
        /// Minimum safe 3D separation in meters
        #[arg(long, default_value_t = 100.0)]
        safety_distance: f64,
        /// Maximum temporal proximity in seconds
        #[arg(long, default_value_t = 60.0)]
        time_threshold: f64,
    },
    /// Accept the primary mission into the airspace
    Accept,
    /// Reject the primary mission
    Reject,
    /// Abort one or more missions by id
    Abort {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Abort every mission in the last detection result
    AbortConflicted,
    /// Show registry statistics
    Stats {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Delete all session files
    Reset,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dcs_core=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let session = Session::new(&cli.data_dir);

    match cli.command {
        Command::Generate { count } => generate(&session, count),
        Command::Ingest { file } => ingest(&session, &file),
        Command::GeneratePrimary => generate_primary(&session),
        Command::ConflictCase { conflicts } => conflict_case(&session, conflicts),
        Command::UploadPrimary { file } => upload_primary(&session, &file),
        Command::ClearPrimary => clear_primary(&session),
        Command::Detect {
            safety_distance,
            time_threshold,
        } => detect(&session, safety_distance, time_threshold),
        Command::Accept => accept(&session),
        Command::Reject => reject(&session),
        Command::Abort { ids } => abort(&session, &ids),
        Command::AbortConflicted => abort_conflicted(&session),
        Command::Stats { json } => stats(&session, json),
        Command::Reset => reset(&session),
    }
}

fn generate(session: &Session, count: usize) -> Result<()> {
    let mut controller = LifecycleController::new();
    controller.ingest(sim::generate_population(count, Utc::now()));
    session.save(&controller)?;

    println!(
        "Generated {} simulated missions ({} in airspace)",
        controller.registry().len(),
        controller.airspace().len()
    );
    Ok(())
}

fn ingest(session: &Session, file: &std::path::Path) -> Result<()> {
    let mut controller = session.load()?;
    let batch = dcs_store::load_missions(file)
        .with_context(|| format!("failed to load missions from {}", file.display()))?;
    let count = batch.len();
    controller.ingest(batch);
    session.save(&controller)?;

    println!(
        "Ingested {} mission(s) ({} total, {} in airspace)",
        count,
        controller.registry().len(),
        controller.airspace().len()
    );
    Ok(())
}

fn generate_primary(session: &Session) -> Result<()> {
    let mut controller = session.load()?;
    let primary = sim::generate_primary(Utc::now());
    let id = primary.id.clone();
    controller.set_primary(primary);
    session.save(&controller)?;

    println!("Primary candidate set: {}", id);
    Ok(())
}

fn conflict_case(session: &Session, conflicts: usize) -> Result<()> {
    let mut controller = session.load()?;
    if controller.airspace().is_empty() {
        bail!("no active missions to conflict with; run `dcs generate` first");
    }

    let candidate =
        sim::generate_conflict_case(controller.airspace().missions(), conflicts, Utc::now());
    let id = candidate.id.clone();
    controller.set_primary(candidate);
    session.save(&controller)?;

    println!("High-conflict candidate set: {}", id);
    println!("Run `dcs detect` to evaluate it");
    Ok(())
}

fn upload_primary(session: &Session, file: &std::path::Path) -> Result<()> {
    let mut controller = session.load()?;
    let primary = Session::load_primary_from(file)
        .with_context(|| format!("failed to load primary from {}", file.display()))?;
    let id = primary.id.clone();
    controller.set_primary(primary);
    session.save(&controller)?;

    println!("Primary candidate loaded: {}", id);
    Ok(())
}

fn clear_primary(session: &Session) -> Result<()> {
    let mut controller = session.load()?;
    match controller.clear_primary() {
        Some(primary) => {
            session.save(&controller)?;
            println!("Primary candidate {} cleared", primary.id);
        }
        None => println!("No primary candidate to clear"),
    }
    Ok(())
}

fn detect(session: &Session, safety_distance: f64, time_threshold: f64) -> Result<()> {
    let mut controller = session.load()?;
    let config = DetectionConfig {
        safety_distance_m: safety_distance,
        time_threshold_s: time_threshold,
    };

    let hits = controller
        .run_detection(&config)
        .context("conflict detection refused")?
        .to_vec();
    session.save(&controller)?;

    if hits.is_empty() {
        println!("No conflicts detected; primary is safe to accept");
        return Ok(());
    }

    println!("Found {} conflict(s):", hits.len());
    println!("{:<24} {:>12} {:>12}", "MISSION", "DISTANCE(m)", "TIME(s)");
    for hit in &hits {
        println!(
            "{:<24} {:>12.2} {:>12.2}",
            hit.mission_id, hit.distance_m, hit.time_diff_s
        );
    }
    Ok(())
}

fn accept(session: &Session) -> Result<()> {
    let mut controller = session.load()?;
    let id = controller
        .accept_primary()
        .context("cannot accept primary mission")?;
    session.save(&controller)?;

    println!(
        "Mission {} accepted into the airspace ({} active)",
        id,
        controller.airspace().len()
    );
    Ok(())
}

fn reject(session: &Session) -> Result<()> {
    let mut controller = session.load()?;
    let id = controller
        .reject_primary()
        .context("cannot reject primary mission")?;
    session.save(&controller)?;

    println!("Mission {} rejected (retained as inactive)", id);
    Ok(())
}

fn abort(session: &Session, ids: &[String]) -> Result<()> {
    let mut controller = session.load()?;
    let aborted = controller.abort_many(ids.iter().map(String::as_str));
    session.save(&controller)?;

    println!("Aborted {} of {} mission(s)", aborted, ids.len());
    if aborted == 0 {
        bail!("no missions were aborted");
    }
    Ok(())
}

fn abort_conflicted(session: &Session) -> Result<()> {
    let mut controller = session.load()?;
    if controller.conflicts().is_empty() {
        println!("No conflicts to abort");
        return Ok(());
    }

    let aborted = controller.abort_all_conflicted();
    session.save(&controller)?;

    println!("Aborted {} conflicted mission(s)", aborted);
    Ok(())
}

fn stats(session: &Session, json: bool) -> Result<()> {
    let controller = session.load()?;
    let stats = controller.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Total missions:    {}", stats.total);
    println!(
        "By status:         pending {} | active {} | aborted {} | inactive {} | completed {}",
        stats.pending, stats.active, stats.aborted, stats.inactive, stats.completed
    );
    println!("Airspace view:     {}", stats.airspace);
    println!("Current conflicts: {}", stats.conflicts);
    println!(
        "Primary mission:   {}",
        stats.primary.as_deref().unwrap_or("none")
    );
    Ok(())
}

fn reset(session: &Session) -> Result<()> {
    session.reset()?;
    println!("Session data deleted from {}", session.dir().display());
    Ok(())
}
