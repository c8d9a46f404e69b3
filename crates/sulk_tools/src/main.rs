//! Sulk - Development Tools

use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::{Parser, Subcommand};
use sulk_core::mission::{load_mission_file, CompiledMission, MissionLibrary};
use sulk_tools::error::Result;
use sulk_tools::render::{parse_coord, render_board, RenderOptions};
use sulk_tools::validate::validate_paths;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sulk-tools")]
#[command(about = "Development tools for Sulk missions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate mission files
    Validate {
        /// Mission files or directories holding them
        #[arg(default_value = "crates/sulk_core/assets/missions")]
        paths: Vec<PathBuf>,
    },
    /// Print a mission board as ASCII
    Inspect {
        /// Mission file, or a mission name when --mission-dir is given
        mission: String,
        /// Overlay line of sight from this square (x,y)
        #[arg(long)]
        los: Option<String>,
        /// Resolve the mission by name in this directory
        #[arg(long)]
        mission_dir: Option<PathBuf>,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Validate { paths } => validate(&paths),
        Commands::Inspect {
            mission,
            los,
            mission_dir,
        } => inspect(&mission, los.as_deref(), mission_dir.as_deref()),
    };

    if let Err(e) = outcome {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn validate(paths: &[PathBuf]) -> Result<()> {
    let mut reports = Vec::new();
    let outcome = validate_paths(paths, &mut reports);
    for report in &reports {
        match &report.outcome {
            Ok(summary) => println!(
                "ok    {} - '{}' {}x{}, {} squares listed, {} sections",
                report.path.display(),
                summary.name,
                summary.width,
                summary.height,
                summary.listed,
                summary.sections
            ),
            Err(e) => println!("FAIL  {} - {e}", report.path.display()),
        }
    }
    if outcome.is_ok() {
        tracing::info!("Validation passed");
    }
    outcome
}

fn inspect(mission: &str, los: Option<&str>, mission_dir: Option<&Path>) -> Result<()> {
    let compiled: Rc<CompiledMission> = match mission_dir {
        Some(dir) => MissionLibrary::new(dir).load(mission)?,
        None => Rc::new(load_mission_file(Path::new(mission))?),
    };

    let board = compiled.build_board()?;
    let options = RenderOptions {
        los_from: los.map(parse_coord).transpose()?,
        legend: true,
    };

    println!("{}", compiled.name());
    print!("{}", render_board(&board, &options)?);
    Ok(())
}
