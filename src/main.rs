//! formcheck - exercise form analysis from pose landmarks
//!
//! Reads detector output or analysis requests as JSON and prints verdicts.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use formcheck_lib::core::config::Config;
use formcheck_lib::platform::pose::{DefaultLandmarkBridge, LandmarkBridge};
use formcheck_lib::{health_check, ExerciseType, FormAnalyzer};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "formcheck")]
#[command(about = "Exercise form analysis from body pose landmarks", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (defaults to ~/.formcheck/settings.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print single-line JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one frame of detector output
    Analyze {
        /// Exercise tag (push-up, squat, sit-up, pull-up, walk)
        #[arg(long, short)]
        exercise: Option<String>,

        /// Detector output file, or "-" for stdin
        #[arg(default_value = "-")]
        frame: String,
    },

    /// Analyze a JSON request ({"exerciseType": ..., "landmarks": [...]})
    Request {
        /// Request file, or "-" for stdin
        #[arg(default_value = "-")]
        file: String,
    },

    /// List supported exercise tags
    Exercises,

    /// Print the health status payload
    Health,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    // RUST_LOG wins over the configured filter; logs go to stderr so stdout stays JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let pretty = config.pretty_output && !cli.compact;
    let analyzer = FormAnalyzer::new(&config).context("Failed to initialize analyzer")?;

    match cli.command {
        Commands::Analyze { exercise, frame } => {
            let bridge = DefaultLandmarkBridge::new(&config)
                .context("Failed to initialize landmark bridge")?;
            info!("Using {}", bridge.get_model_info());

            let frame_data = read_input(&frame)?;
            let verdict = analyzer
                .analyze_frame(&bridge, &frame_data, exercise.as_deref())
                .context("Frame analysis failed")?;
            print_json(&verdict, pretty)?;
        }
        Commands::Request { file } => {
            let contents = read_input(&file)?;
            let json = String::from_utf8(contents).context("Request is not valid UTF-8")?;
            let verdict = analyzer.analyze_request_json(&json).context("Request analysis failed")?;
            print_json(&verdict, pretty)?;
        }
        Commands::Exercises => {
            for exercise in ExerciseType::ALL {
                let marker = if exercise == analyzer.default_exercise() {
                    " (default)"
                } else {
                    ""
                };
                println!("{}{}", exercise, marker);
            }
        }
        Commands::Health => {
            print_json(&health_check(), pretty)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    config.map_err(|e| anyhow!("Failed to load configuration: {}", e))
}

fn read_input(source: &str) -> Result<Vec<u8>> {
    if source == "-" {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read stdin")?;
        Ok(buffer)
    } else {
        std::fs::read(source).with_context(|| format!("Failed to read {}", source))
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
