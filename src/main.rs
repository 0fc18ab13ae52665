use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod age;
mod app;
mod audio;
mod config;
mod errors;
mod library;
mod playlist;
mod runtime;
mod storage;
mod ui;

#[derive(Parser)]
#[command(name = "tempo", version, about = "Age calculator and terminal playlist player")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the age for a birth date
    Age {
        /// Day of the month
        #[arg(long, default_value = "")]
        day: String,
        /// Month, 1-12
        #[arg(long, default_value = "")]
        month: String,
        /// Four-digit year
        #[arg(long, default_value = "")]
        year: String,
    },
    /// Import audio files and directories into the playlist player
    Play {
        /// Files or directories; defaults to the current directory
        paths: Vec<PathBuf>,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();
    let settings = runtime::load_settings();
    runtime::logging::init(&settings);

    log::info!("tempo starting up");

    match args.command {
        Some(Command::Age { day, month, year }) => {
            if runtime::run_age(&day, &month, &year, &settings).is_err() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(Command::Play { paths }) => runtime::run(&with_default_dir(paths), &settings)?,
        None => runtime::run(&with_default_dir(Vec::new()), &settings)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn with_default_dir(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    if !paths.is_empty() {
        return paths;
    }
    std::env::current_dir()
        .map(|dir| vec![dir])
        .unwrap_or_default()
}
