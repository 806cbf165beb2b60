pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "lanequote",
    about = "Lanequote operator CLI",
    long_about = "Price shipment requests, inspect the geocode table, and check runtime readiness.",
    after_help = "Examples:\n  lanequote quote request.json --pretty\n  lanequote zips\n  lanequote doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Price a shipment request JSON file and print the quote")]
    Quote {
        #[arg(value_name = "REQUEST_FILE")]
        file: PathBuf,
        #[arg(long, help = "Pretty-print the quote JSON")]
        pretty: bool,
    },
    #[command(about = "List the postal codes known to the geocode table")]
    Zips,
    #[command(about = "Validate config, routing credential, and LLM credential readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Quote { file, pretty } => commands::quote::run(&file, pretty).await,
        Command::Zips => commands::CommandResult { exit_code: 0, output: commands::zips::run() },
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
