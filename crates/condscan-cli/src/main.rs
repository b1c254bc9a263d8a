//! Condscan CLI - finds obsolete SAP pricing condition tables in ABAP code.

mod commands;
mod formatters;
mod logging;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "condscan")]
#[command(version)]
#[command(about = "Detects KONV, DZAEHK and DZAEKO usage made obsolete by SAP Note 2220005", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Run the HTTP scan service
    Serve {
        /// Address to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Configuration file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Disable cross-origin request headers
        #[arg(long)]
        no_cors: bool,
    },

    /// Scan units from a JSON file and print the findings
    ///
    /// Examples:
    ///   condscan scan units.json          # JSON array of units
    ///   condscan scan --single unit.json  # one unit object
    ///   cat units.json | condscan scan -  # read from stdin
    Scan {
        /// JSON input file, or `-` for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Input is a single unit object rather than an array
        #[arg(long)]
        single: bool,

        /// Output format
        #[arg(short = 'o', long = "output", value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Manage condscan configuration
    Config {
        #[command(subcommand)]
        command: commands::ConfigCommand,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Serve {
            host,
            port,
            config,
            no_cors,
        } => {
            commands::run_serve(commands::ServeOptions {
                host,
                port,
                config,
                no_cors,
            })?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Scan {
            input,
            single,
            format,
        } => {
            let found = commands::run_scan(&input, single, format)?;
            Ok(if found {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Command::Config { command } => {
            commands::handle_config_command(command)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
