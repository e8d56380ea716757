#![forbid(unsafe_code)]
//! HashLedger console

use clap::{Parser, Subcommand};
use colored::*;
use hashledger::blockchain::Blockchain;
use hashledger::cli::{run_demo, Console, OutputFormat, DEMO_PAYLOADS};
use hashledger::config::load_config;
use std::io;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Starts the interactive console (default)
    Run,
    /// Appends a fixed set of records and prints the resulting chain
    Demo {
        /// Print the chain as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;
    let mut chain = Blockchain::new();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            if config.console.banner {
                println!("{}", "HashLedger".bright_cyan().bold());
                println!("{}", "----------".bright_cyan());
            }
            let mut console = Console::new(io::stdin().lock(), io::stdout().lock(), config.console);
            console.run(&mut chain)?;
        }
        Commands::Demo { json } => {
            let format = if json { OutputFormat::Json } else { OutputFormat::Text };
            let mut out = io::stdout().lock();
            run_demo(&mut chain, &DEMO_PAYLOADS, &mut out, format)?;
        }
    }

    Ok(())
}
