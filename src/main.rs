//! sqlfront - parse SQL queries into unresolved plans

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use sqlfront::function::FunctionRepository;
use sqlfront::sql;

/// sqlfront - SQL front end: parser, AST builder and function repository
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the unresolved plan of a query
    Parse {
        /// Query text, e.g. "SELECT id FROM account* WHERE id = 1"
        query: String,
    },
    /// List every registered function signature
    Functions,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match args.command {
        Command::Parse { query } => {
            let plan = sql::parse(&query).with_context(|| format!("Failed to parse {:?}", query))?;
            print!("{}", plan);
        }
        Command::Functions => {
            let repository =
                FunctionRepository::builtin().context("Failed to build function repository")?;
            for definition in repository.definitions() {
                println!("{} -> {}", definition.signature, definition.result_type().name());
            }
        }
    }

    Ok(())
}
