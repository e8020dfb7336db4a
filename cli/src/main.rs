//! Migrator CLI - Main entry point
//!
//! `migrator <table_name> --fields="name:type,..."`

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;

use migrator_cli::commands::create::{self, CreateOptions};
use migrator_cli::config::DEFAULT_ENV_FILE;
use migrator_cli::error::CliError;
use migrator_cli::{logging, output};
use migrator_migrations::ParseMode;
use migrator_migrations::writer::DEFAULT_MIGRATIONS_DIR;

const USAGE: &str = "Usage: migrator table_name --fields=\"name:string,age:int\"";

/// Migrator - generate and apply CREATE TABLE migrations
#[derive(Parser, Debug)]
#[command(name = "migrator")]
#[command(author, version, about = "Generate and apply CREATE TABLE migrations", long_about = None)]
struct Cli {
    /// Table to create
    #[arg(value_name = "TABLE")]
    table: Option<String>,

    /// Comma-separated fields: name:type (string, int, integer, smallint, datetime)
    #[arg(long, value_name = "FIELDS")]
    fields: Option<String>,

    /// Directory the migration file is written to
    #[arg(long, value_name = "DIR", default_value = DEFAULT_MIGRATIONS_DIR)]
    out: PathBuf,

    /// Env file holding DB_HOST, DB_PORT, DB_USER, DB_PASSWORD, DB_NAME, DB_SSLMODE
    #[arg(long, value_name = "PATH", default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,

    /// Reject malformed fields, unknown types and a caller-supplied id column
    #[arg(long)]
    strict: bool,

    /// Write the migration file without applying it
    #[arg(long)]
    no_apply: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", output::err_line(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Some(table) = cli.table else {
        println!("{}", USAGE);
        return Ok(());
    };

    let fields = match cli.fields {
        Some(f) if !f.is_empty() => f,
        _ => {
            println!("No fields provided");
            println!("{}", USAGE);
            return Ok(());
        }
    };

    let mode = if cli.strict {
        ParseMode::Strict
    } else {
        ParseMode::Lenient
    };

    println!("{}", output::heading("Creating migration..."));

    create::run(&CreateOptions {
        table,
        fields,
        out: cli.out,
        env_file: cli.env_file,
        mode,
        apply: !cli.no_apply,
    })
}
