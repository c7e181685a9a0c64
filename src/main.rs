//! CLI tool to validate, format, and query `.env` files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dotenv")]
#[command(version)]
#[command(about = "Validate, format, and query .env files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that each file parses
    Validate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print each file in canonical form
    Fmt {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Fail if any file is not in canonical form
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the value of one variable
    Get { file: PathBuf, key: String },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dotenv_rs=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let ok = match cli.command {
        Command::Validate { files } => for_each_file(&files, validate),
        Command::Fmt { files } => for_each_file(&files, fmt),
        Command::Check { files } => for_each_file(&files, check),
        Command::Get { file, key } => get(&file, &key),
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Run `action` on every file, continuing past failures.
fn for_each_file(files: &[PathBuf], action: fn(&Path, &str) -> bool) -> bool {
    let mut all_ok = true;
    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                all_ok = false;
                continue;
            }
        };
        all_ok &= action(path, &content);
    }
    all_ok
}

fn validate(path: &Path, content: &str) -> bool {
    match dotenv_rs::parse(content) {
        Ok(env) => {
            eprintln!("{}: valid ({} variable(s))", path.display(), env.len());
            true
        }
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            false
        }
    }
}

fn fmt(path: &Path, content: &str) -> bool {
    match dotenv_rs::parse(content) {
        Ok(env) => {
            print!("{}", dotenv_rs::format(&env));
            true
        }
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            false
        }
    }
}

fn check(path: &Path, content: &str) -> bool {
    match dotenv_rs::parse(content) {
        Ok(env) => {
            if dotenv_rs::format(&env) == content {
                eprintln!("{}: formatted", path.display());
                true
            } else {
                eprintln!("{}: not formatted", path.display());
                false
            }
        }
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            false
        }
    }
}

fn get(path: &Path, key: &str) -> bool {
    match dotenv_rs::load(path) {
        Ok(env) => env.get(key).map_or_else(
            || {
                eprintln!("{}: {key} is not set", path.display());
                false
            },
            |value| {
                println!("{value}");
                true
            },
        ),
        Err(e) => {
            eprintln!("{e}");
            false
        }
    }
}
