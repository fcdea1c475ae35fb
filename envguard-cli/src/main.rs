//! envguard command-line checker
//!
//! Validates the current process environment against a JSON manifest, the
//! same way an application would at startup, and reports which declared
//! variables are set. Values are never printed.
//!
//! Usage:
//!   envguard check --manifest env.json
//!   envguard check --manifest env.json --client --json
//!   envguard check --manifest env.json --env-file staging.json

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use envguard::{Context, EnvSource, ProcessEnv};
use envguard_cli::{check_environment, load_env_file, load_manifest, render_text};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "envguard")]
#[command(about = "Validate environment variables against an envguard manifest")]
struct Args {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the process environment against a manifest
    Check {
        /// Path to the JSON manifest
        #[arg(short, long, default_value = "env.json")]
        manifest: PathBuf,

        /// Check the variables in this JSON object instead of the process
        /// environment
        #[arg(long)]
        env_file: Option<PathBuf>,

        /// Validate as the client context (client and shared variables only)
        #[arg(long)]
        client: bool,

        /// Skip validation and only report which variables are set
        #[arg(long)]
        skip_validation: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match args.command {
        Command::Check {
            manifest,
            env_file,
            client,
            skip_validation,
            json,
        } => {
            let context = if client { Context::Client } else { Context::Server };
            info!(manifest = %manifest.display(), %context, "checking environment");

            let parsed = load_manifest(&manifest)?;
            let raw = match env_file {
                Some(path) => load_env_file(&path)?,
                None => ProcessEnv.snapshot(),
            };
            let report = check_environment(&parsed, raw, context, skip_validation)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_text(&report));
            }

            if !report.ok {
                bail!("environment does not satisfy {}", manifest.display());
            }
        }
    }

    Ok(())
}
