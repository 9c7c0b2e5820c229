mod commands;

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use caf_hash::HashAlgorithm;
use caf_object::HashConfig;
use clap::{error::ErrorKind, ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use commands::Commands;

/// Environment variable holding a tracing filter; wins over `-v`.
const LOG_ENV: &str = "CAF_LOG";

#[derive(Parser)]
#[command(
    name = "caf",
    about = "Compute content-addressed identifiers for blobs, trees and commits",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Digest algorithm (sha1 or sha256); overrides config and environment
    #[arg(long, global = true)]
    algorithm: Option<HashAlgorithm>,

    /// Read hashing settings from a TOML file
    #[arg(long, global = true, value_name = "file")]
    config: Option<PathBuf>,

    /// Log more to stderr (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

impl Cli {
    /// Defaults, then the config file, then the environment, then flags.
    pub fn hash_config(&self) -> Result<HashConfig> {
        let config = match &self.config {
            Some(path) => HashConfig::load(path)?,
            None => HashConfig::default(),
        };
        let mut config = config
            .with_env_overrides()
            .context("reading environment overrides")?;
        if let Some(algo) = self.algorithm {
            config.algorithm = algo;
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(128),
            }
        }
    };

    init_logging(cli.verbose);

    match commands::run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("fatal: {e:#}");
            process::exit(128);
        }
    }
}
