use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use caf_object::Snapshot;
use clap::Args;
use tracing::info;

use crate::Cli;

#[derive(Args)]
pub struct HashDirArgs {
    /// Also list every record as `<kind> <id>\t<path>`
    #[arg(short = 'r', long)]
    recursive: bool,

    /// Directory to hash
    #[arg(value_name = "dir", default_value = ".")]
    dir: PathBuf,
}

pub fn run(args: &HashDirArgs, cli: &Cli) -> Result<i32> {
    let config = cli.hash_config()?;
    let snapshot = Snapshot::build(&args.dir, &config)?;
    info!(
        dir = %args.dir.display(),
        trees = snapshot.tree_count(),
        algorithm = %config.algorithm,
        "hashed directory"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", snapshot.root_id())?;

    if args.recursive {
        for (path, record) in snapshot.walk() {
            writeln!(out, "{} {}\t{}", record.kind, record.oid, path)?;
        }
    }

    Ok(0)
}
