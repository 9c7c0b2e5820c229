use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};
use caf_object::Blob;
use clap::Args;

use crate::Cli;

#[derive(Args)]
pub struct HashFileArgs {
    /// Read the content from stdin
    #[arg(long)]
    stdin: bool,

    /// Files to hash
    #[arg(value_name = "file")]
    files: Vec<PathBuf>,
}

pub fn run(args: &HashFileArgs, cli: &Cli) -> Result<i32> {
    if !args.stdin && args.files.is_empty() {
        bail!("nothing to hash: give a file or --stdin");
    }

    let algo = cli.hash_config()?.algorithm;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.stdin {
        let blob = Blob::from_reader(algo, io::stdin().lock())?;
        writeln!(out, "{}", blob.identifier())?;
    }

    for file in &args.files {
        let blob = Blob::from_file(algo, file)?;
        writeln!(out, "{}", blob.identifier())?;
    }

    Ok(0)
}
