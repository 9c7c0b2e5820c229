use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use caf_hash::ObjectId;
use caf_object::Commit;
use clap::Args;

use crate::Cli;

#[derive(Args)]
pub struct CommitTreeArgs {
    /// Identifier of the root tree
    #[arg(value_name = "tree")]
    tree: ObjectId,

    /// Author of the commit
    #[arg(short = 'a', long)]
    author: String,

    /// Commit message
    #[arg(short = 'm', long)]
    message: String,

    /// Seconds since the Unix epoch (default: now)
    #[arg(short = 't', long, allow_hyphen_values = true)]
    timestamp: Option<i64>,

    /// Parent commit; repeat for a merge, order is preserved
    #[arg(short = 'p', long = "parent", value_name = "parent")]
    parents: Vec<ObjectId>,
}

pub fn run(args: &CommitTreeArgs, cli: &Cli) -> Result<i32> {
    if args.author.is_empty() {
        bail!("author is required");
    }
    if args.message.is_empty() {
        bail!("commit message is required");
    }

    let algo = cli.hash_config()?.algorithm;
    for oid in std::iter::once(&args.tree).chain(&args.parents) {
        if oid.algorithm() != algo {
            bail!("{} is a {} identifier, expected {}", oid, oid.algorithm(), algo);
        }
    }

    let timestamp = match args.timestamp {
        Some(ts) => ts,
        None => {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .context("system clock is before the Unix epoch")?;
            i64::try_from(now.as_secs())?
        }
    };

    let commit = Commit::new(
        args.tree,
        args.author.as_str(),
        args.message.as_str(),
        timestamp,
        args.parents.iter().copied(),
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", commit.identifier(algo)?)?;

    Ok(0)
}
