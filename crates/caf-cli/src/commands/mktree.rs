use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};
use caf_hash::ObjectId;
use caf_object::{EntryKind, Tree, TreeRecord};
use clap::Args;

use crate::Cli;

#[derive(Args)]
pub struct MktreeArgs {
    /// Read multiple trees separated by blank lines (batch mode)
    #[arg(long)]
    batch: bool,
}

pub fn run(args: &MktreeArgs, cli: &Cli) -> Result<i32> {
    let algo = cli.hash_config()?.algorithm;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let stdin = io::stdin();
    let mut records: Vec<TreeRecord> = Vec::new();

    for (lineno, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches(['\r', '\n']);

        if line.is_empty() {
            if args.batch && !records.is_empty() {
                let tree = Tree::from_records(std::mem::take(&mut records))?;
                writeln!(out, "{}", tree.identifier(algo)?)?;
            }
            continue;
        }

        let record = parse_record_line(line).with_context(|| format!("line {}", lineno + 1))?;
        if record.oid.algorithm() != algo {
            bail!(
                "line {}: {} is a {} identifier, expected {}",
                lineno + 1,
                record.oid,
                record.oid.algorithm(),
                algo
            );
        }
        records.push(record);
    }

    if !records.is_empty() || !args.batch {
        let tree = Tree::from_records(records)?;
        writeln!(out, "{}", tree.identifier(algo)?)?;
    }

    Ok(0)
}

/// Parse `<kind> SP <id> TAB <name>`.
fn parse_record_line(line: &str) -> Result<TreeRecord> {
    let (meta, name) = line
        .split_once('\t')
        .ok_or_else(|| anyhow!("invalid tree record: missing tab"))?;
    let (kind, oid) = meta
        .split_once(' ')
        .ok_or_else(|| anyhow!("invalid tree record: expected '<kind> <id>'"))?;
    let kind: EntryKind = kind.parse()?;
    let oid: ObjectId = oid.parse()?;
    Ok(TreeRecord::new(name, kind, oid))
}
