pub mod commit_tree;
pub mod hash_dir;
pub mod hash_file;
pub mod mktree;

use anyhow::Result;
use clap::Subcommand;

use crate::Cli;

#[derive(Subcommand)]
pub enum Commands {
    /// Print the blob identifier of file contents
    HashFile(hash_file::HashFileArgs),
    /// Print the tree identifier of a directory
    HashDir(hash_dir::HashDirArgs),
    /// Build a tree from listed records and print its identifier
    Mktree(mktree::MktreeArgs),
    /// Print the identifier of a commit over a tree
    CommitTree(commit_tree::CommitTreeArgs),
}

pub fn run(cli: &Cli) -> Result<i32> {
    match &cli.command {
        Commands::HashFile(args) => hash_file::run(args, cli),
        Commands::HashDir(args) => hash_dir::run(args, cli),
        Commands::Mktree(args) => mktree::run(args, cli),
        Commands::CommitTree(args) => commit_tree::run(args, cli),
    }
}
