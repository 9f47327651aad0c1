//! CLI argument parsing for fslock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// fslock: hold a filesystem lock while running a command.
///
/// A lock is the directory `<DIR>/<NAME>`; whoever creates it holds the lock.
/// Locks are never expired automatically.
#[derive(Parser, Debug)]
#[command(name = "fslock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for fslock.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Acquire the lock, run a command, then release the lock.
    ///
    /// Waits indefinitely unless --timeout is given. Exits with the
    /// command's exit code, or 4 if the lock could not be acquired in time.
    Run(RunArgs),

    /// Report whether the lock is currently held, and by whom.
    ///
    /// Exits 0 when the lock is free and 4 when it is held. Never creates
    /// the lock directory.
    Status(StatusArgs),
}

/// Lock identity shared by all commands.
#[derive(Args, Debug)]
pub struct LockArgs {
    /// Directory containing the lock.
    #[arg(short, long)]
    pub dir: PathBuf,

    /// Lock name (lowercase letters, digits, '.', '-'; starts with a letter).
    #[arg(short, long)]
    pub name: String,

    /// YAML file with lock settings (wait_delay_ms, scratch_dir).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub lock: LockArgs,

    /// Give up after this many seconds (fractions allowed).
    #[arg(short, long, value_name = "SECONDS")]
    pub timeout: Option<f64>,

    /// Command to run while holding the lock.
    #[arg(last = true, required = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

/// Arguments for the `status` command.
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub lock: LockArgs,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
