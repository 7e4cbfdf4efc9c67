// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use crate::report::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// convcheck - branch name and commit message convention checker
///
/// Exits 0 when every check passes, 1 when one fails, 2 on other errors.
#[derive(Parser, Debug)]
#[command(name = "convcheck")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Branch name and commit message convention checker", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Only report failures
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(long, global = true, env = "CONVCHECK_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Check a branch name or commit message
    Check(CheckArgs),

    /// Check the current git branch name
    Branch(BranchArgs),

    /// Check commit message headers in git history
    Commits(CommitsArgs),

    /// List loaded conventions
    List,

    /// Manage git hooks
    Hooks(HooksArgs),

    /// Write an example convcheck.toml
    Init(InitArgs),

    /// Print version information
    Version,
}

/// Arguments for the check command.
#[derive(Parser, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Branch name or commit message to check
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub input: Option<String>,

    /// Convention to check against
    #[arg(short, long, value_name = "NAME")]
    pub convention: Option<String>,

    /// Read a commit message from a file ("-" for stdin)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

/// Arguments for the branch command.
#[derive(Parser, Debug, Clone, Default)]
pub struct BranchArgs {
    /// Convention to check against
    #[arg(short, long, value_name = "NAME")]
    pub convention: Option<String>,
}

/// Arguments for the commits command.
#[derive(Parser, Debug, Clone)]
pub struct CommitsArgs {
    /// Revision or range (A..B) to check
    #[arg(default_value = "HEAD")]
    pub range: String,

    /// Convention to check against
    #[arg(short, long, value_name = "NAME")]
    pub convention: Option<String>,
}

/// Arguments for the hooks command.
#[derive(Parser, Debug, Clone)]
pub struct HooksArgs {
    /// Hook action to perform
    #[command(subcommand)]
    pub action: HooksAction,
}

/// Hook actions.
#[derive(Subcommand, Debug, Clone)]
pub enum HooksAction {
    /// Install git hooks
    Install {
        /// Specific hook to install (commit-msg or pre-push)
        #[arg(value_name = "HOOK")]
        hook: Option<String>,

        /// Replace existing hooks, keeping a backup
        #[arg(short, long)]
        force: bool,
    },

    /// Uninstall git hooks
    Uninstall {
        /// Specific hook to uninstall
        #[arg(value_name = "HOOK")]
        hook: Option<String>,
    },

    /// Show hook status
    Status,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone, Default)]
pub struct InitArgs {
    /// Overwrite an existing configuration without asking
    #[arg(short, long)]
    pub force: bool,
}

impl Cli {
    /// Whether coloured output should be used.
    pub fn use_color(&self) -> bool {
        !self.no_color && self.format == OutputFormat::Text && console::colors_enabled()
    }
}
