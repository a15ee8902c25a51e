//! Common types and utilities shared across modules

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use subexports_config::{normalize_path, ProjectConfig};

/// Global CLI options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    #[arg(short, long, global = true, help = "Decrease verbosity")]
    pub quiet: bool,

    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v for debug, -vv for trace)"
    )]
    pub verbose: u8,

    #[arg(
        long,
        global = true,
        value_name = "DIR",
        help = "Project root (defaults to the current directory)"
    )]
    pub root: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Config file (default: $SUBEXPORTS_CONFIG, then subexports.toml in the root)"
    )]
    pub config: Option<PathBuf>,
}

impl GlobalOpts {
    /// Get the effective verbosity level
    /// - 0: quiet/warn only
    /// - 1: debug (-v)
    /// - 2: trace (-vv)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Absolute project root with `.` and `..` resolved
    pub fn project_root(&self) -> anyhow::Result<PathBuf> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        Ok(match &self.root {
            Some(root) => normalize_path(&cwd.join(root)),
            None => cwd,
        })
    }

    /// Resolved config file path
    pub fn config_path(&self) -> anyhow::Result<PathBuf> {
        let root = self.project_root()?;
        Ok(ProjectConfig::path(&root, self.config.as_deref()))
    }
}
