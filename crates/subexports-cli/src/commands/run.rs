use crate::logger;
use crate::GlobalOpts;
use anyhow::Context;
use clap::Parser;
use colored::*;
use subexports_config::{ProjectConfig, SubExportsOptions};
use subexports_core::{BuildHost, ManifestOutcome, SubExports, SynthesisReport};
use tracing::{debug, info};

#[derive(Parser, Debug, Clone, Default)]
pub struct RunCommand {
    /// Only generate subexports for these entries (repeatable, replaces the configured whitelist)
    #[arg(short, long = "entry", value_name = "NAME")]
    pub entries: Vec<String>,

    /// Output directory of the bundler (overrides the configured outdir)
    #[arg(long, value_name = "DIR")]
    pub outdir: Option<String>,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl RunCommand {
    fn apply_overrides(&self, config: &mut ProjectConfig) {
        if !self.entries.is_empty() {
            config.subexports = SubExportsOptions::with_entries(self.entries.iter().cloned());
        }
        if let Some(outdir) = &self.outdir {
            config.build.outdir = Some(outdir.clone());
        }
    }
}

/// Run the subexports plugin against the project's build configuration
pub fn handle_run(cmd: RunCommand, opts: &GlobalOpts) -> anyhow::Result<SynthesisReport> {
    let root = opts.project_root()?;
    let config_path = opts.config_path()?;
    logger::debug(&format!("Project root: {}", root.display()));
    logger::debug(&format!("Reading config from: {}", config_path.display()));

    let mut config = ProjectConfig::load_from_path(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    cmd.apply_overrides(&mut config);
    debug!(
        "Build options: outdir={:?}, whitelist={:?}, dry_run={}",
        config.build.outdir, config.subexports.entries, cmd.dry_run
    );

    let host = BuildHost::new(&root, config.build);
    let mut plugin = SubExports::new(config.subexports).dry_run(cmd.dry_run);

    logger::spinner_start("Generating subexports");
    let report = match host.run(&mut plugin) {
        Ok(report) => report,
        Err(e) => {
            logger::spinner_error("Failed to generate subexports");
            return Err(e.into());
        }
    };
    logger::spinner_stop();
    info!(
        "Generated {} subexports, wrote {} shims",
        report.exports.len(),
        report.shims_written
    );

    print_report(&report, cmd.dry_run);
    Ok(report)
}

fn print_report(report: &SynthesisReport, dry_run: bool) {
    for name in &report.unknown_entries {
        logger::warn(&format!(
            "Entry '{}' is not a configured entry point; its artifacts may not exist",
            name
        ));
    }

    if dry_run {
        for (key, record) in report.exports.iter() {
            println!(
                "{} {} -> {}",
                "export".cyan(),
                key.bold(),
                record.require
            );
        }
        for shim in &report.shims {
            println!("{} {}", "shim".cyan(), shim.display());
        }
    }

    for file in &report.files {
        logger::step(&format!("files += {}", file));
    }

    match &report.manifest {
        ManifestOutcome::Skipped => {
            logger::info("No entries selected, nothing to do");
        }
        ManifestOutcome::NotFound => {
            logger::warn("Subexports: could not find package.json; only shim files were written");
        }
        ManifestOutcome::Unchanged(path) => {
            logger::success(&format!(
                "{} already up to date ({} subexports)",
                path.display(),
                report.exports.len()
            ));
        }
        ManifestOutcome::Updated(path) => {
            logger::success(&format!(
                "Updated {} with {} subexports",
                path.display(),
                report.exports.len()
            ));
        }
        ManifestOutcome::WouldUpdate(path) => {
            println!("Would update {}", path.display());
        }
    }
}
