use crate::logger;
use crate::GlobalOpts;
use anyhow::{bail, Context};
use colored::*;
use std::fs;
use subexports_config::project::CONFIG_FILE_NAME;

const CONFIG_TEMPLATE: &str = r#"# subexports configuration
# Run `subexports run` after your bundler has written its output.

[build]
# Directory the bundler writes compiled artifacts to.
# Every entry is expected at {outdir}/{name}.js, .mjs and .d.ts
outdir = "dist"

# Entry points, by name. Each name becomes a subexport "./{name}".
[build.entry-points]
index = "src/index.ts"
# utils = "src/utils.ts"

[subexports]
# Optional whitelist of entry names. Defaults to every entry point.
# entries = ["utils"]
"#;

/// Write a template config file into the project root
pub fn handle_init(file: Option<String>, force: bool, opts: &GlobalOpts) -> anyhow::Result<()> {
    logger::debug("Handling init command");

    let root = opts.project_root()?;
    let target_path = root.join(file.unwrap_or_else(|| CONFIG_FILE_NAME.to_string()));
    logger::debug(&format!("Target file: {}", target_path.display()));

    if target_path.exists() && !force {
        bail!(
            "File '{}' already exists. Use --force to overwrite it",
            target_path.display()
        );
    }

    fs::write(&target_path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to create {}", target_path.display()))?;

    logger::success(&format!("Created config file: {}", target_path.display()));
    println!();
    println!("Next steps:");
    println!(
        "  1. List your entry points in {}",
        target_path.display().to_string().bold()
    );
    println!("  2. Build your package with your bundler");
    println!("  3. Preview the changes: subexports run --dry-run");
    println!("  4. Apply them: subexports run");
    Ok(())
}
