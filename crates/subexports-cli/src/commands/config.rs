use crate::logger;
use crate::GlobalOpts;
use clap::Subcommand;
use colored::*;
use subexports_config::ProjectConfig;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the resolved configuration
    Show,
    /// Print the path of the configuration file in use
    Path,
}

pub fn handle_config(action: ConfigAction, opts: &GlobalOpts) -> anyhow::Result<()> {
    let config_path = opts.config_path()?;
    logger::debug(&format!("Reading config from: {}", config_path.display()));

    match action {
        ConfigAction::Show => {
            let config = ProjectConfig::load_from_path(&config_path)?;
            println!("{}", "Configuration:".bold().green());
            println!("  {}: {}", "file".cyan(), config_path.display());
            if !config_path.exists() {
                println!("  {}", "(not found, using defaults)".yellow());
            }
            if config != ProjectConfig::default() {
                println!();
                print!("{}", config.to_toml_string()?);
            }
        }
        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
    }
    Ok(())
}
