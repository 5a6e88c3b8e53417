use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = match Config::read_from(&path) {
        Ok(Some(config)) => config,
        Ok(None) => {
            println!(
                "{} {}",
                "No config file at".dimmed(),
                path.display().to_string().dimmed()
            );
            Config::default()
        }
        Err(e) => {
            println!("{} {e:#}", "warning:".yellow().bold());
            println!("{}", "Showing defaults instead.".dimmed());
            Config::default()
        }
    };

    println!("{}", "Effective settings".bold());
    println!("  {:<20} {}", "defaults.theme".cyan(), config.theme());
    println!("  {:<20} {}", "defaults.windowed".cyan(), config.windowed());
    println!("  {:<20} {}", "display.motifs".cyan(), config.motifs());
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    // Refuse to overwrite a file the user has to fix by hand.
    let mut config = Config::read_from(&Config::path()?)?.unwrap_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    log::info!("config {key} set to {value}");
    println!(
        "{} {} = {} ({})",
        "Saved".green(),
        key,
        value,
        path.display()
    );
    Ok(())
}
