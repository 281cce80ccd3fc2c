//! Config command - manage configuration.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use procure_core::ProcureConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "extraction.proforma_excerpt_chars")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(),
        ConfigCommand::Init(init_args) => init_config(init_args),
        ConfigCommand::Get { key } => get_config(&key),
        ConfigCommand::Set { key, value } => set_config(&key, &value),
        ConfigCommand::Path => show_path(),
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("procure")
        .join("config.json")
}

fn show_config() -> anyhow::Result<()> {
    let config_path = default_config_path();

    let config = if config_path.exists() {
        ProcureConfig::from_file(&config_path)?
    } else {
        println!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
        ProcureConfig::default()
    };

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(default_config_path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let config = ProcureConfig::default();
    config.save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(key: &str) -> anyhow::Result<()> {
    let config_path = default_config_path();

    let config = if config_path.exists() {
        ProcureConfig::from_file(&config_path)?
    } else {
        ProcureConfig::default()
    };

    // Convert config to JSON for key lookup
    let json = serde_json::to_value(&config)?;

    let parts: Vec<&str> = key.split('.').collect();
    let mut current = &json;

    for part in &parts {
        current = current
            .get(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    }

    println!("{}", serde_json::to_string_pretty(current)?);

    Ok(())
}

fn set_config(key: &str, value: &str) -> anyhow::Result<()> {
    let config_path = default_config_path();

    let config = if config_path.exists() {
        ProcureConfig::from_file(&config_path)?
    } else {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        ProcureConfig::default()
    };

    // Parse the value; bare strings pass through unquoted
    let parsed_value: serde_json::Value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

    let mut json = serde_json::to_value(&config)?;
    set_config_key(&mut json, key, parsed_value.clone())?;

    // Deserializing back rejects values of the wrong type
    let config: ProcureConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
    config.save(&config_path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed_value)?
    );

    Ok(())
}

/// Set a dotted key in the config JSON.
///
/// A serialized `ProcureConfig` always carries every known field, so a key
/// that does not already exist is a typo, not a new setting; it is
/// rejected rather than inserted.
fn set_config_key(
    json: &mut serde_json::Value,
    key: &str,
    value: serde_json::Value,
) -> anyhow::Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let mut current = json;

    for (i, part) in parts.iter().enumerate() {
        if i == parts.len() - 1 {
            let obj = current
                .as_object_mut()
                .ok_or_else(|| anyhow::anyhow!("Cannot set value at non-object path: {}", key))?;
            if !obj.contains_key(*part) {
                anyhow::bail!("Unknown configuration key: {}", key);
            }
            obj.insert((*part).to_string(), value);
            return Ok(());
        }

        current = current
            .get_mut(*part)
            .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
    }

    anyhow::bail!("Empty configuration key")
}

fn show_path() -> anyhow::Result<()> {
    let config_path = default_config_path();

    println!("Configuration file: {}", config_path.display());

    if config_path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'procure config init' to create a configuration file.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_known_key() {
        let mut json = serde_json::to_value(ProcureConfig::default()).unwrap();
        set_config_key(
            &mut json,
            "extraction.receipt_excerpt_chars",
            serde_json::json!(2000),
        )
        .unwrap();

        let config: ProcureConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.extraction.receipt_excerpt_chars, 2000);
    }

    #[test]
    fn test_set_rejects_unknown_key() {
        let mut json = serde_json::to_value(ProcureConfig::default()).unwrap();

        let err = set_config_key(&mut json, "extraction.excerpt_chars", serde_json::json!(1))
            .unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));

        let err = set_config_key(&mut json, "nonsense", serde_json::json!(1)).unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
    }

    #[test]
    fn test_set_rejects_unknown_section() {
        let mut json = serde_json::to_value(ProcureConfig::default()).unwrap();
        let err = set_config_key(&mut json, "nonsense.key", serde_json::json!(1)).unwrap_err();
        assert!(err.to_string().contains("path not found"));
    }
}
