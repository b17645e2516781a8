//! Config command implementation.
//!
//! The analysis configuration lives in a TOML file, by default
//! `<config dir>/fxbench/config.toml`. A missing file means defaults.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};
use fxbench_analytics::AnalysisConfig;
use tracing::debug;

use crate::cli::{Context, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::output::{print_header, print_info, print_output, print_success, print_warning, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Show configuration file location
    Path,

    /// Write the default configuration file
    Init(InitArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Get the default config file path.
fn default_config_path() -> CliResult<PathBuf> {
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| CliError::Config("Could not determine config directory".into()))?;
    Ok(home.join("fxbench").join("config.toml"))
}

/// Resolves the config file path: the explicit one, else the default.
pub fn config_path(explicit: Option<&Path>) -> CliResult<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_path(),
    }
}

/// Loads and validates the analysis configuration.
pub fn load_config(explicit: Option<&Path>) -> CliResult<AnalysisConfig> {
    let path = config_path(explicit)?;
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(AnalysisConfig::default());
    }
    let content = std::fs::read_to_string(&path).map_err(|e| CliError::io(&path, e))?;
    let config: AnalysisConfig = toml::from_str(&content)
        .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
    config.validate()?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx),
        ConfigCommand::Path => execute_path(ctx),
        ConfigCommand::Init(init_args) => execute_init(&init_args, ctx),
    }
}

fn settings(config: &AnalysisConfig) -> Vec<KeyValue> {
    let rules = config
        .suffix_rules
        .iter()
        .map(|r| format!("{} -> {}", r.suffix, r.currency))
        .collect::<Vec<_>>()
        .join(", ");
    vec![
        KeyValue::new("base_index", config.base_index.to_string()),
        KeyValue::new(
            "trading_days_per_year",
            config.trading_days_per_year.to_string(),
        ),
        KeyValue::new("alignment", config.alignment.to_string()),
        KeyValue::new("suffix_rules", rules),
    ]
}

/// Show the effective configuration.
fn execute_show(ctx: &Context) -> Result<()> {
    let config = load_config(ctx.config.as_deref())?;

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header("Current Configuration");
            }
            print_output(&settings(&config), ctx.format)?;
        }
        OutputFormat::Json => crate::output::print_json(&config)?,
        OutputFormat::Csv => print_output(&settings(&config), ctx.format)?,
        OutputFormat::Minimal => {
            for kv in settings(&config) {
                println!("{}={}", kv.key, kv.value);
            }
        }
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path(ctx: &Context) -> Result<()> {
    let path = config_path(ctx.config.as_deref())?;
    if ctx.quiet || ctx.format == OutputFormat::Minimal {
        println!("{}", path.display());
        return Ok(());
    }
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}

/// Write the default configuration.
fn execute_init(args: &InitArgs, ctx: &Context) -> Result<()> {
    let path = config_path(ctx.config.as_deref())?;
    if path.exists() && !args.force {
        print_warning(&format!(
            "{} already exists; use --force to overwrite",
            path.display()
        ));
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CliError::io(parent, e))?;
    }
    let content = toml::to_string_pretty(&AnalysisConfig::default())
        .map_err(|e| CliError::Serialization(e.to_string()))?;
    std::fs::write(&path, content).map_err(|e| CliError::io(&path, e))?;

    if !ctx.quiet {
        print_success(&format!("Wrote default configuration to {}", path.display()));
    }
    Ok(())
}
