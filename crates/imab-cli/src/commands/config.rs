//! Config command implementation.
//!
//! Shows the effective configuration and writes a default config file.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::{Context, OutputFormat};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::output::{print_csv, print_header, print_json, print_output, print_success, KeyValue};

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

    /// Write a configuration file with the default settings
    Init(InitArgs),

    /// Show the user configuration file location
    Path,
}

/// Arguments for the init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Target file (defaults to the user configuration file)
    pub path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: Context, config: &CliConfig) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx, config),
        ConfigCommand::Init(init_args) => init(init_args),
        ConfigCommand::Path => {
            match CliConfig::default_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No configuration directory available."),
            }
            Ok(())
        }
    }
}

fn entries(config: &CliConfig) -> Vec<KeyValue> {
    let opt = &config.optimizer;
    vec![
        KeyValue::new("optimizer.issue_type", opt.issue_type.clone()),
        KeyValue::new("optimizer.mid_boundary", opt.mid_boundary.to_string()),
        KeyValue::new("optimizer.long_boundary", opt.long_boundary.to_string()),
        KeyValue::new("optimizer.short_anchor", opt.short_anchor.to_string()),
        KeyValue::new("optimizer.imab5_mid_anchor", opt.imab5_mid_anchor.to_string()),
        KeyValue::new("optimizer.mid_anchor", opt.mid_anchor.to_string()),
        KeyValue::new(
            "optimizer.long_anchors",
            format!("{}, {}", opt.long_anchors[0], opt.long_anchors[1]),
        ),
        KeyValue::new("optimizer.weight_tolerance", opt.weight_tolerance.to_string()),
        KeyValue::new("output.precision", config.output.precision.to_string()),
        KeyValue::new("output.color", config.output.color.to_string()),
    ]
}

fn show(ctx: Context, config: &CliConfig) -> Result<()> {
    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header("Configuration");
            }
            print_output(&entries(config), ctx.format)?;
        }
        OutputFormat::Json => print_json(config)?,
        OutputFormat::Csv => print_csv(&entries(config))?,
    }
    Ok(())
}

fn init(args: InitArgs) -> Result<()> {
    let path = args
        .path
        .or_else(CliConfig::default_path)
        .ok_or_else(|| CliError::Config("no configuration directory available".to_string()))?;

    if path.exists() && !args.force {
        return Err(CliError::FileExists(path).into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(CliError::from)?;
    }
    std::fs::write(&path, CliConfig::default().to_toml()?).map_err(CliError::from)?;

    print_success(&format!("Configuration written to {}", path.display()));
    Ok(())
}
