use actiongroup::config::load_config;
use actiongroup::ActionGroupDefinition;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, trace};

/// Resolve parameterized action groups into concrete test steps
#[derive(Parser)]
#[command(name = "actiongroup")]
#[command(about = "Resolve action-group invocations into namespaced test steps", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one invocation of an action group and print its steps as JSON
    Resolve {
        /// Action-group definition (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        definition: PathBuf,

        /// Invocation key used to namespace step keys
        #[arg(short, long)]
        key: String,

        /// Invocation argument as name=value (repeatable)
        #[arg(short, long = "arg", value_parser = parse_argument)]
        args: Vec<(String, String)>,

        /// Path to resolver configuration (TOML)
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,
    },
    /// Print the original step keys of an action group
    Keys {
        /// Action-group definition (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        definition: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .with_writer(std::io::stderr)
        .init();

    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    let result = match cli.command {
        Commands::Resolve {
            definition,
            key,
            args,
            config,
        } => run_resolve(&definition, &key, args, config.as_deref()),
        Commands::Keys { definition } => run_keys(&definition),
    };

    if let Err(e) = result {
        error!("Command failed: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run_resolve(
    definition: &Path,
    key: &str,
    args: Vec<(String, String)>,
    config: Option<&Path>,
) -> Result<()> {
    let config = load_config(config)?;
    let group = load_definition(definition)?;
    let arguments: HashMap<String, String> = args.into_iter().collect();

    debug!(
        "Resolving '{}' with {} arguments as '{}'",
        group.name(),
        arguments.len(),
        key
    );

    let steps = group.get_steps_with(
        &actiongroup::action::LinkedStepSequencer,
        &config,
        &arguments,
        key,
    )?;

    println!("{}", serde_json::to_string_pretty(&steps)?);
    Ok(())
}

fn run_keys(definition: &Path) -> Result<()> {
    let group = load_definition(definition)?;
    for key in group.extract_step_keys() {
        println!("{key}");
    }
    Ok(())
}

fn load_definition(path: &Path) -> Result<ActionGroupDefinition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read action group: {}", path.display()))?;

    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let group = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse action group JSON: {}", path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse action group YAML: {}", path.display()))?
    };

    Ok(group)
}

fn parse_argument(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))
}
