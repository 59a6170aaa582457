use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use shelfgen::config_loader::{self, CliOverrides};
use shelfgen::orchestrator::generate_whitelist;
use shelfgen::whitelist::load_whitelist;

/// Whitelist generator for retail shelf fixtures and product placements
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the whitelist configuration YAML file (built-in chip aisle if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output path for the generated whitelist (overrides general.output)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Shuffle the members of every product group
    #[arg(long)]
    shuffle: bool,

    /// Seed for reproducible member shuffling
    #[arg(long)]
    seed: Option<u64>,

    /// Write compact JSON instead of pretty-printed JSON
    #[arg(long)]
    compact: bool,

    /// Read an existing whitelist and print its summary instead of generating
    #[arg(long, conflicts_with_all = ["config", "output", "shuffle", "seed", "compact"])]
    check: Option<PathBuf>,

    /// Write the built-in configuration to this path and exit
    #[arg(long, conflicts_with = "check")]
    export_default_config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            output: self.output.as_ref().map(|p| p.to_string_lossy().into_owned()),
            shuffle_members: self.shuffle.then_some(true),
            seed: self.seed,
            pretty: self.compact.then_some(false),
        }
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Some(path) = &args.export_default_config {
        config_loader::export_default_config(path)?;
        info!("Built-in configuration written to: {:?}", path);
        return Ok(());
    }

    if let Some(path) = &args.check {
        let document = load_whitelist(path)?;
        println!("{}", document.summary());
        return Ok(());
    }

    info!("Starting whitelist generation");

    let mut config = match &args.config {
        Some(path) => config_loader::load_config(path)?,
        None => config_loader::load_default_config()?,
    };
    config_loader::apply_overrides(&mut config, &args.overrides())?;

    let output_path = PathBuf::from(config.general.output());
    info!("Output file: {:?}", output_path);

    let summary = generate_whitelist(&config, &output_path)?;
    println!("{}", summary);

    info!("Whitelist generation completed successfully");
    Ok(())
}
