//! Command-line host for the `taxon-tree` engine

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use logger::{enable_debug, enable_verbose, error, info, init_file_logging, set_level, Level};
use std::error::Error;
use std::process::ExitCode;
use taxon_tree::config::Config;
use taxon_tree::core::dataset::resolve_dataset;

fn main() -> ExitCode {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag wins over config; unknown config levels fall back to warn
    let mut level = config.logging.level.parse().unwrap_or(Level::Warn);
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    if !config.logging.file.is_empty() {
        let log_path = std::path::PathBuf::from(&config.logging.file);
        let display_path = log_path.to_string_lossy();
        if init_file_logging(&log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let result = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
            Ok(())
        }
        command => run_with_dataset(command, &mut config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("✗ {e}");
            ExitCode::FAILURE
        }
    }
}

/// Load the configured dataset and run a command that needs it
fn run_with_dataset(command: Command, config: &mut Config) -> Result<(), Box<dyn Error>> {
    let dataset = resolve_dataset(config.dataset_path().as_deref())?;

    match command {
        Command::Config { .. } => Ok(()),
        Command::Stats { json } => commands::stats::run(&dataset, config, json),
        Command::Tree { expand_all } => {
            commands::tree::run(&dataset, config, expand_all);
            Ok(())
        }
        Command::Lookup { name } => commands::lookup::run(&dataset, config, &name),
        Command::Render {
            focus,
            expand,
            output,
            width,
            height,
        } => commands::render::run(
            &dataset,
            config,
            &commands::render::RenderRequest {
                focus,
                expand,
                output,
                width,
                height,
            },
        ),
    }
}
