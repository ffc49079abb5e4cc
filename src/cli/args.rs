//! CLI argument definitions for `taxontree`

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use logger::Level;
use taxon_tree::config::ConfigOverrides;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self).as_str())
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    Get {
        /// Optional key, e.g. `level` or `layout.node_spacing`
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Print language and family counts for the dataset.
    Stats {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the tree as an indented outline.
    ///
    /// Families deeper than the collapse depth are shown collapsed (`+`).
    Tree {
        /// Expand every family before printing
        #[arg(long)]
        expand_all: bool,
    },
    /// Show the reference identifier and URL for a taxon name.
    Lookup {
        /// Taxon name as it appears in the dataset
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Render an SVG snapshot of the tree.
    ///
    /// Applies the requested expansions and focus, lets every transition
    /// settle and writes the result.
    Render {
        /// Reveal and centre this taxon
        #[arg(long, value_name = "NAME")]
        focus: Option<String>,

        /// Expand these families (and their ancestors) before rendering
        #[arg(long, value_name = "NAME", num_args = 1..)]
        expand: Vec<String>,

        /// Output file (defaults to `tree.svg` in the configured output directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Viewport width in px
        #[arg(long, value_name = "PX")]
        width: Option<f64>,

        /// Viewport height in px
        #[arg(long, value_name = "PX")]
        height: Option<f64>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "taxontree",
    about = "Collapsible language family tree explorer",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Use this dataset JSON instead of the configured one
    #[arg(long, value_name = "FILE")]
    pub dataset: Option<PathBuf>,

    /// Override config output directory
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides for this run
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.log_level.map(|lvl| lvl.to_string()),
            file: self
                .log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.verbose.then_some(true),
            dataset: self
                .dataset
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            output_dir: self
                .out_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}
