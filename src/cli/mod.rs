//! Command-line interface definitions.
//!
//! Uses `clap` derive macros for declarative argument parsing. The tool has
//! a single operation, so the search arguments sit at the top level.

mod search;

pub use search::SearchCommand;

use crate::config::AppSettings;
use crate::error::ConfigResult;
use clap::Parser;
use std::path::PathBuf;

/// leakseek - search a breach-data API and keep the results as JSON.
///
/// Pages through every result for a domain, username, phone number or
/// email address, previews the first rows and saves all of them to a
/// JSON file.
#[derive(Parser, Debug)]
#[command(name = "leakseek")]
#[command(author = "HueCodes <huecodes@proton.me>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search a breach-data API from the command line", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub search: SearchCommand,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress progress and the preview table
    #[arg(long)]
    pub quiet: bool,

    /// Path to a custom settings file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Load settings from `--config` or the default location.
    pub fn load_settings(&self) -> ConfigResult<AppSettings> {
        match &self.config {
            Some(path) => AppSettings::load_from(path),
            None => AppSettings::load(),
        }
    }
}
