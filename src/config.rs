use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::{FilterSelection, ALL};
use crate::error::InvalidSelection;

/// Command-line configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "sales-dashboard")]
#[command(about = "Explore sales, profit and performance trends by region and category")]
pub struct Config {
    /// SQLite store holding the sales relation
    #[arg(long, default_value = "data/sales.db")]
    pub db: PathBuf,

    /// Name of the sales relation inside the store
    #[arg(long, default_value = "sales")]
    pub table: String,

    /// Initial region selection
    #[arg(long, default_value = ALL)]
    pub region: String,

    /// Initial category selection
    #[arg(long, default_value = ALL)]
    pub category: String,

    /// Initial year selection
    #[arg(long, default_value = ALL)]
    pub year: String,

    /// Print the report as JSON instead of opening a window
    #[arg(long)]
    pub report: bool,

    /// Write the filtered rows as CSV to this path instead of opening a window
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl Config {
    /// Whether to run without a window.
    pub fn headless(&self) -> bool {
        self.report || self.export.is_some()
    }

    pub fn selection(&self) -> Result<FilterSelection, InvalidSelection> {
        FilterSelection::from_labels(&self.region, &self.category, &self.year)
    }
}
