pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OUTPUT_DIR: &str = "./output";
pub const DEFAULT_SEARCH_ENDPOINT: &str = "http://localhost:9200";
pub const DEFAULT_INDEX_NAME: &str = "company_threat_scores";
pub const DEFAULT_SOURCE_CSV: &str = "threat_scores";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "threat-score")]
#[command(about = "Compute department threat score aggregates and index them for search")]
pub struct CliConfig {
    /// TOML configuration file; flags given here override its values
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory for scenario CSV files and the run summary
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Seed for the random scenario scores
    #[arg(long)]
    pub seed: Option<u64>,

    /// Regenerate scenarios even when their CSV file exists
    #[arg(long)]
    pub refresh: bool,

    /// Populate the search index from the source CSV
    #[arg(long)]
    pub index: bool,

    #[arg(long)]
    pub search_endpoint: Option<String>,

    #[arg(long)]
    pub index_name: Option<String>,

    /// Key of the CSV file (without extension) copied into the index
    #[arg(long)]
    pub source_csv: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Print the indexed scores of this department
    #[arg(long)]
    pub query: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn output_dir(&self) -> &str {
        self.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn refresh(&self) -> bool {
        self.refresh
    }

    fn index_enabled(&self) -> bool {
        self.index
    }

    fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    fn search_endpoint(&self) -> &str {
        self.search_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_SEARCH_ENDPOINT)
    }

    fn index_name(&self) -> &str {
        self.index_name.as_deref().unwrap_or(DEFAULT_INDEX_NAME)
    }

    fn source_csv(&self) -> &str {
        self.source_csv.as_deref().unwrap_or(DEFAULT_SOURCE_CSV)
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

/// Shared by every [`ConfigProvider`].
pub fn validate_provider(config: &impl ConfigProvider) -> Result<()> {
    validation::validate_path("output_dir", config.output_dir())?;
    validation::validate_positive_number("timeout_seconds", config.timeout_seconds(), 1)?;
    if config.search_enabled() {
        validation::validate_url("search_endpoint", config.search_endpoint())?;
        validation::validate_index_name("index_name", config.index_name())?;
    }
    if config.index_enabled() {
        validation::validate_path("source_csv", config.source_csv())?;
    }
    if let Some(department) = config.query() {
        validation::validate_non_empty_string("query", department)?;
    }
    Ok(())
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
