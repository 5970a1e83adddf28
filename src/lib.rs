pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::app::execute;
pub use crate::adapters::{CsvScoreStore, ElasticsearchClient, LocalStorage};
pub use crate::config::{toml_config::TomlConfig, CliConfig};
pub use crate::core::aggregate::{aggregate, mean};
pub use crate::core::runner::ScenarioRunner;
pub use crate::core::scenario::{Scenario, ScoreGenerator};
pub use crate::domain::model::{Company, Department, ScoreRow, ThreatDocument};
pub use crate::utils::error::{Result, ScoreError};
