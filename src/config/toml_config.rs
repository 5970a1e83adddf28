use crate::config::{
    validate_provider, CliConfig, DEFAULT_INDEX_NAME, DEFAULT_OUTPUT_DIR, DEFAULT_SEARCH_ENDPOINT,
    DEFAULT_SOURCE_CSV, DEFAULT_TIMEOUT_SECONDS,
};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, ScoreError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub scenarios: ScenarioConfig,
    #[serde(default)]
    pub search: SearchConfig,
    /// Only ever set from the command line.
    #[serde(skip)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub seed: Option<u64>,
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_index_name")]
    pub index_name: String,
    #[serde(default = "default_source_csv")]
    pub source_csv: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            index_name: default_index_name(),
            source_csv: default_source_csv(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_SEARCH_ENDPOINT.to_string()
}

fn default_index_name() -> String {
    DEFAULT_INDEX_NAME.to_string()
}

fn default_source_csv() -> String {
    DEFAULT_SOURCE_CSV.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScoreError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScoreError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ES_ENDPOINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScoreError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 套用命令列覆蓋設定
    pub fn with_overrides(mut self, cli: &CliConfig) -> Self {
        if let Some(dir) = &cli.output_dir {
            self.output.dir = dir.clone();
        }
        if cli.seed.is_some() {
            self.scenarios.seed = cli.seed;
        }
        if cli.refresh {
            self.scenarios.refresh = true;
        }
        if cli.index {
            self.search.enabled = true;
        }
        if cli.query.is_some() {
            self.query = cli.query.clone();
        }
        if let Some(endpoint) = &cli.search_endpoint {
            self.search.endpoint = endpoint.clone();
        }
        if let Some(index_name) = &cli.index_name {
            self.search.index_name = index_name.clone();
        }
        if let Some(source_csv) = &cli.source_csv {
            self.search.source_csv = source_csv.clone();
        }
        if let Some(timeout) = cli.timeout_seconds {
            self.search.timeout_seconds = timeout;
        }
        self
    }
}

impl ConfigProvider for TomlConfig {
    fn output_dir(&self) -> &str {
        &self.output.dir
    }

    fn seed(&self) -> Option<u64> {
        self.scenarios.seed
    }

    fn refresh(&self) -> bool {
        self.scenarios.refresh
    }

    fn index_enabled(&self) -> bool {
        self.search.enabled
    }

    fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    fn search_endpoint(&self) -> &str {
        &self.search.endpoint
    }

    fn index_name(&self) -> &str {
        &self.search.index_name
    }

    fn source_csv(&self) -> &str {
        &self.search.source_csv
    }

    fn timeout_seconds(&self) -> u64 {
        self.search.timeout_seconds
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
