use crate::adapters::openai::{DEFAULT_API_ENDPOINT, DEFAULT_MODEL};
use crate::core::ConfigProvider;
use crate::domain::model::RunBounds;
use crate::domain::table::ColumnSchema;
use crate::utils::error::{ClassifyError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const PLACEHOLDER_PATTERN: &str = r"\$\{([^}]+)\}";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub columns: ColumnSchema,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    pub input: Option<String>,
    pub start_row: Option<usize>,
    pub end_row: Option<usize>,
    pub checkpoint_every: Option<usize>,
    pub delay_ms: Option<u64>,
    pub show_progress: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ClassifyError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ClassifyError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OPENAI_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(PLACEHOLDER_PATTERN)
            .map_err(|e| ClassifyError::config(format!("invalid placeholder pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn input(&self) -> Option<&str> {
        self.run.input.as_deref()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("service.endpoint", self.api_endpoint())?;
        validation::validate_non_empty_string("service.model", self.model())?;

        // An unresolved ${VAR} placeholder counts as missing.
        let api_key = self.api_key().map(str::to_string);
        let api_key = validation::validate_required_field("service.api_key", &api_key)?;
        validation::validate_non_empty_string("service.api_key", api_key)?;

        validation::validate_positive_number(
            "service.timeout_seconds",
            self.request_timeout_secs() as usize,
            1,
        )?;

        let bounds = self.run_bounds();
        validation::validate_positive_number("run.checkpoint_every", bounds.checkpoint_every, 1)?;
        validation::validate_row_bounds(bounds.start_row, bounds.end_row)?;
        if let Some(input) = self.input() {
            validation::validate_path("run.input", input)?;
        }

        validation::validate_distinct_names("columns", &self.columns.all_columns())?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        self.service.endpoint.as_deref().unwrap_or(DEFAULT_API_ENDPOINT)
    }

    fn model(&self) -> &str {
        self.service.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    fn api_key(&self) -> Option<&str> {
        self.service
            .api_key
            .as_deref()
            .filter(|key| !is_unresolved_placeholder(key))
    }

    fn request_timeout_secs(&self) -> u64 {
        self.service.timeout_seconds.unwrap_or(60)
    }

    fn run_bounds(&self) -> RunBounds {
        RunBounds::new(
            self.run.start_row.unwrap_or(RunBounds::DEFAULT_START_ROW),
            self.run.end_row.unwrap_or(RunBounds::DEFAULT_END_ROW),
            self.run
                .checkpoint_every
                .unwrap_or(RunBounds::DEFAULT_CHECKPOINT_EVERY),
        )
    }

    fn call_delay(&self) -> Duration {
        Duration::from_millis(self.run.delay_ms.unwrap_or(330))
    }

    fn show_progress(&self) -> bool {
        self.run.show_progress.unwrap_or(true)
    }

    fn columns(&self) -> ColumnSchema {
        self.columns.clone()
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

/// True when the whole value is a `${VAR}` left over from substitution.
fn is_unresolved_placeholder(value: &str) -> bool {
    regex::Regex::new(&format!("^{}$", PLACEHOLDER_PATTERN))
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
