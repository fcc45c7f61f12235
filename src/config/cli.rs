use crate::adapters::openai::{DEFAULT_API_ENDPOINT, DEFAULT_MODEL};
use crate::core::ConfigProvider;
use crate::domain::model::RunBounds;
use crate::domain::table::ColumnSchema;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_distinct_names, validate_non_empty_string, validate_path, validate_positive_number,
    validate_required_field, validate_row_bounds, validate_url, Validate,
};
use clap::{Args, Parser};
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "job-classifier")]
#[command(about = "Classify job postings by industry sector, ownership type and state")]
pub struct CliConfig {
    /// CSV file with job postings; prompted for when omitted
    pub input: Option<String>,

    /// TOML configuration file; replaces the service, run and column flags
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, default_value = "60")]
    pub timeout_seconds: u64,

    #[arg(long, default_value = "0")]
    pub start_row: usize,

    #[arg(long, default_value = "123850")]
    pub end_row: usize,

    #[arg(long, default_value = "10000")]
    pub checkpoint_every: usize,

    /// Pause after every service call, in milliseconds
    #[arg(long, default_value = "330")]
    pub delay_ms: u64,

    #[command(flatten)]
    pub columns: ColumnArgs,

    #[arg(long, help = "Hide the progress bar")]
    pub no_progress: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process CPU and memory at each checkpoint")]
    pub monitor: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ColumnArgs {
    #[arg(long = "company-column", default_value = "company_name")]
    pub company: String,

    #[arg(long = "title-column", default_value = "title")]
    pub title: String,

    #[arg(long = "location-column", default_value = "location")]
    pub location: String,

    #[arg(long = "industry-column", default_value = "industry")]
    pub industry: String,

    #[arg(long = "ownership-column", default_value = "ownership")]
    pub ownership: String,

    #[arg(long = "state-column", default_value = "state")]
    pub state: String,
}

impl From<&ColumnArgs> for ColumnSchema {
    fn from(args: &ColumnArgs) -> Self {
        Self {
            company: args.company.clone(),
            title: args.title.clone(),
            location: args.location.clone(),
            industry: args.industry.clone(),
            ownership: args.ownership.clone(),
            state: args.state.clone(),
        }
    }
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn request_timeout_secs(&self) -> u64 {
        self.timeout_seconds
    }

    fn run_bounds(&self) -> RunBounds {
        RunBounds::new(self.start_row, self.end_row, self.checkpoint_every)
    }

    fn call_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    fn show_progress(&self) -> bool {
        !self.no_progress
    }

    fn columns(&self) -> ColumnSchema {
        ColumnSchema::from(&self.columns)
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitor
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_non_empty_string("model", &self.model)?;
        let api_key = validate_required_field("api_key", &self.api_key)?;
        validate_non_empty_string("api_key", api_key)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds as usize, 1)?;
        validate_positive_number("checkpoint_every", self.checkpoint_every, 1)?;
        validate_row_bounds(self.start_row, self.end_row)?;
        validate_distinct_names("columns", &self.columns().all_columns())?;
        if let Some(input) = &self.input {
            validate_path("input", input)?;
        }
        Ok(())
    }
}
