use crate::adapters::openai::OpenAiClient;
use crate::core::classifier::JobClassifier;
use crate::core::controller::{RunController, RunPaths};
use crate::core::runner::CheckpointingRunner;
use crate::domain::model::{RunBounds, RunOutcome};
use crate::domain::ports::{CompletionService, ConfigProvider, Storage};
use crate::domain::table::ColumnSchema;
use crate::utils::error::{ClassifyError, Result};
use crate::utils::monitor::SystemMonitor;
use std::time::Duration;

/// Classifies one input file end to end: resolve, run, report.
pub struct ClassificationEngine<S: Storage + Clone, C: CompletionService> {
    controller: RunController<S>,
    runner: CheckpointingRunner<S, C>,
    bounds: RunBounds,
}

impl<S: Storage + Clone, C: CompletionService> ClassificationEngine<S, C> {
    pub fn new(
        storage: S,
        classifier: JobClassifier<C>,
        schema: ColumnSchema,
        bounds: RunBounds,
    ) -> Self {
        Self {
            controller: RunController::new(storage.clone(), schema),
            runner: CheckpointingRunner::new(storage, classifier),
            bounds,
        }
    }

    pub fn with_call_delay(mut self, call_delay: Duration) -> Self {
        self.runner = self.runner.with_call_delay(call_delay);
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.runner = self.runner.with_progress(show_progress);
        self
    }

    pub fn with_monitor(mut self, monitor: SystemMonitor) -> Self {
        self.runner = self.runner.with_monitor(monitor);
        self
    }

    pub fn bounds(&self) -> RunBounds {
        self.bounds
    }

    pub async fn run(&self, input: &str) -> Result<RunOutcome> {
        tracing::info!("Starting job classification for {}", input);

        let paths = RunPaths::derive(input);
        let resolved = self.controller.resolve(&paths, self.bounds).await?;
        let mut table = resolved.table;

        let mut outcome = self.runner.run(&mut table, resolved.bounds, &paths).await;
        outcome.stats_mut().resumed = resolved.resumed;

        let stats = outcome.stats();
        tracing::info!(
            rows_processed = stats.rows_processed,
            checkpoints_written = stats.checkpoints_written,
            fallback_rows = stats.fallback_rows,
            resumed = stats.resumed,
            "Run finished"
        );
        self.runner.monitor().log_final_stats();

        Ok(outcome)
    }
}

impl<S: Storage + Clone> ClassificationEngine<S, OpenAiClient> {
    /// Builds the HTTP client and engine from validated configuration.
    pub fn from_config<P: ConfigProvider>(storage: S, config: &P) -> Result<Self> {
        let api_key = config
            .api_key()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ClassifyError::MissingConfigError {
                field: "api_key".to_string(),
            })?;

        let client = OpenAiClient::new(
            config.api_endpoint(),
            api_key,
            config.model(),
            config.request_timeout_secs(),
        )?;
        let classifier = JobClassifier::new(client);

        Ok(
            Self::new(storage, classifier, config.columns(), config.run_bounds())
                .with_call_delay(config.call_delay())
                .with_progress(config.show_progress())
                .with_monitor(SystemMonitor::new(config.monitoring_enabled())),
        )
    }
}
