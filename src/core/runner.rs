//! Resumable row loop.
//!
//! Rows in `[start_row, end_row]` are classified in ascending order, one
//! service call at a time. The table is saved to the checkpoint path whenever
//! the row index is a multiple of the checkpoint interval. Any storage or
//! table error stops the loop, saves a checkpoint and returns
//! [`RunOutcome::Aborted`]; a clean pass writes the final output and removes
//! the checkpoint.

use crate::core::classifier::JobClassifier;
use crate::core::controller::RunPaths;
use crate::domain::model::{RunBounds, RunOutcome, RunStats};
use crate::domain::ports::{CompletionService, Storage};
use crate::domain::table::RowTable;
use crate::utils::error::{ClassifyError, Result};
use crate::utils::monitor::SystemMonitor;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const DEFAULT_CALL_DELAY: Duration = Duration::from_millis(330);

pub struct CheckpointingRunner<S: Storage, C: CompletionService> {
    storage: S,
    classifier: JobClassifier<C>,
    call_delay: Duration,
    show_progress: bool,
    monitor: SystemMonitor,
}

impl<S: Storage, C: CompletionService> CheckpointingRunner<S, C> {
    pub fn new(storage: S, classifier: JobClassifier<C>) -> Self {
        Self {
            storage,
            classifier,
            call_delay: DEFAULT_CALL_DELAY,
            show_progress: true,
            monitor: SystemMonitor::default(),
        }
    }

    pub fn with_call_delay(mut self, call_delay: Duration) -> Self {
        self.call_delay = call_delay;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn with_monitor(mut self, monitor: SystemMonitor) -> Self {
        self.monitor = monitor;
        self
    }

    pub fn classifier(&self) -> &JobClassifier<C> {
        &self.classifier
    }

    pub fn monitor(&self) -> &SystemMonitor {
        &self.monitor
    }

    pub async fn run(&self, table: &mut RowTable, bounds: RunBounds, paths: &RunPaths) -> RunOutcome {
        let rows = bounds.rows(table.len());
        let mut stats = RunStats::default();

        info!(
            start_row = bounds.start_row,
            end_row = bounds.end_row,
            checkpoint_every = bounds.checkpoint_every,
            rows = rows.len(),
            "Processing job postings..."
        );

        let pb = self.progress_bar(rows.len());

        for index in rows.clone() {
            if let Err(e) = self.process_row(table, index, &bounds, paths, &mut stats).await {
                pb.abandon();
                return self.abort(table, index, e, paths, stats).await;
            }
            pb.inc(1);

            if !self.call_delay.is_zero() {
                tokio::time::sleep(self.call_delay).await;
            }
        }
        pb.finish_and_clear();

        let last_row_index = rows.end.saturating_sub(1).max(rows.start);
        if let Err(e) = self.finish(table, paths).await {
            return self.abort(table, last_row_index, e, paths, stats).await;
        }

        info!("Processed file saved as: {}", paths.output);
        RunOutcome::Completed {
            output_path: paths.output.clone(),
            stats,
        }
    }

    async fn process_row(
        &self,
        table: &mut RowTable,
        index: usize,
        bounds: &RunBounds,
        paths: &RunPaths,
        stats: &mut RunStats,
    ) -> Result<()> {
        let result = {
            let posting = table.posting(index)?;
            self.classifier.classify(&posting).await
        };
        debug!(row = index, industry = result.industry(), "Classified row");

        if result.is_fallback() {
            stats.fallback_rows += 1;
        }
        table.set_classification(index, &result)?;
        stats.rows_processed += 1;

        if bounds.is_checkpoint_row(index) {
            info!("Saving checkpoint at row {}...", index);
            self.save_checkpoint(table, paths).await?;
            stats.checkpoints_written += 1;
            self.monitor.log_stats(&format!("Checkpoint at row {}", index));
        }

        Ok(())
    }

    async fn abort(
        &self,
        table: &RowTable,
        index: usize,
        cause: ClassifyError,
        paths: &RunPaths,
        mut stats: RunStats,
    ) -> RunOutcome {
        let (title, company) = table
            .posting(index)
            .map(|p| (p.title.to_string(), p.company.to_string()))
            .unwrap_or_default();
        error!(
            row = index,
            title = %title,
            company = %company,
            "Error on row {}: {}",
            index,
            cause
        );

        info!("Saving checkpoint before exit...");
        match self.save_checkpoint(table, paths).await {
            Ok(()) => stats.checkpoints_written += 1,
            Err(e) => error!("Could not save checkpoint {}: {}", paths.checkpoint, e),
        }

        RunOutcome::Aborted {
            reason: cause.to_string(),
            last_row_index: index,
            stats,
        }
    }

    async fn save_checkpoint(&self, table: &RowTable, paths: &RunPaths) -> Result<()> {
        let data = table.to_csv()?;
        self.storage.write_file(&paths.checkpoint, &data).await
    }

    async fn finish(&self, table: &RowTable, paths: &RunPaths) -> Result<()> {
        let data = table.to_csv()?;
        self.storage.write_file(&paths.output, &data).await?;

        match self.storage.exists(&paths.checkpoint).await {
            Ok(true) => {
                if let Err(e) = self.storage.remove_file(&paths.checkpoint).await {
                    warn!("Could not remove checkpoint {}: {}", paths.checkpoint, e);
                }
            }
            Ok(false) => {}
            Err(e) => warn!("Could not check for checkpoint {}: {}", paths.checkpoint, e),
        }
        Ok(())
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({per_sec}, eta {eta}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-"),
        );
        pb
    }
}
