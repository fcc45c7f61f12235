use crate::domain::model::RunBounds;
use crate::domain::ports::Storage;
use crate::domain::table::{ColumnSchema, RowTable, TableSource};
use crate::utils::error::{ClassifyError, Result};
use std::path::Path;

/// File locations used by one run, all derived from the input path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub input: String,
    pub checkpoint: String,
    pub output: String,
}

impl RunPaths {
    pub fn derive(input: &str) -> Self {
        let path = Path::new(input);
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("csv");
        let base = path.with_extension("");
        let base = base.to_string_lossy();

        Self {
            input: input.to_string(),
            checkpoint: format!("{}_checkpoint.{}", base, extension),
            output: format!("{}_classified.{}", base, extension),
        }
    }
}

/// Table and bounds handed to the batch runner.
#[derive(Debug)]
pub struct ResolvedRun {
    pub table: RowTable,
    pub bounds: RunBounds,
    pub resumed: bool,
}

pub struct RunController<S: Storage> {
    storage: S,
    schema: ColumnSchema,
}

impl<S: Storage> RunController<S> {
    pub fn new(storage: S, schema: ColumnSchema) -> Self {
        Self { storage, schema }
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    /// Loads the working table and decides where processing starts.
    ///
    /// A checkpoint, when present, replaces the source file entirely and
    /// moves the start to one past the last row with an industry value.
    pub async fn resolve(&self, paths: &RunPaths, defaults: RunBounds) -> Result<ResolvedRun> {
        if !self.storage.exists(&paths.input).await? {
            return Err(ClassifyError::InputNotFound {
                path: paths.input.clone(),
            });
        }

        if self.storage.exists(&paths.checkpoint).await? {
            tracing::info!("Loading from checkpoint {}", paths.checkpoint);
            let data = self.storage.read_file(&paths.checkpoint).await?;
            let table = RowTable::from_csv(
                &data,
                &self.schema,
                TableSource::Checkpoint,
                &paths.checkpoint,
            )?;

            let bounds = match table.resume_offset() {
                Some(offset) => {
                    tracing::info!("Resuming from row {}", offset);
                    defaults.with_start(offset)
                }
                None => defaults,
            };

            return Ok(ResolvedRun {
                table,
                bounds,
                resumed: true,
            });
        }

        let data = self.storage.read_file(&paths.input).await?;
        let table = RowTable::from_csv(&data, &self.schema, TableSource::Input, &paths.input)?;
        tracing::debug!("Loaded {} rows from {}", table.len(), paths.input);

        Ok(ResolvedRun {
            table,
            bounds: defaults,
            resumed: false,
        })
    }
}
