pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{openai::OpenAiClient, storage::LocalStorage};
pub use core::{
    classifier::JobClassifier,
    controller::{RunController, RunPaths},
    engine::ClassificationEngine,
    runner::CheckpointingRunner,
};
pub use domain::model::{Classification, RunBounds, RunOutcome, RunStats};
pub use domain::table::{ColumnSchema, RowTable, TableSource};
pub use utils::error::{ClassifyError, Result};
