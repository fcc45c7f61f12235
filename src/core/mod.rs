pub mod classifier;
pub mod controller;
pub mod engine;
pub mod parser;
pub mod prompt;
pub mod runner;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{Classification, JobPosting, RunBounds, RunOutcome, RunStats};
pub use crate::domain::ports::{CompletionService, ConfigProvider, Storage};
pub use crate::utils::error::Result;
