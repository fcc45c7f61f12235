use serde::{Deserialize, Serialize};
use std::ops::Range;

pub const UNCLASSIFIED_INDUSTRY: &str = "Unclassified";
pub const DEFAULT_OWNERSHIP: &str = "Private Sector";
pub const UNKNOWN_STATE: &str = "NA";

/// Industry, ownership and state assigned to one job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    industry: String,
    ownership: String,
    state: String,
}

impl Classification {
    pub fn new(
        industry: impl Into<String>,
        ownership: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            industry: industry.into(),
            ownership: ownership.into(),
            state: state.into(),
        }
    }

    /// The tuple substituted whenever the service cannot be trusted to have answered.
    pub fn fallback() -> Self {
        Self::new(UNCLASSIFIED_INDUSTRY, DEFAULT_OWNERSHIP, UNKNOWN_STATE)
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }

    pub fn industry(&self) -> &str {
        &self.industry
    }

    pub fn ownership(&self) -> &str {
        &self.ownership
    }

    pub fn state(&self) -> &str {
        &self.state
    }
}

/// The input fields of one row, borrowed from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobPosting<'a> {
    pub title: &'a str,
    pub company: &'a str,
    pub location: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunBounds {
    pub start_row: usize,
    pub end_row: usize,
    pub checkpoint_every: usize,
}

impl RunBounds {
    pub const DEFAULT_START_ROW: usize = 0;
    pub const DEFAULT_END_ROW: usize = 123_850;
    pub const DEFAULT_CHECKPOINT_EVERY: usize = 10_000;

    pub fn new(start_row: usize, end_row: usize, checkpoint_every: usize) -> Self {
        Self {
            start_row,
            end_row,
            checkpoint_every,
        }
    }

    pub fn with_start(self, start_row: usize) -> Self {
        Self { start_row, ..self }
    }

    /// Row indexes to visit: `[start_row, end_row]` clipped to the table length.
    pub fn rows(&self, table_len: usize) -> Range<usize> {
        let end = self.end_row.saturating_add(1).min(table_len);
        self.start_row..end.max(self.start_row)
    }

    pub fn is_checkpoint_row(&self, index: usize) -> bool {
        self.checkpoint_every > 0 && index % self.checkpoint_every == 0
    }
}

impl Default for RunBounds {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_START_ROW,
            Self::DEFAULT_END_ROW,
            Self::DEFAULT_CHECKPOINT_EVERY,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Rows classified during this invocation.
    pub rows_processed: usize,
    /// Checkpoint saves, including the one made on abort.
    pub checkpoints_written: usize,
    /// Rows that received the fallback tuple.
    pub fallback_rows: usize,
    pub resumed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed {
        output_path: String,
        stats: RunStats,
    },
    Aborted {
        reason: String,
        last_row_index: usize,
        stats: RunStats,
    },
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub fn stats(&self) -> &RunStats {
        match self {
            Self::Completed { stats, .. } | Self::Aborted { stats, .. } => stats,
        }
    }

    pub fn stats_mut(&mut self) -> &mut RunStats {
        match self {
            Self::Completed { stats, .. } | Self::Aborted { stats, .. } => stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_tuple() {
        let fallback = Classification::fallback();
        assert_eq!(fallback.industry(), "Unclassified");
        assert_eq!(fallback.ownership(), "Private Sector");
        assert_eq!(fallback.state(), "NA");
        assert!(fallback.is_fallback());
        assert!(!Classification::new("Construction", "Private Sector", "NA").is_fallback());
    }

    #[test]
    fn test_rows_clipped_to_table() {
        let bounds = RunBounds::new(1, 123_850, 10);
        assert_eq!(bounds.rows(5), 1..5);
        assert_eq!(RunBounds::new(0, 2, 10).rows(5), 0..3);
        assert_eq!(RunBounds::new(0, 2, 10).rows(0).count(), 0);
        assert_eq!(RunBounds::new(7, 9, 10).rows(5).count(), 0);
    }

    #[test]
    fn test_checkpoint_rows() {
        let bounds = RunBounds::new(1, 25, 10);
        let hits: Vec<usize> = bounds
            .rows(100)
            .filter(|i| bounds.is_checkpoint_row(*i))
            .collect();
        assert_eq!(hits, vec![10, 20]);
        assert!(bounds.is_checkpoint_row(0));
    }
}
