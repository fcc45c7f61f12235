//! Row table backed by CSV, addressed through named columns.
//!
//! Column names are resolved to positions once, when the table is loaded.
//! Every other column is carried through untouched.

use crate::domain::model::{Classification, JobPosting};
use crate::utils::error::{ClassifyError, Result};
use serde::{Deserialize, Serialize};

/// Header names of the columns the classifier reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSchema {
    pub company: String,
    pub title: String,
    pub location: String,
    pub industry: String,
    pub ownership: String,
    pub state: String,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self {
            company: "company_name".to_string(),
            title: "title".to_string(),
            location: "location".to_string(),
            industry: "industry".to_string(),
            ownership: "ownership".to_string(),
            state: "state".to_string(),
        }
    }
}

impl ColumnSchema {
    pub fn input_columns(&self) -> [&str; 3] {
        [
            self.company.as_str(),
            self.title.as_str(),
            self.location.as_str(),
        ]
    }

    pub fn output_columns(&self) -> [&str; 3] {
        [
            self.industry.as_str(),
            self.ownership.as_str(),
            self.state.as_str(),
        ]
    }

    pub fn all_columns(&self) -> [&str; 6] {
        [
            self.company.as_str(),
            self.title.as_str(),
            self.location.as_str(),
            self.industry.as_str(),
            self.ownership.as_str(),
            self.state.as_str(),
        ]
    }
}

/// Where a table is loaded from decides how output columns are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSource {
    /// Source file: output columns are appended if missing and cleared.
    Input,
    /// Checkpoint snapshot: all columns must exist and are kept as stored.
    Checkpoint,
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndexes {
    company: usize,
    title: usize,
    location: usize,
    industry: usize,
    ownership: usize,
    state: usize,
}

#[derive(Debug, Clone)]
pub struct RowTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    columns: ColumnIndexes,
}

impl RowTable {
    pub fn from_csv(
        data: &[u8],
        schema: &ColumnSchema,
        source: TableSource,
        source_name: &str,
    ) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(data);

        let mut headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

        let required: Vec<&str> = match source {
            TableSource::Input => schema.input_columns().to_vec(),
            TableSource::Checkpoint => schema.all_columns().to_vec(),
        };
        let missing: Vec<String> = required
            .iter()
            .filter(|name| !headers.iter().any(|h| h == *name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ClassifyError::SchemaError {
                source_name: source_name.to_string(),
                missing,
            });
        }

        if source == TableSource::Input {
            for name in schema.output_columns() {
                if !headers.iter().any(|h| h == name) {
                    headers.push(name.to_string());
                }
            }
        }

        let width = headers.len();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(String::from).collect();
            if row.len() < width {
                row.resize(width, String::new());
            }
            rows.push(row);
        }

        let position = |name: &str| headers.iter().position(|h| h == name).unwrap_or(0);
        let columns = ColumnIndexes {
            company: position(&schema.company),
            title: position(&schema.title),
            location: position(&schema.location),
            industry: position(&schema.industry),
            ownership: position(&schema.ownership),
            state: position(&schema.state),
        };

        let mut table = Self {
            headers,
            rows,
            columns,
        };
        if source == TableSource::Input {
            table.clear_classifications();
        }
        Ok(table)
    }

    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| ClassifyError::IoError(e.into_error()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn posting(&self, index: usize) -> Result<JobPosting<'_>> {
        let row = self.row(index)?;
        Ok(JobPosting {
            title: &row[self.columns.title],
            company: &row[self.columns.company],
            location: &row[self.columns.location],
        })
    }

    pub fn set_classification(&mut self, index: usize, result: &Classification) -> Result<()> {
        let columns = self.columns;
        let len = self.rows.len();
        let row = self
            .rows
            .get_mut(index)
            .ok_or(ClassifyError::RowOutOfRange { index, len })?;
        row[columns.industry] = result.industry().to_string();
        row[columns.ownership] = result.ownership().to_string();
        row[columns.state] = result.state().to_string();
        Ok(())
    }

    /// The stored result, if all three output fields are set.
    pub fn classification(&self, index: usize) -> Option<Classification> {
        let row = self.rows.get(index)?;
        let industry = &row[self.columns.industry];
        let ownership = &row[self.columns.ownership];
        let state = &row[self.columns.state];
        if industry.is_empty() || ownership.is_empty() || state.is_empty() {
            return None;
        }
        Some(Classification::new(industry, ownership, state))
    }

    /// Value of an arbitrary column by header name.
    pub fn field(&self, index: usize, column: &str) -> Option<&str> {
        let position = self.headers.iter().position(|h| h == column)?;
        self.rows.get(index)?.get(position).map(String::as_str)
    }

    /// One past the highest row whose industry field is non-empty.
    ///
    /// Only the industry field is consulted; a row with industry set but
    /// ownership or state empty counts as processed.
    pub fn resume_offset(&self) -> Option<usize> {
        self.rows
            .iter()
            .rposition(|row| !row[self.columns.industry].is_empty())
            .map(|index| index + 1)
    }

    fn clear_classifications(&mut self) {
        let columns = self.columns;
        for row in &mut self.rows {
            row[columns.industry].clear();
            row[columns.ownership].clear();
            row[columns.state].clear();
        }
    }

    fn row(&self, index: usize) -> Result<&Vec<String>> {
        self.rows.get(index).ok_or(ClassifyError::RowOutOfRange {
            index,
            len: self.rows.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "job_id,company_name,title,description,location\n\
        1,Acme Inc,Engineer,Builds things,\"Dallas, TX\"\n\
        2,First Baptist Church,Teacher,Teaches,\"Austin, TX\"\n";

    fn load(data: &str, source: TableSource) -> Result<RowTable> {
        RowTable::from_csv(data.as_bytes(), &ColumnSchema::default(), source, "jobs.csv")
    }

    #[test]
    fn test_input_load_appends_output_columns() {
        let table = load(SOURCE, TableSource::Input).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.headers(),
            &["job_id", "company_name", "title", "description", "location", "industry", "ownership", "state"]
        );
        let posting = table.posting(0).unwrap();
        assert_eq!(posting.title, "Engineer");
        assert_eq!(posting.company, "Acme Inc");
        assert_eq!(posting.location, "Dallas, TX");
        assert!(table.classification(0).is_none());
        assert_eq!(table.resume_offset(), None);
    }

    #[test]
    fn test_input_load_clears_existing_outputs() {
        let data = "company_name,title,location,industry,ownership,state\n\
            Acme Inc,Engineer,Dallas,Construction,Private Sector,TX\n";
        let table = load(data, TableSource::Input).unwrap();
        assert_eq!(table.field(0, "industry"), Some(""));
        assert_eq!(table.field(0, "state"), Some(""));
    }

    #[test]
    fn test_missing_input_columns() {
        let data = "company_name,description\nAcme Inc,x\n";
        let err = load(data, TableSource::Input).unwrap_err();
        match err {
            ClassifyError::SchemaError { missing, .. } => {
                assert_eq!(missing, vec!["title".to_string(), "location".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_checkpoint_requires_output_columns() {
        assert!(matches!(
            load(SOURCE, TableSource::Checkpoint),
            Err(ClassifyError::SchemaError { .. })
        ));
    }

    #[test]
    fn test_checkpoint_keeps_values_and_finds_resume_offset() {
        let data = "company_name,title,location,industry,ownership,state\n\
            Acme Inc,Engineer,Dallas,Construction,Private Sector,TX\n\
            Beta LLC,Clerk,Austin,,,\n";
        let table = load(data, TableSource::Checkpoint).unwrap();
        assert_eq!(
            table.classification(0),
            Some(Classification::new("Construction", "Private Sector", "TX"))
        );
        assert_eq!(table.resume_offset(), Some(1));
    }

    #[test]
    fn test_write_roundtrip_preserves_other_columns() {
        let mut table = load(SOURCE, TableSource::Input).unwrap();
        table
            .set_classification(1, &Classification::new("Other services", "Private Sector", "TX"))
            .unwrap();

        let bytes = table.to_csv().unwrap();
        let reloaded = RowTable::from_csv(
            &bytes,
            &ColumnSchema::default(),
            TableSource::Checkpoint,
            "jobs_checkpoint.csv",
        )
        .unwrap();

        assert_eq!(reloaded.field(1, "description"), Some("Teaches"));
        assert_eq!(reloaded.field(0, "location"), Some("Dallas, TX"));
        assert_eq!(
            reloaded.classification(1).unwrap().industry(),
            "Other services"
        );
        assert!(reloaded.classification(0).is_none());
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let data = "company_name,title,location,extra\nAcme Inc,Engineer\n";
        let table = load(data, TableSource::Input).unwrap();
        assert_eq!(table.posting(0).unwrap().location, "");
        assert_eq!(table.field(0, "extra"), Some(""));
    }

    #[test]
    fn test_row_out_of_range() {
        let mut table = load(SOURCE, TableSource::Input).unwrap();
        assert!(matches!(
            table.posting(5),
            Err(ClassifyError::RowOutOfRange { index: 5, len: 2 })
        ));
        assert!(table
            .set_classification(2, &Classification::fallback())
            .is_err());
    }
}
