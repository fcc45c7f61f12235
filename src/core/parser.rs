use crate::domain::model::Classification;
use crate::utils::error::{ClassifyError, Result};

const INDUSTRY_LABEL: &str = "Industry:";
const OWNERSHIP_LABEL: &str = "Ownership:";
const STATE_LABEL: &str = "State:";

/// Parses the three-line service reply.
///
/// Blank lines are skipped and the first three remaining lines are read as
/// industry, ownership and state in that order, each with its label prefix
/// removed. Values are not checked against the taxonomy. Fewer than three
/// lines, or a line with nothing after its label, is an error; there is no
/// partial result.
pub fn parse_response(text: &str) -> Result<Classification> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() < 3 {
        return Err(ClassifyError::malformed(format!(
            "expected 3 lines, got {}",
            lines.len()
        )));
    }

    let industry = field_value(lines[0], INDUSTRY_LABEL)?;
    let ownership = field_value(lines[1], OWNERSHIP_LABEL)?;
    let state = field_value(lines[2], STATE_LABEL)?;

    Ok(Classification::new(industry, ownership, state))
}

fn field_value<'a>(line: &'a str, label: &str) -> Result<&'a str> {
    let value = line.strip_prefix(label).unwrap_or(line).trim();
    if value.is_empty() {
        return Err(ClassifyError::malformed(format!("empty value for {}", label)));
    }
    Ok(value)
}
