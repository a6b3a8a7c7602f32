//! Pipe-delimited tables used as structured step arguments
//!
//! ```text
//! |name   |role |
//! |Vividus|tool |
//! ```

use std::fmt;

use crate::error::{DomainError, DomainResult};
use crate::value::{Value, ValueMap};

const SEPARATOR: char = '|';
const ESCAPE: char = '\\';
const COMMENT_PREFIX: &str = "|--";

/// A table with a header row and zero or more data rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<ValueMap>,
}

impl Table {
    /// Creates a table from headers and rows.
    #[must_use]
    pub const fn new(headers: Vec<String>, rows: Vec<ValueMap>) -> Self {
        Self { headers, rows }
    }

    /// Parses pipe-delimited table text.
    ///
    /// The first non-blank line is the header. Lines starting with `|--` are
    /// comments. A backslash escapes a literal pipe inside a cell. Blank text
    /// produces an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTable`] if a row has a different number of
    /// cells than the header.
    pub fn parse(text: &str) -> DomainResult<Self> {
        let mut lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_PREFIX));

        let Some(header_line) = lines.next() else {
            return Ok(Self::default());
        };
        let headers = split_row(header_line);

        let mut rows = Vec::new();
        for (index, line) in lines.enumerate() {
            let cells = split_row(line);
            if cells.len() != headers.len() {
                return Err(DomainError::InvalidTable(format!(
                    "row {} has {} cells, but the header has {}",
                    index + 1,
                    cells.len(),
                    headers.len()
                )));
            }
            rows.push(
                headers
                    .iter()
                    .cloned()
                    .zip(cells.into_iter().map(Value::String))
                    .collect(),
            );
        }

        Ok(Self { headers, rows })
    }

    /// Returns the header names.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Returns the data rows.
    #[must_use]
    pub fn rows(&self) -> &[ValueMap] {
        &self.rows
    }

    /// Returns the data rows for in-place modification.
    pub fn rows_mut(&mut self) -> &mut [ValueMap] {
        &mut self.rows
    }

    /// Returns the number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn split_row(line: &str) -> Vec<String> {
    let line = line.strip_prefix(SEPARATOR).unwrap_or(line);
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            ESCAPE if chars.peek() == Some(&SEPARATOR) => {
                current.push(SEPARATOR);
                chars.next();
            }
            SEPARATOR => cells.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(ch),
        }
    }

    // A row without a trailing pipe still ends with a cell
    if !current.trim().is_empty() {
        cells.push(current.trim().to_string());
    }

    cells
}

fn escape_cell(cell: &str) -> String {
    cell.replace(SEPARATOR, "\\|")
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.headers.is_empty() {
            return Ok(());
        }
        write!(f, "|")?;
        for header in &self.headers {
            write!(f, "{}|", escape_cell(header))?;
        }
        for row in &self.rows {
            write!(f, "\n|")?;
            for header in &self.headers {
                let cell = row.get(header).map(ToString::to_string).unwrap_or_default();
                write!(f, "{}|", escape_cell(&cell))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_simple_table() {
        let table = Table::parse("|name|role|\n|Vividus|tool|\n|Rust|language|").unwrap();
        assert_eq!(table.headers(), ["name", "role"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[0]["name"], Value::from("Vividus"));
        assert_eq!(table.rows()[1]["role"], Value::from("language"));
    }

    #[test]
    fn test_parse_trims_cells_and_skips_comments() {
        let table = Table::parse("| key | value |\n|-- comment --|\n|  a  |  b  |\n").unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.rows()[0]["key"], Value::from("a"));
        assert_eq!(table.rows()[0]["value"], Value::from("b"));
    }

    #[test]
    fn test_parse_escaped_pipe() {
        let table = Table::parse("|expr|\n|a\\|b|").unwrap();
        assert_eq!(table.rows()[0]["expr"], Value::from("a|b"));
    }

    #[test]
    fn test_parse_blank_is_empty() {
        let table = Table::parse("  \n ").unwrap();
        assert!(table.is_empty());
        assert!(table.headers().is_empty());
    }

    #[test]
    fn test_parse_header_only() {
        let table = Table::parse("|a|b|").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.headers().len(), 2);
    }

    #[test]
    fn test_parse_mismatched_row() {
        let err = Table::parse("|a|b|\n|1|").unwrap_err();
        assert!(matches!(err, DomainError::InvalidTable(_)));
    }

    #[test]
    fn test_display_round_trip() {
        let text = "|name|pipe|\n|x|a\\|b|";
        let table = Table::parse(text).unwrap();
        assert_eq!(table.to_string(), text);
    }
}
