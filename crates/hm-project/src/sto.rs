//! Loader for whitespace-delimited `.sto` column files.
//!
//! Layout: free-form header lines, a line reading `endheader`, one line of
//! column names, then one row of numbers per line. Blank lines are skipped.

use std::collections::HashMap;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum StoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No 'endheader' line found")]
    MissingEndHeader,

    #[error("No column name line after 'endheader'")]
    MissingColumnHeader,

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Line {line}: cannot parse '{token}' as a number")]
    ParseFloat { line: usize, token: String },

    #[error("Line {line}: expected {expected} values, found {found}")]
    RowWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Column-oriented table read from a `.sto` file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoTable {
    columns: Vec<String>,
    data: HashMap<String, Vec<f64>>,
}

impl StoTable {
    /// Column names in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.data.get(name).map(Vec::as_slice)
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.columns
            .first()
            .and_then(|c| self.data.get(c))
            .map_or(0, Vec::len)
    }

    pub fn into_map(self) -> HashMap<String, Vec<f64>> {
        self.data
    }
}

/// Parse `.sto` text.
pub fn parse_sto(text: &str) -> Result<StoTable, StoError> {
    let mut lines = text.lines().enumerate();

    lines
        .by_ref()
        .find(|(_, l)| l.trim().eq_ignore_ascii_case("endheader"))
        .ok_or(StoError::MissingEndHeader)?;

    let (_, header) = lines.next().ok_or(StoError::MissingColumnHeader)?;
    let columns: Vec<String> = header.split_whitespace().map(str::to_string).collect();
    if columns.is_empty() {
        return Err(StoError::MissingColumnHeader);
    }

    let mut data: HashMap<String, Vec<f64>> = HashMap::with_capacity(columns.len());
    for name in &columns {
        if data.insert(name.clone(), Vec::new()).is_some() {
            return Err(StoError::DuplicateColumn(name.clone()));
        }
    }

    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;

        let values = line
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| StoError::ParseFloat {
                    line: line_no,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        if values.len() != columns.len() {
            return Err(StoError::RowWidth {
                line: line_no,
                expected: columns.len(),
                found: values.len(),
            });
        }

        for (name, value) in columns.iter().zip(values) {
            if let Some(col) = data.get_mut(name) {
                col.push(value);
            }
        }
    }

    Ok(StoTable { columns, data })
}

/// Read and parse a `.sto` file.
pub fn load_sto(path: &Path) -> Result<StoTable, StoError> {
    let content = std::fs::read_to_string(path)?;
    parse_sto(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Sub07squat EMG
version=1
nRows=3
nColumns=3
inDegrees=no
endheader
time\tbicep1\ttricep1

0.000\t0.10\t0.20
0.001\t0.15\t0.25
0.002\t0.20\t0.30
";

    #[test]
    fn parses_columns_in_order() {
        let table = parse_sto(SAMPLE).unwrap();
        assert_eq!(table.columns(), &["time", "bicep1", "tricep1"]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column("bicep1").unwrap(), &[0.10, 0.15, 0.20]);
        assert_eq!(table.column("time").unwrap()[2], 0.002);
        assert!(table.column("quad").is_none());
    }

    #[test]
    fn endheader_is_case_insensitive() {
        let table = parse_sto("  EndHeader  \na b\n1 2\n").unwrap();
        assert_eq!(table.column("b").unwrap(), &[2.0]);
    }

    #[test]
    fn missing_endheader() {
        assert!(matches!(
            parse_sto("time a\n1 2\n"),
            Err(StoError::MissingEndHeader)
        ));
    }

    #[test]
    fn missing_column_line() {
        assert!(matches!(
            parse_sto("endheader\n"),
            Err(StoError::MissingColumnHeader)
        ));
    }

    #[test]
    fn bad_number_reports_line() {
        let err = parse_sto("endheader\na b\n1 2\n3 x\n").unwrap_err();
        match err {
            StoError::ParseFloat { line, token } => {
                assert_eq!(line, 4);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_row_is_rejected() {
        let err = parse_sto("endheader\na b c\n1 2\n").unwrap_err();
        assert!(matches!(
            err,
            StoError::RowWidth {
                line: 3,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn duplicate_column_is_rejected() {
        assert!(matches!(
            parse_sto("endheader\na a\n1 2\n"),
            Err(StoError::DuplicateColumn(_))
        ));
    }
}
