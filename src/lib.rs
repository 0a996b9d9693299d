//! A small CSV extraction library for unquoted, comma-delimited files.
//! The main entrypoints to use are
//!
//! - [`CsvFile`] and its methods to load a file into memory and pull
//!   columns, rows, or keyword matches out of it
//! - [`Request`]. Use `parse_request` to parse one from a command string,
//!   then [`execute`] to dispatch it and get a structured [`Outcome`].
//! - [`writer`] for writing tables back out and appending result blocks
//!   to an output file.
//!
//! No operation here aborts on a missing file or column: every failure is
//! carried in the returned value, and [`Outcome::render`] turns it into a
//! displayable error line.

mod parser;
pub mod writer;

use std::path::Path;

pub use parser::{parse_request, Request};
use thiserror::Error;

/// Why a read operation produced no data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvError {
    #[error("File not found")]
    FileNotFound,
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}

/// Split a raw line on commas. There is no quoting or escaping: a comma
/// always ends a field, and a line ending in `,` yields a final empty
/// field, which is kept. This pairs with the trailing delimiter that
/// [`writer::write_csv`] emits after every field.
pub fn split_fields(line: &str) -> Vec<&str> {
    line.split(',').collect()
}

/// Find the position of `name` among the header fields. Header fields are
/// compared after trimming surrounding whitespace; the comparison is
/// case-sensitive and the first match wins when names repeat.
pub fn resolve_column(headers: &[&str], name: &str) -> Result<usize, CsvError> {
    headers
        .iter()
        .position(|header| header.trim() == name)
        .ok_or_else(|| CsvError::ColumnNotFound(name.to_string()))
}

/// A CSV file loaded into memory as raw lines. The first line, when there
/// is one, is the header row.
pub struct CsvFile {
    lines: Vec<String>,
}

impl CsvFile {
    /// Read the whole file into memory. Any failure to open or read the
    /// path is reported as [`CsvError::FileNotFound`]; the handle is
    /// closed before this returns.
    pub fn load(path: &Path) -> Result<CsvFile, CsvError> {
        let contents = std::fs::read_to_string(path).map_err(|_| CsvError::FileNotFound)?;
        Ok(CsvFile {
            lines: contents.lines().map(String::from).collect(),
        })
    }

    fn header(&self) -> Option<Vec<&str>> {
        self.lines.first().map(|line| split_fields(line))
    }

    fn data_lines(&self) -> &[String] {
        if self.lines.is_empty() {
            &[]
        } else {
            &self.lines[1..]
        }
    }

    /// Extract a single column by header name, trimming each value.
    ///
    /// A file with no header line has nothing to extract and yields an
    /// empty sequence. Rows too short to reach the column contribute no
    /// value, not a placeholder.
    pub fn column(&self, name: &str) -> Result<Vec<String>, CsvError> {
        let Some(headers) = self.header() else {
            return Ok(Vec::new());
        };
        let index = resolve_column(&headers, name)?;
        Ok(self
            .data_lines()
            .iter()
            .filter_map(|line| {
                let fields = split_fields(line);
                fields.get(index).map(|value| value.trim().to_string())
            })
            .collect())
    }

    /// Extract several columns at once, one result slot per requested
    /// name, in request order. Each name resolves independently, so one
    /// unknown column does not stop the others from populating.
    ///
    /// An empty file yields an empty outer sequence, no slots at all.
    pub fn columns(&self, names: &[String]) -> Vec<Result<Vec<String>, CsvError>> {
        let Some(headers) = self.header() else {
            return Vec::new();
        };
        let resolved: Vec<Result<usize, CsvError>> = names
            .iter()
            .map(|name| resolve_column(&headers, name))
            .collect();
        let mut slots: Vec<Result<Vec<String>, CsvError>> = resolved
            .iter()
            .map(|slot| slot.clone().map(|_| Vec::new()))
            .collect();
        for line in self.data_lines() {
            let fields = split_fields(line);
            for (slot, resolved) in slots.iter_mut().zip(resolved.iter()) {
                if let (Ok(values), Ok(index)) = (slot, resolved) {
                    if let Some(value) = fields.get(*index) {
                        values.push(value.trim().to_string());
                    }
                }
            }
        }
        slots
    }

    /// Select data rows by number, emitted in file order regardless of
    /// request order. Numbers are compared directly against a counter
    /// that starts at 0 on the first data row (the header is skipped), so
    /// callers passing 1-based user input get the row *after* the one
    /// they named. That mismatch is long-standing observable behavior and
    /// is kept as-is; numbers matching no row contribute nothing.
    pub fn rows(&self, numbers: &[usize]) -> Vec<Vec<String>> {
        self.data_lines()
            .iter()
            .enumerate()
            .filter(|(counter, _)| numbers.contains(counter))
            .map(|(_, line)| owned_fields(line))
            .collect()
    }

    /// Every row in the file, header included, fields untrimmed.
    pub fn all(&self) -> Vec<Vec<String>> {
        self.lines.iter().map(|line| owned_fields(line)).collect()
    }

    /// Rows whose raw line contains `keyword` as a substring. The test
    /// runs against the unsplit line, so a match inside any field or even
    /// spanning a comma counts, and the header row is scanned like any
    /// other line.
    pub fn matching(&self, keyword: &str) -> Vec<Vec<String>> {
        self.lines
            .iter()
            .filter(|line| line.contains(keyword))
            .map(|line| owned_fields(line))
            .collect()
    }
}

fn owned_fields(line: &str) -> Vec<String> {
    split_fields(line).into_iter().map(String::from).collect()
}

/// Read one column from the file at `path`. See [`CsvFile::column`].
pub fn read_column(path: &Path, name: &str) -> Result<Vec<String>, CsvError> {
    CsvFile::load(path)?.column(name)
}

/// Read several columns from the file at `path`. When the file itself
/// cannot be read, every requested name gets its own error slot.
pub fn read_multiple_columns(path: &Path, names: &[String]) -> Vec<Result<Vec<String>, CsvError>> {
    match CsvFile::load(path) {
        Ok(file) => file.columns(names),
        Err(err) => names.iter().map(|_| Err(err.clone())).collect(),
    }
}

/// Read data rows by number from the file at `path`. See [`CsvFile::rows`].
pub fn read_rows(path: &Path, numbers: &[usize]) -> Result<Vec<Vec<String>>, CsvError> {
    Ok(CsvFile::load(path)?.rows(numbers))
}

/// Read the whole file at `path`, header row first.
pub fn read_all(path: &Path) -> Result<Vec<Vec<String>>, CsvError> {
    Ok(CsvFile::load(path)?.all())
}

/// Read the rows of the file at `path` whose raw text contains `keyword`.
pub fn filter_by_keyword(path: &Path, keyword: &str) -> Result<Vec<Vec<String>>, CsvError> {
    Ok(CsvFile::load(path)?.matching(keyword))
}

/// The structured result of dispatching one [`Request`].
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Column(Result<Vec<String>, CsvError>),
    Columns(Vec<(String, Result<Vec<String>, CsvError>)>),
    Rows(Result<Vec<Vec<String>>, CsvError>),
    Matches(Result<Vec<Vec<String>>, CsvError>),
    All(Result<Vec<Vec<String>>, CsvError>),
}

/// Dispatch a request against the file at `path`. Never fails: whatever
/// goes wrong is carried inside the returned [`Outcome`].
pub fn execute(path: &Path, request: &Request) -> Outcome {
    match request {
        Request::Column { name } => Outcome::Column(read_column(path, name)),
        Request::Columns { names } => {
            let results = read_multiple_columns(path, names);
            Outcome::Columns(names.iter().cloned().zip(results).collect())
        }
        Request::Rows { numbers } => Outcome::Rows(read_rows(path, numbers)),
        Request::Find { keyword } => Outcome::Matches(filter_by_keyword(path, keyword)),
        Request::All => Outcome::All(read_all(path)),
    }
}

impl Outcome {
    /// Render the outcome as display lines: raw values for column reads
    /// (multi-column blocks labelled `Column: <name>`), space-joined
    /// fields for row and keyword reads, comma-rejoined lines for the
    /// whole-file dump. Failures render as an `Error:` line in place of
    /// data, so there is always something to show and persist.
    pub fn render(&self) -> Vec<String> {
        match self {
            Outcome::Column(result) => render_values(result),
            Outcome::Columns(columns) => {
                let mut lines = Vec::new();
                for (name, result) in columns {
                    lines.push(format!("Column: {name}"));
                    lines.extend(render_values(result));
                }
                lines
            }
            Outcome::Rows(result) | Outcome::Matches(result) => match result {
                Ok(rows) => rows.iter().map(|row| row.join(" ")).collect(),
                Err(err) => vec![format!("Error: {err}")],
            },
            Outcome::All(result) => match result {
                // Rejoining on the delimiter reconstructs each raw line
                // exactly, trailing empty fields included.
                Ok(rows) => rows.iter().map(|row| row.join(",")).collect(),
                Err(err) => vec![format!("Error: {err}")],
            },
        }
    }

    /// Header row and data rows, for outcomes that carry a whole table.
    /// This is what gets forwarded to [`writer::write_csv`] for the
    /// structured export path.
    pub fn table(&self) -> Option<(&[String], &[Vec<String>])> {
        match self {
            Outcome::All(Ok(rows)) if !rows.is_empty() => Some((rows[0].as_slice(), &rows[1..])),
            _ => None,
        }
    }
}

fn render_values(result: &Result<Vec<String>, CsvError>) -> Vec<String> {
    match result {
        Ok(values) => values.clone(),
        Err(err) => vec![format!("Error: {err}")],
    }
}
