//! Writing results back to disk: a full-file CSV writer for structured
//! output and an append-mode sink for rendered result blocks. Both report
//! failure through their return value plus a logged diagnostic; neither
//! ever raises to the caller.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::warn;

/// Overwrite `path` with a header row and data rows. Every field,
/// including the last on a line, is followed by the delimiter; readers in
/// this crate keep the resulting empty trailing field.
///
/// Returns `true` only if the file was created and every write completed.
/// A target that cannot be created (a missing parent directory, say)
/// yields `false` and a diagnostic.
pub fn write_csv(path: &Path, headers: &[String], rows: &[Vec<String>]) -> bool {
    match try_write(path, headers, rows) {
        Ok(()) => true,
        Err(err) => {
            warn!("unable to write {}: {err}", path.display());
            false
        }
    }
}

fn try_write(path: &Path, headers: &[String], rows: &[Vec<String>]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for header in headers {
        write!(out, "{header},")?;
    }
    writeln!(out)?;
    for row in rows {
        for field in row {
            write!(out, "{field},")?;
        }
        writeln!(out)?;
    }
    out.flush()
}

/// Append `text` plus a line break to `path`, creating the file if it
/// does not exist yet. Each call adds one block, so repeated operations
/// against the same output file accumulate. On failure nothing is
/// written; the error is logged and swallowed.
pub fn append_to_output(path: &Path, text: &str) {
    if let Err(err) = try_append(path, text) {
        warn!("unable to append to {}: {err}", path.display());
    }
}

fn try_append(path: &Path, text: &str) -> io::Result<()> {
    let mut out = OpenOptions::new().append(true).create(true).open(path)?;
    writeln!(out, "{text}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_all;
    use std::fs;
    use tempfile::TempDir;

    fn sample_table() -> (Vec<String>, Vec<Vec<String>>) {
        let headers = vec!["Name".to_string(), "Age".to_string(), "City".to_string()];
        let rows = vec![
            vec!["Alice".to_string(), "30".to_string(), "New York".to_string()],
            vec!["Bob".to_string(), "25".to_string(), "Los Angeles".to_string()],
            vec![
                "Charlie".to_string(),
                "35".to_string(),
                "Chicago".to_string(),
            ],
        ];
        (headers, rows)
    }

    #[test]
    fn every_field_gets_a_trailing_delimiter() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("out.csv");
        let (headers, rows) = sample_table();
        assert!(write_csv(&path, &headers, &rows));
        let contents = fs::read_to_string(&path)?;
        assert_eq!(
            contents,
            "Name,Age,City,\nAlice,30,New York,\nBob,25,Los Angeles,\nCharlie,35,Chicago,\n"
        );
        Ok(())
    }

    #[test]
    fn missing_parent_directory_fails_without_partial_output() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("no-such-dir").join("out.csv");
        let (headers, rows) = sample_table();
        assert!(!write_csv(&path, &headers, &rows));
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn write_overwrites_rather_than_appends() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("out.csv");
        let (headers, rows) = sample_table();
        assert!(write_csv(&path, &headers, &rows));
        assert!(write_csv(&path, &headers, &rows[..1]));
        let contents = fs::read_to_string(&path)?;
        assert_eq!(contents, "Name,Age,City,\nAlice,30,New York,\n");
        Ok(())
    }

    #[test]
    fn round_trip_grows_each_row_by_one_empty_field() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("out.csv");
        let (headers, rows) = sample_table();
        assert!(write_csv(&path, &headers, &rows));
        let back = read_all(&path)?;
        // The trailing delimiter written after the last field reads back
        // as one extra empty field on every row.
        assert_eq!(back.len(), 4);
        assert_eq!(
            back[0],
            vec![
                "Name".to_string(),
                "Age".to_string(),
                "City".to_string(),
                String::new()
            ]
        );
        for (written, reread) in rows.iter().zip(&back[1..]) {
            let mut expected = written.clone();
            expected.push(String::new());
            assert_eq!(reread, &expected);
        }
        Ok(())
    }

    #[test]
    fn append_accumulates_blocks_across_calls() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("results.txt");
        append_to_output(&path, "first block");
        append_to_output(&path, "second block");
        let contents = fs::read_to_string(&path)?;
        assert_eq!(contents, "first block\nsecond block\n");
        Ok(())
    }

    #[test]
    fn append_to_unwritable_target_is_swallowed() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("no-such-dir").join("results.txt");
        append_to_output(&path, "lost");
        assert!(!path.exists());
        Ok(())
    }
}
