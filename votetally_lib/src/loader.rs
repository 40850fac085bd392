//! CSV record loader for the four input datasets.
//!
//! Rows that do not match a dataset's schema are skipped and recorded as
//! `MalformedRow` issues; only an absent file or an I/O failure aborts.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::diagnostics::{DataFile, Diagnostics, Issue};
use crate::error::{Result, TallyError};
use crate::types::{Bill, Legislator, Records, Vote, VoteResult};

/// Path of `file` inside `data_dir`.
pub fn data_path(data_dir: &Path, file: DataFile) -> PathBuf {
    data_dir.join(file.file_name())
}

/// Fails with `MissingInput` on the first of `files` that does not exist.
pub fn require_files(data_dir: &Path, files: &[DataFile]) -> Result<()> {
    for &file in files {
        let path = data_path(data_dir, file);
        if !path.is_file() {
            return Err(TallyError::MissingInput(path));
        }
    }
    Ok(())
}

fn reader_for(path: &Path, flexible: bool) -> Result<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(flexible)
        .from_path(path)
        .map_err(|e| TallyError::csv(path, e))
}

/// Deserializes every well-formed row of `path` into `T`.
pub fn load_file<T: DeserializeOwned>(
    path: &Path,
    file: DataFile,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<T>> {
    let mut reader = reader_for(path, false)?;
    let headers = reader
        .headers()
        .map_err(|e| TallyError::csv(path, e))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(TallyError::csv(path, err)),
            Err(err) => {
                let line = err.position().map(|p| p.line()).unwrap_or_default();
                diagnostics.record(Issue::MalformedRow {
                    file,
                    line,
                    reason: err.to_string(),
                });
                continue;
            }
        };
        match record.deserialize::<T>(Some(&headers)) {
            Ok(row) => rows.push(row),
            Err(err) => diagnostics.record(Issue::MalformedRow {
                file,
                line: record.position().map(|p| p.line()).unwrap_or_default(),
                reason: err.to_string(),
            }),
        }
    }

    tracing::debug!(file = %file, rows = rows.len(), "loaded dataset");
    Ok(rows)
}

fn load_dataset<T: DeserializeOwned>(
    data_dir: &Path,
    file: DataFile,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<T>> {
    load_file(&data_path(data_dir, file), file, diagnostics)
}

pub fn load_legislators(
    data_dir: &Path,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<Legislator>> {
    load_dataset(data_dir, DataFile::Legislators, diagnostics)
}

pub fn load_bills(data_dir: &Path, diagnostics: &mut Diagnostics) -> Result<Vec<Bill>> {
    load_dataset(data_dir, DataFile::Bills, diagnostics)
}

pub fn load_votes(data_dir: &Path, diagnostics: &mut Diagnostics) -> Result<Vec<Vote>> {
    load_dataset(data_dir, DataFile::Votes, diagnostics)
}

pub fn load_vote_results(
    data_dir: &Path,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<VoteResult>> {
    load_dataset(data_dir, DataFile::VoteResults, diagnostics)
}

/// Loads all four datasets. Every file is checked for existence before any
/// is read, so a missing input fails fast without partial work.
pub fn load_records(data_dir: &Path, diagnostics: &mut Diagnostics) -> Result<Records> {
    require_files(data_dir, &DataFile::ALL)?;
    Ok(Records {
        legislators: load_legislators(data_dir, diagnostics)?,
        bills: load_bills(data_dir, diagnostics)?,
        votes: load_votes(data_dir, diagnostics)?,
        vote_results: load_vote_results(data_dir, diagnostics)?,
    })
}

/// Untyped view of the first rows of a CSV file, used by previews.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Position of the named column, if present.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Reads the header and up to `limit` rows of `path` without interpreting
/// them. Ragged rows are kept as-is.
pub fn read_raw_table(path: &Path, limit: usize) -> Result<RawTable> {
    if !path.is_file() {
        return Err(TallyError::MissingInput(path.to_path_buf()));
    }
    let mut reader = reader_for(path, true)?;
    let headers = reader
        .headers()
        .map_err(|e| TallyError::csv(path, e))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records().take(limit) {
        let record = record.map_err(|e| TallyError::csv(path, e))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(RawTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, file: DataFile, content: &str) {
        fs::write(data_path(dir, file), content).unwrap();
    }

    #[test]
    fn test_load_legislators_trims_fields() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            DataFile::Legislators,
            "id,name\n1, Alice \n2,Bob\n",
        );
        let mut diagnostics = Diagnostics::new();
        let rows = load_legislators(dir.path(), &mut diagnostics).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Alice");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_malformed_rows_skipped_with_line_numbers() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            DataFile::Votes,
            "id,bill_id\n1,10\nx,10\n3\n4,40\n",
        );
        let mut diagnostics = Diagnostics::new();
        let votes = load_votes(dir.path(), &mut diagnostics).unwrap();
        let ids: Vec<i64> = votes.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(votes[1].bill_id, 40);

        let lines: Vec<u64> = diagnostics
            .iter()
            .map(|issue| match issue {
                Issue::MalformedRow { file, line, .. } => {
                    assert_eq!(*file, DataFile::Votes);
                    *line
                }
                other => panic!("unexpected issue {other:?}"),
            })
            .collect();
        assert_eq!(lines, vec![3, 4]);
    }

    #[test]
    fn test_invalid_utf8_row_skipped_and_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            data_path(dir.path(), DataFile::Legislators),
            b"id,name\n1,Alice\n2,\xff\xfeBob\n3,Carol\n",
        )
        .unwrap();
        let mut diagnostics = Diagnostics::new();
        let rows = load_legislators(dir.path(), &mut diagnostics).unwrap();

        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Carol"]);
        assert_eq!(diagnostics.summary().get("malformed_row"), Some(&1));
        match diagnostics.iter().next() {
            Some(Issue::MalformedRow { file, line, .. }) => {
                assert_eq!(*file, DataFile::Legislators);
                assert_eq!(*line, 3);
            }
            other => panic!("unexpected issue {other:?}"),
        };
    }

    #[test]
    fn test_bill_sponsor_aliases_and_blank() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            DataFile::Bills,
            "id,title,Primary Sponsor\n10,Act A,1\n20,Act B,\n",
        );
        let mut diagnostics = Diagnostics::new();
        let bills = load_bills(dir.path(), &mut diagnostics).unwrap();
        assert_eq!(bills[0].sponsor_id, Some(1));
        assert_eq!(bills[1].sponsor_id, None);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_vote_result_extra_columns_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            DataFile::VoteResults,
            "id,legislator_id,vote_id,vote_type,note\n1000,1,100,1,x\n",
        );
        let mut diagnostics = Diagnostics::new();
        let results = load_vote_results(dir.path(), &mut diagnostics).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].vote_type, "1");
        assert_eq!(results[0].vote_id, 100);
    }

    #[test]
    fn test_load_records_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), DataFile::Legislators, "id,name\n");
        write(dir.path(), DataFile::Bills, "id,title,sponsor_id\n");
        write(dir.path(), DataFile::Votes, "id,bill_id\n");
        let err = load_records(dir.path(), &mut Diagnostics::new()).unwrap_err();
        match err {
            TallyError::MissingInput(path) => assert!(path.ends_with("vote_results.csv")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_read_raw_table_respects_limit() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            DataFile::Votes,
            "id,bill_id\n1,10\n2,20\n3,30\n",
        );
        let table = read_raw_table(&data_path(dir.path(), DataFile::Votes), 2).unwrap();
        assert_eq!(table.headers, vec!["id", "bill_id"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.column("bill_id"), Some(1));
        assert_eq!(table.column("title"), None);
    }

    #[test]
    fn test_read_raw_table_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_raw_table(&dir.path().join("bills.csv"), 5).unwrap_err();
        assert!(matches!(err, TallyError::MissingInput(_)));
    }
}
