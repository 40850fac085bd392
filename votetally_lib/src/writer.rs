//! Writes the two summary reports as a single unit.
//!
//! Each report is serialized to a temporary sibling file first. Only when
//! both temporaries are complete are they renamed over the targets. The
//! previous legislator report is parked beside its target until the bill
//! report is in place, so a failed run never leaves one fresh report beside
//! a stale one.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, TallyError};
use crate::report::{BillSummaryRow, LegislatorSummaryRow};

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

fn temp_path_for(path: &Path) -> PathBuf {
    sibling_path(path, ".tmp")
}

fn backup_path_for(path: &Path) -> PathBuf {
    sibling_path(path, ".bak")
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| TallyError::io(parent, e))?;
    }
    Ok(())
}

/// Serializes `rows` as CSV under an explicit header row, so an empty
/// report still carries its columns.
pub fn write_csv<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| TallyError::csv(path, e))?;
    writer
        .write_record(headers)
        .map_err(|e| TallyError::csv(path, e))?;
    for row in rows {
        writer.serialize(row).map_err(|e| TallyError::csv(path, e))?;
    }
    writer.flush().map_err(|e| TallyError::io(path, e))?;
    Ok(())
}

pub const LEGISLATOR_HEADERS: [&str; 4] = [
    "id",
    "name",
    "num_supported_bills",
    "num_opposed_bills",
];
pub const BILL_HEADERS: [&str; 5] = [
    "id",
    "title",
    "supporter_count",
    "opposer_count",
    "primary_sponsor",
];

/// A target that was moved aside so it can be put back on failure.
struct Parked {
    target: PathBuf,
    backup: Option<PathBuf>,
}

impl Parked {
    fn park(target: &Path) -> Result<Self> {
        if !target.exists() {
            return Ok(Self {
                target: target.to_path_buf(),
                backup: None,
            });
        }
        let backup = backup_path_for(target);
        fs::rename(target, &backup).map_err(|e| TallyError::io(target, e))?;
        Ok(Self {
            target: target.to_path_buf(),
            backup: Some(backup),
        })
    }

    /// Puts the previous file back, or removes the target if there was none.
    fn restore(self) {
        match self.backup {
            Some(backup) => {
                if let Err(err) = fs::rename(&backup, &self.target) {
                    tracing::error!(
                        backup = %backup.display(),
                        error = %err,
                        "could not restore previous report"
                    );
                }
            }
            None => {
                let _ = fs::remove_file(&self.target);
            }
        }
    }

    fn discard(self) {
        if let Some(backup) = self.backup {
            let _ = fs::remove_file(backup);
        }
    }
}

/// Writes both reports, replacing any existing files. Either both targets
/// are replaced or neither is.
pub fn write_summaries(
    legislator_path: &Path,
    legislator_rows: &[LegislatorSummaryRow],
    bill_path: &Path,
    bill_rows: &[BillSummaryRow],
) -> Result<()> {
    ensure_parent(legislator_path)?;
    ensure_parent(bill_path)?;

    let legislator_tmp = temp_path_for(legislator_path);
    let bill_tmp = temp_path_for(bill_path);
    let remove_temps = || {
        let _ = fs::remove_file(&legislator_tmp);
        let _ = fs::remove_file(&bill_tmp);
    };

    let staged = write_csv(&legislator_tmp, &LEGISLATOR_HEADERS, legislator_rows)
        .and_then(|_| write_csv(&bill_tmp, &BILL_HEADERS, bill_rows));
    if let Err(err) = staged {
        remove_temps();
        return Err(err);
    }

    let parked = match Parked::park(legislator_path) {
        Ok(parked) => parked,
        Err(err) => {
            remove_temps();
            return Err(err);
        }
    };
    if let Err(err) = fs::rename(&legislator_tmp, legislator_path) {
        parked.restore();
        remove_temps();
        return Err(TallyError::io(legislator_path, err));
    }
    if let Err(err) = fs::rename(&bill_tmp, bill_path) {
        parked.restore();
        remove_temps();
        return Err(TallyError::io(bill_path, err));
    }
    parked.discard();

    tracing::debug!(
        legislators = %legislator_path.display(),
        bills = %bill_path.display(),
        "summaries written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legislator_rows() -> Vec<LegislatorSummaryRow> {
        vec![LegislatorSummaryRow {
            legislator_id: 1,
            legislator_name: "Alice".to_string(),
            num_supported_bills: 1,
            num_opposed_bills: 0,
        }]
    }

    fn bill_rows() -> Vec<BillSummaryRow> {
        vec![BillSummaryRow {
            bill_id: 10,
            bill_title: "Act A, revised".to_string(),
            num_supporting: 1,
            num_opposing: 1,
            sponsor_name: "Alice".to_string(),
        }]
    }

    /// Makes `path` a non-empty directory so renaming a file over it fails.
    fn block_with_directory(path: &Path) {
        fs::create_dir(path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();
    }

    fn leftovers(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp") || name.ends_with(".bak"))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_write_summaries_creates_dirs_and_files() {
        let dir = tempfile::tempdir().unwrap();
        let legislators = dir.path().join("out/nested/legislators.csv");
        let bills = dir.path().join("out/bills.csv");

        write_summaries(&legislators, &legislator_rows(), &bills, &bill_rows()).unwrap();

        let legislator_csv = fs::read_to_string(&legislators).unwrap();
        assert_eq!(
            legislator_csv,
            "id,name,num_supported_bills,num_opposed_bills\n1,Alice,1,0\n"
        );
        let bill_csv = fs::read_to_string(&bills).unwrap();
        assert_eq!(
            bill_csv,
            concat!(
                "id,title,supporter_count,opposer_count,primary_sponsor\n",
                "10,\"Act A, revised\",1,1,Alice\n",
            )
        );
        assert!(!temp_path_for(&legislators).exists());
        assert!(!temp_path_for(&bills).exists());
    }

    #[test]
    fn test_existing_outputs_replaced_without_backups_left() {
        let dir = tempfile::tempdir().unwrap();
        let legislators = dir.path().join("legislators.csv");
        let bills = dir.path().join("bills.csv");
        fs::write(&legislators, "previous\n").unwrap();
        fs::write(&bills, "previous\n").unwrap();

        write_summaries(&legislators, &legislator_rows(), &bills, &bill_rows()).unwrap();

        let legislator_csv = fs::read_to_string(&legislators).unwrap();
        assert!(legislator_csv.ends_with("1,Alice,1,0\n"));
        let bill_csv = fs::read_to_string(&bills).unwrap();
        assert!(bill_csv.ends_with(",Alice\n"));
        assert!(leftovers(dir.path()).is_empty());
    }

    #[test]
    fn test_empty_reports_still_have_headers() {
        let dir = tempfile::tempdir().unwrap();
        let legislators = dir.path().join("legislators.csv");
        let bills = dir.path().join("bills.csv");

        write_summaries(&legislators, &[], &bills, &[]).unwrap();

        assert_eq!(
            fs::read_to_string(&legislators).unwrap(),
            "id,name,num_supported_bills,num_opposed_bills\n"
        );
        assert_eq!(
            fs::read_to_string(&bills).unwrap(),
            "id,title,supporter_count,opposer_count,primary_sponsor\n"
        );
    }

    #[test]
    fn test_failed_stage_leaves_existing_outputs_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let legislators = dir.path().join("legislators.csv");
        fs::write(&legislators, "previous\n").unwrap();
        // A directory where the bill temp file should go makes staging fail.
        let bills = dir.path().join("bills.csv");
        fs::create_dir(temp_path_for(&bills)).unwrap();

        let result = write_summaries(&legislators, &legislator_rows(), &bills, &bill_rows());

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&legislators).unwrap(), "previous\n");
        assert!(!bills.exists());
        assert!(!temp_path_for(&legislators).exists());
    }

    #[test]
    fn test_failed_bill_rename_restores_previous_legislator_report() {
        let dir = tempfile::tempdir().unwrap();
        let legislators = dir.path().join("legislators.csv");
        let bills = dir.path().join("bills.csv");
        fs::write(&legislators, "previous\n").unwrap();
        block_with_directory(&bills);

        let err = write_summaries(&legislators, &legislator_rows(), &bills, &bill_rows())
            .unwrap_err();

        match err {
            TallyError::Io { path, .. } => assert_eq!(path, bills),
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(fs::read_to_string(&legislators).unwrap(), "previous\n");
        assert!(bills.join("keep").exists());
        assert!(leftovers(dir.path()).is_empty());
    }

    #[test]
    fn test_failed_bill_rename_removes_new_legislator_report() {
        let dir = tempfile::tempdir().unwrap();
        let legislators = dir.path().join("legislators.csv");
        let bills = dir.path().join("bills.csv");
        block_with_directory(&bills);

        let result = write_summaries(&legislators, &legislator_rows(), &bills, &bill_rows());

        assert!(result.is_err());
        assert!(!legislators.exists());
        assert!(leftovers(dir.path()).is_empty());
    }
}
