use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use freightmatch_models::report::NegotiationReport;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::ReportStore;

/// Report log kept as one JSON object per line in a flat file.
///
/// Each append is a single `write_all` of a complete line to a file opened
/// in append mode, serialized through a mutex within this process.
pub struct JsonlReportStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlReportStore {
    /// Use the log at `path`. The file is created on first append; parent
    /// directories are created now.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportStore for JsonlReportStore {
    fn append(&self, report: &NegotiationReport) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(report)?;
        line.push('\n');

        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("Log mutex poisoned: {e}")))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    fn scan(&self) -> Result<Vec<NegotiationReport>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Report log does not exist yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut reports = Vec::new();
        let mut skipped = 0usize;
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<NegotiationReport>(&line) {
                Ok(report) => reports.push(report),
                Err(e) => {
                    skipped += 1;
                    warn!(
                        path = %self.path.display(),
                        line = idx + 1,
                        error = %e,
                        "Skipping undecodable report line"
                    );
                }
            }
        }

        debug!(path = %self.path.display(), count = reports.len(), skipped, "Scanned report log");
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use freightmatch_models::report::ReportSubmission;
    use rust_decimal_macros::dec;

    fn make_report(origin: &str, result: &str) -> NegotiationReport {
        ReportSubmission {
            origin: Some(origin.to_string()),
            destination: Some("Dallas, TX".to_string()),
            equipment_type: Some("Dry Van".to_string()),
            loadboard_rate: Some(dec!(2200)),
            agreed_rate: Some(dec!(2100)),
            negotiation_result: Some(result.to_string()),
            call_duration_sec: Some(dec!(120)),
            ..Default::default()
        }
        .into_report(Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn missing_file_scans_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlReportStore::open(dir.path().join("reports.jsonl")).unwrap();
        assert!(store.scan().unwrap().is_empty());
    }

    #[test]
    fn append_then_scan_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlReportStore::open(dir.path().join("reports.jsonl")).unwrap();
        store
            .append(&make_report("Chicago, IL", "accepted"))
            .unwrap();
        store
            .append(&make_report("Denver, CO", "rejected"))
            .unwrap();

        let reports = store.scan().unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].origin.as_deref(), Some("Chicago, IL"));
        assert_eq!(reports[1].negotiation_result.as_deref(), Some("rejected"));

        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw.lines().count(), 2);
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/logs/reports.jsonl");
        let store = JsonlReportStore::open(&path).unwrap();
        store
            .append(&make_report("Chicago, IL", "accepted"))
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn corrupt_and_blank_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.jsonl");
        let store = JsonlReportStore::open(&path).unwrap();
        store
            .append(&make_report("Chicago, IL", "accepted"))
            .unwrap();

        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(b"\n   \n{\"origin\": \"trunc").unwrap();
        file.write_all(b"\n").unwrap();
        drop(file);

        store
            .append(&make_report("Denver, CO", "no answer"))
            .unwrap();

        let reports = store.scan().unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].origin.as_deref(), Some("Denver, CO"));
    }

    #[test]
    fn reads_lines_written_by_other_writers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.jsonl");
        fs::write(
            &path,
            concat!(
                r#"{"origin": "Atlanta, GA", "destination": "Orlando, FL", "loadboard_rate": 1500.0, "agreed_rate": 1400.0, "negotiation_result": "accepted", "call_duration_sec": 200, "received_at": "2025-08-01T10:15:00.123456"}"#,
                "\n"
            ),
        )
        .unwrap();

        let store = JsonlReportStore::open(&path).unwrap();
        let reports = store.scan().unwrap();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].is_accepted());
        assert_eq!(reports[0].agreed_rate, Some(dec!(1400)));
    }

    #[test]
    fn free_form_result_survives_the_log() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlReportStore::open(dir.path().join("reports.jsonl")).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap();
        let body = r#"{"origin": "Memphis, TN", "negotiation_result": "countered"}"#;
        crate::ingest(&store, body, now).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains(r#""negotiation_result":"countered""#));

        let reports = store.scan().unwrap();
        assert_eq!(reports[0].negotiation_result.as_deref(), Some("countered"));
        assert!(!reports[0].is_accepted());
    }
}
