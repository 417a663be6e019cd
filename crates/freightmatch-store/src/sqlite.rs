use std::sync::Mutex;

use freightmatch_models::log_schema::REPORT_LOG_DDL;
use freightmatch_models::report::NegotiationReport;
use rusqlite::Connection;
use tracing::warn;

use crate::error::StoreError;
use crate::ReportStore;

/// Report log kept in SQLite.
///
/// Opened with the WAL journal so a summarizing reader can scan while a
/// writer appends. `rusqlite::Connection` is not `Sync`, hence the `Mutex`.
pub struct SqliteReportStore {
    conn: Mutex<Connection>,
}

impl SqliteReportStore {
    /// Open (or create) the log database at `path` and enable WAL mode.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(REPORT_LOG_DDL)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database. Useful for testing.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(REPORT_LOG_DDL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Number of rows in the log, decodable or not.
    pub fn count(&self) -> Result<usize, StoreError> {
        let conn = self.lock()?;
        let count: usize = conn.query_row("SELECT COUNT(*) FROM report_log", [], |row| row.get(0))?;
        Ok(count)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("SQLite mutex poisoned: {e}")))
    }
}

impl ReportStore for SqliteReportStore {
    fn append(&self, report: &NegotiationReport) -> Result<(), StoreError> {
        let body_json = serde_json::to_string(report)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO report_log (received_at, body_json) VALUES (?1, ?2)",
            rusqlite::params![report.received_at.to_rfc3339(), body_json],
        )?;
        Ok(())
    }

    fn scan(&self) -> Result<Vec<NegotiationReport>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached("SELECT seq, body_json FROM report_log ORDER BY seq")?;

        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut reports = Vec::with_capacity(rows.len());
        for (seq, body_json) in rows {
            match serde_json::from_str::<NegotiationReport>(&body_json) {
                Ok(report) => reports.push(report),
                Err(e) => warn!(seq, error = %e, "Skipping undecodable report row"),
            }
        }
        Ok(reports)
    }
}
