use std::sync::RwLock;

use freightmatch_models::report::NegotiationReport;

use crate::error::StoreError;
use crate::ReportStore;

/// Process-local report log. Contents are lost when dropped.
#[derive(Default)]
pub struct MemoryReportStore {
    reports: RwLock<Vec<NegotiationReport>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a log with existing records.
    pub fn with_reports(reports: Vec<NegotiationReport>) -> Self {
        Self {
            reports: RwLock::new(reports),
        }
    }

    pub fn len(&self) -> usize {
        self.reports.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReportStore for MemoryReportStore {
    fn append(&self, report: &NegotiationReport) -> Result<(), StoreError> {
        self.reports
            .write()
            .map_err(|e| StoreError::Unavailable(format!("Memory log lock poisoned: {e}")))?
            .push(report.clone());
        Ok(())
    }

    fn scan(&self) -> Result<Vec<NegotiationReport>, StoreError> {
        let reports = self
            .reports
            .read()
            .map_err(|e| StoreError::Unavailable(format!("Memory log lock poisoned: {e}")))?;
        Ok(reports.clone())
    }
}
