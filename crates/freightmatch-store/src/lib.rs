pub mod error;
pub mod ingest;
pub mod jsonl;
pub mod memory;
pub mod sqlite;

use std::sync::Arc;

use freightmatch_models::report::NegotiationReport;

pub use error::StoreError;
pub use ingest::{ingest, parse_submission};
pub use jsonl::JsonlReportStore;
pub use memory::MemoryReportStore;
pub use sqlite::SqliteReportStore;

/// Append-only log of negotiation reports.
///
/// Writers only append whole records and readers only scan the full log, so
/// a scan sees each record either completely or not at all. Records are
/// never updated or removed.
pub trait ReportStore: Send + Sync {
    fn append(&self, report: &NegotiationReport) -> Result<(), StoreError>;

    /// Every record currently in the log, oldest first.
    fn scan(&self) -> Result<Vec<NegotiationReport>, StoreError>;
}

impl<S: ReportStore + ?Sized> ReportStore for Arc<S> {
    fn append(&self, report: &NegotiationReport) -> Result<(), StoreError> {
        (**self).append(report)
    }

    fn scan(&self) -> Result<Vec<NegotiationReport>, StoreError> {
        (**self).scan()
    }
}

impl<S: ReportStore + ?Sized> ReportStore for Box<S> {
    fn append(&self, report: &NegotiationReport) -> Result<(), StoreError> {
        (**self).append(report)
    }

    fn scan(&self) -> Result<Vec<NegotiationReport>, StoreError> {
        (**self).scan()
    }
}
