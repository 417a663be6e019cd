//! freightmatch - load matching and call-report analytics for a freight
//! brokerage desk.
//!
//! Matches a carrier's requested lane, trailer, and pickup time against the
//! load board, and rolls the append-only log of negotiation calls up into
//! dashboard metrics.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use freightmatch::models::{FreightConfig, MatchQuery};
//! use freightmatch::Service;
//!
//! let service = Service::from_config(&FreightConfig::default()).unwrap();
//! let query = MatchQuery::new().with_origin("Chicago, IL").with_equipment_type("Dry Van");
//! let best = service.find_matches(&query, 1);
//! let summary = service.summary().unwrap();
//! ```

pub use freightmatch_engine as engine;
pub use freightmatch_models as models;
pub use freightmatch_store as store;

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use freightmatch_engine::{summarize, Catalog, EngineError, Matcher, ScoredLoad};
use freightmatch_models::config::{CatalogConfig, FreightConfig, StoreBackend, StoreConfig};
use freightmatch_models::load::MatchQuery;
use freightmatch_models::report::NegotiationReport;
use freightmatch_models::summary::Summary;
use freightmatch_store::{
    JsonlReportStore, MemoryReportStore, ReportStore, SqliteReportStore, StoreError,
};
use serde::Serialize;
use tracing::info;

/// Read a TOML config file. `None` gives the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<FreightConfig> {
    let Some(path) = path else {
        return Ok(FreightConfig::default());
    };
    let config_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&config_str).with_context(|| "Failed to parse config")
}

/// The configured catalog file, or the bundled sample board.
pub fn load_catalog(config: &CatalogConfig) -> Result<Catalog, EngineError> {
    match &config.path {
        Some(path) => Catalog::load(path),
        None => Catalog::builtin(),
    }
}

/// Open the configured report log.
pub fn open_store(config: &StoreConfig) -> Result<Box<dyn ReportStore>, StoreError> {
    let store: Box<dyn ReportStore> = match config.backend {
        StoreBackend::Jsonl => Box::new(JsonlReportStore::open(&config.path)?),
        StoreBackend::Sqlite => Box::new(SqliteReportStore::open(&config.path)?),
        StoreBackend::Memory => Box::new(MemoryReportStore::new()),
    };
    info!(backend = ?config.backend, path = %config.path, "Opened report store");
    Ok(store)
}

/// Refuse a report log that does not outlive the process.
///
/// Each CLI invocation is its own process, so `report` followed by
/// `summary` against the memory backend would always summarize nothing.
pub fn ensure_persistent_store(config: &StoreConfig) -> anyhow::Result<()> {
    if config.backend == StoreBackend::Memory {
        anyhow::bail!(
            "store.backend \"memory\" does not persist between commands; use \"jsonl\" or \"sqlite\""
        );
    }
    Ok(())
}

/// Scan the whole log and summarize it.
pub fn summarize_store<S: ReportStore + ?Sized>(store: &S) -> Result<Summary, StoreError> {
    let reports = store.scan()?;
    Ok(summarize(&reports))
}

/// `{"data": [...]}`, the envelope match results are returned in.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse<T> {
    pub data: Vec<T>,
}

/// Outcome of a report submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportAck {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ReportAck {
    pub fn success() -> Self {
        Self {
            status: "success",
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: Some(message.into()),
        }
    }
}

/// Catalog, matcher and report log wired together from one config.
pub struct Service {
    catalog: Catalog,
    matcher: Matcher,
    store: Box<dyn ReportStore>,
    max_results: usize,
}

impl Service {
    pub fn new(
        catalog: Catalog,
        matcher: Matcher,
        store: Box<dyn ReportStore>,
        max_results: usize,
    ) -> Self {
        Self {
            catalog,
            matcher,
            store,
            max_results,
        }
    }

    pub fn from_config(config: &FreightConfig) -> anyhow::Result<Self> {
        let catalog = load_catalog(&config.catalog).context("Failed to load catalog")?;
        let store = open_store(&config.store).context("Failed to open report store")?;
        let matcher = Matcher::new(config.matching.weights.clone());
        Ok(Self::new(catalog, matcher, store, config.matching.max_results))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Default result count from config.
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Up to `limit` best loads for `query`, highest score first.
    pub fn find_matches(&self, query: &MatchQuery, limit: usize) -> Vec<ScoredLoad<'_>> {
        let matches = self.matcher.top(query, self.catalog.loads(), limit);
        info!(
            results = matches.len(),
            top = matches.first().map(|m| m.load.load_id.as_str()).unwrap_or("-"),
            "Matched query against catalog"
        );
        matches
    }

    /// Validate, stamp and append a caller-submitted report body.
    pub fn submit_report(
        &self,
        body: &str,
        received_at: DateTime<Utc>,
    ) -> Result<NegotiationReport, StoreError> {
        freightmatch_store::ingest(self.store.as_ref(), body, received_at)
    }

    pub fn summary(&self) -> Result<Summary, StoreError> {
        summarize_store(self.store.as_ref())
    }
}
