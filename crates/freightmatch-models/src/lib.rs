pub mod config;
pub mod load;
pub mod log_schema;
pub mod report;
pub mod summary;
pub mod timestamp;

pub use config::{
    CatalogConfig, FreightConfig, MatchingConfig, ScoringWeights, StoreBackend, StoreConfig,
};
pub use load::{LoadRecord, MatchQuery};
pub use report::{NegotiationOutcome, NegotiationReport, ReportSubmission};
pub use summary::{EquipmentSeries, Metrics, RateSeries, Summary};
pub use timestamp::parse_timestamp;
