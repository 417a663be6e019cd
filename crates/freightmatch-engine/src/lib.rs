pub mod aggregator;
pub mod catalog;
pub mod error;
pub mod matcher;

pub mod test_support;

pub use aggregator::summarize;
pub use catalog::Catalog;
pub use error::EngineError;
pub use matcher::{find_best_match, Matcher, ScoredLoad};
