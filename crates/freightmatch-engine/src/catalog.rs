use std::collections::HashSet;
use std::path::Path;

use freightmatch_models::load::LoadRecord;
use rust_decimal::Decimal;
use tracing::info;

use crate::error::EngineError;

const BUILTIN_CATALOG_JSON: &str = include_str!("../data/sample_catalog.json");

/// A validated, read-only set of loads to match against.
///
/// Construction checks that every `load_id` is present and unique and that
/// no rate is negative. After that the catalog never changes; a refreshed
/// catalog is a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    loads: Vec<LoadRecord>,
}

impl Catalog {
    pub fn from_loads(loads: Vec<LoadRecord>) -> Result<Self, EngineError> {
        validate(&loads)?;
        Ok(Self { loads })
    }

    /// Parse a JSON array of loads.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let loads: Vec<LoadRecord> = serde_json::from_str(json)?;
        Self::from_loads(loads)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        info!(path = %path.display(), loads = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// The five-load sample board bundled with the crate.
    pub fn builtin() -> Result<Self, EngineError> {
        Self::from_json_str(BUILTIN_CATALOG_JSON)
    }

    pub fn loads(&self) -> &[LoadRecord] {
        &self.loads
    }

    pub fn get(&self, load_id: &str) -> Option<&LoadRecord> {
        self.loads.iter().find(|l| l.load_id == load_id)
    }

    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }
}

fn validate(loads: &[LoadRecord]) -> Result<(), EngineError> {
    let mut seen = HashSet::with_capacity(loads.len());
    for load in loads {
        if load.load_id.trim().is_empty() {
            return Err(EngineError::InvalidLoad {
                load_id: load.load_id.clone(),
                reason: "load_id is empty".to_string(),
            });
        }
        if load.loadboard_rate < Decimal::ZERO {
            return Err(EngineError::InvalidLoad {
                load_id: load.load_id.clone(),
                reason: format!("negative loadboard_rate {}", load.loadboard_rate),
            });
        }
        if !seen.insert(load.load_id.as_str()) {
            return Err(EngineError::DuplicateLoadId(load.load_id.clone()));
        }
    }
    Ok(())
}
