use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::log_schema::DEFAULT_LOG_FILE;

/// Top-level configuration for freightmatch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FreightConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
}

/// Where the load catalog comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// JSON array of loads. None = the built-in sample catalog.
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// One JSON object per line, appended to a flat file.
    #[default]
    Jsonl,
    /// SQLite database in WAL mode.
    Sqlite,
    /// Process-local, lost on exit.
    Memory,
}

/// Where negotiation reports are appended and scanned from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// File path for the jsonl and sqlite backends. Ignored for memory.
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Jsonl,
            path: default_store_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchingConfig {
    /// How many ranked loads a match returns.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default)]
    pub weights: ScoringWeights,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            weights: ScoringWeights::default(),
        }
    }
}

/// Points awarded by each scoring rule. Decimal strings in TOML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringWeights {
    /// Origin or destination equal to the query string.
    #[serde(default = "default_exact_location")]
    pub exact_location: Decimal,
    /// Only the region suffix ("IL" in "Chicago, IL") matches.
    #[serde(default = "default_region_location")]
    pub region_location: Decimal,
    /// Equipment type equal to the query string.
    #[serde(default = "default_equipment")]
    pub equipment: Decimal,
    /// Awarded at zero pickup-time difference, decaying linearly.
    #[serde(default = "default_proximity_max")]
    pub proximity_max: Decimal,
    /// Difference in hours at which the proximity bonus reaches zero.
    #[serde(default = "default_proximity_window_hours")]
    pub proximity_window_hours: Decimal,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            exact_location: default_exact_location(),
            region_location: default_region_location(),
            equipment: default_equipment(),
            proximity_max: default_proximity_max(),
            proximity_window_hours: default_proximity_window_hours(),
        }
    }
}

fn default_store_path() -> String {
    DEFAULT_LOG_FILE.to_string()
}
fn default_max_results() -> usize {
    1
}
fn default_exact_location() -> Decimal {
    Decimal::from(5)
}
fn default_region_location() -> Decimal {
    Decimal::from(2)
}
fn default_equipment() -> Decimal {
    Decimal::from(10)
}
fn default_proximity_max() -> Decimal {
    Decimal::from(5)
}
fn default_proximity_window_hours() -> Decimal {
    Decimal::from(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn roundtrip_freight_config() {
        let config = FreightConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: FreightConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let config: FreightConfig = toml::from_str("").unwrap();
        assert_eq!(config, FreightConfig::default());
        assert_eq!(config.store.backend, StoreBackend::Jsonl);
        assert_eq!(config.store.path, "call_reports.jsonl");
        assert_eq!(config.matching.max_results, 1);
        assert_eq!(config.matching.weights.equipment, dec!(10));
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn config_from_toml() {
        let toml_str = r#"
[catalog]
path = "/srv/loads.json"

[store]
backend = "sqlite"
path = "/tmp/reports.db"

[matching]
max_results = 3

[matching.weights]
equipment = "12"
proximity_window_hours = "8"
"#;

        let config: FreightConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.catalog.path.as_deref(), Some("/srv/loads.json"));
        assert_eq!(config.store.backend, StoreBackend::Sqlite);
        assert_eq!(config.matching.max_results, 3);
        assert_eq!(config.matching.weights.equipment, dec!(12));
        assert_eq!(config.matching.weights.proximity_window_hours, dec!(8));
        // Unset weights keep their defaults
        assert_eq!(config.matching.weights.exact_location, dec!(5));
    }

    #[test]
    fn unknown_backend_rejected() {
        let toml_str = r#"
[store]
backend = "postgres"
"#;
        assert!(toml::from_str::<FreightConfig>(toml_str).is_err());
    }
}
