use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::timestamp::parse_timestamp;

/// A load posted on the board. Immutable once it is part of a catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadRecord {
    /// Unique within a catalog.
    pub load_id: String,
    /// "City, Region"
    pub origin: String,
    /// "City, Region"
    pub destination: String,
    /// Raw timestamp as posted. See [`LoadRecord::pickup_at`].
    pub pickup_datetime: String,
    pub delivery_datetime: String,
    pub equipment_type: String,
    pub loadboard_rate: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub commodity_type: String,
    #[serde(default)]
    pub num_of_pieces: u32,
    #[serde(default)]
    pub miles: u32,
    #[serde(default)]
    pub dimensions: String,
}

impl LoadRecord {
    /// Parsed pickup time, or `None` if the posted value is not a timestamp.
    pub fn pickup_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(&self.pickup_datetime)
    }

    pub fn delivery_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(&self.delivery_datetime)
    }
}

/// Criteria a caller matches the catalog against.
///
/// Every field is optional. Empty or whitespace-only strings are treated
/// the same as absent ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchQuery {
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub equipment_type: Option<String>,
    #[serde(default)]
    pub pickup_datetime: Option<String>,
}

impl MatchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn with_equipment_type(mut self, equipment_type: impl Into<String>) -> Self {
        self.equipment_type = Some(equipment_type.into());
        self
    }

    pub fn with_pickup(mut self, pickup_datetime: impl Into<String>) -> Self {
        self.pickup_datetime = Some(pickup_datetime.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_load() -> LoadRecord {
        LoadRecord {
            load_id: "LD1001".to_string(),
            origin: "Chicago, IL".to_string(),
            destination: "Dallas, TX".to_string(),
            pickup_datetime: "2025-11-29T08:15:30-05:00".to_string(),
            delivery_datetime: "2025-12-05T09:05:30-05:00".to_string(),
            equipment_type: "Dry Van".to_string(),
            loadboard_rate: dec!(2200.00),
            notes: Some("No touch freight".to_string()),
            weight: "42000 lbs".to_string(),
            commodity_type: "Consumer Goods".to_string(),
            num_of_pieces: 26,
            miles: 980,
            dimensions: "48ft x 102in".to_string(),
        }
    }

    #[test]
    fn load_decodes_numeric_rate() {
        let json = r#"{
            "load_id": "LD1002",
            "origin": "Atlanta, GA",
            "destination": "Orlando, FL",
            "pickup_datetime": "2025-08-05T09:00:00Z",
            "delivery_datetime": "2025-08-06T16:00:00Z",
            "equipment_type": "Reefer",
            "loadboard_rate": 1500.00,
            "weight": "38000 lbs",
            "commodity_type": "Perishables",
            "num_of_pieces": 20,
            "miles": 440,
            "dimensions": "53ft x 102in"
        }"#;
        let load: LoadRecord = serde_json::from_str(json).unwrap();
        assert_eq!(load.loadboard_rate, dec!(1500));
        assert!(load.notes.is_none());
        assert!(load.pickup_at().is_some());
    }

    #[test]
    fn roundtrip_load() {
        let load = sample_load();
        let json = serde_json::to_string(&load).unwrap();
        let parsed: LoadRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(load, parsed);
    }

    #[test]
    fn unparseable_pickup_is_none() {
        let mut load = sample_load();
        load.pickup_datetime = "TBD".to_string();
        assert!(load.pickup_at().is_none());
        assert!(load.delivery_at().is_some());
    }

    #[test]
    fn query_builder_and_defaults() {
        let query = MatchQuery::new()
            .with_origin("Chicago, IL")
            .with_equipment_type("dry van");
        assert_eq!(query.origin.as_deref(), Some("Chicago, IL"));
        assert!(query.destination.is_none());

        let empty: MatchQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, MatchQuery::default());
    }
}
