use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Headline numbers for the call-report dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Metrics {
    pub total_calls: u64,
    pub deals_closed: u64,
    /// Percentage of calls that closed, 2 decimal places.
    pub deal_rate: Decimal,
    /// Mean concession (loadboard - agreed) per closed deal.
    pub avg_rate_diff: Decimal,
    /// Mean call length in seconds over all calls.
    pub avg_call_length: Decimal,
}

/// Offered vs agreed rate for each accepted deal, in log order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RateSeries {
    /// "{origin}→{destination}"
    pub labels: Vec<String>,
    pub loadboard_rates: Vec<Decimal>,
    pub agreed_rates: Vec<Decimal>,
}

impl RateSeries {
    pub fn push(&mut self, label: String, loadboard_rate: Decimal, agreed_rate: Decimal) {
        self.labels.push(label);
        self.loadboard_rates.push(loadboard_rate);
        self.agreed_rates.push(agreed_rate);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Call counts per equipment type, in order of first appearance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EquipmentSeries {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
}

impl EquipmentSeries {
    /// Count one more call for `label`, appending it if unseen.
    pub fn record(&mut self, label: &str) {
        match self.labels.iter().position(|l| l == label) {
            Some(idx) => self.counts[idx] += 1,
            None => {
                self.labels.push(label.to_string());
                self.counts.push(1);
            }
        }
    }

    pub fn count_for(&self, label: &str) -> Option<u64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|idx| self.counts[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().copied())
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Everything the dashboard needs from one pass over the report log.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub metrics: Metrics,
    pub rate_series: RateSeries,
    pub equipment_series: EquipmentSeries,
}
