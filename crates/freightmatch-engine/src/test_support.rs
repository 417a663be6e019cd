//! Fixture builders shared by unit and integration tests.
//!
//! `make_load` produces a catalog entry with plausible metadata so tests only
//! spell out the fields that affect scoring. `ReportBuilder` does the same
//! for negotiation reports.

use chrono::{DateTime, Duration, TimeZone, Utc};
use freightmatch_models::load::LoadRecord;
use freightmatch_models::report::{NegotiationReport, ReportSubmission};
use rust_decimal::Decimal;

/// A load with the scoring-relevant fields set and filler for the rest.
pub fn make_load(
    load_id: &str,
    origin: &str,
    destination: &str,
    equipment_type: &str,
    pickup_datetime: &str,
) -> LoadRecord {
    LoadRecord {
        load_id: load_id.to_string(),
        origin: origin.to_string(),
        destination: destination.to_string(),
        pickup_datetime: pickup_datetime.to_string(),
        delivery_datetime: pickup_datetime.to_string(),
        equipment_type: equipment_type.to_string(),
        loadboard_rate: Decimal::from(1500),
        notes: None,
        weight: "40000 lbs".to_string(),
        commodity_type: "General Freight".to_string(),
        num_of_pieces: 20,
        miles: 500,
        dimensions: "53ft x 102in".to_string(),
    }
}

/// Fixed base time so fixtures compare equal across runs.
pub fn fixture_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Builder for stored negotiation reports.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    submission: ReportSubmission,
    received_at: DateTime<Utc>,
}

impl ReportBuilder {
    /// `result` is the raw `negotiation_result` text.
    pub fn new(result: Option<&str>) -> Self {
        Self {
            submission: ReportSubmission {
                origin: Some("Chicago, IL".to_string()),
                destination: Some("Dallas, TX".to_string()),
                equipment_type: Some("Dry Van".to_string()),
                negotiation_result: result.map(str::to_string),
                ..Default::default()
            },
            received_at: fixture_time(),
        }
    }

    pub fn accepted() -> Self {
        Self::new(Some("accepted"))
    }

    pub fn rejected() -> Self {
        Self::new(Some("rejected"))
    }

    pub fn route(mut self, origin: Option<&str>, destination: Option<&str>) -> Self {
        self.submission.origin = origin.map(str::to_string);
        self.submission.destination = destination.map(str::to_string);
        self
    }

    pub fn equipment(mut self, equipment_type: Option<&str>) -> Self {
        self.submission.equipment_type = equipment_type.map(str::to_string);
        self
    }

    pub fn rates(mut self, loadboard_rate: Decimal, agreed_rate: Option<Decimal>) -> Self {
        self.submission.loadboard_rate = Some(loadboard_rate);
        self.submission.agreed_rate = agreed_rate;
        self
    }

    pub fn duration(mut self, seconds: Decimal) -> Self {
        self.submission.call_duration_sec = Some(seconds);
        self
    }

    /// Shift the receive time by `minutes` from [`fixture_time`].
    pub fn received_after(mut self, minutes: i64) -> Self {
        self.received_at = fixture_time() + Duration::minutes(minutes);
        self
    }

    pub fn build(self) -> NegotiationReport {
        self.submission.into_report(self.received_at)
    }
}

/// A small, realistic log: three deals closed out of five calls across
/// the sample catalog lanes.
pub fn sample_reports() -> Vec<NegotiationReport> {
    vec![
        ReportBuilder::accepted()
            .rates(Decimal::from(2200), Some(Decimal::from(2100)))
            .duration(Decimal::from(185))
            .build(),
        ReportBuilder::rejected()
            .route(Some("Atlanta, GA"), Some("Orlando, FL"))
            .equipment(Some("Reefer"))
            .rates(Decimal::from(1500), None)
            .duration(Decimal::from(95))
            .received_after(10)
            .build(),
        ReportBuilder::accepted()
            .route(Some("Los Angeles, CA"), Some("Phoenix, AZ"))
            .equipment(Some("Flatbed"))
            .rates(Decimal::from(1800), Some(Decimal::from(1750)))
            .duration(Decimal::from(240))
            .received_after(25)
            .build(),
        ReportBuilder::new(Some("callback requested"))
            .route(Some("Seattle, WA"), Some("Boise, ID"))
            .duration(Decimal::from(30))
            .received_after(40)
            .build(),
        ReportBuilder::accepted()
            .route(Some("Denver, CO"), Some("Salt Lake City, UT"))
            .equipment(Some("Reefer"))
            .rates(Decimal::from(1900), Some(Decimal::from(1900)))
            .duration(Decimal::from(150))
            .received_after(55)
            .build(),
    ]
}
