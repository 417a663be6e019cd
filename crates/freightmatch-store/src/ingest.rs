use chrono::{DateTime, Utc};
use freightmatch_models::report::{NegotiationReport, ReportSubmission};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::StoreError;
use crate::ReportStore;

/// Decode and validate a caller-submitted report body.
///
/// This is the only place a structurally bad report is rejected. Anything
/// that gets past here is a fully typed record the aggregator can trust.
pub fn parse_submission(body: &str) -> Result<ReportSubmission, StoreError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| StoreError::InvalidReport(format!("Body is not valid JSON: {e}")))?;

    if !value.is_object() {
        return Err(StoreError::InvalidReport(
            "Report body must be a JSON object".to_string(),
        ));
    }

    let submission: ReportSubmission = serde_json::from_value(value)
        .map_err(|e| StoreError::InvalidReport(format!("Malformed report field: {e}")))?;

    let amounts = [
        ("loadboard_rate", submission.loadboard_rate),
        ("agreed_rate", submission.agreed_rate),
        ("call_duration_sec", submission.call_duration_sec),
    ];
    for (field, amount) in amounts {
        if matches!(amount, Some(v) if v < Decimal::ZERO) {
            return Err(StoreError::InvalidReport(format!(
                "{field} must not be negative"
            )));
        }
    }

    Ok(submission)
}

/// Validate a report body, stamp it with `received_at` and append it.
///
/// Returns the record exactly as stored.
pub fn ingest<S: ReportStore + ?Sized>(
    store: &S,
    body: &str,
    received_at: DateTime<Utc>,
) -> Result<NegotiationReport, StoreError> {
    let report = parse_submission(body)?.into_report(received_at);
    store.append(&report)?;

    info!(
        outcome = report.outcome().as_str(),
        equipment = report.equipment_type.as_deref().unwrap_or("-"),
        received_at = %report.received_at,
        "Report ingested"
    );
    Ok(report)
}
