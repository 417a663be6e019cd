use freightmatch_models::report::NegotiationReport;
use freightmatch_models::summary::{EquipmentSeries, Metrics, RateSeries, Summary};
use rust_decimal::Decimal;
use tracing::info;

/// Label used when a report has no equipment type.
pub const UNKNOWN_EQUIPMENT: &str = "Unknown";
/// Stand-in for a missing origin or destination in route labels.
pub const MISSING_LOCATION: &str = "?";

const DECIMAL_PLACES: u32 = 2;

/// Reduce the report log to dashboard metrics and chart series.
///
/// Reads the reports once, in order. Missing fields are defaulted (rates
/// and durations to zero, labels to `"?"` / `"Unknown"`), so this never
/// fails.
pub fn summarize<'a, I>(reports: I) -> Summary
where
    I: IntoIterator<Item = &'a NegotiationReport>,
{
    let mut total_calls = 0u64;
    let mut deals_closed = 0u64;
    let mut rate_diff_total = Decimal::ZERO;
    let mut duration_total = Decimal::ZERO;
    let mut rate_series = RateSeries::default();
    let mut equipment_series = EquipmentSeries::default();

    for report in reports {
        total_calls += 1;
        duration_total += report.call_duration_sec.unwrap_or_default();
        equipment_series.record(equipment_label(report));

        if report.is_accepted() {
            deals_closed += 1;
            let loadboard_rate = report.loadboard_rate.unwrap_or_default();
            let agreed_rate = report.agreed_rate.unwrap_or_default();
            rate_diff_total += loadboard_rate - agreed_rate;
            rate_series.push(route_label(report), loadboard_rate, agreed_rate);
        }
    }

    let metrics = Metrics {
        total_calls,
        deals_closed,
        deal_rate: rounded_ratio(Decimal::from(deals_closed) * Decimal::ONE_HUNDRED, total_calls),
        avg_rate_diff: rounded_ratio(rate_diff_total, deals_closed),
        avg_call_length: rounded_ratio(duration_total, total_calls),
    };

    info!(
        total_calls,
        deals_closed,
        deal_rate = %metrics.deal_rate,
        avg_rate_diff = %metrics.avg_rate_diff,
        "Summarized report log"
    );

    Summary {
        metrics,
        rate_series,
        equipment_series,
    }
}

/// `total / max(count, 1)` to two places, half-to-even.
fn rounded_ratio(total: Decimal, count: u64) -> Decimal {
    (total / Decimal::from(count.max(1))).round_dp(DECIMAL_PLACES)
}

/// "{origin}→{destination}"
pub fn route_label(report: &NegotiationReport) -> String {
    format!(
        "{}→{}",
        report.origin.as_deref().unwrap_or(MISSING_LOCATION),
        report.destination.as_deref().unwrap_or(MISSING_LOCATION)
    )
}

fn equipment_label(report: &NegotiationReport) -> &str {
    report
        .equipment_type
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_EQUIPMENT)
}
