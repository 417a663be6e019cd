//! Scenario tests for matching against the sample catalog and summarizing a
//! report log.
//!
//! The catalog is the bundled five-load board; queries are the kind a
//! dispatcher would send after a carrier names a lane, a trailer, and a
//! pickup window.

use freightmatch_engine::test_support::{make_load, sample_reports, ReportBuilder};
use freightmatch_engine::{find_best_match, summarize, Catalog, Matcher};
use freightmatch_models::load::{LoadRecord, MatchQuery};
use freightmatch_models::report::NegotiationReport;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn board() -> Catalog {
    Catalog::builtin().unwrap()
}

fn best_id(query: &MatchQuery, catalog: &[LoadRecord]) -> String {
    let best = find_best_match(query, catalog);
    assert_eq!(best.len(), 1, "expected exactly one match");
    best[0].load_id.clone()
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Full lane + trailer + pickup time picks the posted load.
#[test]
fn exact_lane_request_finds_posted_load() {
    let catalog = board();
    let query = MatchQuery::new()
        .with_origin("Atlanta, GA")
        .with_destination("Orlando, FL")
        .with_equipment_type("reefer")
        .with_pickup("2025-08-05T09:00:00Z");

    let ranked = Matcher::default().rank(&query, catalog.loads());
    assert_eq!(ranked[0].load.load_id, "LD1002");
    assert_eq!(ranked[0].score, dec!(25));
    // Denver reefer only shares the trailer type.
    assert_eq!(ranked[1].load.load_id, "LD1005");
    assert_eq!(ranked[1].score, dec!(10));
}

/// Equipment alone separates the two Dry Van loads from the rest; the tie
/// between them goes to catalog order.
#[test]
fn equipment_only_tie_goes_to_first_listed() {
    let catalog = board();
    let query = MatchQuery::new().with_equipment_type("Dry Van");
    assert_eq!(best_id(&query, catalog.loads()), "LD1001");

    let ranked = Matcher::default().rank(&query, catalog.loads());
    assert_eq!(ranked[1].load.load_id, "LD1004");
    assert_eq!(ranked[0].score, ranked[1].score);
}

/// Pickup time breaks the tie between the two Dry Van loads.
#[test]
fn pickup_time_breaks_equipment_tie() {
    let catalog = board();
    let query = MatchQuery::new()
        .with_equipment_type("Dry Van")
        .with_pickup("2025-10-01T10:00:00-07:00");
    assert_eq!(best_id(&query, catalog.loads()), "LD1004");
}

/// A carrier in the right state but the wrong city still lands on the load
/// in that state.
#[test]
fn region_fallback_on_origin() {
    let catalog = board();
    let query = MatchQuery::new().with_origin("Fort Collins, CO");
    assert_eq!(best_id(&query, catalog.loads()), "LD1005");
}

#[test]
fn empty_query_returns_first_load() {
    let catalog = board();
    assert_eq!(best_id(&MatchQuery::default(), catalog.loads()), "LD1001");
}

#[test]
fn garbage_query_does_not_fail() {
    let catalog = board();
    let query = MatchQuery::new()
        .with_origin(",,,")
        .with_destination("¯\\_(ツ)_/¯")
        .with_equipment_type("\u{0}")
        .with_pickup("2025-02-30T25:61:00Z");
    assert_eq!(find_best_match(&query, catalog.loads()).len(), 1);
}

/// A load matching the query's lane and trailer exactly beats any load that
/// only matches on regions, wherever the two pickup times fall.
#[test]
fn exact_match_dominates_region_match_for_any_pickup() {
    let exact_pickup = "2025-08-05T00:00:00Z";
    let pickups = [
        "2025-08-05T00:00:00Z",
        "2025-08-05T02:30:00Z",
        "2025-08-05T05:00:00Z",
        "2025-08-06T00:00:00Z",
        "not a time",
    ];

    for query_pickup in pickups {
        for region_pickup in pickups {
            // Region-only load listed first so catalog order would favour it.
            let catalog = vec![
                make_load("REGION", "Peoria, IL", "Austin, TX", "Dry Van", region_pickup),
                make_load("EXACT", "Chicago, IL", "Dallas, TX", "Dry Van", exact_pickup),
            ];
            let query = MatchQuery::new()
                .with_origin(" CHICAGO, il")
                .with_destination("dallas, tx ")
                .with_equipment_type("dry van")
                .with_pickup(query_pickup);
            assert_eq!(
                best_id(&query, &catalog),
                "EXACT",
                "query pickup {query_pickup}, region pickup {region_pickup}"
            );
        }
    }
}

/// Two loads differing only in pickup time rank nearer-first, and anything
/// five or more hours off scores the same zero bonus.
#[test]
fn proximity_decay_orders_by_distance() {
    let query = MatchQuery::new().with_pickup("2025-08-05T12:00:00Z");
    let matcher = Matcher::default();
    let score_at = |pickup: &str| matcher.score(&query, &make_load("X", "A, B", "C, D", "Van", pickup));

    let offsets = [
        ("2025-08-05T12:00:00Z", dec!(5)),
        ("2025-08-05T12:30:00Z", dec!(4.5)),
        ("2025-08-05T10:00:00Z", dec!(3)),
        ("2025-08-05T16:00:00Z", dec!(1)),
        ("2025-08-05T17:00:00Z", Decimal::ZERO),
        ("2025-08-06T12:00:00Z", Decimal::ZERO),
        ("2026-08-05T12:00:00Z", Decimal::ZERO),
    ];
    for (pickup, expected) in offsets {
        assert_eq!(score_at(pickup), expected, "pickup {pickup}");
    }

    let catalog = vec![
        make_load("FAR", "A, B", "C, D", "Van", "2025-08-05T15:00:00Z"),
        make_load("NEAR", "A, B", "C, D", "Van", "2025-08-05T11:00:00Z"),
    ];
    assert_eq!(best_id(&query, &catalog), "NEAR");
}

#[test]
fn matching_is_deterministic() {
    let catalog = board();
    let query = MatchQuery::new()
        .with_origin("Seattle, WA")
        .with_equipment_type("Reefer")
        .with_pickup("2025-09-15T09:00:00-06:00");
    let first: Vec<_> = Matcher::default()
        .rank(&query, catalog.loads())
        .iter()
        .map(|s| (s.load.load_id.clone(), s.score))
        .collect();
    for _ in 0..5 {
        let again: Vec<_> = Matcher::default()
            .rank(&query, catalog.loads())
            .iter()
            .map(|s| (s.load.load_id.clone(), s.score))
            .collect();
        assert_eq!(first, again);
    }
}

#[test]
fn catalog_is_not_modified_by_matching() {
    let catalog = board();
    let before = catalog.clone();
    let query = MatchQuery::new().with_origin("Chicago, IL");
    let _ = find_best_match(&query, catalog.loads());
    assert_eq!(catalog, before);
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

#[test]
fn sample_log_summary() {
    let reports = sample_reports();
    let summary = summarize(&reports);
    let m = &summary.metrics;

    assert_eq!(m.total_calls, 5);
    assert_eq!(m.deals_closed, 3);
    assert_eq!(m.deal_rate, dec!(60));
    // (100 + 50 + 0) / 3
    assert_eq!(m.avg_rate_diff, dec!(50));
    // (185 + 95 + 240 + 30 + 150) / 5
    assert_eq!(m.avg_call_length, dec!(140));

    assert_eq!(
        summary.rate_series.labels,
        vec![
            "Chicago, IL→Dallas, TX",
            "Los Angeles, CA→Phoenix, AZ",
            "Denver, CO→Salt Lake City, UT",
        ]
    );
    assert_eq!(
        summary.equipment_series.iter().collect::<Vec<_>>(),
        vec![("Dry Van", 2), ("Reefer", 2), ("Flatbed", 1)]
    );
}

#[test]
fn summary_json_shape_for_charts() {
    let summary = summarize(&sample_reports());
    let value = serde_json::to_value(&summary).unwrap();

    assert_eq!(value["metrics"]["total_calls"], 5);
    let rates = &value["rate_series"];
    assert_eq!(rates["labels"].as_array().unwrap().len(), 3);
    assert_eq!(
        rates["loadboard_rates"].as_array().unwrap().len(),
        rates["agreed_rates"].as_array().unwrap().len()
    );
    assert_eq!(value["equipment_series"]["counts"], serde_json::json!([2, 2, 1]));
}

#[test]
fn summarizing_a_prefix_matches_earlier_state() {
    // The log only grows; summarizing what existed earlier is just a prefix.
    let reports = sample_reports();
    let earlier: Vec<NegotiationReport> = reports.iter().take(2).cloned().collect();
    let summary = summarize(reports.iter().take(2));
    assert_eq!(summary, summarize(&earlier));
    assert_eq!(summary.metrics.total_calls, 2);
    assert_eq!(summary.metrics.deal_rate, dec!(50));
}

#[test]
fn large_log_summary() {
    let reports: Vec<NegotiationReport> = (0..1_000)
        .map(|i| {
            let builder = if i % 4 == 0 {
                ReportBuilder::accepted().rates(dec!(2000), Some(dec!(1900)))
            } else {
                ReportBuilder::rejected()
            };
            builder.duration(Decimal::from(i % 7)).received_after(i).build()
        })
        .collect();

    let m = summarize(&reports).metrics;
    assert_eq!(m.total_calls, 1_000);
    assert_eq!(m.deals_closed, 250);
    assert_eq!(m.deal_rate, dec!(25));
    assert_eq!(m.avg_rate_diff, dec!(100));
    // sum of i % 7 for 0..1000 = 142 * 21 + (0+1+2+3+4+5) = 2997
    assert_eq!(m.avg_call_length, dec!(3.00));
}
