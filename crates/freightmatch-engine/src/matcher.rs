use chrono::{DateTime, FixedOffset};
use freightmatch_models::config::ScoringWeights;
use freightmatch_models::load::{LoadRecord, MatchQuery};
use freightmatch_models::timestamp::parse_timestamp;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// A catalog entry together with the points it scored against a query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredLoad<'a> {
    #[serde(flatten)]
    pub load: &'a LoadRecord,
    pub score: Decimal,
}

/// A location normalized for comparison: lowercase, trimmed, with its
/// region suffix split out.
#[derive(Debug, PartialEq, Eq)]
struct Place {
    full: String,
    region: String,
}

impl Place {
    fn parse(raw: &str) -> Self {
        Self {
            full: normalize(raw),
            region: region_suffix(raw),
        }
    }
}

/// The query with empty fields dropped and everything normalized once.
#[derive(Debug)]
struct PreparedQuery {
    origin: Option<Place>,
    destination: Option<Place>,
    equipment_type: Option<String>,
    pickup: Option<DateTime<FixedOffset>>,
}

impl PreparedQuery {
    fn new(query: &MatchQuery) -> Self {
        let pickup = present(&query.pickup_datetime).and_then(|raw| {
            let parsed = parse_timestamp(raw);
            if parsed.is_none() {
                debug!(pickup = raw, "Ignoring unparseable pickup time in query");
            }
            parsed
        });

        Self {
            origin: present(&query.origin).map(Place::parse),
            destination: present(&query.destination).map(Place::parse),
            equipment_type: present(&query.equipment_type).map(normalize),
            pickup,
        }
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// The trailing comma-delimited component of a location, normalized.
///
/// `"Chicago, IL"` gives `"il"`. A location without a comma has no region
/// and gives the empty string.
pub fn region_suffix(location: &str) -> String {
    match location.rsplit_once(',') {
        Some((_, region)) => normalize(region),
        None => String::new(),
    }
}

/// Ranks catalog loads against a query.
///
/// Stateless apart from its weights; the catalog is always passed in.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Points `load` earns against `query`.
    pub fn score(&self, query: &MatchQuery, load: &LoadRecord) -> Decimal {
        self.score_prepared(&PreparedQuery::new(query), load)
    }

    /// Every catalog load with its score, highest first. Loads with equal
    /// scores keep their catalog order.
    pub fn rank<'a>(&self, query: &MatchQuery, catalog: &'a [LoadRecord]) -> Vec<ScoredLoad<'a>> {
        let prepared = PreparedQuery::new(query);
        let mut scored: Vec<ScoredLoad<'a>> = catalog
            .iter()
            .map(|load| {
                let score = self.score_prepared(&prepared, load);
                debug!(load_id = %load.load_id, %score, "Scored load");
                ScoredLoad { load, score }
            })
            .collect();

        // sort_by is stable, which gives the catalog-order tie-break
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored
    }

    /// The first `n` entries of [`Matcher::rank`].
    pub fn top<'a>(
        &self,
        query: &MatchQuery,
        catalog: &'a [LoadRecord],
        n: usize,
    ) -> Vec<ScoredLoad<'a>> {
        let mut ranked = self.rank(query, catalog);
        ranked.truncate(n);
        ranked
    }

    pub fn best<'a>(&self, query: &MatchQuery, catalog: &'a [LoadRecord]) -> Option<ScoredLoad<'a>> {
        self.top(query, catalog, 1).into_iter().next()
    }

    fn score_prepared(&self, query: &PreparedQuery, load: &LoadRecord) -> Decimal {
        let mut score = Decimal::ZERO;

        // Saturating: configured weights may sit near Decimal::MAX.
        if let Some(origin) = &query.origin {
            score = score.saturating_add(self.location_points(origin, &load.origin));
        }
        if let Some(destination) = &query.destination {
            score = score.saturating_add(self.location_points(destination, &load.destination));
        }
        if let Some(equipment_type) = &query.equipment_type {
            if *equipment_type == normalize(&load.equipment_type) {
                score = score.saturating_add(self.weights.equipment);
            }
        }
        if let (Some(requested), Some(posted)) = (query.pickup, load.pickup_at()) {
            score = score.saturating_add(self.proximity_points(requested, posted));
        }

        score
    }

    fn location_points(&self, wanted: &Place, posted: &str) -> Decimal {
        let posted = Place::parse(posted);
        if wanted.full == posted.full {
            self.weights.exact_location
        } else if !wanted.region.is_empty() && wanted.region == posted.region {
            self.weights.region_location
        } else {
            Decimal::ZERO
        }
    }

    /// Full points at zero difference, falling linearly to zero at the
    /// window edge. Never negative.
    fn proximity_points(
        &self,
        requested: DateTime<FixedOffset>,
        posted: DateTime<FixedOffset>,
    ) -> Decimal {
        let window = self.weights.proximity_window_hours;
        if window <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let diff_millis = (requested - posted).num_milliseconds().abs();
        let diff_hours = Decimal::from(diff_millis) / Decimal::from(MILLIS_PER_HOUR);
        if diff_hours >= window {
            return Decimal::ZERO;
        }

        let max = self.weights.proximity_max;
        let lost = max
            .checked_mul(diff_hours)
            .and_then(|product| product.checked_div(window))
            // diff_hours < window, so this product stays within max
            .unwrap_or_else(|| max * (diff_hours / window));
        max.saturating_sub(lost).max(Decimal::ZERO)
    }
}

/// Best catalog load for `query` under the default weights.
///
/// Returns at most one load; empty only when the catalog is empty.
pub fn find_best_match(query: &MatchQuery, catalog: &[LoadRecord]) -> Vec<LoadRecord> {
    Matcher::default()
        .best(query, catalog)
        .map(|scored| vec![scored.load.clone()])
        .unwrap_or_default()
}
