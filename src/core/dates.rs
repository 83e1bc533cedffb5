use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::models::{policy::unit, DateMatch, DatePolicy, DeliveryRequest, OfferSchedule};

/// A date field as received from the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Missing,
    Invalid,
    Date(NaiveDate),
}

impl DateField {
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            DateField::Date(d) => Some(d),
            _ => None,
        }
    }
}

/// Parse a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
/// Only the date part of a timestamp is kept.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ts| ts.date())
}

pub fn parse_field(raw: Option<&str>) -> DateField {
    match raw {
        None => DateField::Missing,
        Some(s) if s.trim().is_empty() => DateField::Missing,
        Some(s) => parse_date(s).map_or(DateField::Invalid, DateField::Date),
    }
}

/// Earliest date the offer is available: departure for planes, window start for boats
pub fn available_from(schedule: &OfferSchedule) -> Option<NaiveDate> {
    match schedule {
        OfferSchedule::Plane { departure_date } => parse_field(departure_date.as_deref()).date(),
        OfferSchedule::Boat { arrival_window_start, .. } => {
            parse_field(arrival_window_start.as_deref()).date()
        }
    }
}

/// Request window bounds. `None` when the window is unusable: latest
/// missing or malformed, earliest malformed, or earliest after latest.
fn request_window(request: &DeliveryRequest) -> Option<(Option<NaiveDate>, NaiveDate)> {
    let latest = parse_field(request.latest_date.as_deref()).date()?;

    let earliest = match parse_field(request.earliest_date.as_deref()) {
        DateField::Missing => None,
        DateField::Invalid => return None,
        DateField::Date(e) if e > latest => return None,
        DateField::Date(e) => Some(e),
    };

    Some((earliest, latest))
}

/// Classify a single plane departure against the request window
///
/// Inside the window: "perfect" with at least `perfect_margin_days` to both
/// edges (an open earliest edge has unlimited margin), otherwise "good".
/// Outside by at most `grace_days`: "poor".
pub fn classify_departure(
    departure: NaiveDate,
    earliest: Option<NaiveDate>,
    latest: NaiveDate,
    policy: &DatePolicy,
) -> DateMatch {
    let perfect_margin = policy.perfect_margin_days.max(0);
    let grace = policy.grace_days.max(0);

    let after_earliest = earliest.map_or(true, |e| departure >= e);
    let before_latest = departure <= latest;

    if after_earliest && before_latest {
        let margin_after = (latest - departure).num_days();
        let margin_before = earliest.map_or(i64::MAX, |e| (departure - e).num_days());

        return if margin_after.min(margin_before) >= perfect_margin {
            DateMatch::Perfect
        } else {
            DateMatch::Good
        };
    }

    let gap = if !before_latest {
        (departure - latest).num_days()
    } else {
        // before_latest holds, so the earliest bound was missed
        earliest.map_or(0, |e| (e - departure).num_days())
    };

    if gap <= grace {
        DateMatch::Poor
    } else {
        DateMatch::None
    }
}

/// Classify a boat arrival window against the request window by overlap
///
/// Coverage is the share of the request window (inclusive days) that the
/// arrival window overlaps. With no earliest date the request window is
/// open-ended, so coverage is the share of the arrival window that falls on
/// or before the deadline.
pub fn classify_arrival_window(
    start: NaiveDate,
    end: NaiveDate,
    earliest: Option<NaiveDate>,
    latest: NaiveDate,
    policy: &DatePolicy,
) -> DateMatch {
    if start > end {
        return DateMatch::None;
    }

    let overlap_start = earliest.map_or(start, |e| start.max(e));
    let overlap_end = end.min(latest);

    if overlap_end < overlap_start {
        return DateMatch::None;
    }

    let overlap_days = (overlap_end - overlap_start).num_days() + 1;
    let window_days = match earliest {
        Some(e) => (latest - e).num_days() + 1,
        None => (end - start).num_days() + 1,
    };

    let coverage = overlap_days as f64 / window_days as f64;

    if coverage >= policy.perfect_coverage {
        DateMatch::Perfect
    } else if coverage >= policy.good_coverage {
        DateMatch::Good
    } else {
        DateMatch::Poor
    }
}

/// Classify the offer schedule against the request window.
/// Missing or malformed dates give `DateMatch::None`.
pub fn classify_dates(
    schedule: &OfferSchedule,
    request: &DeliveryRequest,
    policy: &DatePolicy,
) -> DateMatch {
    let Some((earliest, latest)) = request_window(request) else {
        return DateMatch::None;
    };

    match schedule {
        OfferSchedule::Plane { departure_date } => {
            match parse_field(departure_date.as_deref()).date() {
                Some(departure) => classify_departure(departure, earliest, latest, policy),
                None => DateMatch::None,
            }
        }
        OfferSchedule::Boat { arrival_window_start, arrival_window_end } => {
            let start = parse_field(arrival_window_start.as_deref()).date();
            let end = parse_field(arrival_window_end.as_deref()).date();

            match (start, end) {
                (Some(start), Some(end)) => {
                    classify_arrival_window(start, end, earliest, latest, policy)
                }
                _ => DateMatch::None,
            }
        }
    }
}

/// Date sub-score (0-1)
#[inline]
pub fn date_score(date: DateMatch, policy: &DatePolicy) -> f64 {
    match date {
        DateMatch::Perfect => unit(policy.perfect_score),
        DateMatch::Good => unit(policy.good_score),
        DateMatch::Poor => unit(policy.poor_score),
        DateMatch::None => 0.0,
    }
}
