use std::cmp::Ordering;

use crate::core::{
    capacity::assess_capacity,
    dates::{available_from, classify_dates, date_score},
    route::{classify_route, route_score},
    trust::trust_score,
};
use crate::models::{
    policy::effective, DeliveryRequest, MatchScoreResult, ScoringPolicy, TravelOffer, TravelerTrust,
};

/// Calculate the compatibility score of an offer for a request
///
/// Scoring formula (sub-scores normalized to 0-1):
/// score = (
///     route_score * 0.40 +       # Both endpoints equal = 1, one = 0.5
///     date_score * 0.15 +        # Perfect / good / poor / none window fit
///     capacity_score * 0.30 +    # Feasible, more headroom = higher
///     trust_score * 0.15         # Verification, rating, experience, subscription
/// ) * 100
///
/// Never fails: missing or malformed inputs land in the least favorable
/// category. Preferred-method and feasibility gating happen upstream in
/// `filters::check_eligibility`.
pub fn calculate_match_score(
    offer: &TravelOffer,
    request: &DeliveryRequest,
    trust: &TravelerTrust,
    policy: &ScoringPolicy,
) -> MatchScoreResult {
    let route_match = classify_route(
        &offer.origin,
        &offer.destination,
        &request.origin,
        &request.destination,
    );
    let route = route_score(route_match, &policy.route);

    let date_match = classify_dates(&offer.schedule, request, &policy.dates);
    let date = date_score(date_match, &policy.dates);

    let capacity = assess_capacity(
        offer.spare_kg,
        offer.max_dimensions.as_ref(),
        request.weight_kg,
        request.dimensions.as_ref(),
        &policy.capacity,
    );

    let trust_sub = trust_score(trust, offer.mode(), &policy.trust);

    let weights = &policy.weights;
    let total_score = (route * effective(weights.route)
        + date * effective(weights.date)
        + capacity.score * effective(weights.capacity)
        + trust_sub * effective(weights.trust))
        * 100.0;

    MatchScoreResult {
        total_score: if total_score.is_finite() { total_score.max(0.0) } else { 0.0 },
        route_score: route,
        date_score: date,
        capacity_score: capacity.score,
        trust_score: trust_sub,
        route_match,
        date_match,
        capacity_match: capacity.quality,
        available_from: available_from(&offer.schedule),
    }
}

/// Ranking comparator: best match first
///
/// Total score descending; on exact ties an exact route beats a partial one,
/// then higher trust, then earlier availability (unknown availability last).
pub fn compare_scores(a: &MatchScoreResult, b: &MatchScoreResult) -> Ordering {
    b.total_score
        .total_cmp(&a.total_score)
        .then_with(|| b.route_match.rank().cmp(&a.route_match.rank()))
        .then_with(|| b.trust_score.total_cmp(&a.trust_score))
        .then_with(|| match (a.available_from, b.available_from) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}
