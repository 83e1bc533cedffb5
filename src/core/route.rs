use crate::models::{policy::unit, RouteMatch, RoutePolicy};

/// Case-insensitive location equality. Blank locations never match.
#[inline]
pub fn same_location(a: &str, b: &str) -> bool {
    let a = a.trim();
    let b = b.trim();

    if a.is_empty() || b.is_empty() {
        return false;
    }

    a.to_lowercase() == b.to_lowercase()
}

/// Classify how well an offer's route covers a request's route
///
/// Plain string equality on both endpoints; no geocoding is performed.
pub fn classify_route(
    offer_origin: &str,
    offer_destination: &str,
    request_origin: &str,
    request_destination: &str,
) -> RouteMatch {
    let origin = same_location(offer_origin, request_origin);
    let destination = same_location(offer_destination, request_destination);

    match (origin, destination) {
        (true, true) => RouteMatch::Exact,
        (true, false) | (false, true) => RouteMatch::Partial,
        (false, false) => RouteMatch::None,
    }
}

/// Route sub-score (0-1)
#[inline]
pub fn route_score(route: RouteMatch, policy: &RoutePolicy) -> f64 {
    match route {
        RouteMatch::Exact => 1.0,
        RouteMatch::Partial => unit(policy.partial_score),
        RouteMatch::None => 0.0,
    }
}
