// Integration tests for carry-match

use carry_match::config::MatchingSettings;
use carry_match::core::{compare_matches, Disqualification, Matcher};
use carry_match::models::{
    DeliveryRequest, Dimensions, OfferCandidate, OfferSchedule, OfferStatus, PreferredMethod,
    RequestStatus, RouteMatch, TravelOffer, TravelerTrust,
};
use carry_match::ranking::{read_job, run_job};
use std::cmp::Ordering;

fn create_plane_candidate(
    id: &str,
    destination: &str,
    departure: &str,
    spare_kg: f64,
    trust: TravelerTrust,
) -> OfferCandidate {
    OfferCandidate {
        offer: TravelOffer {
            id: id.to_string(),
            traveler_id: format!("traveler-{}", id),
            origin: "Miami".to_string(),
            destination: destination.to_string(),
            schedule: OfferSchedule::Plane { departure_date: Some(departure.to_string()) },
            spare_kg: Some(spare_kg),
            max_dimensions: None,
            status: OfferStatus::Active,
        },
        trust,
    }
}

fn create_boat_candidate(id: &str, start: &str, end: &str, spare_kg: f64) -> OfferCandidate {
    OfferCandidate {
        offer: TravelOffer {
            id: id.to_string(),
            traveler_id: format!("traveler-{}", id),
            origin: "Miami".to_string(),
            destination: "St. Martin".to_string(),
            schedule: OfferSchedule::Boat {
                arrival_window_start: Some(start.to_string()),
                arrival_window_end: Some(end.to_string()),
            },
            spare_kg: Some(spare_kg),
            max_dimensions: Some(Dimensions::new(100.0, 60.0, 60.0)),
            status: OfferStatus::Active,
        },
        trust: TravelerTrust {
            verified_sailor: Some(true),
            ..Default::default()
        },
    }
}

fn create_test_request() -> DeliveryRequest {
    DeliveryRequest {
        id: "request".to_string(),
        requester_id: "requester".to_string(),
        origin: "Miami".to_string(),
        destination: "St. Martin".to_string(),
        earliest_date: Some("2024-01-01".to_string()),
        latest_date: Some("2024-01-15".to_string()),
        weight_kg: Some(10.0),
        dimensions: Some(Dimensions::new(40.0, 30.0, 20.0)),
        declared_value: Some(300.0),
        preferred_method: PreferredMethod::Any,
        status: RequestStatus::Open,
    }
}

fn rated(rating: f64, verified: bool) -> TravelerTrust {
    TravelerTrust {
        verified_identity: Some(verified),
        rating: Some(rating),
        ..Default::default()
    }
}

fn diverse_candidates() -> Vec<OfferCandidate> {
    vec![
        create_plane_candidate("p1", "St. Martin", "2024-01-10", 20.0, rated(4.5, true)), // Good match
        create_plane_candidate("p2", "St. Martin", "2024-01-14", 12.0, rated(3.0, false)), // Near deadline
        create_plane_candidate("p3", "St. Thomas", "2024-01-10", 20.0, rated(5.0, true)), // Partial route
        create_plane_candidate("p4", "St. Martin", "2024-01-17", 20.0, rated(4.0, true)), // Within grace
        create_plane_candidate("p5", "St. Martin", "2024-01-10", 4.0, rated(5.0, true)), // Too heavy
        create_plane_candidate("p6", "St. Martin", "2024-01-10", 20.0, rated(4.5, true)), // Duplicate of p1
        create_boat_candidate("b1", "2024-01-05", "2024-01-12", 80.0),
        create_boat_candidate("b2", "2024-01-20", "2024-01-30", 80.0), // Arrives too late
    ]
}

#[test]
fn test_integration_end_to_end_ranking() {
    let matcher = Matcher::with_default_policy();
    let result = matcher.find_offers_for_request(&create_test_request(), diverse_candidates(), 10);

    assert_eq!(result.total_candidates, 8);
    assert_eq!(result.disqualified.get(&Disqualification::InsufficientCapacity), Some(&1));
    assert_eq!(result.matches.len(), 7);

    // Heavy offer never proposed
    assert!(result.matches.iter().all(|m| m.offer_id != "p5"));

    // Matches sorted by score
    for pair in result.matches.windows(2) {
        assert!(pair[0].score.total_score >= pair[1].score.total_score, "Matches not sorted by score");
    }

    // The partial route is never above an exact route with the same date and capacity
    let position = |id: &str| result.matches.iter().position(|m| m.offer_id == id).unwrap();
    assert!(position("p1") < position("p3"));

    // Identical offers tie and fall back to offer id
    assert_eq!(position("p6"), position("p1") + 1);
}

#[test]
fn test_ranking_is_a_total_order() {
    let matcher = Matcher::with_default_policy().with_min_score(0.0);
    let result = matcher.find_offers_for_request(&create_test_request(), diverse_candidates(), 100);
    let matches = &result.matches;

    for a in matches {
        assert_eq!(compare_matches(a, a), Ordering::Equal);
        for b in matches {
            // Antisymmetry
            assert_eq!(compare_matches(a, b), compare_matches(b, a).reverse());
            for c in matches {
                // Transitivity: no cycles
                if compare_matches(a, b) == Ordering::Less && compare_matches(b, c) == Ordering::Less {
                    assert_eq!(compare_matches(a, c), Ordering::Less);
                }
            }
        }
    }

    // Sorted output agrees with every pairwise comparison
    for (i, a) in matches.iter().enumerate() {
        for b in &matches[i + 1..] {
            assert_eq!(compare_matches(a, b), Ordering::Less);
        }
    }
}

#[test]
fn test_boat_only_request() {
    let matcher = Matcher::with_default_policy();
    let mut request = create_test_request();
    request.preferred_method = PreferredMethod::Boat;

    let result = matcher.find_offers_for_request(&request, diverse_candidates(), 10);

    assert!(result.matches.iter().all(|m| m.offer_id.starts_with('b')));
    assert_eq!(result.disqualified.get(&Disqualification::ModeMismatch), Some(&6));
    assert_eq!(result.matches[0].offer_id, "b1");
}

#[test]
fn test_unconfirmed_dimensions_rank_below_confirmed() {
    let matcher = Matcher::with_default_policy();
    let result = matcher.find_offers_for_request(&create_test_request(), diverse_candidates(), 10);

    let b1 = result.matches.iter().find(|m| m.offer_id == "b1").unwrap();
    let p1 = result.matches.iter().find(|m| m.offer_id == "p1").unwrap();

    // Plane offers declare no maximum dimensions for a sized item
    assert_eq!(p1.score.capacity_match, carry_match::models::CapacityMatch::Partial);
    assert_eq!(b1.score.capacity_match, carry_match::models::CapacityMatch::Full);
    assert!(b1.score.capacity_score > p1.score.capacity_score);
}

#[test]
fn test_max_limit_enforcement() {
    let matcher = Matcher::with_default_policy();

    let candidates: Vec<OfferCandidate> = (0..50)
        .map(|i| {
            create_plane_candidate(
                &format!("offer-{:02}", i),
                "St. Martin",
                "2024-01-10",
                10.0 + i as f64,
                rated((i % 6) as f64, i % 2 == 0),
            )
        })
        .collect();

    let result = matcher.find_offers_for_request(&create_test_request(), candidates, 10);

    assert!(result.matches.len() <= 10, "Should not exceed limit of 10");
}

#[test]
fn test_offer_side_ranking() {
    let matcher = Matcher::with_default_policy();
    let candidate = create_plane_candidate("p1", "St. Martin", "2024-01-10", 20.0, rated(4.5, true));

    let mut partial = create_test_request();
    partial.id = "partial".to_string();
    partial.origin = "Orlando".to_string();

    let mut mine = create_test_request();
    mine.id = "mine".to_string();
    mine.requester_id = candidate.offer.traveler_id.clone();

    let result = matcher.find_requests_for_offer(
        &candidate.offer,
        &candidate.trust,
        vec![partial, create_test_request(), mine],
        10,
    );

    let ids: Vec<&str> = result.matches.iter().map(|m| m.request_id.as_str()).collect();
    assert_eq!(ids, vec!["request", "partial"]);
    assert_eq!(result.matches[0].score.route_match, RouteMatch::Exact);
    assert_eq!(result.disqualified.get(&Disqualification::SelfMatch), Some(&1));
}

#[test]
fn test_demo_job_file() {
    let job = read_job(include_str!("../demos/rank_offers.json").as_bytes()).unwrap();
    let response = run_job(&Matcher::default(), &MatchingSettings::default(), job).unwrap();

    assert_eq!(response.total_candidates, 3);
    assert_eq!(response.disqualified.get("insufficient_capacity"), Some(&1));
    assert_eq!(response.matches.len(), 2);

    let json = serde_json::to_value(&response).unwrap();
    assert!(json["matches"][0]["matchId"].is_string());
    assert!(json["matches"][0]["totalScore"].as_f64().unwrap() > 80.0);
}
