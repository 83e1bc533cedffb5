//! carry-match - Offer/request match scoring for a peer-to-peer delivery marketplace
//!
//! This library scores how well a traveler's offer (spare cargo capacity on a
//! route) fits a delivery request across route, date window, capacity and
//! trust, and ranks candidates with a deterministic tie-break policy.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod ranking;

// Re-export commonly used types
pub use crate::core::{
    calculate_match_score, check_eligibility, compare_matches, compare_scores, Disqualification,
    Matcher,
};
pub use models::{
    DeliveryRequest, MatchScoreResult, OfferCandidate, ScoredMatch, ScoringPolicy, ScoringWeights,
    TravelOffer, TravelerTrust,
};
