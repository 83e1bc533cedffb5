// Core algorithm exports
pub mod capacity;
pub mod dates;
pub mod filters;
pub mod matcher;
pub mod route;
pub mod scoring;
pub mod trust;

pub use capacity::{assess_capacity, check_capacity, CapacityAssessment, CapacityShortfall};
pub use dates::{available_from, classify_dates, parse_date};
pub use filters::{check_eligibility, is_eligible, Disqualification};
pub use matcher::{compare_matches, match_id, MatchResult, Matcher};
pub use route::classify_route;
pub use scoring::{calculate_match_score, compare_scores};
pub use trust::trust_score;
