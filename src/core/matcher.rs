use std::cmp::Ordering;
use std::collections::BTreeMap;

use uuid::Uuid;

use crate::core::{
    filters::{check_eligibility, Disqualification},
    scoring::{calculate_match_score, compare_scores},
};
use crate::models::{
    DeliveryRequest, OfferCandidate, ScoredMatch, ScoringPolicy, TravelOffer, TravelerTrust,
};

/// Namespace for match ids, so one offer/request pair always gets the same id
const MATCH_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a7e_53b4_4c1d_9e8a_0d27_b5c3_e914);

/// Default minimum total score for a match to be proposed
pub const DEFAULT_MIN_SCORE: f64 = 5.0;

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredMatch>,
    pub total_candidates: usize,
    pub disqualified: BTreeMap<Disqualification, usize>,
}

impl MatchResult {
    /// Disqualification counts keyed by their wire names
    pub fn disqualified_by_reason(&self) -> BTreeMap<String, usize> {
        self.disqualified
            .iter()
            .map(|(reason, count)| (reason.to_string(), *count))
            .collect()
    }
}

/// Deterministic id of the match between an offer and a request
pub fn match_id(offer_id: &str, request_id: &str) -> Uuid {
    Uuid::new_v5(&MATCH_NAMESPACE, format!("{}:{}", offer_id, request_id).as_bytes())
}

/// Ranking comparator over proposed matches
///
/// Orders by `compare_scores`, then by offer id and request id so that
/// distinct pairs never compare equal.
pub fn compare_matches(a: &ScoredMatch, b: &ScoredMatch) -> Ordering {
    compare_scores(&a.score, &b.score)
        .then_with(|| a.offer_id.cmp(&b.offer_id))
        .then_with(|| a.request_id.cmp(&b.request_id))
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Eligibility pre-filter (status, self-match, preferred method, capacity)
/// 2. Scoring
/// 3. Minimum-score cut
/// 4. Ranking and truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    policy: ScoringPolicy,
    min_score: f64,
}

impl Matcher {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self {
            policy,
            min_score: DEFAULT_MIN_SCORE,
        }
    }

    pub fn with_default_policy() -> Self {
        Self::new(ScoringPolicy::default())
    }

    /// Override the minimum total score a match needs to be proposed
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = if min_score.is_finite() { min_score.max(0.0) } else { 0.0 };
        self
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    /// Score a single eligible pair, or report why it is disqualified
    pub fn evaluate(
        &self,
        offer: &TravelOffer,
        trust: &TravelerTrust,
        request: &DeliveryRequest,
    ) -> Result<ScoredMatch, Disqualification> {
        check_eligibility(offer, request)?;

        let score = calculate_match_score(offer, request, trust, &self.policy);

        Ok(ScoredMatch {
            match_id: match_id(&offer.id, &request.id),
            offer_id: offer.id.clone(),
            request_id: request.id.clone(),
            traveler_id: offer.traveler_id.clone(),
            mode: offer.mode(),
            score,
        })
    }

    /// Rank candidate offers for one delivery request
    ///
    /// # Arguments
    /// * `request` - The delivery request to serve
    /// * `candidates` - Offers with their travelers' trust attributes
    /// * `limit` - Maximum number of matches to return
    pub fn find_offers_for_request(
        &self,
        request: &DeliveryRequest,
        candidates: Vec<OfferCandidate>,
        limit: usize,
    ) -> MatchResult {
        let total_candidates = candidates.len();
        let mut disqualified = BTreeMap::new();

        let scored: Vec<ScoredMatch> = candidates
            .iter()
            .filter_map(|candidate| {
                self.keep(
                    self.evaluate(&candidate.offer, &candidate.trust, request),
                    &mut disqualified,
                )
            })
            .collect();

        tracing::debug!(
            "Request {}: {} candidate offers, {} scored, {} disqualified",
            request.id,
            total_candidates,
            scored.len(),
            disqualified.values().sum::<usize>()
        );

        self.rank(scored, total_candidates, disqualified, limit)
    }

    /// Rank open delivery requests for one travel offer
    pub fn find_requests_for_offer(
        &self,
        offer: &TravelOffer,
        trust: &TravelerTrust,
        requests: Vec<DeliveryRequest>,
        limit: usize,
    ) -> MatchResult {
        let total_candidates = requests.len();
        let mut disqualified = BTreeMap::new();

        let scored: Vec<ScoredMatch> = requests
            .iter()
            .filter_map(|request| self.keep(self.evaluate(offer, trust, request), &mut disqualified))
            .collect();

        tracing::debug!(
            "Offer {}: {} candidate requests, {} scored, {} disqualified",
            offer.id,
            total_candidates,
            scored.len(),
            disqualified.values().sum::<usize>()
        );

        self.rank(scored, total_candidates, disqualified, limit)
    }

    /// Apply the minimum-score cut and tally disqualifications
    fn keep(
        &self,
        evaluated: Result<ScoredMatch, Disqualification>,
        disqualified: &mut BTreeMap<Disqualification, usize>,
    ) -> Option<ScoredMatch> {
        match evaluated {
            Ok(scored) if scored.score.total_score >= self.min_score => Some(scored),
            Ok(scored) => {
                tracing::trace!(
                    "Dropping {} -> {}: score {:.2} below minimum {:.2}",
                    scored.offer_id,
                    scored.request_id,
                    scored.score.total_score,
                    self.min_score
                );
                None
            }
            Err(reason) => {
                *disqualified.entry(reason).or_insert(0) += 1;
                None
            }
        }
    }

    fn rank(
        &self,
        mut matches: Vec<ScoredMatch>,
        total_candidates: usize,
        disqualified: BTreeMap<Disqualification, usize>,
        limit: usize,
    ) -> MatchResult {
        matches.sort_by(compare_matches);
        matches.truncate(limit);

        MatchResult {
            matches,
            total_candidates,
            disqualified,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_policy()
    }
}
