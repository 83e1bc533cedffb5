use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{DeliveryRequest, OfferCandidate, TravelOffer, TravelerTrust};

/// Rank candidate offers for one delivery request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankOffersJob {
    #[validate(custom(function = "validate_request"))]
    pub request: DeliveryRequest,
    #[validate(custom(function = "validate_candidates"))]
    pub candidates: Vec<OfferCandidate>,
    /// Falls back to `matching.default_limit` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub limit: Option<u16>,
}

/// Rank open delivery requests for one travel offer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequestsJob {
    #[validate(custom(function = "validate_offer"))]
    pub offer: TravelOffer,
    #[serde(default)]
    pub trust: TravelerTrust,
    #[validate(custom(function = "validate_requests"))]
    pub requests: Vec<DeliveryRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub limit: Option<u16>,
}

/// A batch ranking job read by the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RankingJob {
    Offers(RankOffersJob),
    Requests(RankRequestsJob),
}

impl RankingJob {
    pub fn validate(&self) -> Result<(), validator::ValidationErrors> {
        match self {
            RankingJob::Offers(job) => job.validate(),
            RankingJob::Requests(job) => job.validate(),
        }
    }

    pub fn limit(&self) -> Option<u16> {
        match self {
            RankingJob::Offers(job) => job.limit,
            RankingJob::Requests(job) => job.limit,
        }
    }
}

fn required(value: &str, code: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(code));
    }
    Ok(())
}

fn validate_request(request: &DeliveryRequest) -> Result<(), ValidationError> {
    required(&request.id, "request_id_required")?;
    required(&request.origin, "request_origin_required")?;
    required(&request.destination, "request_destination_required")
}

fn validate_offer(offer: &TravelOffer) -> Result<(), ValidationError> {
    required(&offer.id, "offer_id_required")?;
    required(&offer.origin, "offer_origin_required")?;
    required(&offer.destination, "offer_destination_required")
}

fn validate_candidates(candidates: &[OfferCandidate]) -> Result<(), ValidationError> {
    candidates.iter().try_for_each(|c| validate_offer(&c.offer))
}

fn validate_requests(requests: &[DeliveryRequest]) -> Result<(), ValidationError> {
    requests.iter().try_for_each(validate_request)
}
