// Model exports
pub mod domain;
pub mod policy;
pub mod requests;
pub mod responses;

pub use domain::{
    CapacityMatch, DateMatch, DeliveryRequest, Dimensions, MatchScoreResult, OfferCandidate,
    OfferSchedule, OfferStatus, PreferredMethod, RequestStatus, RouteMatch, ScoredMatch,
    TransportMode, TravelOffer, TravelerTrust,
};
pub use policy::{CapacityPolicy, DatePolicy, RoutePolicy, ScoringPolicy, ScoringWeights, TrustWeights};
pub use requests::{RankOffersJob, RankRequestsJob, RankingJob};
pub use responses::RankingResponse;
