use serde::{Deserialize, Serialize};

/// Transport mode of a travel offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Plane,
    Boat,
}

/// Transport mode a requester is willing to accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredMethod {
    Plane,
    Boat,
    #[default]
    Any,
}

impl PreferredMethod {
    /// Whether an offer travelling by `mode` satisfies this preference
    pub fn accepts(self, mode: TransportMode) -> bool {
        match self {
            PreferredMethod::Any => true,
            PreferredMethod::Plane => mode == TransportMode::Plane,
            PreferredMethod::Boat => mode == TransportMode::Boat,
        }
    }
}

/// Lifecycle status of a travel offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    #[default]
    Active,
    Paused,
    Completed,
    Cancelled,
}

/// Lifecycle status of a delivery request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Open,
    Matched,
    Delivered,
    Cancelled,
}

/// Box dimensions in centimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

impl Dimensions {
    pub fn new(length_cm: f64, width_cm: f64, height_cm: f64) -> Self {
        Self { length_cm, width_cm, height_cm }
    }

    /// All three sides are finite and strictly positive
    pub fn is_valid(&self) -> bool {
        [self.length_cm, self.width_cm, self.height_cm]
            .iter()
            .all(|side| side.is_finite() && *side > 0.0)
    }

    /// Sides sorted ascending, so boxes can be compared in any orientation
    pub fn sorted_sides(&self) -> [f64; 3] {
        let mut sides = [self.length_cm, self.width_cm, self.height_cm];
        sides.sort_by(|a, b| a.total_cmp(b));
        sides
    }

    /// Whether an item of these dimensions fits inside `max`, allowing rotation.
    /// Invalid dimensions on either side never fit.
    pub fn fits_within(&self, max: &Dimensions) -> bool {
        if !self.is_valid() || !max.is_valid() {
            return false;
        }

        self.sorted_sides()
            .iter()
            .zip(max.sorted_sides().iter())
            .all(|(item, limit)| item <= limit)
    }
}

/// Availability window of an offer, keyed by transport mode.
///
/// Dates are kept as the raw strings received from the store and parsed
/// at scoring time; unparseable values score as "no date match".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum OfferSchedule {
    Plane {
        #[serde(rename = "departureDate", default)]
        departure_date: Option<String>,
    },
    Boat {
        #[serde(rename = "arrivalWindowStart", default)]
        arrival_window_start: Option<String>,
        #[serde(rename = "arrivalWindowEnd", default)]
        arrival_window_end: Option<String>,
    },
}

impl OfferSchedule {
    pub fn mode(&self) -> TransportMode {
        match self {
            OfferSchedule::Plane { .. } => TransportMode::Plane,
            OfferSchedule::Boat { .. } => TransportMode::Boat,
        }
    }
}

/// A traveler's declared spare capacity on a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelOffer {
    pub id: String,
    #[serde(rename = "travelerId")]
    pub traveler_id: String,
    pub origin: String,
    pub destination: String,
    #[serde(flatten)]
    pub schedule: OfferSchedule,
    #[serde(rename = "spareKg", default)]
    pub spare_kg: Option<f64>,
    #[serde(rename = "maxDimensions", default)]
    pub max_dimensions: Option<Dimensions>,
    #[serde(default)]
    pub status: OfferStatus,
}

impl TravelOffer {
    pub fn mode(&self) -> TransportMode {
        self.schedule.mode()
    }

    pub fn is_active(&self) -> bool {
        self.status == OfferStatus::Active
    }
}

/// A requester's need for an item to be carried along a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRequest {
    pub id: String,
    #[serde(rename = "requesterId")]
    pub requester_id: String,
    pub origin: String,
    pub destination: String,
    #[serde(rename = "earliestDate", default)]
    pub earliest_date: Option<String>,
    #[serde(rename = "latestDate", default)]
    pub latest_date: Option<String>,
    #[serde(rename = "weightKg", default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    #[serde(rename = "declaredValue", default)]
    pub declared_value: Option<f64>,
    #[serde(rename = "preferredMethod", default)]
    pub preferred_method: PreferredMethod,
    #[serde(default)]
    pub status: RequestStatus,
}

impl DeliveryRequest {
    pub fn is_open(&self) -> bool {
        self.status == RequestStatus::Open
    }
}

/// Verification and reputation signals of the traveler behind an offer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TravelerTrust {
    #[serde(rename = "verifiedIdentity", default)]
    pub verified_identity: Option<bool>,
    #[serde(rename = "verifiedSailor", default)]
    pub verified_sailor: Option<bool>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "completedDeliveries", default)]
    pub completed_deliveries: Option<u32>,
    #[serde(rename = "isSubscribed", default)]
    pub is_subscribed: Option<bool>,
}

impl TravelerTrust {
    /// Helper to get verified_identity as a bool, defaulting to false
    pub fn identity_verified(&self) -> bool {
        self.verified_identity.unwrap_or(false)
    }

    /// Helper to get verified_sailor as a bool, defaulting to false
    pub fn sailor_verified(&self) -> bool {
        self.verified_sailor.unwrap_or(false)
    }

    /// Rating clamped to 0-5; missing or non-finite ratings count as 0
    pub fn rating_or_zero(&self) -> f64 {
        match self.rating {
            Some(r) if r.is_finite() => r.clamp(0.0, 5.0),
            _ => 0.0,
        }
    }

    pub fn deliveries(&self) -> u32 {
        self.completed_deliveries.unwrap_or(0)
    }

    pub fn subscribed(&self) -> bool {
        self.is_subscribed.unwrap_or(false)
    }
}

/// An offer paired with its owner's trust attributes, as fed to batch ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferCandidate {
    pub offer: TravelOffer,
    #[serde(default)]
    pub trust: TravelerTrust,
}

/// Route match quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMatch {
    Exact,
    Partial,
    None,
}

impl RouteMatch {
    /// Rank used by the tie-break comparator; higher is better
    pub fn rank(self) -> u8 {
        match self {
            RouteMatch::Exact => 2,
            RouteMatch::Partial => 1,
            RouteMatch::None => 0,
        }
    }
}

/// Date-window match quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateMatch {
    Perfect,
    Good,
    Poor,
    None,
}

/// Capacity match quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapacityMatch {
    Full,
    Partial,
    None,
}

/// Compatibility score of one offer against one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScoreResult {
    pub total_score: f64,
    pub route_score: f64,
    pub date_score: f64,
    pub capacity_score: f64,
    pub trust_score: f64,
    pub route_match: RouteMatch,
    pub date_match: DateMatch,
    pub capacity_match: CapacityMatch,
    pub available_from: Option<chrono::NaiveDate>,
}

/// A proposed pairing ready to be persisted as a match record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredMatch {
    pub match_id: uuid::Uuid,
    pub offer_id: String,
    pub request_id: String,
    pub traveler_id: String,
    pub mode: TransportMode,
    #[serde(flatten)]
    pub score: MatchScoreResult,
}
