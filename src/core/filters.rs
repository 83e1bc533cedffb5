use std::fmt;

use crate::core::capacity::{check_capacity, CapacityShortfall};
use crate::models::{DeliveryRequest, TravelOffer};

/// Reason a pairing is never proposed, whatever it would score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Disqualification {
    OfferInactive,
    RequestClosed,
    SelfMatch,
    ModeMismatch,
    MissingCapacity,
    InsufficientCapacity,
    ItemTooLarge,
}

impl Disqualification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Disqualification::OfferInactive => "offer_inactive",
            Disqualification::RequestClosed => "request_closed",
            Disqualification::SelfMatch => "self_match",
            Disqualification::ModeMismatch => "mode_mismatch",
            Disqualification::MissingCapacity => "missing_capacity",
            Disqualification::InsufficientCapacity => "insufficient_capacity",
            Disqualification::ItemTooLarge => "item_too_large",
        }
    }
}

impl fmt::Display for Disqualification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CapacityShortfall> for Disqualification {
    fn from(shortfall: CapacityShortfall) -> Self {
        match shortfall {
            CapacityShortfall::MissingWeight => Disqualification::MissingCapacity,
            CapacityShortfall::Overweight => Disqualification::InsufficientCapacity,
            CapacityShortfall::Oversized => Disqualification::ItemTooLarge,
        }
    }
}

/// Check whether an offer may be proposed for a request at all
///
/// This is the hard pre-filter applied before scoring. Checks run in order:
/// 1. Offer is active
/// 2. Request is open
/// 3. Traveler is not the requester
/// 4. Offer mode satisfies the preferred method
/// 5. Weight and dimensions fit
pub fn check_eligibility(
    offer: &TravelOffer,
    request: &DeliveryRequest,
) -> Result<(), Disqualification> {
    if !offer.is_active() {
        return Err(Disqualification::OfferInactive);
    }

    if !request.is_open() {
        return Err(Disqualification::RequestClosed);
    }

    if !offer.traveler_id.is_empty() && offer.traveler_id == request.requester_id {
        return Err(Disqualification::SelfMatch);
    }

    if !request.preferred_method.accepts(offer.mode()) {
        return Err(Disqualification::ModeMismatch);
    }

    check_capacity(
        offer.spare_kg,
        offer.max_dimensions.as_ref(),
        request.weight_kg,
        request.dimensions.as_ref(),
    )?;

    Ok(())
}

#[inline]
pub fn is_eligible(offer: &TravelOffer, request: &DeliveryRequest) -> bool {
    check_eligibility(offer, request).is_ok()
}
