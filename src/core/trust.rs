use crate::models::{
    policy::{effective, unit},
    TransportMode, TravelerTrust, TrustWeights,
};

/// Experience signal (0-1) with diminishing returns:
/// ln(1 + n) / ln(1 + cap), saturating at `cap` deliveries
#[inline]
pub fn experience_factor(completed: u32, cap: u32) -> f64 {
    if cap == 0 {
        return if completed > 0 { 1.0 } else { 0.0 };
    }

    let n = completed.min(cap) as f64;
    (1.0 + n).ln() / (1.0 + cap as f64).ln()
}

/// Calculate the trust sub-score (0-1) of a traveler for an offer of `mode`
///
/// Weighted sum of the trust signals divided by the best attainable sum for
/// the mode, so plane and boat travelers share the same scale. Sailor
/// verification only counts for boat offers.
pub fn trust_score(trust: &TravelerTrust, mode: TransportMode, weights: &TrustWeights) -> f64 {
    let identity_w = effective(weights.identity);
    let sailor_w = match mode {
        TransportMode::Boat => effective(weights.sailor),
        TransportMode::Plane => 0.0,
    };
    let rating_w = effective(weights.rating);
    let deliveries_w = effective(weights.deliveries);
    let subscription_w = effective(weights.subscription);

    let max_total = identity_w + sailor_w + rating_w + deliveries_w + subscription_w;
    if max_total <= 0.0 {
        return 0.0;
    }

    let flag = |set: bool| if set { 1.0 } else { 0.0 };

    let total = identity_w * flag(trust.identity_verified())
        + sailor_w * flag(trust.sailor_verified())
        + rating_w * (trust.rating_or_zero() / 5.0)
        + deliveries_w * experience_factor(trust.deliveries(), weights.deliveries_cap)
        + subscription_w * flag(trust.subscribed());

    unit(total / max_total)
}
