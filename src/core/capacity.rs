use crate::models::{policy::unit, CapacityMatch, CapacityPolicy, Dimensions};

/// Why an item cannot be carried by an offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityShortfall {
    /// Spare or required kilograms missing, non-finite or not positive
    MissingWeight,
    /// Spare kilograms below the item weight
    Overweight,
    /// Item dimensions exceed the declared maximum
    Oversized,
}

/// Outcome of comparing an offer's capacity with an item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityAssessment {
    pub quality: CapacityMatch,
    pub score: f64,
}

impl CapacityAssessment {
    fn none() -> Self {
        Self { quality: CapacityMatch::None, score: 0.0 }
    }
}

#[inline]
fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// A load the offer can carry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeasibleLoad {
    pub spare_kg: f64,
    pub weight_kg: f64,
    /// False when the item has dimensions but the offer declares no maximum
    pub fit_confirmed: bool,
}

/// Hard feasibility check shared by the scorer and the eligibility pre-filter
pub fn check_capacity(
    spare_kg: Option<f64>,
    max_dimensions: Option<&Dimensions>,
    weight_kg: Option<f64>,
    item_dimensions: Option<&Dimensions>,
) -> Result<FeasibleLoad, CapacityShortfall> {
    let (Some(spare), Some(weight)) = (positive(spare_kg), positive(weight_kg)) else {
        return Err(CapacityShortfall::MissingWeight);
    };

    if spare < weight {
        return Err(CapacityShortfall::Overweight);
    }

    let fit_confirmed = match (item_dimensions, max_dimensions) {
        (Some(item), Some(max)) if !item.fits_within(max) => {
            return Err(CapacityShortfall::Oversized);
        }
        (Some(_), None) => false,
        _ => true,
    };

    Ok(FeasibleLoad { spare_kg: spare, weight_kg: weight, fit_confirmed })
}

/// Score the offer's capacity for an item
///
/// Feasible matches start at `base_score` and climb linearly with headroom
/// (spare minus weight, relative to weight) up to `full_headroom_ratio`.
/// An unconfirmed dimensional fit is labelled "partial" and discounted.
pub fn assess_capacity(
    spare_kg: Option<f64>,
    max_dimensions: Option<&Dimensions>,
    weight_kg: Option<f64>,
    item_dimensions: Option<&Dimensions>,
    policy: &CapacityPolicy,
) -> CapacityAssessment {
    let load = match check_capacity(spare_kg, max_dimensions, weight_kg, item_dimensions) {
        Ok(load) => load,
        Err(_) => return CapacityAssessment::none(),
    };

    let base = unit(policy.base_score);
    let headroom = load.spare_kg - load.weight_kg;
    let full_at = policy.full_headroom_ratio;
    // Saturate before dividing: the ratio overflows for tiny item weights
    let saturated = !(full_at.is_finite() && full_at > 0.0) || headroom >= load.weight_kg * full_at;
    let headroom_score = if saturated {
        1.0
    } else {
        unit(headroom / load.weight_kg / full_at)
    };

    let score = base + (1.0 - base) * headroom_score;

    if load.fit_confirmed {
        CapacityAssessment { quality: CapacityMatch::Full, score }
    } else {
        CapacityAssessment {
            quality: CapacityMatch::Partial,
            score: score * unit(policy.unconfirmed_fit_factor),
        }
    }
}
