use serde::{Deserialize, Serialize};

/// Weights of each sub-score in the total.
///
/// total = (route * route_w + date * date_w + capacity * capacity_w + trust * trust_w) * 100
///
/// Route and capacity carry most of the weight since they decide
/// feasibility; date and trust separate otherwise-feasible matches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub route: f64,
    pub date: f64,
    pub capacity: f64,
    pub trust: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            route: 0.40,
            date: 0.15,
            capacity: 0.30,
            trust: 0.15,
        }
    }
}

/// Route comparison policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutePolicy {
    /// Sub-score when only one endpoint matches
    pub partial_score: f64,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self { partial_score: 0.5 }
    }
}

/// Date-window thresholds and category sub-scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatePolicy {
    /// Plane: minimum days between departure and both window edges for "perfect"
    pub perfect_margin_days: i64,
    /// Plane: days outside the window still accepted as "poor"
    pub grace_days: i64,
    /// Boat: minimum share of the request window covered for "perfect"
    pub perfect_coverage: f64,
    /// Boat: minimum share of the request window covered for "good"
    pub good_coverage: f64,
    pub perfect_score: f64,
    pub good_score: f64,
    pub poor_score: f64,
}

impl Default for DatePolicy {
    fn default() -> Self {
        Self {
            perfect_margin_days: 2,
            grace_days: 2,
            perfect_coverage: 0.75,
            good_coverage: 0.40,
            perfect_score: 1.0,
            good_score: 0.7,
            poor_score: 0.3,
        }
    }
}

/// Capacity headroom policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityPolicy {
    /// Sub-score of a feasible match with zero headroom
    pub base_score: f64,
    /// Headroom, as a multiple of the item weight, that earns the full sub-score
    pub full_headroom_ratio: f64,
    /// Multiplier applied when the item has dimensions but the offer declares no maximum
    pub unconfirmed_fit_factor: f64,
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        Self {
            base_score: 0.6,
            full_headroom_ratio: 1.0,
            unconfirmed_fit_factor: 0.5,
        }
    }
}

/// Weights of the trust signals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustWeights {
    pub identity: f64,
    /// Only counted for boat offers
    pub sailor: f64,
    pub rating: f64,
    pub deliveries: f64,
    pub subscription: f64,
    /// Completed-delivery count at which the experience signal saturates
    pub deliveries_cap: u32,
}

impl Default for TrustWeights {
    fn default() -> Self {
        Self {
            identity: 0.30,
            sailor: 0.15,
            rating: 0.25,
            deliveries: 0.20,
            subscription: 0.10,
            deliveries_cap: 50,
        }
    }
}

/// Every tunable constant of the match scorer
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub weights: ScoringWeights,
    pub route: RoutePolicy,
    pub dates: DatePolicy,
    pub capacity: CapacityPolicy,
    pub trust: TrustWeights,
}

/// Weight usable by the scorer: negative or non-finite values count as zero
#[inline]
pub(crate) fn effective(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Clamp a ratio to 0-1; non-finite values count as zero
#[inline]
pub(crate) fn unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = ScoringWeights::default();
        assert_eq!(weights.route, 0.40);
        assert_eq!(weights.date, 0.15);
        assert_eq!(weights.capacity, 0.30);
        assert_eq!(weights.trust, 0.15);
        let sum = weights.route + weights.date + weights.capacity + weights.trust;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_feasibility_weights_dominate() {
        let weights = ScoringWeights::default();
        assert!(weights.route > weights.date && weights.route > weights.trust);
        assert!(weights.capacity > weights.date && weights.capacity > weights.trust);
    }

    #[test]
    fn test_date_category_scores_ordered() {
        let dates = DatePolicy::default();
        assert!(dates.perfect_score > dates.good_score);
        assert!(dates.good_score > dates.poor_score);
        assert!(dates.poor_score > 0.0);
        assert!(dates.perfect_coverage > dates.good_coverage);
    }

    #[test]
    fn test_effective_weight() {
        assert_eq!(effective(0.3), 0.3);
        assert_eq!(effective(-1.0), 0.0);
        assert_eq!(effective(f64::NAN), 0.0);
        assert_eq!(effective(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_unit_clamp() {
        assert_eq!(unit(1.7), 1.0);
        assert_eq!(unit(-0.2), 0.0);
        assert_eq!(unit(0.25), 0.25);
        assert_eq!(unit(f64::NAN), 0.0);
    }

    #[test]
    fn test_partial_policy_from_toml() {
        let policy: ScoringPolicy = toml::from_str(
            r#"
            [weights]
            route = 0.5

            [dates]
            grace_days = 5
            "#,
        )
        .unwrap();

        assert_eq!(policy.weights.route, 0.5);
        assert_eq!(policy.weights.capacity, 0.30);
        assert_eq!(policy.dates.grace_days, 5);
        assert_eq!(policy.dates.perfect_margin_days, 2);
        assert_eq!(policy.trust, TrustWeights::default());
    }
}
