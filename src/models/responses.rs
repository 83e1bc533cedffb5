use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::domain::ScoredMatch;

/// Output of a batch ranking job
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResponse {
    pub matches: Vec<ScoredMatch>,
    pub total_candidates: usize,
    /// Candidates rejected by the eligibility pre-filter, by reason
    pub disqualified: BTreeMap<String, usize>,
}
