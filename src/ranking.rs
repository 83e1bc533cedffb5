use std::io::Read;

use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::error::Result;
use crate::models::{RankingJob, RankingResponse};

/// Parse a ranking job from JSON
pub fn read_job<R: Read>(reader: R) -> Result<RankingJob> {
    Ok(serde_json::from_reader(reader)?)
}

/// Validate and run a ranking job
///
/// Jobs without a limit use `matching.default_limit`; every limit is capped
/// at `matching.max_limit`.
pub fn run_job(
    matcher: &Matcher,
    settings: &MatchingSettings,
    job: RankingJob,
) -> Result<RankingResponse> {
    if let Err(errors) = job.validate() {
        tracing::info!("Validation failed for ranking job: field_errors={:?}", errors);
        return Err(errors.into());
    }

    let limit = job
        .limit()
        .unwrap_or(settings.default_limit)
        .min(settings.max_limit) as usize;

    let result = match job {
        RankingJob::Offers(job) => {
            tracing::info!(
                "Ranking {} offers for request {}, limit: {}",
                job.candidates.len(),
                job.request.id,
                limit
            );
            matcher.find_offers_for_request(&job.request, job.candidates, limit)
        }
        RankingJob::Requests(job) => {
            tracing::info!(
                "Ranking {} requests for offer {}, limit: {}",
                job.requests.len(),
                job.offer.id,
                limit
            );
            matcher.find_requests_for_offer(&job.offer, &job.trust, job.requests, limit)
        }
    };

    let response = RankingResponse {
        disqualified: result.disqualified_by_reason(),
        matches: result.matches,
        total_candidates: result.total_candidates,
    };

    tracing::info!(
        "Returning {} matches (from {} candidates)",
        response.matches.len(),
        response.total_candidates
    );

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const JOB: &str = r#"{
        "request": {
            "id": "r1", "requesterId": "u1",
            "origin": "Miami", "destination": "St. Martin",
            "latestDate": "2024-01-15", "weightKg": 10, "preferredMethod": "plane"
        },
        "candidates": [
            {
                "offer": {
                    "id": "plane", "travelerId": "t1",
                    "origin": "Miami", "destination": "St. Martin",
                    "mode": "plane", "departureDate": "2024-01-10", "spareKg": 20
                }
            },
            {
                "offer": {
                    "id": "boat", "travelerId": "t2",
                    "origin": "Miami", "destination": "St. Martin",
                    "mode": "boat", "arrivalWindowStart": "2024-01-05",
                    "arrivalWindowEnd": "2024-01-12", "spareKg": 200
                },
                "trust": { "verifiedSailor": true }
            }
        ],
        "limit": 500
    }"#;

    #[test]
    fn test_run_job() {
        let job = read_job(JOB.as_bytes()).unwrap();
        let response = run_job(&Matcher::default(), &MatchingSettings::default(), job).unwrap();

        assert_eq!(response.total_candidates, 2);
        assert_eq!(response.matches.len(), 1);
        assert_eq!(response.matches[0].offer_id, "plane");
        assert_eq!(response.disqualified.get("mode_mismatch"), Some(&1));
    }

    #[test]
    fn test_limit_capped_by_settings() {
        let mut job = read_job(JOB.as_bytes()).unwrap();
        if let RankingJob::Offers(ref mut inner) = job {
            inner.request.preferred_method = crate::models::PreferredMethod::Any;
        }

        let settings = MatchingSettings { max_limit: 1, ..MatchingSettings::default() };
        let response = run_job(&Matcher::default(), &settings, job).unwrap();

        assert_eq!(response.matches.len(), 1);
    }

    #[test]
    fn test_missing_limit_uses_default_limit() {
        let mut job = read_job(JOB.as_bytes()).unwrap();
        if let RankingJob::Offers(ref mut inner) = job {
            inner.request.preferred_method = crate::models::PreferredMethod::Any;
            inner.limit = None;
        }

        let settings = MatchingSettings { default_limit: 1, ..MatchingSettings::default() };
        let response = run_job(&Matcher::default(), &settings, job).unwrap();

        assert_eq!(response.total_candidates, 2);
        assert_eq!(response.matches.len(), 1);
    }

    #[test]
    fn test_invalid_job_rejected() {
        let mut job = read_job(JOB.as_bytes()).unwrap();
        if let RankingJob::Offers(ref mut inner) = job {
            inner.request.destination.clear();
        }

        let err = run_job(&Matcher::default(), &MatchingSettings::default(), job).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = read_job("{ not json".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
