use jobmatch::{
    Answers, ExternalRerank, RecommendationRequest, SectorContext, SectorScore, Variant,
};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;

/// Wire shape of a recommendation request. `answers` stays loosely typed until
/// `Answers::from_json` validates it.
#[derive(Debug, Deserialize)]
pub struct RecommendationBody {
    pub answers: Value,
    pub sector: String,
    #[serde(default)]
    pub variant: Option<Variant>,
    #[serde(default)]
    pub sector_scores: Vec<SectorScore>,
    #[serde(default)]
    pub context: Option<SectorContext>,
    #[serde(default)]
    pub top_n: Option<usize>,
}

impl TryFrom<RecommendationBody> for RecommendationRequest {
    type Error = AppError;

    fn try_from(body: RecommendationBody) -> Result<Self, Self::Error> {
        Ok(RecommendationRequest {
            answers: Answers::from_json(&body.answers)?,
            sector: body.sector,
            variant: body.variant,
            sector_scores: body.sector_scores,
            context: body.context,
            top_n: body.top_n,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ArbitrationBody {
    #[serde(flatten)]
    pub request: RecommendationBody,
    pub rerank: ExternalRerank,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_parses_with_defaults() {
        let body: RecommendationBody =
            serde_json::from_value(json!({"answers": {"q1": "a"}, "sector": "droit"})).unwrap();
        let req = RecommendationRequest::try_from(body).unwrap();
        assert_eq!(req.answers.answered(), 1);
        assert_eq!(req.variant, None);
        assert!(req.sector_scores.is_empty());
    }

    #[test]
    fn test_bad_answers_are_a_validation_error() {
        let body: RecommendationBody =
            serde_json::from_value(json!({"answers": {"q1": "D"}, "sector": "droit"})).unwrap();
        let err = RecommendationRequest::try_from(body).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
    }

    #[test]
    fn test_arbitration_body_flattens_request() {
        let body: ArbitrationBody = serde_json::from_value(json!({
            "answers": {},
            "sector": "droit",
            "variant": "alternate",
            "rerank": {"candidates": [{"title": "Notaire", "confidence": 0.8}]}
        }))
        .unwrap();
        assert_eq!(body.request.variant, Some(Variant::Alternate));
        assert_eq!(body.rerank.candidates.len(), 1);
    }
}
