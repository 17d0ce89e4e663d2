//! Boundary contract for an external re-rank.
//!
//! The collaborator's output is never trusted: every candidate goes back through
//! the whitelist guard before it can replace the engine's own ranking.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::guard::{GuardError, WhitelistGuard};
use crate::ranker::{RankedJob, RankedResult};
use crate::variant::Variant;

/// Candidates kept from an external re-rank.
pub const MAX_ARBITRATED: usize = 3;

pub const STAGE: &str = "arbitration";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankCandidate {
    pub title: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalRerank {
    #[serde(default)]
    pub candidates: Vec<RerankCandidate>,
    /// Opaque to the engine; carried through to the caller.
    #[serde(default)]
    pub follow_up_questions: Vec<Value>,
}

/// Canonicalized, deduplicated candidates, at most `MAX_ARBITRATED`, with
/// confidences clamped to `[0, 1]`.
///
/// In strict mode the first invalid title is an error; in permissive mode it is
/// dropped.
pub fn validate_rerank(
    guard: &WhitelistGuard,
    sector: &str,
    variant: Variant,
    rerank: &ExternalRerank,
) -> Result<RankedResult, GuardError> {
    let mut accepted: RankedResult = Vec::with_capacity(MAX_ARBITRATED);

    for candidate in &rerank.candidates {
        if accepted.len() == MAX_ARBITRATED {
            break;
        }
        let Some(title) = guard.guard(STAGE, sector, variant, &candidate.title)? else {
            continue;
        };
        if accepted.iter().any(|job| job.title == title) {
            warn!(
                sector,
                variant = %variant,
                title = %title,
                "duplicate re-rank candidate dropped"
            );
            continue;
        }
        accepted.push(RankedJob::new(title, clamp_confidence(candidate.confidence)));
    }

    info!(
        sector,
        variant = %variant,
        offered = rerank.candidates.len(),
        accepted = accepted.len(),
        "external re-rank validated"
    );
    Ok(accepted)
}

fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_finite() {
        confidence.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
