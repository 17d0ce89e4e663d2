//! Engine: composition root for the matching pipeline.
//!
//! answers → profile → (context blend) → variant → rank → guard → ambiguity,
//! plus re-validation of an external re-rank when the caller ran one.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::ambiguity::{self, AmbiguityReason};
use crate::arbitration::{self, validate_rerank, ExternalRerank};
use crate::axis::AxisVector;
use crate::catalog::{Catalog, CatalogError};
use crate::context_blend::{apply_context, SectorContext};
use crate::guard::{GuardError, GuardMode, WhitelistGuard};
use crate::profile::{AnswerError, Answers, ProfileBuilder};
use crate::ranker::{RankedJob, RankedResult, Ranker, FALLBACK_SCORE};
use crate::variant::{select_variant, SectorScore, Variant};

/// Entries the ambiguity check looks at, whatever `top_n` the caller asked for.
const AMBIGUITY_WINDOW: usize = 3;
const RANK_STAGE: &str = "rank";

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Guard(#[from] GuardError),

    #[error(transparent)]
    Answers(#[from] AnswerError),

    #[error("top_n must be at least 1")]
    InvalidTopN,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub guard_mode: GuardMode,
    pub default_top_n: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            guard_mode: GuardMode::Permissive,
            default_top_n: 5,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecommendationRequest {
    pub answers: Answers,
    pub sector: String,
    /// Explicit track; when absent it is derived from `sector_scores`.
    pub variant: Option<Variant>,
    pub sector_scores: Vec<SectorScore>,
    pub context: Option<SectorContext>,
    pub top_n: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub sector: String,
    pub variant: Variant,
    pub profile: AxisVector,
    pub jobs: RankedResult,
    pub needs_arbitration: bool,
    pub ambiguity: Vec<AmbiguityReason>,
    pub arbitrated: bool,
    pub follow_up_questions: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorSummary {
    pub id: String,
    pub has_alternate: bool,
    pub vectorized: bool,
}

#[derive(Debug)]
pub struct Engine {
    catalog: Arc<Catalog>,
    ranker: Ranker,
    guard: WhitelistGuard,
    profiles: ProfileBuilder,
    config: EngineConfig,
}

impl Engine {
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            ranker: Ranker::new(Arc::clone(&catalog)),
            guard: WhitelistGuard::new(Arc::clone(&catalog), config.guard_mode),
            profiles: ProfileBuilder::new(),
            catalog,
            config,
        }
    }

    /// Engine over the built-in sectors.
    pub fn builtin(config: EngineConfig) -> Result<Self, EngineError> {
        Ok(Self::new(Catalog::builtin()?, config))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn guard(&self) -> &WhitelistGuard {
        &self.guard
    }

    pub fn sector_summaries(&self) -> Vec<SectorSummary> {
        self.catalog
            .sectors()
            .map(|sector| SectorSummary {
                id: sector.id().to_string(),
                has_alternate: sector.has_alternate(),
                vectorized: sector.default_track().is_vectorized(),
            })
            .collect()
    }

    pub fn profile(&self, answers: &Answers, context: Option<&SectorContext>) -> AxisVector {
        apply_context(&self.profiles.build(answers), context)
    }

    /// Unknown sectors have no rule and stay on the default track.
    pub fn select_variant(&self, sector: &str, ranked: &[SectorScore]) -> Variant {
        let rule = self.catalog.sector(sector).ok().and_then(|s| s.variant_rule());
        select_variant(sector, rule, ranked)
    }

    /// Ranks and guards every title at stage `rank`.
    pub fn rank(
        &self,
        sector: &str,
        variant: Variant,
        user: &AxisVector,
        top_n: usize,
    ) -> Result<RankedResult, EngineError> {
        let ranked = self.ranker.rank(sector, variant, user, top_n)?;
        self.guard_jobs(RANK_STAGE, sector, variant, ranked)
    }

    /// Passes every title through the guard. A title the guard drops
    /// (permissive mode) is replaced by the first whitelist title that is
    /// neither in the input list nor already emitted.
    fn guard_jobs(
        &self,
        stage: &str,
        sector: &str,
        variant: Variant,
        jobs: RankedResult,
    ) -> Result<RankedResult, EngineError> {
        let mut guarded: RankedResult = Vec::with_capacity(jobs.len());
        for job in &jobs {
            let title = match self.guard.guard(stage, sector, variant, &job.title)? {
                Some(title) => title,
                None => {
                    let taken: Vec<&str> = jobs
                        .iter()
                        .chain(guarded.iter())
                        .map(|j| j.title.as_str())
                        .collect();
                    self.guard
                        .first_whitelist_title_not_in(sector, variant, &taken)?
                }
            };
            guarded.push(RankedJob::new(title, job.score));
        }
        Ok(guarded)
    }

    pub fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, EngineError> {
        let top_n = request.top_n.unwrap_or(self.config.default_top_n);
        if top_n == 0 {
            return Err(EngineError::InvalidTopN);
        }

        let sector = self.catalog.sector(&request.sector)?;
        let requested = request
            .variant
            .unwrap_or_else(|| self.select_variant(sector.id(), &request.sector_scores));
        let (variant, _) = sector.track(requested);

        let profile = self.profile(&request.answers, request.context.as_ref());
        let mut jobs = self.rank(sector.id(), variant, &profile, top_n.max(AMBIGUITY_WINDOW))?;
        let ambiguity = ambiguity::assess(&jobs);
        jobs.truncate(top_n);

        info!(
            sector = sector.id(),
            variant = %variant,
            answered = request.answers.answered(),
            jobs = jobs.len(),
            ambiguous = !ambiguity.is_empty(),
            "recommendation built"
        );

        Ok(Recommendation {
            sector: sector.id().to_string(),
            variant,
            profile,
            jobs,
            needs_arbitration: !ambiguity.is_empty(),
            ambiguity,
            arbitrated: false,
            follow_up_questions: Vec::new(),
        })
    }

    /// Replaces the ranking with the validated re-rank, or keeps the engine's
    /// own ranking when no candidate survives the guard.
    pub fn apply_arbitration(
        &self,
        mut recommendation: Recommendation,
        rerank: ExternalRerank,
    ) -> Result<Recommendation, EngineError> {
        let sector = recommendation.sector.as_str();
        let variant = recommendation.variant;
        let accepted = validate_rerank(&self.guard, sector, variant, &rerank)?;

        if !accepted.is_empty() {
            recommendation.jobs = accepted;
            recommendation.arbitrated = true;
        } else if recommendation.jobs.is_empty() {
            let title = self.guard.first_whitelist_title(sector, variant)?;
            recommendation.jobs = vec![RankedJob::new(title, FALLBACK_SCORE)];
        } else {
            // The kept ranking is caller-supplied input too.
            let kept = std::mem::take(&mut recommendation.jobs);
            recommendation.jobs = self.guard_jobs(arbitration::STAGE, sector, variant, kept)?;
        }

        info!(
            sector = %recommendation.sector,
            variant = %variant,
            arbitrated = recommendation.arbitrated,
            follow_ups = rerank.follow_up_questions.len(),
            "arbitration applied"
        );

        recommendation.follow_up_questions = rerank.follow_up_questions;
        recommendation.needs_arbitration = false;
        Ok(recommendation)
    }
}
