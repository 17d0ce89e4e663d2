//! Ranker: orders a track's whitelist against a user vector.
//!
//! Vectorized tracks are scored by cosine similarity (ties broken by title).
//! Whitelist-only tracks get a seeded shuffle tagged with `FALLBACK_SCORE`.

use std::sync::Arc;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::axis::AxisVector;
use crate::cache::VectorCache;
use crate::catalog::{Catalog, CatalogError, JobVectorTable, ResolvedTrack};
use crate::seed::seeded_rng;
use crate::variant::Variant;

/// Score attached to shuffle-fallback entries. Outside the `[0, 1]` similarity range.
pub const FALLBACK_SCORE: f64 = -1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedJob {
    pub title: String,
    pub score: f64,
}

impl RankedJob {
    pub fn new(title: impl Into<String>, score: f64) -> Self {
        Self {
            title: title.into(),
            score,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.score == FALLBACK_SCORE
    }
}

/// Ordered best first.
pub type RankedResult = Vec<RankedJob>;

/// Cosine ranking over a vector table. Stable under ties: equal scores sort by
/// ascending title.
pub fn rank_by_similarity(table: &JobVectorTable, user: &AxisVector, top_n: usize) -> RankedResult {
    let mut scored: Vec<RankedJob> = table
        .iter()
        .map(|(title, vector)| RankedJob::new(title, user.cosine_similarity(vector)))
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.title.cmp(&b.title)));
    scored.truncate(top_n);
    scored
}

/// Deterministic Fisher–Yates shuffle of the whitelist, seeded by the user
/// vector, sector and variant.
pub fn shuffle_fallback(
    resolved: &ResolvedTrack<'_>,
    user: &AxisVector,
    top_n: usize,
) -> RankedResult {
    let material = user.seed_material();
    let mut rng = seeded_rng(&[material.as_str(), resolved.sector, resolved.variant.as_str()]);

    let mut titles: Vec<&String> = resolved.track.whitelist().titles().iter().collect();
    titles.shuffle(&mut rng);

    titles
        .into_iter()
        .take(top_n)
        .map(|title| RankedJob::new(title.as_str(), FALLBACK_SCORE))
        .collect()
}

#[derive(Debug)]
pub struct Ranker {
    catalog: Arc<Catalog>,
    cache: VectorCache,
}

impl Ranker {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            cache: VectorCache::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cache(&self) -> &VectorCache {
        &self.cache
    }

    /// At most `top_n` entries; the whole whitelist when `top_n` exceeds it.
    /// Only an unknown sector is an error.
    pub fn rank(
        &self,
        sector: &str,
        variant: Variant,
        user: &AxisVector,
        top_n: usize,
    ) -> Result<RankedResult, CatalogError> {
        let resolved = self.catalog.resolve(sector, variant)?;

        let ranked = match self.cache.get_or_build(&resolved) {
            Some(table) => rank_by_similarity(&table, user, top_n),
            None => shuffle_fallback(&resolved, user, top_n),
        };

        debug!(
            sector,
            variant = %resolved.variant,
            top_n,
            returned = ranked.len(),
            fallback = ranked.first().is_some_and(RankedJob::is_fallback),
            "ranked whitelist"
        );
        Ok(ranked)
    }
}
