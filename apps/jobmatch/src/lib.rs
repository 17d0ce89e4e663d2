//! Job-title matching engine.
//!
//! Turns 30 quiz answers into an 8-axis profile, ranks a sector's fixed
//! whitelist of 30 titles against it and guarantees that every title handed back
//! is a verbatim whitelist entry.

pub mod ambiguity;
pub mod arbitration;
pub mod axis;
pub mod cache;
pub mod catalog;
pub mod context_blend;
pub mod engine;
pub mod generator;
pub mod guard;
pub mod profile;
pub mod questions;
pub mod ranker;
pub mod seed;
pub mod variant;

pub use arbitration::{ExternalRerank, RerankCandidate};
pub use axis::{Axis, AxisVector, VectorError};
pub use catalog::{Catalog, CatalogError};
pub use context_blend::SectorContext;
pub use engine::{
    Engine, EngineConfig, EngineError, Recommendation, RecommendationRequest, SectorSummary,
};
pub use guard::{GuardError, GuardMode, TitleCheck, WhitelistGuard};
pub use profile::{AnswerError, Answers};
pub use ranker::{RankedJob, RankedResult};
pub use variant::{SectorScore, Variant};
