//! Whitelist guard: the single choke point every job title crosses before it
//! leaves the engine.
//!
//! Strict mode raises `GuardError::InvalidTitle` for anything not on the resolved
//! whitelist; permissive mode logs the rejection and returns `None`, and callers
//! substitute one of the guard's safe fallback titles.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::catalog::{Catalog, CatalogError};
use crate::variant::Variant;

/// Number of valid titles attached to a rejection log line.
const SAMPLE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardMode {
    /// Fail fast on an invalid title (development, tests).
    Strict,
    /// Log and return `None` (production).
    #[default]
    Permissive,
}

impl fmt::Display for GuardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardMode::Strict => f.write_str("strict"),
            GuardMode::Permissive => f.write_str("permissive"),
        }
    }
}

impl FromStr for GuardMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" | "development" | "dev" => Ok(GuardMode::Strict),
            "permissive" | "production" | "prod" => Ok(GuardMode::Permissive),
            other => Err(format!(
                "unknown guard mode '{other}' (expected 'strict' or 'permissive')"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GuardError {
    #[error("Invalid job title '{title}' for {sector}/{variant} at stage '{stage}'")]
    InvalidTitle {
        stage: String,
        sector: String,
        variant: Variant,
        title: String,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Result of a membership check. `canonical` is the whitelist's own spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleCheck {
    pub allowed: bool,
    pub canonical: Option<String>,
}

impl TitleCheck {
    fn allowed(canonical: &str) -> Self {
        Self {
            allowed: true,
            canonical: Some(canonical.to_string()),
        }
    }

    fn rejected() -> Self {
        Self {
            allowed: false,
            canonical: None,
        }
    }
}

/// Canonical comparison key: trimmed, lower-cased, accents stripped, every run
/// of non-alphanumeric characters collapsed to one space. Never displayed.
pub fn normalize_title(title: &str) -> String {
    let mut key = String::with_capacity(title.len());
    let mut pending_space = false;

    for c in title.nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_alphanumeric() {
            if pending_space && !key.is_empty() {
                key.push(' ');
            }
            pending_space = false;
            key.extend(c.to_lowercase());
        } else {
            pending_space = true;
        }
    }

    key
}

#[derive(Debug, Clone)]
pub struct WhitelistGuard {
    catalog: Arc<Catalog>,
    mode: GuardMode,
}

impl WhitelistGuard {
    pub fn new(catalog: Arc<Catalog>, mode: GuardMode) -> Self {
        Self { catalog, mode }
    }

    pub fn mode(&self) -> GuardMode {
        self.mode
    }

    /// Checks `title` against the resolved whitelist (alternate track when the
    /// sector has one and it was requested, otherwise the default track).
    ///
    /// An unknown sector is a configuration error, not a rejection.
    pub fn is_allowed(
        &self,
        sector: &str,
        variant: Variant,
        title: &str,
    ) -> Result<TitleCheck, CatalogError> {
        let resolved = self.catalog.resolve(sector, variant)?;
        Ok(match resolved.track.whitelist().canonical(title) {
            Some(canonical) => TitleCheck::allowed(canonical),
            None => TitleCheck::rejected(),
        })
    }

    /// Returns the canonical title, or handles the rejection per `GuardMode`.
    pub fn guard(
        &self,
        stage: &str,
        sector: &str,
        variant: Variant,
        title: &str,
    ) -> Result<Option<String>, GuardError> {
        let check = self.is_allowed(sector, variant, title)?;
        if let Some(canonical) = check.canonical {
            return Ok(Some(canonical));
        }

        let resolved = self.catalog.resolve(sector, variant)?;
        let sample = resolved.track.whitelist().sample(SAMPLE_SIZE).join(" | ");
        warn!(
            stage,
            sector,
            variant = %resolved.variant,
            title,
            sample = %sample,
            mode = %self.mode,
            "job title rejected by whitelist guard"
        );

        match self.mode {
            GuardMode::Strict => Err(GuardError::InvalidTitle {
                stage: stage.to_string(),
                sector: sector.to_string(),
                variant: resolved.variant,
                title: title.to_string(),
            }),
            GuardMode::Permissive => Ok(None),
        }
    }

    /// First entry of the resolved whitelist.
    pub fn first_whitelist_title(
        &self,
        sector: &str,
        variant: Variant,
    ) -> Result<String, CatalogError> {
        let resolved = self.catalog.resolve(sector, variant)?;
        Ok(resolved.track.whitelist().first().to_string())
    }

    /// First entry whose normalized form differs from `excluded`.
    pub fn first_whitelist_title_excluding(
        &self,
        sector: &str,
        variant: Variant,
        excluded: &str,
    ) -> Result<String, CatalogError> {
        self.first_whitelist_title_not_in(sector, variant, &[excluded])
    }

    /// First entry not matching any of `excluded`; falls back to the very first
    /// entry if every title is excluded.
    pub fn first_whitelist_title_not_in(
        &self,
        sector: &str,
        variant: Variant,
        excluded: &[&str],
    ) -> Result<String, CatalogError> {
        let resolved = self.catalog.resolve(sector, variant)?;
        let whitelist = resolved.track.whitelist();
        let excluded: Vec<String> = excluded.iter().map(|t| normalize_title(t)).collect();

        let title = whitelist
            .titles()
            .iter()
            .find(|t| !excluded.contains(&normalize_title(t)))
            .map(String::as_str)
            .unwrap_or_else(|| whitelist.first());

        Ok(title.to_string())
    }
}
