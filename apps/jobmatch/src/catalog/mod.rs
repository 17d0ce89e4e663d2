//! Catalog: the immutable static configuration the engine ranks against:
//! per-sector whitelists, archetype vectors, hand-authored job vector tables and
//! alternate-track rules.
//!
//! Everything is validated once, when the catalog is built. A malformed table is a
//! `CatalogError`, never a panic at request time.

pub mod data;

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::axis::{AxisVector, VectorError, AXIS_COUNT};
use crate::guard::normalize_title;
use crate::variant::{Variant, VariantRule};

pub const WHITELIST_SIZE: usize = 30;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("Unknown sector: '{0}'")]
    UnknownSector(String),

    #[error("Sector '{0}' is declared twice")]
    DuplicateSector(String),

    #[error("Whitelist for '{sector}' has {actual} titles, expected {expected}")]
    WrongSize {
        sector: String,
        actual: usize,
        expected: usize,
    },

    #[error("Whitelist for '{sector}' contains a blank title")]
    BlankTitle { sector: String },

    #[error("Whitelist for '{sector}' lists '{title}' twice (normalized as '{key}')")]
    DuplicateTitle {
        sector: String,
        title: String,
        key: String,
    },

    #[error("Vector table for '{sector}' does not match its whitelist: {detail}")]
    TableMismatch { sector: String, detail: String },

    #[error("Invalid vector for '{title}' in '{sector}': {source}")]
    InvalidVector {
        sector: String,
        title: String,
        source: VectorError,
    },
}

/// Exactly `WHITELIST_SIZE` distinct titles, in display order, plus a
/// normalized-key index for membership checks.
#[derive(Debug, Clone)]
pub struct Whitelist {
    titles: Vec<String>,
    index: HashMap<String, usize>,
}

impl Whitelist {
    pub fn new<I, S>(sector: &str, titles: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let titles: Vec<String> = titles.into_iter().map(Into::into).collect();
        if titles.len() != WHITELIST_SIZE {
            return Err(CatalogError::WrongSize {
                sector: sector.to_string(),
                actual: titles.len(),
                expected: WHITELIST_SIZE,
            });
        }

        let mut index = HashMap::with_capacity(titles.len());
        for (position, title) in titles.iter().enumerate() {
            let key = normalize_title(title);
            if key.is_empty() {
                return Err(CatalogError::BlankTitle {
                    sector: sector.to_string(),
                });
            }
            if index.contains_key(&key) {
                return Err(CatalogError::DuplicateTitle {
                    sector: sector.to_string(),
                    title: title.clone(),
                    key,
                });
            }
            index.insert(key, position);
        }

        Ok(Self { titles, index })
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn first(&self) -> &str {
        &self.titles[0]
    }

    /// The whitelist's own spelling of `candidate`, if it is a member.
    pub fn canonical(&self, candidate: &str) -> Option<&str> {
        self.index
            .get(&normalize_title(candidate))
            .map(|&i| self.titles[i].as_str())
    }

    pub fn sample(&self, n: usize) -> Vec<&str> {
        self.titles.iter().take(n).map(String::as_str).collect()
    }
}

/// One vector per whitelist title, in whitelist order.
#[derive(Debug, Clone, PartialEq)]
pub struct JobVectorTable {
    entries: Vec<(String, AxisVector)>,
}

impl JobVectorTable {
    pub(crate) fn from_entries(entries: Vec<(String, AxisVector)>) -> Self {
        Self { entries }
    }

    /// Loads a hand-authored table. Its key set must be exactly the whitelist's
    /// title set and every vector must already be in range.
    pub fn authored(
        sector: &str,
        whitelist: &Whitelist,
        rows: &[(&str, [f64; AXIS_COUNT])],
    ) -> Result<Self, CatalogError> {
        let mismatch = |detail: String| CatalogError::TableMismatch {
            sector: sector.to_string(),
            detail,
        };

        if rows.len() != whitelist.len() {
            return Err(mismatch(format!(
                "{} vectors for {} titles",
                rows.len(),
                whitelist.len()
            )));
        }

        let mut by_title: BTreeMap<&str, AxisVector> = BTreeMap::new();
        for &(title, values) in rows {
            let vector = AxisVector::new(values).map_err(|source| CatalogError::InvalidVector {
                sector: sector.to_string(),
                title: title.to_string(),
                source,
            })?;
            if by_title.insert(title, vector).is_some() {
                return Err(mismatch(format!("'{title}' has two vectors")));
            }
        }

        let mut entries = Vec::with_capacity(whitelist.len());
        for title in whitelist.titles() {
            let vector = by_title
                .get(title.as_str())
                .ok_or_else(|| mismatch(format!("no vector for '{title}'")))?;
            entries.push((title.clone(), *vector));
        }

        Ok(Self { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AxisVector)> {
        self.entries.iter().map(|(t, v)| (t.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A whitelist plus whatever vector source the track has: a hand-authored table,
/// an archetype to generate from, or neither (shuffle fallback only).
#[derive(Debug, Clone)]
pub struct Track {
    whitelist: Whitelist,
    archetype: Option<AxisVector>,
    authored: Option<JobVectorTable>,
}

impl Track {
    pub fn whitelist_only(whitelist: Whitelist) -> Self {
        Self {
            whitelist,
            archetype: None,
            authored: None,
        }
    }

    pub fn generated(whitelist: Whitelist, archetype: AxisVector) -> Self {
        Self {
            whitelist,
            archetype: Some(archetype),
            authored: None,
        }
    }

    /// Builds the whitelist from the rows' titles, in row order.
    pub fn authored(
        sector: &str,
        rows: &[(&str, [f64; AXIS_COUNT])],
    ) -> Result<Self, CatalogError> {
        let whitelist = Whitelist::new(sector, rows.iter().map(|(title, _)| *title))?;
        let table = JobVectorTable::authored(sector, &whitelist, rows)?;
        Ok(Self {
            whitelist,
            archetype: None,
            authored: Some(table),
        })
    }

    pub fn whitelist(&self) -> &Whitelist {
        &self.whitelist
    }

    pub fn archetype(&self) -> Option<&AxisVector> {
        self.archetype.as_ref()
    }

    pub fn authored_vectors(&self) -> Option<&JobVectorTable> {
        self.authored.as_ref()
    }

    pub fn is_vectorized(&self) -> bool {
        self.authored.is_some() || self.archetype.is_some()
    }
}

#[derive(Debug, Clone)]
struct AlternateTrack {
    rule: VariantRule,
    track: Track,
}

#[derive(Debug, Clone)]
pub struct Sector {
    id: String,
    default_track: Track,
    alternate: Option<AlternateTrack>,
}

impl Sector {
    pub fn new(id: impl Into<String>, default_track: Track) -> Self {
        Self {
            id: id.into(),
            default_track,
            alternate: None,
        }
    }

    pub fn with_alternate(mut self, rule: VariantRule, track: Track) -> Self {
        self.alternate = Some(AlternateTrack { rule, track });
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn default_track(&self) -> &Track {
        &self.default_track
    }

    pub fn variant_rule(&self) -> Option<&VariantRule> {
        self.alternate.as_ref().map(|alt| &alt.rule)
    }

    pub fn has_alternate(&self) -> bool {
        self.alternate.is_some()
    }

    /// The requested track, or the default one when no alternate exists.
    /// Returns the variant that was actually resolved.
    pub fn track(&self, variant: Variant) -> (Variant, &Track) {
        match (variant, &self.alternate) {
            (Variant::Alternate, Some(alt)) => (Variant::Alternate, &alt.track),
            _ => (Variant::Default, &self.default_track),
        }
    }
}

/// A `(sector, variant)` pair resolved to a concrete track.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedTrack<'a> {
    pub sector: &'a str,
    pub variant: Variant,
    pub track: &'a Track,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    sectors: BTreeMap<String, Sector>,
}

impl Catalog {
    pub fn new(sectors: Vec<Sector>) -> Result<Self, CatalogError> {
        let mut by_id = BTreeMap::new();
        for sector in sectors {
            let id = sector.id.clone();
            if by_id.insert(id.clone(), sector).is_some() {
                return Err(CatalogError::DuplicateSector(id));
            }
        }
        Ok(Self { sectors: by_id })
    }

    /// The sectors shipped with the engine.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(data::builtin_sectors()?)
    }

    pub fn sector(&self, id: &str) -> Result<&Sector, CatalogError> {
        self.sectors
            .get(id)
            .ok_or_else(|| CatalogError::UnknownSector(id.to_string()))
    }

    pub fn sectors(&self) -> impl Iterator<Item = &Sector> {
        self.sectors.values()
    }

    pub fn resolve(
        &self,
        sector: &str,
        variant: Variant,
    ) -> Result<ResolvedTrack<'_>, CatalogError> {
        let entry = self.sector(sector)?;
        let (variant, track) = entry.track(variant);
        Ok(ResolvedTrack {
            sector: entry.id(),
            variant,
            track,
        })
    }
}
