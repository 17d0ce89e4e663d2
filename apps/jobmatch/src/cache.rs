//! Per-`(sector, variant)` memo of job vector tables.
//!
//! Hand-authored tables are cloned in on first use; archetype-only tracks are
//! generated. Entries are never invalidated.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::catalog::{JobVectorTable, ResolvedTrack};
use crate::generator;
use crate::variant::Variant;

type CacheKey = (String, Variant);

#[derive(Debug, Default)]
pub struct VectorCache {
    tables: DashMap<CacheKey, Arc<JobVectorTable>>,
}

impl VectorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table for a resolved track, or `None` when the track has neither
    /// authored vectors nor an archetype.
    ///
    /// Population goes through the shard-locked `entry` API, so concurrent first
    /// requests for one key compute it once.
    pub fn get_or_build(&self, resolved: &ResolvedTrack<'_>) -> Option<Arc<JobVectorTable>> {
        let key = (resolved.sector.to_string(), resolved.variant);
        if let Some(table) = self.tables.get(&key) {
            return Some(Arc::clone(table.value()));
        }

        let track = resolved.track;
        if !track.is_vectorized() {
            return None;
        }

        let entry = self.tables.entry(key).or_insert_with(|| {
            let table = match (track.authored_vectors(), track.archetype()) {
                (Some(authored), _) => authored.clone(),
                (None, Some(archetype)) => {
                    generator::generate(resolved.sector, archetype, track.whitelist())
                }
                (None, None) => JobVectorTable::from_entries(Vec::new()),
            };
            debug!(
                sector = resolved.sector,
                variant = %resolved.variant,
                jobs = table.len(),
                "cached job vector table"
            );
            Arc::new(table)
        });
        Some(Arc::clone(entry.value()))
    }

    pub fn contains(&self, sector: &str, variant: Variant) -> bool {
        self.tables.contains_key(&(sector.to_string(), variant))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_generated_table_is_memoized() {
        let catalog = Catalog::builtin().unwrap();
        let cache = VectorCache::new();
        let resolved = catalog.resolve("droit", Variant::Default).unwrap();

        let first = cache.get_or_build(&resolved).unwrap();
        let second = cache.get_or_build(&resolved).unwrap();
        assert!(Arc::ptr_eq(&first, &second), "second lookup should reuse the cached Arc");
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("droit", Variant::Default));
        assert!(!cache.contains("droit", Variant::Alternate));
    }

    #[test]
    fn test_variants_are_cached_separately() {
        let catalog = Catalog::builtin().unwrap();
        let cache = VectorCache::new();
        let default = cache
            .get_or_build(&catalog.resolve("droit", Variant::Default).unwrap())
            .unwrap();
        let alternate = cache
            .get_or_build(&catalog.resolve("droit", Variant::Alternate).unwrap())
            .unwrap();
        assert_ne!(default, alternate);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_missing_alternate_shares_default_entry() {
        let catalog = Catalog::builtin().unwrap();
        let cache = VectorCache::new();
        cache
            .get_or_build(&catalog.resolve("defense", Variant::Alternate).unwrap())
            .unwrap();
        assert!(cache.contains("defense", Variant::Default));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_authored_table_is_used_as_is() {
        let catalog = Catalog::builtin().unwrap();
        let resolved = catalog.resolve("informatique", Variant::Default).unwrap();
        let table = VectorCache::new().get_or_build(&resolved).unwrap();
        assert_eq!(Some(table.as_ref()), resolved.track.authored_vectors());
    }

    #[test]
    fn test_whitelist_only_track_has_no_table() {
        let catalog = Catalog::builtin().unwrap();
        let cache = VectorCache::new();
        assert!(cache
            .get_or_build(&catalog.resolve("sante", Variant::Default).unwrap())
            .is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_first_requests_agree() {
        let catalog = Arc::new(Catalog::builtin().unwrap());
        let cache = Arc::new(VectorCache::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    let resolved = catalog.resolve("culture_medias", Variant::Default).unwrap();
                    cache.get_or_build(&resolved).unwrap()
                })
            })
            .collect();

        let tables: Vec<Arc<JobVectorTable>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        for table in &tables[1..] {
            assert!(Arc::ptr_eq(&tables[0], table));
        }
        assert_eq!(cache.len(), 1);
    }
}
