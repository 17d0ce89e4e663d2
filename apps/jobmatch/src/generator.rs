//! Vector generator: synthesizes a job vector table for a sector that only has
//! an archetype.
//!
//! The output is a total function of `(sector, archetype, whitelist)`: every
//! random draw comes from a `ChaCha8Rng` seeded with an xxh3 hash of sector and
//! job identifiers, so reruns and other hosts produce identical tables.

use rand::seq::{index, SliceRandom};
use rand::Rng;
use tracing::debug;

use crate::axis::{cosine_similarity, Axis, AxisVector, AXIS_COUNT, AXIS_MAX, AXIS_MIN};
use crate::catalog::{JobVectorTable, Whitelist};
use crate::seed::seeded_rng;

/// Axes perturbed per job, chosen without replacement.
pub const PERTURBED_AXES: usize = 6;
const PERTURBATION_DELTAS: [i32; 6] = [-3, -2, -1, 1, 2, 3];

/// Pairs at or above this cosine similarity get nudged apart.
pub const SIMILARITY_CEILING: f64 = 0.97;
/// Nudges tried per pair before the pair is accepted as-is.
pub const MAX_NUDGES_PER_PAIR: usize = 5;

/// Target number of distinct values per axis across a sector's jobs.
pub const MIN_DISTINCT_VALUES: usize = 6;
const SPREAD_DELTAS: [i32; 4] = [-2, -1, 1, 2];

type RawVector = [i32; AXIS_COUNT];

pub fn generate(sector: &str, archetype: &AxisVector, whitelist: &Whitelist) -> JobVectorTable {
    let base = archetype.values().map(|v| v.round() as i32);

    let mut jobs: Vec<RawVector> = whitelist
        .titles()
        .iter()
        .map(|title| perturb(sector, title, &base))
        .collect();

    let residual = separate_pairs(sector, whitelist.titles(), &mut jobs);
    let thin_axes = spread_axes(sector, &mut jobs);

    debug!(
        sector,
        jobs = jobs.len(),
        residual_similar_pairs = residual,
        thin_axes,
        "generated job vector table"
    );

    let entries = whitelist
        .titles()
        .iter()
        .zip(jobs)
        .map(|(title, raw)| (title.clone(), to_vector(&raw)))
        .collect();
    JobVectorTable::from_entries(entries)
}

fn perturb(sector: &str, title: &str, base: &RawVector) -> RawVector {
    let mut rng = seeded_rng(&[sector, title]);
    let mut raw = *base;
    for axis in index::sample(&mut rng, AXIS_COUNT, PERTURBED_AXES) {
        let delta = PERTURBATION_DELTAS[rng.gen_range(0..PERTURBATION_DELTAS.len())];
        raw[axis] = clamp(raw[axis] + delta);
    }
    raw
}

/// Nudges the second job of every too-similar pair by ±1 on a seeded axis.
/// Returns the number of pairs still at or above the ceiling.
fn separate_pairs(sector: &str, titles: &[String], jobs: &mut [RawVector]) -> usize {
    let mut residual = 0;

    for i in 0..jobs.len() {
        for j in (i + 1)..jobs.len() {
            let mut iteration = 0;
            while iteration < MAX_NUDGES_PER_PAIR
                && similarity(&jobs[i], &jobs[j]) >= SIMILARITY_CEILING
            {
                let round = iteration.to_string();
                let mut rng = seeded_rng(&[sector, titles[j].as_str(), round.as_str()]);
                let axis = rng.gen_range(0..AXIS_COUNT);
                let delta = if rng.gen_bool(0.5) { 1 } else { -1 };
                jobs[j][axis] = clamp(jobs[j][axis] + delta);
                iteration += 1;
            }
            if similarity(&jobs[i], &jobs[j]) >= SIMILARITY_CEILING {
                residual += 1;
            }
        }
    }

    residual
}

/// Widens every axis with fewer than `MIN_DISTINCT_VALUES` distinct values.
/// Returns how many axes are still short afterwards.
fn spread_axes(sector: &str, jobs: &mut [RawVector]) -> usize {
    let mut short = 0;

    for axis in Axis::ALL {
        let a = axis.index();
        if distinct_values(jobs, a).len() >= MIN_DISTINCT_VALUES {
            continue;
        }

        let mut rng = seeded_rng(&[sector, axis.as_str()]);
        let mut order: Vec<usize> = (0..jobs.len()).collect();
        order.shuffle(&mut rng);

        for job in order {
            let present = distinct_values(jobs, a);
            if present.len() >= MIN_DISTINCT_VALUES {
                break;
            }
            // Moving the only holder of a value would not widen the axis.
            let current = jobs[job][a];
            if jobs.iter().filter(|raw| raw[a] == current).count() < 2 {
                continue;
            }

            let mut deltas = SPREAD_DELTAS;
            deltas.shuffle(&mut rng);
            if let Some(value) = deltas
                .iter()
                .map(|delta| clamp(current + delta))
                .find(|value| !present.contains(value))
            {
                jobs[job][a] = value;
            }
        }

        if distinct_values(jobs, a).len() < MIN_DISTINCT_VALUES {
            short += 1;
        }
    }

    short
}

fn distinct_values(jobs: &[RawVector], axis: usize) -> Vec<i32> {
    let mut values: Vec<i32> = jobs.iter().map(|raw| raw[axis]).collect();
    values.sort_unstable();
    values.dedup();
    values
}

fn similarity(a: &RawVector, b: &RawVector) -> f64 {
    cosine_similarity(&a.map(f64::from), &b.map(f64::from))
}

fn clamp(value: i32) -> i32 {
    value.clamp(AXIS_MIN as i32, AXIS_MAX as i32)
}

fn to_vector(raw: &RawVector) -> AxisVector {
    AxisVector::clamped(raw.map(f64::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::variant::Variant;

    fn generated_tracks() -> Vec<(String, Variant, AxisVector, Whitelist)> {
        let catalog = Catalog::builtin().unwrap();
        let mut tracks = Vec::new();
        for sector in catalog.sectors() {
            for variant in [Variant::Default, Variant::Alternate] {
                let resolved = catalog.resolve(sector.id(), variant).unwrap();
                if resolved.variant != variant {
                    continue;
                }
                if let Some(archetype) = resolved.track.archetype() {
                    tracks.push((
                        sector.id().to_string(),
                        variant,
                        *archetype,
                        resolved.track.whitelist().clone(),
                    ));
                }
            }
        }
        tracks
    }

    #[test]
    fn test_builtin_catalog_has_generated_tracks() {
        assert!(generated_tracks().len() >= 4, "expected droit (x2), defense and culture_medias");
    }

    #[test]
    fn test_generation_is_idempotent() {
        for (sector, _, archetype, whitelist) in generated_tracks() {
            let a = generate(&sector, &archetype, &whitelist);
            let b = generate(&sector, &archetype, &whitelist);
            assert_eq!(a, b, "{sector} generated two different tables");
        }
    }

    #[test]
    fn test_table_covers_whitelist_in_order() {
        for (sector, _, archetype, whitelist) in generated_tracks() {
            let table = generate(&sector, &archetype, &whitelist);
            let titles: Vec<&str> = table.iter().map(|(t, _)| t).collect();
            let expected: Vec<&str> = whitelist.titles().iter().map(String::as_str).collect();
            assert_eq!(titles, expected, "{sector} table keys differ from whitelist");
        }
    }

    #[test]
    fn test_values_are_integers_in_range() {
        for (sector, _, archetype, whitelist) in generated_tracks() {
            for (title, vector) in generate(&sector, &archetype, &whitelist).iter() {
                for (axis, value) in vector.iter() {
                    assert!(
                        (0.0..=10.0).contains(&value) && value.fract() == 0.0,
                        "{sector}/{title} {axis} = {value}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_every_axis_has_minimum_spread() {
        for (sector, variant, archetype, whitelist) in generated_tracks() {
            let table = generate(&sector, &archetype, &whitelist);
            for axis in Axis::ALL {
                let mut values: Vec<i64> = table.iter().map(|(_, v)| v.get(axis) as i64).collect();
                values.sort_unstable();
                values.dedup();
                assert!(
                    values.len() >= MIN_DISTINCT_VALUES,
                    "{sector}/{variant} axis {axis} only has {values:?}"
                );
            }
        }
    }

    #[test]
    fn test_most_pairs_fall_below_similarity_ceiling() {
        for (sector, _, archetype, whitelist) in generated_tracks() {
            let table = generate(&sector, &archetype, &whitelist);
            let vectors: Vec<AxisVector> = table.iter().map(|(_, v)| *v).collect();
            let mut pairs = 0;
            let mut below = 0;
            let mut identical = 0;
            for i in 0..vectors.len() {
                for j in (i + 1)..vectors.len() {
                    pairs += 1;
                    if vectors[i].cosine_similarity(&vectors[j]) < SIMILARITY_CEILING {
                        below += 1;
                    }
                    if vectors[i] == vectors[j] {
                        identical += 1;
                    }
                }
            }
            assert!(below * 10 >= pairs * 9, "{sector}: only {below}/{pairs} pairs below ceiling");
            assert!(identical * 10 <= pairs, "{sector}: {identical}/{pairs} identical pairs");
        }
    }

    #[test]
    fn test_different_sector_ids_produce_different_tables() {
        let catalog = Catalog::builtin().unwrap();
        let track = catalog.resolve("defense", Variant::Default).unwrap().track;
        let archetype = *track.archetype().unwrap();
        let a = generate("defense", &archetype, track.whitelist());
        let b = generate("defense-bis", &archetype, track.whitelist());
        assert_ne!(a, b);
    }

    #[test]
    fn test_saturated_archetypes_terminate() {
        let catalog = Catalog::builtin().unwrap();
        let whitelist = catalog.resolve("sante", Variant::Default).unwrap().track.whitelist();
        for value in [0.0, 10.0] {
            let archetype = AxisVector::clamped([value; AXIS_COUNT]);
            let table = generate("sante", &archetype, whitelist);
            assert_eq!(table.len(), whitelist.len());
        }
    }
}
