//! Stable seeding shared by the generator and the shuffle fallback.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use twox_hash::xxh3::hash64;

/// xxh3 of the parts joined with `:`. Order-sensitive.
pub fn stable_hash(parts: &[&str]) -> u64 {
    hash64(parts.join(":").as_bytes())
}

pub fn seeded_rng(parts: &[&str]) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(stable_hash(parts))
}
