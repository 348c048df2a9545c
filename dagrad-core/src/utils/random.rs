use rand::rngs::StdRng;
use rand::SeedableRng;

/// A generator seeded from the operating system's entropy source.
pub fn seeded_rng() -> StdRng {
    StdRng::from_entropy()
}

/// A deterministic generator for reproducible runs and tests.
pub fn rng_from_seed(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
