use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded pseudo-random source for sizes, absence and skip decisions.
///
/// The generator never decides byte *content*; that always comes from the
/// cursor. It is seeded from the first 8 bytes of the fuzz input, so a
/// given input and configuration replay the exact same decisions in the
/// exact same order.
///
/// The stream comes from ChaCha8, whose output for a given seed is fixed
/// across `rand_chacha` releases, so saved corpus entries keep decoding
/// the same way. Not suitable for anything that needs unpredictability.
#[derive(Debug, Clone)]
pub struct DecisionGenerator {
    rng: ChaCha8Rng,
    seed: i64,
}

impl DecisionGenerator {
    /// Create a generator from a 64-bit seed.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn from_seed(seed: i64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed as u64),
            seed,
        }
    }

    /// The seed this generator was created from.
    #[must_use]
    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Uniform integer in `[min, max]`, inclusive.
    ///
    /// Returns `min` without drawing from the generator when
    /// `min == max`. Callers must pass `min <= max`; the configuration
    /// setters guarantee it for every configured range, and an inverted
    /// pair collapses to `min` rather than panicking.
    pub fn random_size(&mut self, min: usize, max: usize) -> usize {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    /// `true` with probability `p`.
    ///
    /// Always draws exactly one `f32` variate in `[0, 1)`, so `p = 0`
    /// never fires, `p = 1` always fires, and the draw count does not
    /// depend on `p`.
    pub fn random_bool(&mut self, p: f32) -> bool {
        self.rng.random::<f32>() < p
    }
}
