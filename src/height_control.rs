use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Highest level a skip list node can reach with the default generator.
pub const MAX_HEIGHT: usize = 14;

/// Chance that a node is promoted one more level with the default generator.
pub const UPGRADE_PROBABILITY: f64 = 0.25;

/// Source of node heights for a `SkipList`.
///
/// Heights are 1-based: a node of height `h` is linked into levels
/// `0..h`. Implementations must only ever return values in
/// `1..=max_height()`.
///
/// Controllers are `Send` so that a `SkipList` can be moved to, or shared
/// behind a lock with, another thread.
pub trait HeightControl: Send {
    fn max_height(&self) -> usize;
    fn get_height(&mut self) -> usize;
}

/// Draws heights from a geometric distribution truncated at `max_height`, so
/// that `P(height >= h) = upgrade_probability^(h - 1)`.
///
/// The random number generator is owned by the controller, which means a
/// seeded generator reproduces exactly the same sequence of list shapes.
#[derive(Debug, Clone)]
pub struct GeometricalGenerator<R = StdRng> {
    upgrade_probability_: f64,
    max_height_: usize,
    rng_: R,
}

impl<R: Rng> GeometricalGenerator<R> {
    pub fn new(max_height: usize, upgrade_probability: f64, rng: R) -> GeometricalGenerator<R> {
        assert!(max_height > 0);
        assert!(upgrade_probability > 0.0);
        assert!(upgrade_probability < 1.0);

        GeometricalGenerator {
            upgrade_probability_: upgrade_probability,
            max_height_: max_height,
            rng_: rng,
        }
    }

    pub fn upgrade_probability(&self) -> f64 {
        self.upgrade_probability_
    }
}

impl GeometricalGenerator<StdRng> {
    /// The default configuration, with a deterministic generator.
    pub fn seeded(seed: u64) -> GeometricalGenerator<StdRng> {
        Self::new(MAX_HEIGHT, UPGRADE_PROBABILITY, StdRng::seed_from_u64(seed))
    }
}

impl Default for GeometricalGenerator<StdRng> {
    fn default() -> Self {
        Self::new(MAX_HEIGHT, UPGRADE_PROBABILITY, StdRng::from_entropy())
    }
}

impl<R: Rng + Send> HeightControl for GeometricalGenerator<R> {
    #[inline(always)]
    fn max_height(&self) -> usize {
        self.max_height_
    }

    fn get_height(&mut self) -> usize {
        // Number of successes until the first failure, plus the base level.
        let mut h = 1;

        while h < self.max_height_ && self.rng_.gen_bool(self.upgrade_probability_) {
            h += 1;
        }

        h
    }
}
