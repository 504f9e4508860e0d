//! Deterministic random number generation with forking for MCTS.
//!
//! Every source of randomness in a game (deck shuffles, mixing splits,
//! agent choices, rollouts) draws from a `GameRng`, so a game or a search is
//! reproducible from its seed.
//!
//! ## MCTS Usage
//!
//! ```
//! use arena_sim::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//!
//! // Each simulation gets its own branch
//! let mut sim_rng = rng.fork();
//! assert_ne!(rng.gen_range_usize(0..1000), sim_rng.gen_range_usize(0..1000));
//!
//! // Forks are deterministic: same seed and fork count, same branch
//! let mut rng2 = GameRng::new(42);
//! assert_eq!(GameRng::new(42).fork().seed(), rng2.fork().seed());
//! ```

use im::Vector;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG with forking for simulations.
///
/// ChaCha8 keeps generation fast while giving well-distributed streams.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Generate a random boolean with given probability of true.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Shuffle a persistent vector (decks are stored as `im::Vector`).
    pub fn shuffle_vector<T: Clone>(&mut self, vector: &mut Vector<T>) {
        let mut items: Vec<T> = vector.iter().cloned().collect();
        items.shuffle(&mut self.inner);
        *vector = items.into_iter().collect();
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }
}
