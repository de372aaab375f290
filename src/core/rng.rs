//! Deterministic, checkpointable random number generation.
//!
//! Shuffles draw from a `GameRng`. Its state can be captured as a small
//! `GameRngState` and stored with a player's record, which is what lets
//! `ZoneStore::replay` reproduce every shuffle in the move history.
//!
//! ```
//! use mtg_table::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let state = rng.state();
//!
//! let mut a = vec![1, 2, 3, 4, 5, 6];
//! rng.shuffle(&mut a);
//!
//! let mut b = vec![1, 2, 3, 4, 5, 6];
//! GameRng::from_state(&state).shuffle(&mut b);
//! assert_eq!(a, b);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded RNG used for every shuffle.
///
/// Uses ChaCha8: fast, and its stream position is cheap to save and restore.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Use `seed` when given, otherwise a fresh random seed.
    #[must_use]
    pub fn seeded_or_random(seed: Option<u64>) -> Self {
        Self::new(seed.unwrap_or_else(rand::random))
    }

    /// Uniformly shuffle a slice in place (Fisher-Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state.
///
/// The ChaCha8 word position is a 128-bit counter, so capture and restore
/// are O(1) regardless of how much randomness has been consumed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let mut a: Vec<u32> = (0..30).collect();
        let mut b = a.clone();
        rng1.shuffle(&mut a);
        rng2.shuffle(&mut b);

        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds() {
        let mut a: Vec<u32> = (0..30).collect();
        let mut b = a.clone();
        GameRng::new(1).shuffle(&mut a);
        GameRng::new(2).shuffle(&mut b);

        assert_ne!(a, b);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        assert_ne!(data, original);
        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_state_restores_stream_position() {
        let mut rng = GameRng::new(7);
        let mut warmup: Vec<u32> = (0..50).collect();
        rng.shuffle(&mut warmup);

        let state = rng.state();

        let mut expected: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut expected);

        let mut actual: Vec<u32> = (0..20).collect();
        GameRng::from_state(&state).shuffle(&mut actual);

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }
}
