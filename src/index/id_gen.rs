//! Random contact id allocation
//!
//! Ids are sampled uniformly from an inclusive range and re-sampled on
//! collision. Sampling is bounded: after `max_attempts` collisions, or when
//! every id in the range is taken, allocation fails with
//! `ROLODEX_ID_SPACE_EXHAUSTED`. A returned id is a candidate only; nothing is
//! reserved until the contact is added.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::contact::ContactId;

use super::errors::{IndexError, IndexResult};

/// Default lowest id
pub const DEFAULT_MIN_ID: ContactId = 1;

/// Default highest id
pub const DEFAULT_MAX_ID: ContactId = 1_000_000;

/// Default bound on sampling attempts per allocation
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Bounded random id allocator
#[derive(Debug)]
pub struct IdGenerator {
    min: ContactId,
    max: ContactId,
    max_attempts: u32,
    rng: StdRng,
}

impl IdGenerator {
    /// Creates an allocator over `[min, max]`.
    ///
    /// Bounds are swapped if given in reverse order.
    pub fn new(min: ContactId, max: ContactId, max_attempts: u32) -> Self {
        Self::with_rng(min, max, max_attempts, StdRng::from_entropy())
    }

    /// Creates a deterministic allocator for reproducible runs
    pub fn seeded(min: ContactId, max: ContactId, max_attempts: u32, seed: u64) -> Self {
        Self::with_rng(min, max, max_attempts, StdRng::seed_from_u64(seed))
    }

    fn with_rng(min: ContactId, max: ContactId, max_attempts: u32, rng: StdRng) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min,
            max,
            max_attempts,
            rng,
        }
    }

    /// Lowest id this allocator can return
    pub fn min(&self) -> ContactId {
        self.min
    }

    /// Highest id this allocator can return
    pub fn max(&self) -> ContactId {
        self.max
    }

    /// Number of distinct ids in the range
    pub fn capacity(&self) -> u64 {
        u64::from(self.max - self.min) + 1
    }

    /// Samples an id for which `is_taken` returns false.
    ///
    /// `occupied` is the number of ids currently in use; it lets a full range
    /// fail immediately instead of burning every attempt.
    pub fn next_id<F>(&mut self, occupied: usize, is_taken: F) -> IndexResult<ContactId>
    where
        F: Fn(ContactId) -> bool,
    {
        if occupied as u64 >= self.capacity() {
            return Err(self.exhausted(0));
        }

        for _ in 0..self.max_attempts {
            let candidate = self.rng.gen_range(self.min..=self.max);
            if !is_taken(candidate) {
                return Ok(candidate);
            }
        }

        Err(self.exhausted(self.max_attempts))
    }

    fn exhausted(&self, attempts: u32) -> IndexError {
        IndexError::IdSpaceExhausted {
            min: self.min,
            max: self.max,
            attempts,
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ID, DEFAULT_MAX_ID, DEFAULT_MAX_ATTEMPTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_stay_in_range() {
        let mut gen = IdGenerator::seeded(10, 20, 100, 7);
        for _ in 0..200 {
            let id = gen.next_id(0, |_| false).unwrap();
            assert!((10..=20).contains(&id));
        }
    }

    #[test]
    fn test_skips_taken_ids() {
        let taken: HashSet<ContactId> = (1..=9).collect();
        let mut gen = IdGenerator::seeded(1, 10, 10_000, 42);

        let id = gen.next_id(taken.len(), |id| taken.contains(&id)).unwrap();
        assert_eq!(id, 10);
    }

    #[test]
    fn test_full_range_fails_immediately() {
        let mut gen = IdGenerator::seeded(1, 3, 1_000, 1);

        let err = gen.next_id(3, |_| true).unwrap_err();
        assert_eq!(err, IndexError::IdSpaceExhausted { min: 1, max: 3, attempts: 0 });
    }

    #[test]
    fn test_attempts_are_bounded() {
        let mut gen = IdGenerator::seeded(1, 100, 5, 3);

        // Every sample collides
        let err = gen.next_id(0, |_| true).unwrap_err();
        assert_eq!(err.code(), "ROLODEX_ID_SPACE_EXHAUSTED");
        assert_eq!(err, IndexError::IdSpaceExhausted { min: 1, max: 100, attempts: 5 });
    }

    #[test]
    fn test_reversed_bounds_normalized() {
        let gen = IdGenerator::seeded(50, 5, 10, 0);
        assert_eq!(gen.min(), 5);
        assert_eq!(gen.max(), 50);
        assert_eq!(gen.capacity(), 46);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = IdGenerator::seeded(1, 1_000_000, 10, 99);
        let mut b = IdGenerator::seeded(1, 1_000_000, 10, 99);
        for _ in 0..20 {
            assert_eq!(a.next_id(0, |_| false).unwrap(), b.next_id(0, |_| false).unwrap());
        }
    }
}
