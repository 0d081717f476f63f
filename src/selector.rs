//! Impression-weighted random selection.
//!
//! The draw is a single uniform integer `target` in `[0, total)`; the winner is the
//! candidate whose contiguous sub-range contains it (see [`CandidateSet::key_at`]).
//! Selection probability is therefore exactly `weight / total`, and zero-weight
//! candidates can never win.
//!
//! Notes:
//! - [`WeightedSelector`] is **seedable** so draws can be reproduced in tests.
//! - [`choose_key_thread_local`] uses the per-thread generator, which is safe to
//!   call from many request threads at once.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{CandidateSet, Error, Result};

/// Draw one key from `candidates` using `rng`.
///
/// Fails with [`Error::EmptyCandidates`] or [`Error::ZeroTotalWeight`] when there
/// is nothing to draw from.
pub fn choose_key<'a, R>(candidates: &'a CandidateSet, rng: &mut R) -> Result<&'a str>
where
    R: Rng,
{
    let total = candidates.validate()?;
    let target = rng.random_range(0..total);
    // `target < total`, so some positive-weight candidate owns it.
    candidates
        .key_at(target)
        .ok_or(Error::ZeroTotalWeight {
            count: candidates.len(),
        })
}

/// [`choose_key`] with the thread-local generator.
pub fn choose_key_thread_local(candidates: &CandidateSet) -> Result<&str> {
    choose_key(candidates, &mut rand::rng())
}

/// A weighted selector that owns its random source.
#[derive(Debug, Clone)]
pub struct WeightedSelector {
    rng: StdRng,
}

impl WeightedSelector {
    /// Reproducible selector: same seed, same candidates, same sequence of keys.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Selector seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn choose<'a>(&mut self, candidates: &'a CandidateSet) -> Result<&'a str> {
        choose_key(candidates, &mut self.rng)
    }
}

impl Default for WeightedSelector {
    fn default() -> Self {
        Self::from_entropy()
    }
}
