//! Weighted candidate sets.
//!
//! A [`CandidateSet`] is the inbound data contract of this crate: an ordered list of
//! unique keys, each carrying a relative `impressions` weight. Iteration order is the
//! insertion order, which makes the mapping from a draw position to a key fully
//! deterministic (the same draw always lands on the same key).

use std::collections::BTreeMap;

use crate::{Error, Result};

/// One selectable variant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Unique key within its set.
    pub key: String,
    /// Relative frequency; `0` means "never chosen by the draw".
    pub impressions: u32,
}

impl Candidate {
    /// A candidate with the default weight of one impression.
    pub fn new(key: impl Into<String>) -> Self {
        Self::weighted(key, 1)
    }

    pub fn weighted(key: impl Into<String>, impressions: u32) -> Self {
        Self {
            key: key.into(),
            impressions,
        }
    }
}

/// Ordered candidates with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    items: Vec<Candidate>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from `(key, weight)` pairs, keeping their order.
    ///
    /// Fails with [`Error::DuplicateKey`] on the first repeated key.
    pub fn from_pairs<K, I>(pairs: I) -> Result<Self>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, u32)>,
    {
        let mut set = Self::new();
        for (key, weight) in pairs {
            set.push(Candidate::weighted(key, weight))?;
        }
        Ok(set)
    }

    /// Append a candidate. Keys must be unique.
    pub fn push(&mut self, candidate: Candidate) -> Result<()> {
        if self.contains(&candidate.key) {
            return Err(Error::DuplicateKey(candidate.key));
        }
        self.items.push(candidate);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.items.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|c| c.key.as_str())
    }

    /// Weight of `key`, if present.
    pub fn get(&self, key: &str) -> Option<u32> {
        self.items
            .iter()
            .find(|c| c.key == key)
            .map(|c| c.impressions)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.iter().any(|c| c.key == key)
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> u64 {
        self.items.iter().map(|c| u64::from(c.impressions)).sum()
    }

    /// Check that the set can be drawn from, returning the total weight.
    pub fn validate(&self) -> Result<u64> {
        if self.items.is_empty() {
            return Err(Error::EmptyCandidates);
        }
        let total = self.total_weight();
        if total == 0 {
            return Err(Error::ZeroTotalWeight {
                count: self.items.len(),
            });
        }
        Ok(total)
    }

    /// A copy of this set with `key` removed. `self` is left untouched.
    #[must_use]
    pub fn without(&self, key: &str) -> CandidateSet {
        CandidateSet {
            items: self.items.iter().filter(|c| c.key != key).cloned().collect(),
        }
    }

    /// Map a position in `[0, total_weight)` to the candidate owning it.
    ///
    /// Candidates own contiguous sub-ranges `[cumulative, cumulative + weight)` in
    /// insertion order. Zero-weight candidates own empty ranges and never match.
    /// Returns `None` when `target` is out of range.
    pub fn key_at(&self, target: u64) -> Option<&str> {
        let mut cumulative: u64 = 0;
        for c in &self.items {
            let end = cumulative + u64::from(c.impressions);
            if target >= cumulative && target < end {
                return Some(c.key.as_str());
            }
            cumulative = end;
        }
        None
    }

    /// Exact selection probability of every key (`weight / total`).
    ///
    /// Empty if the total weight is zero.
    pub fn probabilities(&self) -> BTreeMap<String, f64> {
        let total = self.total_weight();
        if total == 0 {
            return BTreeMap::new();
        }
        self.items
            .iter()
            .map(|c| (c.key.clone(), f64::from(c.impressions) / total as f64))
            .collect()
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
