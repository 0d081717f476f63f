//! Rotation policy: previous-selection handling on top of the weighted draw.
//!
//! A policy decision is a single step. The only state is the previous key carried
//! in by the caller and the chosen key carried out; nothing is kept between calls
//! and the caller's candidate set is never modified.
//!
//! | mode               | previous present         | previous stale / absent |
//! |--------------------|--------------------------|-------------------------|
//! | `AlwaysSame`       | returned as-is, no draw  | weighted draw           |
//! | `AlwaysDifferent`  | draw over set minus it   | weighted draw           |
//! | `Random`           | weighted draw            | weighted draw           |
//!
//! `AlwaysDifferent` with nothing left to draw from after removing the previous key
//! falls back to the full set.

use rand::Rng;

use crate::{choose_key, CandidateSet, Result, RotationMode};

/// Audit notes describing why a key was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionNote {
    /// `AlwaysSame`: the previous key was still a candidate and was kept.
    KeptPrevious,
    /// `AlwaysDifferent`: the previous key was removed before drawing.
    ExcludedPrevious,
    /// No previous key was supplied.
    NoPrevious,
    /// The previous key is no longer a candidate (e.g. the content was removed).
    StalePrevious { previous: String },
    /// `AlwaysDifferent` could not exclude `previous` without emptying the draw.
    SingleCandidateFallback { previous: String },
    /// `Random`: the previous key plays no role.
    IgnoredPrevious,
    /// A weighted draw produced the key.
    SampledFromDistribution,
}

impl SelectionNote {
    /// Notes that mark a graceful fallback rather than the mode's normal path.
    pub fn is_fallback(&self) -> bool {
        matches!(
            self,
            SelectionNote::StalePrevious { .. } | SelectionNote::SingleCandidateFallback { .. }
        )
    }
}

/// A policy decision.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    /// The chosen key; always a key of the candidate set.
    pub chosen: String,
    pub mode: RotationMode,
    /// The previous key as supplied by the caller.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub previous: Option<String>,
    pub notes: Vec<SelectionNote>,
}

impl Selection {
    /// True if a fallback path was taken.
    pub fn is_degenerate(&self) -> bool {
        self.notes.iter().any(SelectionNote::is_fallback)
    }

    /// True if the chosen key differs from the previous one (or there was none).
    pub fn changed(&self) -> bool {
        self.previous.as_deref() != Some(self.chosen.as_str())
    }
}

/// A rotation mode applied to weighted candidate sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationPolicy {
    pub mode: RotationMode,
}

impl RotationPolicy {
    pub fn new(mode: RotationMode) -> Self {
        Self { mode }
    }

    /// Choose a key from `candidates` given the visitor's `previous` key.
    ///
    /// The set is validated first, so an empty or zero-weight set is an error in
    /// every mode. A blank previous key counts as absent unless it is itself a
    /// candidate key.
    pub fn select<R>(
        &self,
        candidates: &CandidateSet,
        previous: Option<&str>,
        rng: &mut R,
    ) -> Result<Selection>
    where
        R: Rng,
    {
        candidates.validate()?;

        let previous = previous.filter(|p| !p.trim().is_empty() || candidates.contains(p));
        let mut notes = Vec::new();

        let filtered = match (self.mode, previous) {
            (_, None) => {
                notes.push(SelectionNote::NoPrevious);
                None
            }
            (RotationMode::Random, Some(_)) => {
                notes.push(SelectionNote::IgnoredPrevious);
                None
            }
            (_, Some(prev)) if !candidates.contains(prev) => {
                notes.push(SelectionNote::StalePrevious {
                    previous: prev.to_string(),
                });
                None
            }
            (RotationMode::AlwaysSame, Some(prev)) => {
                notes.push(SelectionNote::KeptPrevious);
                return Ok(Selection {
                    chosen: prev.to_string(),
                    mode: self.mode,
                    previous: Some(prev.to_string()),
                    notes,
                });
            }
            (RotationMode::AlwaysDifferent, Some(prev)) => {
                let rest = candidates.without(prev);
                if rest.validate().is_ok() {
                    notes.push(SelectionNote::ExcludedPrevious);
                    Some(rest)
                } else {
                    notes.push(SelectionNote::SingleCandidateFallback {
                        previous: prev.to_string(),
                    });
                    None
                }
            }
        };

        let pool = filtered.as_ref().unwrap_or(candidates);
        let chosen = choose_key(pool, rng)?.to_string();
        notes.push(SelectionNote::SampledFromDistribution);

        Ok(Selection {
            chosen,
            mode: self.mode,
            previous: previous.map(str::to_string),
            notes,
        })
    }
}

/// Narrow form of [`RotationPolicy::select`] returning only the key.
pub fn select_key<R>(
    candidates: &CandidateSet,
    mode: RotationMode,
    previous: Option<&str>,
    rng: &mut R,
) -> Result<String>
where
    R: Rng,
{
    RotationPolicy::new(mode)
        .select(candidates, previous, rng)
        .map(|s| s.chosen)
}
