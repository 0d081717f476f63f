//! `rotator`: impression-weighted content rotation.
//!
//! You have a handful of content variants ("panels") competing for one slot on a
//! page. Each panel carries a relative `impressions` weight. Per visitor, a
//! rotator picks exactly one panel and remembers the choice for next time.
//!
//! **Selection:**
//! - [`choose_key`] / [`WeightedSelector`]: one uniform integer draw over the
//!   cumulative weight space; probability is exactly `weight / total`.
//! - [`RotationPolicy`] / [`select_key`]: wraps the draw with a [`RotationMode`]:
//!   - `AlwaysSame`: keep the visitor's previous key while it is still a candidate.
//!   - `AlwaysDifferent`: exclude the previous key (unless nothing else is drawable).
//!   - `Random`: ignore the previous key.
//!
//! **Around the core:**
//! - [`SelectionStore`] / [`MemoryStore`]: injected per-visitor persistence
//!   (a cookie jar, in a web setting), keyed by [`storage_name`].
//! - [`Rotator`]: load previous key, select, notify [`ContentShownListener`]s, persist.
//! - [`RotatorConfig`] / [`RotatorSet`]: configuration, loadable from TOML with the
//!   `config` feature.
//!
//! The selection functions are pure apart from the random source: they never
//! mutate the caller's [`CandidateSet`] and never do I/O, so they are safe to call
//! concurrently with one generator per caller (or [`choose_key_thread_local`]).
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use rotator::{select_key, CandidateSet, RotationMode};
//!
//! let panels = CandidateSet::from_pairs([("Content1", 50), ("Content2", 50)]).unwrap();
//! let mut rng = StdRng::seed_from_u64(0);
//!
//! let previous = Some("Content1");
//! let next = select_key(&panels, RotationMode::AlwaysDifferent, previous, &mut rng).unwrap();
//! assert_eq!(next, "Content2");
//! ```
//!
//! **Non-goals:** rendering, page lifecycle hooks, and cookie wire formats.

#![forbid(unsafe_code)]

mod error;
pub use error::*;

mod candidate;
pub use candidate::*;

mod mode;
pub use mode::*;

mod selector;
pub use selector::*;

mod policy;
pub use policy::*;

mod store;
pub use store::*;

mod config;
pub use config::*;

mod rotator;
pub use rotator::*;
