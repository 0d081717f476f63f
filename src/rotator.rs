//! Rotator: the per-request front door.
//!
//! [`Rotator::rotate`] runs one full rotation for one visitor:
//!
//! ```text
//! previous = store.load("<key>_SCR_ContentKey")
//! selection = policy.select(panels, previous)
//! listeners <- ContentShown { rotator_key, panel }
//! store.save("<key>_SCR_ContentKey", selection.chosen)
//! ```
//!
//! Rendering the chosen panel is up to the caller ([`Shown::is_visible`]).

use rand::Rng;

use crate::{
    storage_name, PanelConfig, Result, RotationPolicy, RotatorConfig, Selection, SelectionStore,
};

/// Tracking event raised once per rotation, after the choice is final.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentShown {
    pub rotator_key: String,
    pub panel: PanelConfig,
}

/// Receives [`ContentShown`] events.
pub trait ContentShownListener {
    fn content_shown(&mut self, event: &ContentShown);
}

impl<F> ContentShownListener for F
where
    F: FnMut(&ContentShown),
{
    fn content_shown(&mut self, event: &ContentShown) {
        self(event)
    }
}

/// Outcome of one rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shown {
    pub rotator_key: String,
    /// The chosen panel.
    pub panel: PanelConfig,
    pub selection: Selection,
    /// Whether the chosen key was written back to the store.
    pub persisted: bool,
}

impl Shown {
    /// True for exactly one panel key: the chosen one.
    pub fn is_visible(&self, panel_key: &str) -> bool {
        self.panel.key == panel_key
    }
}

/// A configured rotator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotator {
    config: RotatorConfig,
}

impl Rotator {
    /// Validates `config` up front so bad keys surface at startup, not per request.
    pub fn new(config: RotatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RotatorConfig {
        &self.config
    }

    pub fn key(&self) -> &str {
        &self.config.key
    }

    /// Name under which this rotator's last-shown key is persisted.
    pub fn storage_name(&self) -> String {
        storage_name(&self.config.key)
    }

    /// Choose a panel for one visitor, notify listeners, and persist the choice.
    ///
    /// Only an unusable panel set is an error. A failed write to `store` is logged
    /// and reported via [`Shown::persisted`]; the selection still stands.
    pub fn rotate<S, R>(
        &self,
        store: &mut S,
        rng: &mut R,
        listeners: &mut [&mut dyn ContentShownListener],
    ) -> Result<Shown>
    where
        S: SelectionStore + ?Sized,
        R: Rng,
    {
        let key = self.config.key.as_str();
        let name = self.storage_name();
        let candidates = self.config.candidates()?;
        let previous = store.load(&name);

        let selection = RotationPolicy::new(self.config.mode)
            .select(&candidates, previous.as_deref(), rng)
            .inspect_err(|e| {
                tracing::error!(rotator = %key, error = %e, "No usable content panels");
            })?;

        if selection.is_degenerate() {
            tracing::warn!(
                rotator = %key,
                mode = %selection.mode,
                notes = ?selection.notes,
                "Rotation fell back to an unfiltered draw"
            );
        }
        tracing::debug!(rotator = %key, chosen = %selection.chosen, "Key is being displayed");

        let panel = self
            .config
            .panel(&selection.chosen)
            .cloned()
            .unwrap_or_else(|| PanelConfig::new(selection.chosen.clone(), 0));

        let event = ContentShown {
            rotator_key: key.to_string(),
            panel: panel.clone(),
        };
        for l in listeners.iter_mut() {
            l.content_shown(&event);
        }

        let persisted = match store.save(&name, &selection.chosen, self.config.persist_ttl()) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    rotator = %key,
                    storage = %name,
                    error = %e,
                    "Failed to persist shown key"
                );
                false
            }
        };

        Ok(Shown {
            rotator_key: key.to_string(),
            panel,
            selection,
            persisted,
        })
    }
}
