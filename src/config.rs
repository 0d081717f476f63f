//! Rotator configuration.
//!
//! Plain structs with `Default`, optionally deserializable (feature `serde`) and
//! loadable from TOML (feature `config`):
//!
//! ```toml
//! key = "Rotator1"
//! mode = "always-different"
//!
//! [[panels]]
//! key = "Content1"
//! impressions = 50
//!
//! [[panels]]
//! key = "Content2"
//! impressions = 50
//! ```

use std::time::Duration;

use crate::{Candidate, CandidateSet, Error, Result, RotationMode, DEFAULT_PERSIST_TTL};

fn default_impressions() -> u32 {
    1
}

fn default_persist_ttl_secs() -> u64 {
    DEFAULT_PERSIST_TTL.as_secs()
}

/// One content panel competing in a rotator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanelConfig {
    /// Unique key; this is what gets persisted and reported.
    pub key: String,
    /// Relative display frequency. Defaults to 1 so an unweighted panel still shows up.
    #[cfg_attr(feature = "serde", serde(default = "default_impressions"))]
    pub impressions: u32,
    /// Opaque payload handed back with the chosen panel (markup, a template id, ...).
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub content: Option<String>,
}

impl PanelConfig {
    pub fn new(key: impl Into<String>, impressions: u32) -> Self {
        Self {
            key: key.into(),
            impressions,
            content: None,
        }
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::new(String::new(), default_impressions())
    }
}

/// Configuration for a single [`crate::Rotator`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotatorConfig {
    /// Identifies the rotator; also names its persisted state.
    pub key: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: RotationMode,
    /// Lifetime of the persisted last-shown key, in seconds.
    #[cfg_attr(feature = "serde", serde(default = "default_persist_ttl_secs"))]
    pub persist_ttl_secs: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub panels: Vec<PanelConfig>,
}

impl Default for RotatorConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            mode: RotationMode::default(),
            persist_ttl_secs: default_persist_ttl_secs(),
            panels: Vec::new(),
        }
    }
}

impl RotatorConfig {
    pub fn new(key: impl Into<String>, mode: RotationMode) -> Self {
        Self {
            key: key.into(),
            mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_panel(mut self, panel: PanelConfig) -> Self {
        self.panels.push(panel);
        self
    }

    pub fn persist_ttl(&self) -> Duration {
        Duration::from_secs(self.persist_ttl_secs)
    }

    pub fn panel(&self, key: &str) -> Option<&PanelConfig> {
        self.panels.iter().find(|p| p.key == key)
    }

    /// The weighted candidate set formed by the panels, in declaration order.
    pub fn candidates(&self) -> Result<CandidateSet> {
        let mut set = CandidateSet::new();
        for p in &self.panels {
            set.push(Candidate::weighted(p.key.clone(), p.impressions))?;
        }
        Ok(set)
    }

    /// Structural checks: a non-blank rotator key and unique panel keys.
    ///
    /// An empty or all-zero panel list is allowed here; it is reported when a
    /// selection is attempted.
    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(Error::Config("rotator key must not be empty".to_string()));
        }
        if let Some(p) = self.panels.iter().find(|p| p.key.trim().is_empty()) {
            return Err(Error::Config(format!(
                "rotator '{}' has a panel with an empty key (impressions={})",
                self.key, p.impressions
            )));
        }
        self.candidates().map(|_| ())
    }

    /// Parse and validate a single rotator from TOML.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Several rotators loaded together, e.g. for one page or site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotatorSet {
    #[cfg_attr(feature = "serde", serde(default, rename = "rotator"))]
    pub rotators: Vec<RotatorConfig>,
}

impl RotatorSet {
    pub fn get(&self, key: &str) -> Option<&RotatorConfig> {
        self.rotators.iter().find(|r| r.key == key)
    }

    /// Validate every rotator and require unique rotator keys (they share one store).
    pub fn validate(&self) -> Result<()> {
        for (i, r) in self.rotators.iter().enumerate() {
            r.validate()?;
            if self.rotators[..i].iter().any(|o| o.key == r.key) {
                return Err(Error::Config(format!("duplicate rotator key '{}'", r.key)));
            }
        }
        Ok(())
    }

    /// Parse `[[rotator]]` tables from TOML.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let set: Self = toml::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        set.validate()?;
        Ok(set)
    }
}
