//! Error types.

/// Errors produced while validating candidates, parsing modes, or loading config.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Candidate set is empty")]
    EmptyCandidates,

    #[error("Total weight of {count} candidates is zero")]
    ZeroTotalWeight { count: usize },

    #[error("Duplicate candidate key '{0}'")]
    DuplicateKey(String),

    #[error("Unknown rotation mode '{0}': expected always-same, always-different or random")]
    UnknownMode(String),

    #[error("Invalid rotator config: {0}")]
    Config(String),
}

impl Error {
    /// True for errors that mean the caller handed over an unusable candidate set.
    ///
    /// These are configuration faults on the caller's side and are never
    /// recovered internally.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::EmptyCandidates | Error::ZeroTotalWeight { .. } | Error::DuplicateKey(_)
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
