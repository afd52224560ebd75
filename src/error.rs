//! Error types for round tracking and the game pipeline.

/// Errors returned by the round tracker.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("sample confirmed with no identities observed")]
    EmptySampleRejected,
    #[error("identity {identity} is outside the valid range 1..={max_identity}")]
    UnknownIdentityObserved { identity: u32, max_identity: u32 },
    #[error("max identity {max_identity} is outside the supported range 1..={limit}")]
    InvalidMaxIdentity { max_identity: u32, limit: u32 },
    #[error("update called before a round was built by reset")]
    StaleUpdateBeforeReset,
    #[error("sample stream ended before a round was confirmed")]
    SampleStreamExhausted,
}

/// Errors returned when loading a configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

/// Errors returned by the game pipeline.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError<E> {
    #[error("detection failed: {0}")]
    Detection(E),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}
