//! Round tracking for a camera-driven cup game.
//!
//! A detector reports which fiducial markers are visible on each frame; the
//! [`RoundTracker`] turns that noisy stream into cup state: which cups are in
//! play, which have been hit, and when the round is over.

pub mod error;
pub mod integration;
pub mod logger;
pub mod tracker;

pub use error::{ConfigError, PipelineError, TrackerError};
pub use integration::{
    ControlEvent, ControlSource, DetectionSource, GamePipeline, OutputSink, PipelineConfig,
};
pub use tracker::{
    Detection, DetectionFrame, HitEvent, Round, RoundPhase, RoundTracker, Sample, TrackerConfig,
};
