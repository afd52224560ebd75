//! Integration module for connecting marker detectors, operator controls and
//! output devices with the round tracker.
//!
//! The tracker itself only sees sets of identities. This module provides the
//! seams around it: a detection oracle trait, a control event source, output
//! sinks and the per-frame game loop.

mod builder;
mod control;
mod detector;
mod pipeline;
mod sink;

pub use builder::DetectionBuilder;
pub use control::{ControlEvent, ControlSource, ScriptedControl};
pub use detector::{DetectionSource, FrameSource, GrayFrame, IntoDetections};
pub use pipeline::{GamePipeline, PipelineConfig, RunSummary, StepOutcome};
pub use sink::{DeviceSink, LogSink, OutputSink};

pub use crate::tracker::Pose;
