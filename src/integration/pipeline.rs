//! GamePipeline for driving detection, round tracking and output per frame.

use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{ControlEvent, ControlSource, DetectionSource, FrameSource, OutputSink};
use crate::error::{ConfigError, PipelineError, TrackerError};
use crate::tracker::{DetectionFrame, HitEvent, RoundPhase, RoundTracker, TrackerConfig};

/// Configuration for the game loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub tracker: TrackerConfig,
    /// Pause after a completed round before sampling the next one.
    pub cooldown_ms: u64,
    /// Log detector wall time for every frame.
    pub log_timing: bool,
    /// Forward out-of-range identities to the sink as warnings.
    pub report_unknown: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            cooldown_ms: 3000,
            log_timing: false,
            report_unknown: true,
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the tracker limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tracker.validate()?;
        Ok(())
    }

    /// Pause between a completed round and the next sampling phase.
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

/// What a single frame did to the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Still waiting for a confirmed sample
    Sampling,
    /// Confirmation arrived with no identities in view
    SampleRejected,
    /// A round started with this many cups
    RoundStarted(usize),
    /// Round active, nothing hit
    NoChange,
    /// Round active, cups hit this frame
    Hit(HitEvent),
    /// The final hit of the round; sampling restarts after the cooldown
    RoundComplete(HitEvent),
    /// Operator asked to stop
    Quit,
}

/// Totals for one [`GamePipeline::run`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub rounds_started: u32,
    pub rounds_completed: u32,
    pub hit_events: Vec<HitEvent>,
    /// The loop stopped on a quit event rather than the end of the feed
    pub quit: bool,
}

/// Combines a marker detector, the round tracker and an output sink.
pub struct GamePipeline<D: DetectionSource, S: OutputSink> {
    detector: D,
    sink: S,
    tracker: RoundTracker,
    config: PipelineConfig,
}

impl<D: DetectionSource, S: OutputSink> GamePipeline<D, S> {
    /// Create a pipeline from a detector, a sink and a configuration.
    pub fn new(detector: D, sink: S, config: PipelineConfig) -> Self {
        Self {
            detector,
            sink,
            tracker: RoundTracker::new(config.tracker.clone()),
            config,
        }
    }

    /// Create a pipeline with the default configuration.
    pub fn with_default_config(detector: D, sink: S) -> Self {
        Self::new(detector, sink, PipelineConfig::default())
    }

    /// Process a single frame together with the control event read for it.
    pub fn process_frame(
        &mut self,
        gray: &[u8],
        width: u32,
        height: u32,
        control: Option<ControlEvent>,
    ) -> Result<StepOutcome, PipelineError<D::Error>> {
        if control == Some(ControlEvent::Quit) {
            info!("quit requested");
            return Ok(StepOutcome::Quit);
        }

        let started = Instant::now();
        let detections = self
            .detector
            .detect(gray, width, height)
            .map_err(PipelineError::Detection)?;
        if self.config.log_timing {
            debug!(
                "extracted {} tags in {:.2} ms",
                detections.len(),
                started.elapsed().as_secs_f64() * 1000.0
            );
        }

        self.sink.observed(&detections);
        let frame = DetectionFrame::from_detections(&detections);
        if self.config.report_unknown {
            let max_identity = self.config.tracker.max_identity;
            for identity in frame.unknown_ids(max_identity) {
                self.sink.warning(&TrackerError::UnknownIdentityObserved {
                    identity,
                    max_identity,
                });
            }
        }

        if control == Some(ControlEvent::ResetRequest) {
            self.tracker.request_reset();
        }

        match self.tracker.phase() {
            RoundPhase::Sampling => self.sample(frame, control == Some(ControlEvent::Confirm)),
            RoundPhase::Active => self.update(&frame),
            RoundPhase::Complete => {
                self.tracker.begin_sampling();
                Ok(StepOutcome::Sampling)
            }
        }
    }

    /// Run until the feed ends or a quit event arrives.
    pub fn run<F, C>(
        &mut self,
        frames: &mut F,
        controls: &mut C,
    ) -> Result<RunSummary, PipelineError<D::Error>>
    where
        F: FrameSource,
        C: ControlSource,
    {
        let mut summary = RunSummary::default();
        while let Some(frame) = frames.next_frame() {
            if frame.is_empty() {
                break;
            }
            summary.frames += 1;

            let control = controls.poll();
            match self.process_frame(&frame.data, frame.width, frame.height, control)? {
                StepOutcome::Quit => {
                    summary.quit = true;
                    break;
                }
                StepOutcome::RoundStarted(_) => summary.rounds_started += 1,
                StepOutcome::Hit(event) => summary.hit_events.push(event),
                StepOutcome::RoundComplete(event) => {
                    summary.hit_events.push(event);
                    summary.rounds_completed += 1;
                }
                StepOutcome::Sampling | StepOutcome::SampleRejected | StepOutcome::NoChange => {}
            }
        }
        debug!("game loop stopped after {} frames", summary.frames);
        Ok(summary)
    }

    fn sample(
        &mut self,
        frame: DetectionFrame,
        confirm: bool,
    ) -> Result<StepOutcome, PipelineError<D::Error>> {
        self.tracker.sample(frame);
        if !confirm {
            return Ok(StepOutcome::Sampling);
        }

        match self.tracker.confirm() {
            Ok(round) => {
                let active_count = round.active_count();
                self.sink.round_started(active_count);
                Ok(StepOutcome::RoundStarted(active_count))
            }
            Err(err @ TrackerError::EmptySampleRejected) => {
                self.sink.warning(&err);
                Ok(StepOutcome::SampleRejected)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update(&mut self, frame: &DetectionFrame) -> Result<StepOutcome, PipelineError<D::Error>> {
        let event = self.tracker.update(frame)?;
        if event.is_hit() {
            self.sink.hit(&event);
        }

        if self.tracker.phase() == RoundPhase::Complete {
            self.sink.round_complete();
            let cooldown = self.config.cooldown();
            if !cooldown.is_zero() {
                debug!("cooling down for {:?}", cooldown);
                thread::sleep(cooldown);
            }
            self.tracker.begin_sampling();
            return Ok(StepOutcome::RoundComplete(event));
        }

        if event.is_hit() {
            Ok(StepOutcome::Hit(event))
        } else {
            Ok(StepOutcome::NoChange)
        }
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the output sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get a mutable reference to the output sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Get a reference to the underlying round tracker.
    pub fn tracker(&self) -> &RoundTracker {
        &self.tracker
    }

    /// Get a mutable reference to the underlying round tracker.
    pub fn tracker_mut(&mut self) -> &mut RoundTracker {
        &mut self.tracker
    }

    /// Get a reference to the pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
