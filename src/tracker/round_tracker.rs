//! Round state machine: sampling, active play and completion.

use std::ops::ControlFlow;

use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::tracker::hit_event::HitEvent;
use crate::tracker::observation::DetectionFrame;
use crate::tracker::round::{Round, check_max_identity};

/// Configuration for the RoundTracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Largest marker identity that can be bound to a cup.
    pub max_identity: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self { max_identity: 10 }
    }
}

impl TrackerConfig {
    /// Reject a `max_identity` outside `1..=MAX_IDENTITY_LIMIT`.
    pub fn validate(&self) -> Result<(), TrackerError> {
        check_max_identity(self.max_identity)
    }
}

/// Phase of the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundPhase {
    /// Waiting for a confirmed, non-empty sample
    #[default]
    Sampling,
    /// Accepting frame updates
    Active,
    /// Every cup has been hit
    Complete,
}

/// One step of a sample stream fed to [`RoundTracker::reset`].
#[derive(Debug, Clone, Default)]
pub struct Sample {
    pub frame: DetectionFrame,
    /// Operator accepted the scene on this frame
    pub confirm: bool,
}

impl Sample {
    /// A sample of `frame`, confirmed by the operator if `confirm` is set.
    pub fn new(frame: DetectionFrame, confirm: bool) -> Self {
        Self { frame, confirm }
    }
}

/// Owns the current round and drives it through its phases.
pub struct RoundTracker {
    config: TrackerConfig,
    phase: RoundPhase,
    round: Option<Round>,
    last_sample: DetectionFrame,
    frame_id: u64,
    rounds_started: u32,
}

impl RoundTracker {
    /// Create a tracker in the sampling phase.
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            phase: RoundPhase::Sampling,
            round: None,
            last_sample: DetectionFrame::new(),
            frame_id: 0,
            rounds_started: 0,
        }
    }

    /// Drop the current round and start collecting a new sample.
    pub fn begin_sampling(&mut self) {
        self.round = None;
        self.last_sample = DetectionFrame::new();
        self.phase = RoundPhase::Sampling;
        debug!("sampling for round {}", self.rounds_started + 1);
    }

    /// Abort the current round on operator request.
    pub fn request_reset(&mut self) {
        if self.phase != RoundPhase::Sampling {
            info!("round {} aborted by reset request", self.rounds_started);
        }
        self.begin_sampling();
    }

    /// Record the most recent sample. Earlier samples are overwritten.
    pub fn sample(&mut self, frame: DetectionFrame) {
        if self.phase != RoundPhase::Sampling {
            return;
        }
        trace!("sample: {} identities", frame.len());
        self.last_sample = frame;
    }

    /// Accept the most recent sample as the round definition.
    ///
    /// An empty sample is rejected and the tracker keeps sampling. While a
    /// round is already active this returns that round unchanged.
    pub fn confirm(&mut self) -> Result<&Round, TrackerError> {
        if self.phase == RoundPhase::Sampling {
            self.build_round()?;
        }
        self.round.as_ref().ok_or(TrackerError::StaleUpdateBeforeReset)
    }

    /// Pull samples until a confirmed, non-empty one defines a new round.
    ///
    /// Rejected confirmations are skipped; use [`reset_with`](Self::reset_with)
    /// to observe them.
    pub fn reset<I>(&mut self, samples: I) -> Result<&Round, TrackerError>
    where
        I: IntoIterator<Item = Sample>,
    {
        self.reset_with(samples, |_| ControlFlow::Continue(()))
    }

    /// Like [`reset`](Self::reset), reporting every rejected confirmation to
    /// `on_reject`. Returning `ControlFlow::Break` stops sampling and returns
    /// the rejection.
    pub fn reset_with<I, F>(&mut self, samples: I, mut on_reject: F) -> Result<&Round, TrackerError>
    where
        I: IntoIterator<Item = Sample>,
        F: FnMut(&TrackerError) -> ControlFlow<()>,
    {
        self.begin_sampling();
        for sample in samples {
            self.sample(sample.frame);
            if !sample.confirm {
                continue;
            }
            match self.build_round() {
                Ok(()) => break,
                Err(err @ TrackerError::EmptySampleRejected) => {
                    if on_reject(&err).is_break() {
                        return Err(err);
                    }
                }
                Err(err) => return Err(err),
            }
        }
        self.round.as_ref().ok_or(TrackerError::SampleStreamExhausted)
    }

    /// Advance hit inference by one frame.
    pub fn update(&mut self, frame: &DetectionFrame) -> Result<HitEvent, TrackerError> {
        if self.phase == RoundPhase::Sampling {
            return Err(TrackerError::StaleUpdateBeforeReset);
        }
        self.frame_id += 1;

        let round = self
            .round
            .as_mut()
            .ok_or(TrackerError::StaleUpdateBeforeReset)?;
        let event = round.update(frame);
        if event.is_hit() {
            info!(
                "frame {}: {} ({} of {} left)",
                self.frame_id,
                event,
                round.remaining(),
                round.active_count()
            );
        }

        if self.phase == RoundPhase::Active && round.is_complete() {
            self.phase = RoundPhase::Complete;
            info!("round {} complete", self.rounds_started);
        }
        Ok(event)
    }

    /// True iff every cup of the current round has been hit.
    pub fn is_complete(&self) -> bool {
        self.round.as_ref().is_some_and(Round::is_complete)
    }

    /// Current phase of the round.
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// The current round, once a sample has been confirmed.
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Most recent sample recorded while sampling.
    pub fn last_sample(&self) -> &DetectionFrame {
        &self.last_sample
    }

    /// Get a reference to the tracker configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Number of rounds built since the tracker was created.
    pub fn rounds_started(&self) -> u32 {
        self.rounds_started
    }

    fn build_round(&mut self) -> Result<(), TrackerError> {
        match Round::from_sample(&self.last_sample, self.config.max_identity) {
            Ok(round) => {
                self.rounds_started += 1;
                info!(
                    "round {} started with {} cups: {:?}",
                    self.rounds_started,
                    round.active_count(),
                    round.cups().filter_map(|c| c.identity).collect::<Vec<_>>()
                );
                self.round = Some(round);
                self.phase = RoundPhase::Active;
                Ok(())
            }
            Err(err) => {
                warn!("sample rejected: {}", err);
                Err(err)
            }
        }
    }
}

impl Default for RoundTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}
