//! Round registry and hit inference.

use crate::error::TrackerError;
use crate::tracker::cup::Cup;
use crate::tracker::hit_event::HitEvent;
use crate::tracker::observation::{DetectionFrame, is_valid_identity};

/// Largest `max_identity` a slot table may be sized for.
pub const MAX_IDENTITY_LIMIT: u32 = 1024;

/// Check that a slot table for `max_identity` can be built.
pub fn check_max_identity(max_identity: u32) -> Result<(), TrackerError> {
    if (1..=MAX_IDENTITY_LIMIT).contains(&max_identity) {
        Ok(())
    } else {
        Err(TrackerError::InvalidMaxIdentity {
            max_identity,
            limit: MAX_IDENTITY_LIMIT,
        })
    }
}

/// One play-through: a fixed slot table of cups built from a confirmed sample.
///
/// Slot `i` holds the cup with identity `i`; slot 0 is reserved and never
/// assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    slots: Vec<Cup>,
    active_count: usize,
}

impl Round {
    /// Build a round from the identities in `sample`.
    ///
    /// Identities outside `1..=max_identity` are skipped. A sample with no
    /// valid identity is rejected, as is a `max_identity` outside
    /// `1..=MAX_IDENTITY_LIMIT`.
    pub fn from_sample(sample: &DetectionFrame, max_identity: u32) -> Result<Self, TrackerError> {
        check_max_identity(max_identity)?;
        let mut slots = vec![Cup::unassigned(); max_identity as usize + 1];
        let mut active_count = 0;
        for id in sample.iter().filter(|&id| is_valid_identity(id, max_identity)) {
            slots[id as usize] = Cup::new(id);
            active_count += 1;
        }

        if active_count == 0 {
            return Err(TrackerError::EmptySampleRejected);
        }

        Ok(Self {
            slots,
            active_count,
        })
    }

    /// Advance hit inference by one frame.
    pub fn update(&mut self, frame: &DetectionFrame) -> HitEvent {
        let mut hits = Vec::new();
        for cup in self.slots.iter_mut() {
            cup.settle();
            let Some(id) = cup.identity else {
                continue;
            };
            if !frame.contains(id) && cup.mark_hit() {
                hits.push(id);
            }
        }
        HitEvent::from_hits(hits)
    }

    /// True once every cup in play has been hit.
    pub fn is_complete(&self) -> bool {
        self.hit_count() == self.active_count
    }

    /// Number of cups in play, fixed for the round.
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Number of cups hit so far.
    pub fn hit_count(&self) -> usize {
        self.cups().filter(|c| c.is_hit()).count()
    }

    /// Number of cups still in play.
    pub fn remaining(&self) -> usize {
        self.active_count - self.hit_count()
    }

    /// Highest identity the slot table can hold.
    pub fn max_identity(&self) -> u32 {
        (self.slots.len() - 1) as u32
    }

    /// Cups in play, in ascending identity order.
    pub fn cups(&self) -> impl Iterator<Item = &Cup> + '_ {
        self.slots.iter().filter(|c| c.is_assigned())
    }

    /// The in-play cup bound to `id`, if any.
    pub fn cup(&self, id: u32) -> Option<&Cup> {
        self.slots.get(id as usize).filter(|c| c.is_assigned())
    }

    /// Number of registry slots, including the reserved slot 0.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}
