//! Single cup record held by a round registry slot.

use crate::tracker::cup_state::CupState;

/// One trackable cup.
///
/// `identity` is `None` for registry slots with no cup assigned; such slots
/// are never in play and never report a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cup {
    /// Marker identity bound to this cup for the round
    pub identity: Option<u32>,
    /// Current hit state
    pub state: CupState,
}

impl Cup {
    /// Create an in-play cup with the given marker identity.
    pub fn new(identity: u32) -> Self {
        Self {
            identity: Some(identity),
            state: CupState::NotHit,
        }
    }

    /// An empty registry slot.
    pub fn unassigned() -> Self {
        Self::default()
    }

    /// Whether a cup is bound to this slot.
    pub fn is_assigned(&self) -> bool {
        self.identity.is_some()
    }

    /// Whether the cup has been removed from play.
    pub fn is_hit(&self) -> bool {
        self.is_assigned() && self.state.is_hit()
    }

    /// Whether the cup was removed from play on the current frame.
    pub fn is_newly_hit(&self) -> bool {
        self.is_assigned() && self.state.is_newly_hit()
    }

    /// Mark the cup hit on the current frame.
    ///
    /// Returns `true` only on the `NotHit -> HitThisFrame` transition.
    pub fn mark_hit(&mut self) -> bool {
        if !self.is_assigned() || self.state.is_hit() {
            return false;
        }
        self.state = CupState::HitThisFrame;
        true
    }

    /// Collapse `HitThisFrame` into `Hit` at the start of a new frame.
    pub fn settle(&mut self) {
        if self.state == CupState::HitThisFrame {
            self.state = CupState::Hit;
        }
    }
}
