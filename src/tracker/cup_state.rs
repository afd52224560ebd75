/// Cup state enumeration for the per-round hit lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CupState {
    /// Cup still in play
    #[default]
    NotHit,
    /// Cup removed from play on the current frame
    HitThisFrame,
    /// Cup removed from play on an earlier frame
    Hit,
}

impl CupState {
    /// Whether the cup has been removed from play.
    pub fn is_hit(self) -> bool {
        !matches!(self, CupState::NotHit)
    }

    /// Whether the cup was removed from play on the current frame.
    pub fn is_newly_hit(self) -> bool {
        matches!(self, CupState::HitThisFrame)
    }
}
