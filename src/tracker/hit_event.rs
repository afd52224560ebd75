use std::fmt;

/// What changed in a round on a single frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitEvent {
    /// No cup was hit this frame
    NoChange,
    /// Exactly one cup was hit this frame
    SingleHit(u32),
    /// Several cups were hit this frame, in ascending identity order
    MultiHit(Vec<u32>),
}

impl HitEvent {
    /// Classify the identities hit on one frame.
    pub fn from_hits(mut hits: Vec<u32>) -> Self {
        hits.sort_unstable();
        match hits.len() {
            0 => HitEvent::NoChange,
            1 => HitEvent::SingleHit(hits[0]),
            _ => HitEvent::MultiHit(hits),
        }
    }

    /// Whether any cup was hit this frame.
    pub fn is_hit(&self) -> bool {
        !matches!(self, HitEvent::NoChange)
    }

    /// Every identity hit this frame.
    pub fn identities(&self) -> Vec<u32> {
        match self {
            HitEvent::NoChange => Vec::new(),
            HitEvent::SingleHit(id) => vec![*id],
            HitEvent::MultiHit(ids) => ids.clone(),
        }
    }
}

impl fmt::Display for HitEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HitEvent::NoChange => write!(f, "no change"),
            HitEvent::SingleHit(id) => write!(f, "single hit: target {}", id),
            HitEvent::MultiHit(ids) => {
                let list = ids
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "multi hit: targets {}", list)
            }
        }
    }
}
