//! Per-frame observation types consumed by the tracker.

use std::collections::BTreeSet;

use crate::tracker::pose::Pose;

/// One marker detection reported by the detection oracle.
///
/// Only `id` matters to game logic; the remaining fields are auxiliary data
/// carried through for overlays and device output.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Marker identity
    pub id: u32,
    /// Marker center in image pixels, if reported
    pub center: Option<[f32; 2]>,
    /// Detector confidence, if reported
    pub confidence: Option<f32>,
    /// Marker pose relative to the camera, if estimated
    pub pose: Option<Pose>,
}

impl Detection {
    /// A detection carrying only the marker identity.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            center: None,
            confidence: None,
            pose: None,
        }
    }
}

/// The set of identities observed in one camera frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionFrame {
    ids: BTreeSet<u32>,
}

impl DetectionFrame {
    /// An empty frame: nothing in view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame from raw identities; duplicates collapse.
    pub fn from_ids<I: IntoIterator<Item = u32>>(ids: I) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Build a frame from the identities of `detections`.
    pub fn from_detections(detections: &[Detection]) -> Self {
        Self::from_ids(detections.iter().map(|d| d.id))
    }

    /// Whether `id` was observed this frame.
    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    /// Number of distinct identities observed.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no identity was observed.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Observed identities in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.ids.iter().copied()
    }

    /// Identities outside `1..=max_identity`.
    pub fn unknown_ids(&self, max_identity: u32) -> Vec<u32> {
        self.iter()
            .filter(|&id| !is_valid_identity(id, max_identity))
            .collect()
    }
}

impl FromIterator<u32> for DetectionFrame {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self::from_ids(iter)
    }
}

/// Slot 0 is reserved, so valid identities start at 1.
pub fn is_valid_identity(id: u32, max_identity: u32) -> bool {
    (1..=max_identity).contains(&id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_deduplicates_ids() {
        let dets = vec![Detection::new(3), Detection::new(1), Detection::new(3)];
        let frame = DetectionFrame::from_detections(&dets);
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.iter().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_unknown_ids() {
        let frame = DetectionFrame::from_ids([0, 4, 10, 11, 42]);
        assert_eq!(frame.unknown_ids(10), vec![0, 11, 42]);
    }
}
