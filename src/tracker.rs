mod cup;
mod cup_state;
mod hit_event;
mod observation;
mod pose;
mod round;
mod round_tracker;

pub use cup::Cup;
pub use cup_state::CupState;
pub use hit_event::HitEvent;
pub use observation::{Detection, DetectionFrame, is_valid_identity};
pub use pose::Pose;
pub use round::{MAX_IDENTITY_LIMIT, Round, check_max_identity};
pub use round_tracker::{RoundPhase, RoundTracker, Sample, TrackerConfig};
