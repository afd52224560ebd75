use cuptrack_rs::integration::{
    DeviceSink, GrayFrame, LogSink, ScriptedControl, StepOutcome,
};
use cuptrack_rs::logger::init_with_level;
use cuptrack_rs::{
    ControlEvent, Detection, DetectionFrame, DetectionSource, GamePipeline, HitEvent,
    PipelineConfig, RoundPhase, RoundTracker, Sample, TrackerError,
};

fn frame(ids: &[u32]) -> DetectionFrame {
    DetectionFrame::from_ids(ids.iter().copied())
}

fn started(ids: &[u32]) -> RoundTracker {
    let mut tracker = RoundTracker::default();
    tracker.reset(vec![Sample::new(frame(ids), true)]).unwrap();
    tracker
}

#[test]
fn test_round_lifecycle() {
    let mut tracker = RoundTracker::default();
    assert_eq!(tracker.phase(), RoundPhase::Sampling);

    // Scene still being arranged, operator confirms too early
    tracker.sample(frame(&[]));
    assert_eq!(
        tracker.confirm().unwrap_err(),
        TrackerError::EmptySampleRejected
    );
    assert!(tracker.round().is_none());

    tracker.sample(frame(&[1, 2, 3, 4]));
    assert_eq!(tracker.confirm().unwrap().active_count(), 4);
    assert!(!tracker.is_complete());

    // Detector misses nothing, no change
    assert_eq!(tracker.update(&frame(&[1, 2, 3, 4])).unwrap(), HitEvent::NoChange);
    assert_eq!(tracker.update(&frame(&[1, 3, 4])).unwrap(), HitEvent::SingleHit(2));
    assert_eq!(tracker.update(&frame(&[1, 3, 4])).unwrap(), HitEvent::NoChange);
    assert_eq!(
        tracker.update(&frame(&[1])).unwrap(),
        HitEvent::MultiHit(vec![3, 4])
    );
    assert!(!tracker.is_complete());
    assert_eq!(tracker.update(&frame(&[])).unwrap(), HitEvent::SingleHit(1));
    assert!(tracker.is_complete());
    assert_eq!(tracker.phase(), RoundPhase::Complete);
}

#[test]
fn test_hit_is_monotonic() {
    let mut tracker = started(&[1, 2, 3]);
    let frames = [vec![1, 2], vec![1, 2, 3], vec![2], vec![1, 2, 3], vec![]];
    let mut hit_counts = Vec::new();
    for ids in &frames {
        tracker.update(&frame(ids)).unwrap();
        hit_counts.push(tracker.round().unwrap().hit_count());
    }
    assert_eq!(hit_counts, vec![1, 1, 2, 2, 3]);
}

#[test]
fn test_update_idempotent() {
    let mut tracker = started(&[1, 2, 3]);
    assert_eq!(tracker.update(&frame(&[3])).unwrap(), HitEvent::MultiHit(vec![1, 2]));
    assert_eq!(tracker.update(&frame(&[3])).unwrap(), HitEvent::NoChange);
}

#[test]
fn test_multi_hit_all_missing() {
    let mut tracker = started(&[1, 2, 3]);
    assert_eq!(
        tracker.update(&frame(&[])).unwrap(),
        HitEvent::MultiHit(vec![1, 2, 3])
    );
    assert!(tracker.is_complete());
}

#[test]
fn test_reappearance_no_rollback() {
    let mut tracker = started(&[5, 6]);
    assert_eq!(tracker.update(&frame(&[6])).unwrap(), HitEvent::SingleHit(5));
    assert_eq!(tracker.update(&frame(&[5, 6])).unwrap(), HitEvent::NoChange);
    assert_eq!(tracker.update(&frame(&[6])).unwrap(), HitEvent::NoChange);
    assert!(tracker.round().unwrap().cup(5).unwrap().is_hit());
}

#[test]
fn test_unknown_identity_safety() {
    let mut tracker = started(&[1, 2]);
    let slots = tracker.round().unwrap().slot_count();
    assert_eq!(
        tracker.update(&frame(&[0, 1, 2, 11, 1000])).unwrap(),
        HitEvent::NoChange
    );
    assert_eq!(tracker.round().unwrap().slot_count(), slots);
    assert_eq!(tracker.round().unwrap().active_count(), 2);
}

#[test]
fn test_update_before_reset() {
    let mut tracker = RoundTracker::default();
    assert_eq!(
        tracker.update(&frame(&[1])).unwrap_err(),
        TrackerError::StaleUpdateBeforeReset
    );
}

struct ScriptedDetector {
    frames: std::vec::IntoIter<Vec<u32>>,
}

impl DetectionSource for ScriptedDetector {
    type Error = std::convert::Infallible;

    fn detect(
        &mut self,
        _gray: &[u8],
        _width: u32,
        _height: u32,
    ) -> Result<Vec<Detection>, Self::Error> {
        let ids = self.frames.next().unwrap_or_default();
        Ok(ids.into_iter().map(Detection::new).collect())
    }
}

#[test]
fn test_game_loop_two_rounds() {
    let _ = init_with_level(log::LevelFilter::Warn);

    let detections = vec![
        vec![1, 2],    // sampling
        vec![1, 2, 3], // confirm -> round of 3
        vec![1, 2],    // hit 3
        vec![],        // hit 1,2 -> complete
        vec![4],       // sampling
        vec![4, 5],    // reset request mid sampling
        vec![7],       // confirm -> round of 1
        vec![7],
        vec![],        // hit 7 -> complete
        vec![1],       // quit
    ];
    let detector = ScriptedDetector {
        frames: detections.into_iter(),
    };
    let mut controls = ScriptedControl::new([
        None,
        Some(ControlEvent::Confirm),
        None,
        None,
        None,
        Some(ControlEvent::ResetRequest),
        Some(ControlEvent::Confirm),
        None,
        None,
        Some(ControlEvent::Quit),
    ]);
    let mut frames = std::iter::repeat_with(|| GrayFrame::new(vec![0; 4], 2, 2)).take(20);

    let config = PipelineConfig {
        cooldown_ms: 0,
        ..PipelineConfig::default()
    };
    let mut pipeline = GamePipeline::new(detector, LogSink, config);
    let summary = pipeline.run(&mut frames, &mut controls).unwrap();

    assert!(summary.quit);
    assert_eq!(summary.frames, 10);
    assert_eq!(summary.rounds_started, 2);
    assert_eq!(summary.rounds_completed, 2);
    assert_eq!(
        summary.hit_events,
        vec![
            HitEvent::SingleHit(3),
            HitEvent::MultiHit(vec![1, 2]),
            HitEvent::SingleHit(7),
        ]
    );
}

#[test]
fn test_reset_request_aborts_active_round() {
    let detector = ScriptedDetector {
        frames: vec![vec![1, 2], vec![1], vec![3], vec![3]].into_iter(),
    };
    let config = PipelineConfig {
        cooldown_ms: 0,
        ..PipelineConfig::default()
    };
    let mut pipeline = GamePipeline::new(detector, DeviceSink::new(Vec::new()), config);

    let outcome = pipeline.process_frame(&[], 2, 2, Some(ControlEvent::Confirm));
    assert_eq!(outcome.unwrap(), StepOutcome::RoundStarted(2));
    let outcome = pipeline.process_frame(&[], 2, 2, None);
    assert_eq!(outcome.unwrap(), StepOutcome::Hit(HitEvent::SingleHit(2)));
    let outcome = pipeline.process_frame(&[], 2, 2, Some(ControlEvent::ResetRequest));
    assert_eq!(outcome.unwrap(), StepOutcome::Sampling);
    assert_eq!(pipeline.tracker().phase(), RoundPhase::Sampling);
    let outcome = pipeline.process_frame(&[], 2, 2, Some(ControlEvent::Confirm));
    assert_eq!(outcome.unwrap(), StepOutcome::RoundStarted(1));

    let written = String::from_utf8(pipeline.sink().get_ref().clone()).unwrap();
    assert_eq!(written, "1,2\n1\nH:2\n3\n3\n");
}

#[test]
fn test_run_stops_on_empty_frame() {
    let detector = ScriptedDetector {
        frames: vec![vec![1], vec![1]].into_iter(),
    };
    let mut frames = vec![
        GrayFrame::new(vec![0; 4], 2, 2),
        GrayFrame::default(),
        GrayFrame::new(vec![0; 4], 2, 2),
    ]
    .into_iter();
    let mut controls = ScriptedControl::default();
    let mut pipeline = GamePipeline::with_default_config(detector, LogSink);
    let summary = pipeline.run(&mut frames, &mut controls).unwrap();
    assert_eq!(summary.frames, 1);
    assert!(!summary.quit);
}
