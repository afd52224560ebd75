//! Output sinks for overlays, logs and external devices.

use std::io::Write;

use log::{debug, info, warn};

use crate::error::TrackerError;
use crate::tracker::{Detection, HitEvent};

/// Receives per-frame observations and game events.
///
/// Sinks are side-effect only; nothing they do feeds back into the tracker.
pub trait OutputSink {
    /// All detections of the current frame.
    fn observed(&mut self, detections: &[Detection]);

    /// Cups hit on the current frame. Called at most once per frame.
    fn hit(&mut self, event: &HitEvent);

    fn round_started(&mut self, _active_count: usize) {}

    fn round_complete(&mut self) {}

    fn warning(&mut self, _warning: &TrackerError) {}
}

/// Writes everything through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl OutputSink for LogSink {
    fn observed(&mut self, detections: &[Detection]) {
        debug!("{} tags detected", detections.len());
        for det in detections {
            match &det.pose {
                Some(pose) => {
                    let (yaw, pitch, roll) = pose.yaw_pitch_roll();
                    debug!(
                        "  id {}: distance={:.3}m yaw={:.3} pitch={:.3} roll={:.3}",
                        det.id,
                        pose.distance(),
                        yaw,
                        pitch,
                        roll
                    );
                }
                None => debug!("  id {}", det.id),
            }
        }
    }

    fn hit(&mut self, event: &HitEvent) {
        info!("{}", event);
    }

    fn round_started(&mut self, active_count: usize) {
        info!("new round with {} cups", active_count);
    }

    fn round_complete(&mut self) {
        info!("game over");
    }

    fn warning(&mut self, warning: &TrackerError) {
        warn!("{}", warning);
    }
}

/// Forwards identities to a line-oriented device such as a serial port.
///
/// Each frame writes the observed identities as one comma-separated line;
/// hit events are written as `H:<ids>`. Write failures are logged and
/// otherwise ignored.
#[derive(Debug)]
pub struct DeviceSink<W: Write> {
    writer: W,
}

impl<W: Write> DeviceSink<W> {
    /// Forward identities to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, line: &str) {
        let result = writeln!(self.writer, "{}", line).and_then(|_| self.writer.flush());
        if let Err(err) = result {
            warn!("device write failed: {}", err);
        }
    }
}

fn join_ids<I: IntoIterator<Item = u32>>(ids: I) -> String {
    ids.into_iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

impl<W: Write> OutputSink for DeviceSink<W> {
    fn observed(&mut self, detections: &[Detection]) {
        let line = join_ids(detections.iter().map(|d| d.id));
        self.write_line(&line);
    }

    fn hit(&mut self, event: &HitEvent) {
        let line = format!("H:{}", join_ids(event.identities()));
        self.write_line(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_sink_lines() {
        let mut sink = DeviceSink::new(Vec::new());
        sink.observed(&[Detection::new(1), Detection::new(4)]);
        sink.hit(&HitEvent::MultiHit(vec![2, 3]));
        sink.observed(&[]);

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "1,4\nH:2,3\n\n");
    }
}
