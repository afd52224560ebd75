//! Traits for the detection oracle and the frame source feeding it.

use crate::tracker::Detection;

/// Trait for fiducial marker detection backends.
///
/// Implement this trait to connect any marker detector to the round tracker.
/// Detections carry no ordering guarantee, and markers physically present may
/// be missed on some frames.
///
/// # Example
///
/// ```ignore
/// use cuptrack_rs::{DetectionSource, Detection};
///
/// struct MyTagDetector {
///     // Your detector here
/// }
///
/// impl DetectionSource for MyTagDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, gray: &[u8], width: u32, height: u32) -> Result<Vec<Detection>, Self::Error> {
///         // Run marker extraction and return detections
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Extract markers from a grayscale image.
    ///
    /// # Arguments
    /// * `gray` - Row-major 8-bit grayscale pixels
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn detect(
        &mut self,
        gray: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error>;
}

/// Helper trait for converting detector-specific outputs to `Detection`.
pub trait IntoDetections {
    /// Convert the output into a vector of detections.
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}

impl IntoDetections for Vec<u32> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter().map(Detection::new).collect()
    }
}

/// A grayscale camera frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrayFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl GrayFrame {
    /// Wrap row-major grayscale pixels.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    /// An empty frame marks the end of the video feed.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() || self.width == 0 || self.height == 0
    }
}

/// Source of grayscale frames, such as a camera already converted to gray.
pub trait FrameSource {
    /// Next frame, or `None` once the feed is closed.
    fn next_frame(&mut self) -> Option<GrayFrame>;
}

impl<I: Iterator<Item = GrayFrame>> FrameSource for I {
    fn next_frame(&mut self) -> Option<GrayFrame> {
        self.next()
    }
}
