//! Landmark frame types

use serde::{Deserialize, Serialize};

/// A 2-D point in normalized image coordinates ([0,1] on both axes).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Midpoint between two points.
    pub fn midpoint(self, other: Point2) -> Point2 {
        Point2 {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Convert to pixel coordinates for a frame of the given size.
    pub fn to_pixels(self, width: u32, height: u32) -> Point2 {
        Point2 {
            x: self.x * width as f32,
            y: self.y * height as f32,
        }
    }
}

/// Landmarks of a single eye.
///
/// Corners are in image order (`corner_left` has the smaller x), so for the
/// subject's left eye `corner_left` is the outer corner and for the right eye
/// it is the inner one. Two lid point pairs give the vertical gaps used for
/// the eye aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EyeLandmarks {
    pub corner_left: Point2,
    pub corner_right: Point2,
    pub lid_top: Point2,
    pub lid_bottom: Point2,
    pub lid_top_inner: Point2,
    pub lid_bottom_inner: Point2,
    pub iris: Point2,
}

impl EyeLandmarks {
    /// Horizontal eye width (corner to corner).
    pub fn width(&self) -> f32 {
        (self.corner_right.x - self.corner_left.x).abs()
    }

    /// Vertical eye height (outer lid pair).
    pub fn height(&self) -> f32 {
        (self.lid_bottom.y - self.lid_top.y).abs()
    }
}

/// Named face landmarks required by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FaceLandmarks {
    pub nose_tip: Point2,
    pub chin: Point2,
    pub forehead: Point2,
    pub left_eye: EyeLandmarks,
    pub right_eye: EyeLandmarks,
    pub mouth_left: Point2,
    pub mouth_right: Point2,
}

impl FaceLandmarks {
    /// Outer corner of the left eye (image-left extreme of the eye line).
    pub fn left_eye_outer(&self) -> Point2 {
        self.left_eye.corner_left
    }

    /// Outer corner of the right eye (image-right extreme of the eye line).
    pub fn right_eye_outer(&self) -> Point2 {
        self.right_eye.corner_right
    }
}

/// Body landmarks required by the pipeline (upper torso only).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyLandmarks {
    pub left_shoulder: Point2,
    pub right_shoulder: Point2,
}

/// One frame of landmark estimates for exactly one subject.
///
/// `face: None` means no subject was detected this frame and no state update
/// happens downstream. `body: None` only degrades body motion checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    pub face: Option<FaceLandmarks>,
    pub body: Option<BodyLandmarks>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Monotonic capture timestamp (milliseconds).
    pub timestamp_ms: u64,
}

impl LandmarkFrame {
    pub fn new(
        face: Option<FaceLandmarks>,
        body: Option<BodyLandmarks>,
        width: u32,
        height: u32,
        timestamp_ms: u64,
    ) -> Self {
        Self {
            face,
            body,
            width,
            height,
            timestamp_ms,
        }
    }

    /// Frame with no detections, used by capture layers on detector misses.
    pub fn empty(width: u32, height: u32, timestamp_ms: u64) -> Self {
        Self::new(None, None, width, height, timestamp_ms)
    }
}
