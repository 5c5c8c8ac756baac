//! Per-frame feature extraction from raw landmarks
//!
//! Pure geometry over one frame's landmark coordinates; no history is kept
//! here. Head pose comes from landmark ratios, not a true 3-D solve, so yaw
//! and pitch are angle-like units rather than exact degrees.

use landmarks::{BodyLandmarks, EyeLandmarks, FaceLandmarks, Point2};
use serde::{Deserialize, Serialize};

/// Scale mapping normalized pose ratios to angle-like units.
const POSE_RATIO_SCALE: f32 = 50.0;

/// Head orientation estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HeadPose {
    /// Left-right rotation.
    pub yaw: f32,
    /// Up-down tilt.
    pub pitch: f32,
    /// Side tilt, in degrees.
    pub roll: f32,
}

/// Iris position normalized within the eye box, averaged over both eyes.
///
/// Roughly [0,1] per axis with 0.5 meaning centered.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Gaze {
    pub x: f32,
    pub y: f32,
}

/// Derive head pose from face geometry.
///
/// Yaw: nose-tip horizontal offset from the inter-eye midpoint, normalized by
/// eye width. Pitch: mouth-midpoint vertical offset from the eye center,
/// normalized by chin-to-forehead height. Roll: angle of the outer-corner
/// line. All ratios are computed in pixel space.
pub fn head_pose(face: &FaceLandmarks, width: u32, height: u32) -> HeadPose {
    let nose = face.nose_tip.to_pixels(width, height);
    let chin = face.chin.to_pixels(width, height);
    let forehead = face.forehead.to_pixels(width, height);
    let left_eye = face.left_eye_outer().to_pixels(width, height);
    let right_eye = face.right_eye_outer().to_pixels(width, height);
    let mouth_left = face.mouth_left.to_pixels(width, height);
    let mouth_right = face.mouth_right.to_pixels(width, height);

    let eye_center = left_eye.midpoint(right_eye);
    let eye_width = left_eye.distance(right_eye);
    let yaw = if eye_width > 0.0 {
        (nose.x - eye_center.x) / eye_width * POSE_RATIO_SCALE
    } else {
        0.0
    };

    let face_height = chin.distance(forehead);
    let mouth_center = mouth_left.midpoint(mouth_right);
    let pitch = if face_height > 0.0 {
        (mouth_center.y - eye_center.y) / face_height * POSE_RATIO_SCALE
    } else {
        0.0
    };

    let roll = (right_eye.y - left_eye.y)
        .atan2(right_eye.x - left_eye.x)
        .to_degrees();

    HeadPose { yaw, pitch, roll }
}

/// Eye aspect ratio: eyelid vertical gaps over horizontal eye width.
///
/// Returns 0.0 for a zero-width eye, which reads as closed.
pub fn eye_aspect_ratio(eye: &EyeLandmarks) -> f32 {
    let vertical1 = (eye.lid_top.y - eye.lid_bottom.y).abs();
    let vertical2 = (eye.lid_top_inner.y - eye.lid_bottom_inner.y).abs();
    let horizontal = (eye.corner_left.x - eye.corner_right.x).abs();
    if horizontal <= 0.0 {
        return 0.0;
    }
    (vertical1 + vertical2) / (2.0 * horizontal)
}

/// Whether both eyes read as open, plus the two-eye average EAR.
pub fn eyes_open(face: &FaceLandmarks, threshold: f32) -> (bool, f32) {
    let left = eye_aspect_ratio(&face.left_eye);
    let right = eye_aspect_ratio(&face.right_eye);
    let average = (left + right) / 2.0;
    (average > threshold, average)
}

fn eye_gaze_ratio(eye: &EyeLandmarks) -> (f32, f32) {
    let width = eye.width();
    let ratio_x = if width > 0.0 {
        (eye.iris.x - eye.corner_left.x).abs() / width
    } else {
        // Degenerate eye box, assume centered rather than divide by zero.
        0.5
    };

    let height = eye.height();
    let ratio_y = if height > 0.0 {
        (eye.iris.y - eye.lid_top.y).abs() / height
    } else {
        0.5
    };

    (ratio_x, ratio_y)
}

/// Iris position within the eye box, averaged across both eyes.
pub fn gaze_ratio(face: &FaceLandmarks) -> Gaze {
    let (left_x, left_y) = eye_gaze_ratio(&face.left_eye);
    let (right_x, right_y) = eye_gaze_ratio(&face.right_eye);
    Gaze {
        x: (left_x + right_x) / 2.0,
        y: (left_y + right_y) / 2.0,
    }
}

/// Midpoint between the shoulders, if body landmarks are present.
pub fn body_center(body: Option<&BodyLandmarks>) -> Option<Point2> {
    body.map(|b| b.left_shoulder.midpoint(b.right_shoulder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{face_gazing_at, neutral_face};
    use landmarks::Point2;

    const W: u32 = 640;
    const H: u32 = 480;

    #[test]
    fn test_neutral_face_pose_is_level() {
        let pose = head_pose(&neutral_face(), W, H);
        assert!(pose.yaw.abs() < 1e-3, "yaw {}", pose.yaw);
        assert!(pose.roll.abs() < 1e-3, "roll {}", pose.roll);
    }

    #[test]
    fn test_nose_offset_turns_into_yaw() {
        let mut face = neutral_face();
        // Nose shifted toward the image-right eye.
        face.nose_tip.x += 0.05;
        let pose = head_pose(&face, W, H);
        assert!(pose.yaw > 5.0, "yaw {}", pose.yaw);
    }

    #[test]
    fn test_tilted_eye_line_gives_roll() {
        let mut face = neutral_face();
        face.right_eye.corner_right.y += 0.05;
        let pose = head_pose(&face, W, H);
        assert!(pose.roll > 5.0, "roll {}", pose.roll);
    }

    #[test]
    fn test_open_eyes_have_high_ear() {
        let face = neutral_face();
        let (open, ear) = eyes_open(&face, 0.15);
        assert!(open, "EAR {}", ear);
    }

    #[test]
    fn test_closed_lids_read_closed() {
        let mut face = neutral_face();
        for eye in [&mut face.left_eye, &mut face.right_eye] {
            eye.lid_top.y = eye.lid_bottom.y;
            eye.lid_top_inner.y = eye.lid_bottom_inner.y;
        }
        let (open, ear) = eyes_open(&face, 0.15);
        assert!(!open);
        assert!(ear.abs() < 1e-6);
    }

    #[test]
    fn test_centered_iris_gives_half_ratio() {
        let gaze = gaze_ratio(&neutral_face());
        assert!((gaze.x - 0.5).abs() < 1e-3, "gaze x {}", gaze.x);
        assert!((gaze.y - 0.5).abs() < 1e-3, "gaze y {}", gaze.y);
    }

    #[test]
    fn test_gaze_tracks_iris_offset() {
        let face = face_gazing_at(0.8, 0.5);
        let gaze = gaze_ratio(&face);
        assert!((gaze.x - 0.8).abs() < 1e-3, "gaze x {}", gaze.x);
    }

    #[test]
    fn test_degenerate_eye_box_falls_back_to_center() {
        let mut face = neutral_face();
        for eye in [&mut face.left_eye, &mut face.right_eye] {
            eye.corner_right.x = eye.corner_left.x;
            eye.lid_bottom.y = eye.lid_top.y;
        }
        let gaze = gaze_ratio(&face);
        assert_eq!(gaze.x, 0.5);
        assert_eq!(gaze.y, 0.5);
    }

    #[test]
    fn test_body_center_is_shoulder_midpoint() {
        let body = landmarks::BodyLandmarks {
            left_shoulder: Point2::new(0.3, 0.7),
            right_shoulder: Point2::new(0.7, 0.8),
        };
        let center = body_center(Some(&body)).unwrap();
        assert!((center.x - 0.5).abs() < 1e-6);
        assert!((center.y - 0.75).abs() < 1e-6);

        assert!(body_center(None).is_none());
    }
}
