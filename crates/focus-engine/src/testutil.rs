//! Synthetic landmark fixtures for tests

use landmarks::{BodyLandmarks, EyeLandmarks, FaceLandmarks, LandmarkFrame, Point2};

pub const FRAME_W: u32 = 640;
pub const FRAME_H: u32 = 480;

fn eye_at(corner_left_x: f32) -> EyeLandmarks {
    let y = 0.40;
    let center_x = corner_left_x + 0.04;
    EyeLandmarks {
        corner_left: Point2::new(corner_left_x, y),
        corner_right: Point2::new(corner_left_x + 0.08, y),
        lid_top: Point2::new(center_x, y - 0.01),
        lid_bottom: Point2::new(center_x, y + 0.01),
        lid_top_inner: Point2::new(center_x + 0.01, y - 0.01),
        lid_bottom_inner: Point2::new(center_x + 0.01, y + 0.01),
        iris: Point2::new(center_x, y),
    }
}

/// A level, forward-looking face: yaw 0, roll 0, gaze ratio (0.5, 0.5),
/// eyes open (EAR 0.25).
pub fn neutral_face() -> FaceLandmarks {
    FaceLandmarks {
        nose_tip: Point2::new(0.50, 0.50),
        chin: Point2::new(0.50, 0.75),
        forehead: Point2::new(0.50, 0.25),
        left_eye: eye_at(0.32),
        right_eye: eye_at(0.60),
        mouth_left: Point2::new(0.45, 0.62),
        mouth_right: Point2::new(0.55, 0.62),
    }
}

/// Neutral face with the iris moved to the given gaze ratio on both eyes.
pub fn face_gazing_at(ratio_x: f32, ratio_y: f32) -> FaceLandmarks {
    let mut face = neutral_face();
    for eye in [&mut face.left_eye, &mut face.right_eye] {
        eye.iris.x = eye.corner_left.x + ratio_x * eye.width();
        eye.iris.y = eye.lid_top.y + ratio_y * eye.height();
    }
    face
}

/// Neutral face with both eyes shut (EAR 0).
pub fn closed_eyes_face() -> FaceLandmarks {
    let mut face = neutral_face();
    for eye in [&mut face.left_eye, &mut face.right_eye] {
        eye.lid_top.y = eye.lid_bottom.y;
        eye.lid_top_inner.y = eye.lid_bottom_inner.y;
    }
    face
}

/// Shoulders centered at (0.5, 0.75).
pub fn steady_body() -> BodyLandmarks {
    BodyLandmarks {
        left_shoulder: Point2::new(0.35, 0.75),
        right_shoulder: Point2::new(0.65, 0.75),
    }
}

pub fn frame_with(
    face: Option<FaceLandmarks>,
    body: Option<BodyLandmarks>,
    timestamp_ms: u64,
) -> LandmarkFrame {
    LandmarkFrame::new(face, body, FRAME_W, FRAME_H, timestamp_ms)
}

/// Neutral face and steady body, the canonical "focused" frame.
pub fn focused_frame(timestamp_ms: u64) -> LandmarkFrame {
    frame_with(Some(neutral_face()), Some(steady_body()), timestamp_ms)
}
