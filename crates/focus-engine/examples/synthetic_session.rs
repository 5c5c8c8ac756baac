//! Synthetic focus session
//!
//! Drives the pipeline with a scripted landmark stream instead of a live
//! camera: calibration, a stretch of steady focus, a blink, a head shake,
//! and a wandering gaze. Prints one line per frame plus the final tally.

use focus_engine::{FocusConfig, FocusMonitor};
use landmarks::{
    BodyLandmarks, EyeLandmarks, FaceLandmarks, LandmarkFrame, LandmarkSource, Point2,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const FRAME_W: u32 = 640;
const FRAME_H: u32 = 480;
const FRAME_STEP_MS: u64 = 33;

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

fn neutral_face() -> FaceLandmarks {
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

fn blinking_face() -> FaceLandmarks {
    let mut face = neutral_face();
    for eye in [&mut face.left_eye, &mut face.right_eye] {
        eye.lid_top.y = eye.lid_bottom.y;
        eye.lid_top_inner.y = eye.lid_bottom_inner.y;
    }
    face
}

fn turned_face() -> FaceLandmarks {
    let mut face = neutral_face();
    face.nose_tip.x += 0.10;
    face
}

fn distracted_face() -> FaceLandmarks {
    let mut face = neutral_face();
    for eye in [&mut face.left_eye, &mut face.right_eye] {
        eye.iris.x = eye.corner_left.x + 0.9 * eye.width();
    }
    face
}

fn body() -> BodyLandmarks {
    BodyLandmarks {
        left_shoulder: Point2::new(0.35, 0.75),
        right_shoulder: Point2::new(0.65, 0.75),
    }
}

/// One stretch of the session with a fixed expression.
struct Phase {
    seconds: f32,
    face: fn() -> FaceLandmarks,
    label: &'static str,
}

/// Scripted capture layer: plays the phase list back as a frame stream,
/// standing in for the live camera + detector.
struct ScriptedSource {
    phases: Vec<Phase>,
    phase_idx: usize,
    frame_in_phase: u64,
    t: u64,
}

impl ScriptedSource {
    fn new(phases: Vec<Phase>) -> Self {
        Self {
            phases,
            phase_idx: 0,
            frame_in_phase: 0,
            t: 0,
        }
    }
}

impl LandmarkSource for ScriptedSource {
    fn next_frame(&mut self) -> Option<LandmarkFrame> {
        let phase = self.phases.get(self.phase_idx)?;
        if self.frame_in_phase == 0 {
            info!(phase = phase.label, "--- phase ---");
        }

        let frame = LandmarkFrame::new(
            Some((phase.face)()),
            Some(body()),
            FRAME_W,
            FRAME_H,
            self.t,
        );
        self.t += FRAME_STEP_MS;
        self.frame_in_phase += 1;

        let phase_frames = (phase.seconds * 1000.0 / FRAME_STEP_MS as f32) as u64;
        if self.frame_in_phase >= phase_frames {
            self.phase_idx += 1;
            self.frame_in_phase = 0;
        }
        Some(frame)
    }
}

fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("failed to set tracing subscriber");

    let mut monitor =
        FocusMonitor::new(FocusConfig::default()).expect("default config is valid");

    let mut source = ScriptedSource::new(vec![
        Phase { seconds: 4.0, face: neutral_face, label: "calibrating + settling in" },
        Phase { seconds: 7.0, face: neutral_face, label: "steady reading" },
        Phase { seconds: 0.3, face: blinking_face, label: "a blink" },
        Phase { seconds: 4.0, face: neutral_face, label: "back to the page" },
        Phase { seconds: 2.0, face: turned_face, label: "glancing sideways" },
        Phase { seconds: 4.0, face: neutral_face, label: "reading again" },
        Phase { seconds: 1.5, face: distracted_face, label: "gaze drifting off" },
        Phase { seconds: 3.5, face: neutral_face, label: "recovered" },
    ]);

    let mut last_label = "";
    while let Some(frame) = source.next_frame() {
        let analysis = monitor.process(&frame);
        if analysis.rewarded {
            info!(
                t_ms = frame.timestamp_ms,
                reward = analysis.reward_count,
                "reward tick"
            );
        }
        if analysis.label() != last_label {
            info!(
                t_ms = frame.timestamp_ms,
                label = analysis.label(),
                reason = ?analysis.reason,
                progress = analysis.reward_progress,
                "state change"
            );
            last_label = analysis.label();
        }
    }

    info!(total_rewards = monitor.reward(), "session complete");
}
