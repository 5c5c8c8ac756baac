//! Sliding-window motion detection with hysteresis
//!
//! Four channels are watched: head yaw, pitch, roll (scalar, per-frame
//! absolute difference) and body center (2-D, Euclidean distance, absent
//! frames skipped). A channel counts as moving when enough consecutive-pair
//! deltas within the window exceed its threshold. Each group (head, body)
//! carries an explicit hysteresis flag: once set, it clears only after a run
//! of frames with no recent movement.

use crate::config::FocusConfig;
use crate::features::HeadPose;
use landmarks::Point2;
use sample_history::History;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of the continuous-movement test over one channel's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovementTest {
    /// Enough over-threshold pairs in the window.
    pub detected: bool,
    /// Number of over-threshold pairs.
    pub count: usize,
    /// The single most recent pair was over threshold.
    pub recent: bool,
}

/// Continuous-movement test for a scalar channel.
pub fn continuous_movement(history: &History<f32>, threshold: f32, min_count: usize) -> MovementTest {
    let count = history
        .pairs()
        .filter(|(a, b)| (*b - *a).abs() > threshold)
        .count();

    let recent = history
        .latest_pair()
        .map(|(a, b)| (b - a).abs() > threshold)
        .unwrap_or(false);

    MovementTest {
        detected: count >= min_count,
        count,
        recent,
    }
}

/// Continuous-movement test for the body-center channel.
///
/// Pairs with an absent endpoint are unusable and skipped; they never count
/// as movement.
pub fn body_continuous_movement(
    history: &History<Option<Point2>>,
    threshold: f32,
    min_count: usize,
) -> MovementTest {
    let count = history
        .pairs()
        .filter_map(|(a, b)| Some(a.as_ref()?.distance(*b.as_ref()?)))
        .filter(|d| *d > threshold)
        .count();

    let recent = history
        .latest_pair()
        .and_then(|(a, b)| Some(a.as_ref()?.distance(*b.as_ref()?) > threshold))
        .unwrap_or(false);

    MovementTest {
        detected: count >= min_count,
        count,
        recent,
    }
}

/// Debounced moving flag for one channel group.
///
/// Detection sets the flag immediately; clearing requires
/// `stable_frames_to_reset` consecutive frames without recent movement.
/// Explicit per-instance state, no globals.
#[derive(Debug, Clone, Default)]
struct HysteresisFlag {
    moving: bool,
    stable_count: u32,
}

impl HysteresisFlag {
    fn update(&mut self, detected: bool, recent: bool, stable_frames_to_reset: u32) -> bool {
        if detected {
            self.moving = true;
            self.stable_count = 0;
        } else if self.moving {
            if recent {
                self.stable_count = 0;
            } else {
                self.stable_count += 1;
                if self.stable_count >= stable_frames_to_reset {
                    self.moving = false;
                    self.stable_count = 0;
                }
            }
        }
        self.moving
    }
}

/// Per-frame moving flags after hysteresis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MotionStatus {
    pub head_moving: bool,
    pub body_moving: bool,
}

impl MotionStatus {
    pub fn any(&self) -> bool {
        self.head_moving || self.body_moving
    }
}

/// Motion detector over head pose and body center histories.
#[derive(Debug)]
pub struct MotionDetector {
    yaw: History<f32>,
    pitch: History<f32>,
    roll: History<f32>,
    body: History<Option<Point2>>,
    head_flag: HysteresisFlag,
    body_flag: HysteresisFlag,
    head_threshold: f32,
    body_threshold: f32,
    min_count: usize,
    stable_frames_to_reset: u32,
}

impl MotionDetector {
    pub fn new(config: &FocusConfig) -> Self {
        let size = config.movement_history_size;
        Self {
            yaw: History::new(size),
            pitch: History::new(size),
            roll: History::new(size),
            body: History::new(size),
            head_flag: HysteresisFlag::default(),
            body_flag: HysteresisFlag::default(),
            head_threshold: config.head_movement_threshold,
            body_threshold: config.body_movement_threshold,
            min_count: config.continuous_movement_count,
            stable_frames_to_reset: config.stable_frames_to_reset,
        }
    }

    /// Push this frame's smoothed pose and body center, returning the
    /// debounced moving flags.
    pub fn update(&mut self, pose: &HeadPose, body_center: Option<Point2>) -> MotionStatus {
        self.yaw.push(pose.yaw);
        self.pitch.push(pose.pitch);
        self.roll.push(pose.roll);
        self.body.push(body_center);

        let yaw = continuous_movement(&self.yaw, self.head_threshold, self.min_count);
        let pitch = continuous_movement(&self.pitch, self.head_threshold, self.min_count);
        let roll = continuous_movement(&self.roll, self.head_threshold, self.min_count);

        let head_detected = yaw.detected || pitch.detected || roll.detected;
        let head_recent = yaw.recent || pitch.recent || roll.recent;
        let head_moving =
            self.head_flag
                .update(head_detected, head_recent, self.stable_frames_to_reset);

        let body = body_continuous_movement(&self.body, self.body_threshold, self.min_count);
        let body_moving = self
            .body_flag
            .update(body.detected, body.recent, self.stable_frames_to_reset);

        if head_detected || body.detected {
            debug!(
                yaw_count = yaw.count,
                pitch_count = pitch.count,
                roll_count = roll.count,
                body_count = body.count,
                "movement detected"
            );
        }

        MotionStatus {
            head_moving,
            body_moving,
        }
    }
}
