//! Focus state machine
//!
//! Fuses eye closure, blink recovery, motion flags, and gaze deviation from
//! the calibrated baseline into one state per frame. Precedence is encoded
//! as an explicit ordered rule list evaluated first-match-wins, so each rule
//! can be tested in isolation and the priority stays auditable.
//!
//! The reward policy only needs the coarse FOCUSED / BLINKING / UNFOCUSED
//! label; the finer [`FocusReason`] is kept alongside for observability.

use crate::calibration::Baseline;
use crate::config::FocusConfig;
use crate::features::{Gaze, HeadPose};
use crate::motion::MotionStatus;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Coarse per-frame attentional state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusState {
    Focused,
    Blinking,
    Unfocused,
}

impl FocusState {
    /// Whether this state accumulates focus time for the reward.
    pub fn counts_as_focused(&self) -> bool {
        matches!(self, FocusState::Focused | FocusState::Blinking)
    }
}

/// Finer-grained reason behind the coarse state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusReason {
    /// Eyes continuously closed past the limit.
    Asleep,
    /// Eyes currently closed, within the limit.
    Blink,
    /// Within the recovery buffer after a blink.
    BlinkRecovery,
    /// Head or body moving flag set.
    Moving,
    /// Gaze within tolerance of the baseline.
    GazeHeld,
    /// Gaze off baseline but within the fail-count buffer.
    GazeBuffered,
    /// Gaze off baseline past the fail-count buffer.
    GazeLost,
}

/// Per-frame classification result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub state: FocusState,
    pub reason: FocusReason,
    /// Absolute gaze deviation from baseline (zeroed in the blink buffer).
    pub gaze_dx: f32,
    pub gaze_dy: f32,
}

/// One frame's fused inputs.
#[derive(Debug, Clone, Copy)]
pub struct ClassifierInput<'a> {
    pub now_ms: u64,
    pub eyes_open: bool,
    pub pose: &'a HeadPose,
    pub gaze: Gaze,
    pub motion: MotionStatus,
    pub baseline: &'a Baseline,
}

/// Classification rules in priority order, first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Asleep,
    Blink,
    BlinkRecovery,
    Movement,
    GazeWithinTolerance,
    GazeBuffer,
}

impl Rule {
    const PRIORITY: [Rule; 6] = [
        Rule::Asleep,
        Rule::Blink,
        Rule::BlinkRecovery,
        Rule::Movement,
        Rule::GazeWithinTolerance,
        Rule::GazeBuffer,
    ];

    fn evaluate(&self, ctx: &RuleContext) -> Option<RuleHit> {
        match self {
            Rule::Asleep if ctx.closed_over_limit => {
                Some(RuleHit::Decided(FocusState::Unfocused, FocusReason::Asleep))
            }
            Rule::Blink if !ctx.eyes_open => {
                Some(RuleHit::Decided(FocusState::Blinking, FocusReason::Blink))
            }
            Rule::BlinkRecovery if ctx.in_blink_buffer => Some(RuleHit::Decided(
                FocusState::Focused,
                FocusReason::BlinkRecovery,
            )),
            Rule::Movement if ctx.moving => {
                Some(RuleHit::Decided(FocusState::Unfocused, FocusReason::Moving))
            }
            Rule::GazeWithinTolerance if ctx.gaze_ok => {
                Some(RuleHit::Decided(FocusState::Focused, FocusReason::GazeHeld))
            }
            // Terminal rule: gaze is off baseline, outcome depends on the
            // consecutive-failure counter.
            Rule::GazeBuffer => Some(RuleHit::GazeFailure),
            _ => None,
        }
    }
}

enum RuleHit {
    Decided(FocusState, FocusReason),
    GazeFailure,
}

#[derive(Debug, Clone, Copy)]
struct RuleContext {
    eyes_open: bool,
    closed_over_limit: bool,
    in_blink_buffer: bool,
    moving: bool,
    gaze_ok: bool,
}

/// The focus decision state machine.
#[derive(Debug)]
pub struct FocusClassifier {
    config: FocusConfig,
    /// When the current continuous eye closure began.
    eye_closed_since_ms: Option<u64>,
    /// Most recent frame with closed eyes.
    last_blink_ms: Option<u64>,
    /// Consecutive off-baseline gaze frames.
    gaze_fail_count: u32,
}

impl FocusClassifier {
    pub fn new(config: FocusConfig) -> Self {
        Self {
            config,
            eye_closed_since_ms: None,
            last_blink_ms: None,
            gaze_fail_count: 0,
        }
    }

    pub fn gaze_fail_count(&self) -> u32 {
        self.gaze_fail_count
    }

    /// Classify one frame. Call only once calibrated.
    pub fn classify(&mut self, input: &ClassifierInput) -> Verdict {
        let now = input.now_ms;

        // Eye closure tracking: the closed-since mark is set on the first
        // closed frame and dropped the instant eyes reopen; every closed
        // frame refreshes the blink timestamp.
        let closed_over_limit = if input.eyes_open {
            self.eye_closed_since_ms = None;
            false
        } else {
            let since = *self.eye_closed_since_ms.get_or_insert(now);
            self.last_blink_ms = Some(now);
            now.saturating_sub(since) >= self.config.eye_closed_limit_ms
        };

        let in_blink_buffer = self
            .last_blink_ms
            .map(|t| now.saturating_sub(t) < self.config.blink_buffer_ms)
            .unwrap_or(false);

        // Dynamic horizontal tolerance: off-axis heads make the gaze
        // estimate noisier, so yaw widens the allowed x deviation.
        let threshold_x = self.config.gaze_threshold_x
            + input.pose.yaw.abs() * self.config.gaze_margin_per_yaw_degree;

        let (gaze_dx, gaze_dy) = if in_blink_buffer {
            (0.0, 0.0)
        } else {
            (
                (input.gaze.x - input.baseline.gaze_x).abs(),
                (input.gaze.y - input.baseline.gaze_y).abs(),
            )
        };
        let gaze_ok = gaze_dx < threshold_x && gaze_dy < self.config.gaze_threshold_y;

        let ctx = RuleContext {
            eyes_open: input.eyes_open,
            closed_over_limit,
            in_blink_buffer,
            moving: input.motion.any(),
            gaze_ok,
        };

        let hit = Rule::PRIORITY
            .iter()
            .find_map(|rule| rule.evaluate(&ctx))
            .unwrap_or(RuleHit::GazeFailure);

        let (state, reason) = match hit {
            RuleHit::Decided(state, reason) => {
                self.gaze_fail_count = 0;
                (state, reason)
            }
            RuleHit::GazeFailure => {
                // The counter only needs to distinguish "within the buffer"
                // from "past it"; clamp at limit + 1 so a long stretch of
                // lost gaze cannot overflow it.
                let cap = self.config.gaze_fail_limit.saturating_add(1);
                self.gaze_fail_count = self.gaze_fail_count.saturating_add(1).min(cap);
                if self.gaze_fail_count > self.config.gaze_fail_limit {
                    (FocusState::Unfocused, FocusReason::GazeLost)
                } else {
                    // Short glance: keep counting as focused for now.
                    (FocusState::Focused, FocusReason::GazeBuffered)
                }
            }
        };

        debug!(
            ?state,
            ?reason,
            gaze_dx,
            gaze_dy,
            fail_count = self.gaze_fail_count,
            "frame classified"
        );

        Verdict {
            state,
            reason,
            gaze_dx,
            gaze_dy,
        }
    }
}
