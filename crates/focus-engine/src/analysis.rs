//! Per-frame analysis snapshot

use serde::{Deserialize, Serialize};

use crate::classifier::{FocusReason, FocusState};
use crate::features::{Gaze, HeadPose};
use crate::motion::MotionStatus;

/// Read-only snapshot of one processed frame, for the UI/render collaborator.
///
/// Polling suffices; the pipeline pushes no events.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameAnalysis {
    /// Whether a face was detected this frame.
    pub face_detected: bool,

    /// Whether the baseline is still being collected.
    pub calibrating: bool,

    /// Coarse focus state, absent while calibrating or with no face.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<FocusState>,

    /// Finer reason behind the state, for observability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FocusReason>,

    /// Rewards earned so far this run.
    pub reward_count: u64,

    /// Progress toward the next reward tick (0..1).
    pub reward_progress: f32,

    /// Whether this frame earned a reward.
    pub rewarded: bool,

    /// Smoothed head pose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_pose: Option<HeadPose>,

    /// Smoothed, head-pose-corrected gaze ratio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gaze: Option<Gaze>,

    /// Two-eye average eye aspect ratio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye_aspect_ratio: Option<f32>,

    /// Debounced moving flags.
    pub motion: MotionStatus,
}

impl FrameAnalysis {
    /// Whether this frame counts toward the reward.
    pub fn is_focused(&self) -> bool {
        self.state
            .map(|s| s.counts_as_focused())
            .unwrap_or(false)
    }

    /// Display label matching the overlay the UI draws.
    pub fn label(&self) -> &'static str {
        if !self.face_detected {
            return "NO SUBJECT";
        }
        if self.calibrating {
            return "CALIBRATING";
        }
        match self.state {
            Some(FocusState::Focused) => "FOCUSED",
            Some(FocusState::Blinking) => "BLINKING",
            Some(FocusState::Unfocused) => "UNFOCUSED",
            None => "CALIBRATING",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let mut analysis = FrameAnalysis::default();
        assert_eq!(analysis.label(), "NO SUBJECT");

        analysis.face_detected = true;
        analysis.calibrating = true;
        assert_eq!(analysis.label(), "CALIBRATING");

        analysis.calibrating = false;
        analysis.state = Some(FocusState::Blinking);
        assert_eq!(analysis.label(), "BLINKING");
        assert!(analysis.is_focused());

        analysis.state = Some(FocusState::Unfocused);
        assert_eq!(analysis.label(), "UNFOCUSED");
        assert!(!analysis.is_focused());
    }

    #[test]
    fn test_serializes_without_absent_fields() {
        let analysis = FrameAnalysis::default();
        let json = serde_json::to_string(&analysis).unwrap();
        assert!(!json.contains("head_pose"));
        assert!(json.contains("face_detected"));
    }
}
