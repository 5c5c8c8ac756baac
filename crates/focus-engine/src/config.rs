//! Focus engine configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("smoothing alpha {0} out of range (0, 1]: {1}")]
    InvalidAlpha(&'static str, f32),

    #[error("movement history size must be >= 2, got {0}")]
    HistoryTooShort(usize),

    #[error("interval {0} must be > 0 ms")]
    ZeroInterval(&'static str),

    #[error("threshold {0} must be positive, got {1}")]
    NonPositiveThreshold(&'static str, f32),
}

/// All tunable thresholds of the pipeline in one place.
///
/// Every magic number of the classifier lives here rather than scattered
/// through the decision logic; the gaze correction and dynamic-margin
/// constants are empirically tuned, not derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusConfig {
    /// Calibration window length (milliseconds).
    pub calibration_ms: u64,

    /// Allowed gaze-x deviation from baseline before the dynamic margin.
    pub gaze_threshold_x: f32,

    /// Allowed gaze-y deviation from baseline (fixed).
    pub gaze_threshold_y: f32,

    /// Extra gaze-x tolerance per degree of head yaw.
    pub gaze_margin_per_yaw_degree: f32,

    /// Gaze-x correction applied per degree of head yaw.
    pub gaze_correction_yaw: f32,

    /// Gaze-y correction applied per degree of head pitch.
    pub gaze_correction_pitch: f32,

    /// Two-eye average EAR above which eyes count as open.
    pub eye_ar_threshold: f32,

    /// Continuous eye closure beyond this counts as asleep (milliseconds).
    pub eye_closed_limit_ms: u64,

    /// Samples kept per movement channel.
    pub movement_history_size: usize,

    /// Per-frame head angle delta counting as movement (degrees).
    pub head_movement_threshold: f32,

    /// Per-frame body center delta counting as movement (normalized units).
    pub body_movement_threshold: f32,

    /// Movement pairs within the window required to flag a channel as moving.
    pub continuous_movement_count: usize,

    /// EMA alpha for head pose.
    pub smoothing_alpha_pose: f32,

    /// EMA alpha for gaze ratio.
    pub smoothing_alpha_gaze: f32,

    /// EMA alpha for body center (body tracking is noisier, damp harder).
    pub smoothing_alpha_body: f32,

    /// Consecutive still frames required to clear a moving flag.
    pub stable_frames_to_reset: u32,

    /// Grace period after a blink during which gaze checks are skipped (ms).
    pub blink_buffer_ms: u64,

    /// Consecutive off-baseline gaze frames tolerated before unfocusing.
    pub gaze_fail_limit: u32,

    /// Sustained focus needed per reward tick (milliseconds).
    pub focus_interval_ms: u64,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            calibration_ms: 3000,
            gaze_threshold_x: 0.08,
            gaze_threshold_y: 0.03,
            gaze_margin_per_yaw_degree: 0.005,
            gaze_correction_yaw: 0.012,
            gaze_correction_pitch: 0.002,
            eye_ar_threshold: 0.15,
            eye_closed_limit_ms: 20_000,
            movement_history_size: 15,
            head_movement_threshold: 3.0,
            body_movement_threshold: 0.010,
            continuous_movement_count: 5,
            smoothing_alpha_pose: 0.5,
            smoothing_alpha_gaze: 0.5,
            smoothing_alpha_body: 0.3,
            stable_frames_to_reset: 5,
            blink_buffer_ms: 1500,
            gaze_fail_limit: 3,
            focus_interval_ms: 3000,
        }
    }
}

impl FocusConfig {
    /// Strict preset: narrower gaze tolerance, shorter buffers.
    pub fn strict() -> Self {
        Self {
            gaze_threshold_x: 0.05,
            gaze_threshold_y: 0.02,
            blink_buffer_ms: 1000,
            gaze_fail_limit: 2,
            ..Default::default()
        }
    }

    /// Lenient preset: wider tolerance for restless subjects.
    pub fn lenient() -> Self {
        Self {
            gaze_threshold_x: 0.12,
            gaze_threshold_y: 0.05,
            head_movement_threshold: 5.0,
            blink_buffer_ms: 2500,
            gaze_fail_limit: 5,
            ..Default::default()
        }
    }

    /// Validate ranges that would silently break the pipeline.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, alpha) in [
            ("pose", self.smoothing_alpha_pose),
            ("gaze", self.smoothing_alpha_gaze),
            ("body", self.smoothing_alpha_body),
        ] {
            if !(alpha > 0.0 && alpha <= 1.0) {
                return Err(ConfigError::InvalidAlpha(name, alpha));
            }
        }

        if self.movement_history_size < 2 {
            return Err(ConfigError::HistoryTooShort(self.movement_history_size));
        }

        for (name, ms) in [
            ("calibration_ms", self.calibration_ms),
            ("focus_interval_ms", self.focus_interval_ms),
            ("eye_closed_limit_ms", self.eye_closed_limit_ms),
        ] {
            if ms == 0 {
                return Err(ConfigError::ZeroInterval(name));
            }
        }

        for (name, value) in [
            ("gaze_threshold_x", self.gaze_threshold_x),
            ("gaze_threshold_y", self.gaze_threshold_y),
            ("eye_ar_threshold", self.eye_ar_threshold),
            ("head_movement_threshold", self.head_movement_threshold),
            ("body_movement_threshold", self.body_movement_threshold),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveThreshold(name, value));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(FocusConfig::default().validate(), Ok(()));
        assert_eq!(FocusConfig::strict().validate(), Ok(()));
        assert_eq!(FocusConfig::lenient().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_alpha() {
        let config = FocusConfig {
            smoothing_alpha_gaze: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidAlpha("gaze", 0.0))
        );

        let config = FocusConfig {
            smoothing_alpha_body: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_short_history() {
        let config = FocusConfig {
            movement_history_size: 1,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::HistoryTooShort(1)));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let config = FocusConfig {
            focus_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroInterval("focus_interval_ms"))
        );
    }

    #[test]
    fn test_roundtrips_through_json() {
        let config = FocusConfig::strict();
        let json = serde_json::to_string(&config).unwrap();
        let back: FocusConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.gaze_threshold_x, config.gaze_threshold_x);
        assert_eq!(back.gaze_fail_limit, config.gaze_fail_limit);
    }
}
