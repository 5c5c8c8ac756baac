//! Exponential moving-average smoothing
//!
//! One [`Ema`] instance per feature stream, each with its own alpha. The
//! first sample passes through unchanged; afterwards
//! `smoothed = alpha * current + (1 - alpha) * previous`.

use crate::features::{Gaze, HeadPose};
use landmarks::Point2;

/// Values that can be linearly blended by the smoother.
pub trait Blend: Copy {
    fn blend(alpha: f32, current: Self, previous: Self) -> Self;
}

impl Blend for f32 {
    fn blend(alpha: f32, current: Self, previous: Self) -> Self {
        alpha * current + (1.0 - alpha) * previous
    }
}

impl Blend for Point2 {
    fn blend(alpha: f32, current: Self, previous: Self) -> Self {
        Point2 {
            x: f32::blend(alpha, current.x, previous.x),
            y: f32::blend(alpha, current.y, previous.y),
        }
    }
}

impl Blend for HeadPose {
    fn blend(alpha: f32, current: Self, previous: Self) -> Self {
        HeadPose {
            yaw: f32::blend(alpha, current.yaw, previous.yaw),
            pitch: f32::blend(alpha, current.pitch, previous.pitch),
            roll: f32::blend(alpha, current.roll, previous.roll),
        }
    }
}

impl Blend for Gaze {
    fn blend(alpha: f32, current: Self, previous: Self) -> Self {
        Gaze {
            x: f32::blend(alpha, current.x, previous.x),
            y: f32::blend(alpha, current.y, previous.y),
        }
    }
}

/// Exponential moving average with first-sample passthrough.
#[derive(Debug, Clone)]
pub struct Ema<T> {
    alpha: f32,
    state: Option<T>,
}

impl<T: Blend> Ema<T> {
    pub fn new(alpha: f32) -> Self {
        Self { alpha, state: None }
    }

    /// Feed one sample, returning the smoothed value.
    pub fn update(&mut self, current: T) -> T {
        let smoothed = match self.state {
            Some(previous) => T::blend(self.alpha, current, previous),
            None => current,
        };
        self.state = Some(smoothed);
        smoothed
    }

    /// Last smoothed value, if any sample has been seen.
    pub fn value(&self) -> Option<T> {
        self.state
    }
}

/// Compensate apparent gaze shift caused by head rotation.
///
/// Off-axis heads drag the measured iris ratio with them; a small linear
/// term in yaw/pitch re-centers it (constants are empirically tuned).
pub fn correct_gaze(
    gaze: Gaze,
    pose: &HeadPose,
    correction_yaw: f32,
    correction_pitch: f32,
) -> Gaze {
    Gaze {
        x: gaze.x + pose.yaw * correction_yaw,
        y: gaze.y + pose.pitch * correction_pitch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_sample_passes_through() {
        let mut ema = Ema::new(0.3);
        assert_eq!(ema.value(), None);
        assert_eq!(ema.update(7.5f32), 7.5);
        assert_eq!(ema.value(), Some(7.5));
    }

    #[test]
    fn test_blends_toward_new_samples() {
        let mut ema = Ema::new(0.5);
        ema.update(0.0f32);
        assert_eq!(ema.update(10.0), 5.0);
        assert_eq!(ema.update(10.0), 7.5);
    }

    #[test]
    fn test_smooths_pose_componentwise() {
        let mut ema = Ema::new(0.5);
        ema.update(HeadPose {
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
        });
        let smoothed = ema.update(HeadPose {
            yaw: 10.0,
            pitch: -4.0,
            roll: 2.0,
        });
        assert_eq!(smoothed.yaw, 5.0);
        assert_eq!(smoothed.pitch, -2.0);
        assert_eq!(smoothed.roll, 1.0);
    }

    #[test]
    fn test_gaze_correction_shifts_with_pose() {
        let gaze = Gaze { x: 0.5, y: 0.5 };
        let pose = HeadPose {
            yaw: 10.0,
            pitch: 5.0,
            roll: 0.0,
        };
        let corrected = correct_gaze(gaze, &pose, 0.012, 0.002);
        assert!((corrected.x - 0.62).abs() < 1e-6);
        assert!((corrected.y - 0.51).abs() < 1e-6);
    }

    proptest! {
        // Constant input converges to exactly that constant for any alpha
        // in (0, 1].
        #[test]
        fn prop_converges_to_constant_input(
            alpha in 0.01f32..=1.0,
            target in -100.0f32..100.0,
            start in -100.0f32..100.0,
        ) {
            let mut ema = Ema::new(alpha);
            ema.update(start);
            let mut last = start;
            for _ in 0..2000 {
                last = ema.update(target);
            }
            prop_assert!((last - target).abs() < 1e-2,
                "alpha {} start {} -> {} (target {})", alpha, start, last, target);
        }
    }
}
