//! Landmark Provider Boundary
//!
//! Types exchanged with the external landmark detector. The detector itself
//! (face mesh, body pose model, camera capture) lives outside this workspace;
//! it hands the pipeline one [`LandmarkFrame`] per video frame, or a frame
//! with no face when the subject is not visible.

mod frame;

pub use frame::{
    BodyLandmarks, EyeLandmarks, FaceLandmarks, LandmarkFrame, Point2,
};

/// Source of landmark frames, implemented by the capture layer.
///
/// Blocking is allowed: the pipeline is frame-synchronous and simply waits
/// for the next frame. `None` signals end of stream.
pub trait LandmarkSource {
    fn next_frame(&mut self) -> Option<LandmarkFrame>;
}
