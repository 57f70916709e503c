use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ArViewerError, Result};

/// Platform coordinate frames a pose can be expressed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceSpace {
    Viewer,
    Local,
    LocalFloor,
}

impl ReferenceSpace {
    /// Identifier used on the wire, matching the WebXR reference space type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Local => "local",
            Self::LocalFloor => "local-floor",
        }
    }
}

/// Opaque handle for a platform hit-test source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HitTestSourceId(pub u32);

/// One surface hit reported by the platform for a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTestResult {
    pub space: ReferenceSpace,
    pub pose: Mat4,
}

impl HitTestResult {
    pub fn new(space: ReferenceSpace, pose: Mat4) -> Self {
        Self { space, pose }
    }

    /// Pose of the hit in `space`, or `None` when the platform did not
    /// resolve it against that space.
    pub fn resolved_pose(&self, space: ReferenceSpace) -> Option<Mat4> {
        (self.space == space).then_some(self.pose)
    }
}

/// Hit-test results a frame carries for one source.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameHitTest {
    pub source: HitTestSourceId,
    pub results: Vec<HitTestResult>,
}

/// A single platform frame as delivered by the host page or the desktop preview.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct XrFrame {
    /// Platform timestamp in milliseconds.
    pub timestamp: f64,
    pub session_active: bool,
    /// Viewer (camera) pose in the result space, when the platform tracked it.
    pub viewer: Option<Mat4>,
    pub hit_test: Option<FrameHitTest>,
}

impl XrFrame {
    /// Frame with an active session and nothing else.
    pub fn empty(timestamp: f64) -> Self {
        Self {
            timestamp,
            session_active: true,
            viewer: None,
            hit_test: None,
        }
    }

    pub fn with_hits(mut self, source: HitTestSourceId, results: Vec<HitTestResult>) -> Self {
        self.hit_test = Some(FrameHitTest { source, results });
        self
    }

    pub fn with_viewer(mut self, viewer: Mat4) -> Self {
        self.viewer = Some(viewer);
        self
    }
}

/// Read side of a platform frame, as seen by the session driver.
pub trait XrFrameHandle {
    fn timestamp(&self) -> f64;

    fn session_active(&self) -> bool;

    /// Results for `source`. Empty when the frame carries none for it.
    fn hit_test_results(&self, source: HitTestSourceId) -> Vec<HitTestResult>;
}

impl XrFrameHandle for XrFrame {
    fn timestamp(&self) -> f64 {
        self.timestamp
    }

    fn session_active(&self) -> bool {
        self.session_active
    }

    fn hit_test_results(&self, source: HitTestSourceId) -> Vec<HitTestResult> {
        match &self.hit_test {
            Some(hit_test) if hit_test.source == source => hit_test.results.clone(),
            _ => Vec::new(),
        }
    }
}

/// Platform session lifecycle notifications.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum XrSessionEvent {
    Started,
    Ended,
}

/// Asynchronous answer to an earlier hit-test source request.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct HitTestSourceResolved {
    pub request_id: u32,
    pub outcome: std::result::Result<HitTestSourceId, String>,
}

/// Builds a pose from 16 column-major floats (the `XRRigidTransform.matrix` layout).
pub fn pose_from_column_major(values: &[f32; 16]) -> Result<Mat4> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ArViewerError::NonFinitePose);
    }
    Ok(Mat4::from_cols_array(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_only_returned_for_matching_source() {
        let hit = HitTestResult::new(ReferenceSpace::Local, Mat4::IDENTITY);
        let frame = XrFrame::empty(16.0).with_hits(HitTestSourceId(7), vec![hit]);

        assert_eq!(frame.hit_test_results(HitTestSourceId(7)), vec![hit]);
        assert!(frame.hit_test_results(HitTestSourceId(8)).is_empty());
    }

    #[test]
    fn resolved_pose_requires_same_space() {
        let pose = Mat4::from_translation(Vec3::new(0.0, -1.2, -0.5));
        let hit = HitTestResult::new(ReferenceSpace::Local, pose);

        assert_eq!(hit.resolved_pose(ReferenceSpace::Local), Some(pose));
        assert_eq!(hit.resolved_pose(ReferenceSpace::Viewer), None);
    }

    #[test]
    fn column_major_pose_keeps_translation_in_last_column() {
        let mut values = Mat4::IDENTITY.to_cols_array();
        values[12] = 1.0;
        values[13] = 2.0;
        values[14] = 3.0;

        let pose = pose_from_column_major(&values).unwrap();
        assert_eq!(pose.w_axis.truncate(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn rejects_non_finite_pose() {
        let mut values = Mat4::IDENTITY.to_cols_array();
        values[5] = f32::NAN;

        assert!(matches!(
            pose_from_column_major(&values),
            Err(ArViewerError::NonFinitePose)
        ));
    }

    #[test]
    fn reference_space_wire_names() {
        let space: ReferenceSpace = serde_json::from_str("\"local-floor\"").unwrap();
        assert_eq!(space, ReferenceSpace::LocalFloor);
        assert_eq!(ReferenceSpace::Viewer.as_str(), "viewer");
    }
}
