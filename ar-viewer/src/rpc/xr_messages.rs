use serde::Deserialize;
use serde_json::Value;

use crate::error::{ArViewerError, Result};
use crate::xr::XrMessage;
use crate::xr::frame::{
    HitTestResult, HitTestSourceId, HitTestSourceResolved, ReferenceSpace, XrFrame,
    pose_from_column_major,
};

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
struct FrameParams {
    #[serde(default)]
    timestamp: f64,
    #[serde(default = "default_true")]
    session_active: bool,
    #[serde(default)]
    viewer: Option<[f32; 16]>,
    #[serde(default)]
    hit_test: Option<HitTestParams>,
}

#[derive(Deserialize)]
struct HitTestParams {
    source: HitTestSourceId,
    #[serde(default)]
    results: Vec<HitResultParams>,
}

#[derive(Deserialize)]
struct HitResultParams {
    space: ReferenceSpace,
    pose: [f32; 16],
}

#[derive(Deserialize)]
struct SourceResolvedParams {
    request_id: u32,
    #[serde(default)]
    source: Option<HitTestSourceId>,
    #[serde(default)]
    error: Option<String>,
}

/// Maps a host notification onto a platform message.
///
/// `Ok(None)` means the method is not part of the XR protocol. Malformed
/// params and non-finite matrices are errors.
pub fn parse_xr_notification(method: &str, params: &Value) -> Result<Option<XrMessage>> {
    let message = match method {
        "xr_session_started" => XrMessage::SessionStarted,
        "xr_session_ended" => XrMessage::SessionEnded,
        "xr_select" => XrMessage::Select,
        "xr_frame" => XrMessage::Frame(parse_frame(params)?),
        "hit_test_source_resolved" => {
            let parsed = SourceResolvedParams::deserialize(params)?;
            let outcome = match parsed.source {
                Some(source) => Ok(source),
                None => Err(parsed
                    .error
                    .unwrap_or_else(|| "hit-test source unavailable".to_string())),
            };
            XrMessage::SourceResolved(HitTestSourceResolved {
                request_id: parsed.request_id,
                outcome,
            })
        }
        _ => return Ok(None),
    };
    Ok(Some(message))
}

fn parse_frame(params: &Value) -> Result<XrFrame> {
    let parsed = FrameParams::deserialize(params)?;

    let viewer = parsed
        .viewer
        .as_ref()
        .map(pose_from_column_major)
        .transpose()?;

    let hit_test = match parsed.hit_test {
        Some(hit_test) => {
            let results = hit_test
                .results
                .iter()
                .map(|r| pose_from_column_major(&r.pose).map(|pose| HitTestResult::new(r.space, pose)))
                .collect::<Result<Vec<_>>>()?;
            Some((hit_test.source, results))
        }
        None => None,
    };

    let mut frame = XrFrame::empty(parsed.timestamp);
    frame.session_active = parsed.session_active;
    frame.viewer = viewer;
    if let Some((source, results)) = hit_test {
        frame = frame.with_hits(source, results);
    }
    Ok(frame)
}
