use bevy::prelude::*;

use super::frame::{
    HitTestResult, HitTestSourceResolved, ReferenceSpace, XrFrame, XrFrameHandle, XrSessionEvent,
};
use super::hit_test::{HitTestPhase, HitTestSession};
use crate::tools::placement::{PlacementController, PlacementTransition};

/// Outbound side of the platform hit-test API.
pub trait HitTestPlatform {
    /// Fire-and-forget request for a hit-test source bound to `space`.
    /// The answer comes back later as a [`HitTestSourceResolved`] event.
    fn request_hit_test_source(&mut self, request_id: u32, space: ReferenceSpace);
}

/// A hit-test source request waiting to be handed to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRequest {
    pub request_id: u32,
    pub space: ReferenceSpace,
}

/// Requests issued by the driver, drained by whichever platform bridge is
/// active (web RPC or desktop preview).
#[derive(Resource, Debug, Default)]
pub struct PendingSourceRequests(pub Vec<SourceRequest>);

impl HitTestPlatform for PendingSourceRequests {
    fn request_hit_test_source(&mut self, request_id: u32, space: ReferenceSpace) {
        self.0.push(SourceRequest { request_id, space });
    }
}

/// What the driver did with one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// No platform session is running.
    Inactive,
    /// First tracked frame: a source request went out.
    SourceRequested,
    /// Waiting on the platform to resolve the request.
    Pending,
    /// The request failed; hit testing is off for this session.
    Unavailable,
    /// Results against the active source, possibly empty.
    Results(Vec<HitTestResult>),
}

/// Per-frame entry point of the session driver.
///
/// Once the session has ended, frames are inert until the next session
/// start. A frame can be queued before the end notification yet handled
/// after it.
pub fn on_frame(
    session: &mut HitTestSession,
    frame: &impl XrFrameHandle,
    platform: &mut impl HitTestPlatform,
) -> FrameOutcome {
    if !frame.session_active() {
        return FrameOutcome::Inactive;
    }

    match session.phase().clone() {
        HitTestPhase::Ended => FrameOutcome::Inactive,
        HitTestPhase::Unrequested => {
            let Some(request_id) = session.begin_request() else {
                return FrameOutcome::Pending;
            };
            let space = session.source_space();
            info!(
                "Requesting hit-test source {} ({}) at t={:.1}",
                request_id,
                space.as_str(),
                frame.timestamp()
            );
            platform.request_hit_test_source(request_id, space);
            FrameOutcome::SourceRequested
        }
        HitTestPhase::Requested { .. } => FrameOutcome::Pending,
        HitTestPhase::Failed => FrameOutcome::Unavailable,
        HitTestPhase::Active { source } => FrameOutcome::Results(frame.hit_test_results(source)),
    }
}

/// Applies session start/end notifications. Runs in every app state so a
/// session that starts during loading is not missed.
pub fn handle_session_events(
    mut events: EventReader<XrSessionEvent>,
    mut session: ResMut<HitTestSession>,
    mut controller: ResMut<PlacementController>,
    mut transitions: EventWriter<PlacementTransition>,
) {
    for event in events.read() {
        match event {
            XrSessionEvent::Started => {
                info!("XR session started");
                session.restart();
            }
            XrSessionEvent::Ended => {
                info!("XR session ended, clearing hit-test source");
                session.end();
                // No more frames will arrive to hide a stale reticle.
                let space = session.result_space();
                if let Some(transition) = controller.update_from_hit_results(&[], space) {
                    transitions.write(transition);
                }
            }
        }
    }
}

pub fn handle_source_resolutions(
    mut events: EventReader<HitTestSourceResolved>,
    mut session: ResMut<HitTestSession>,
) {
    for event in events.read() {
        match session.resolve(event.request_id, event.outcome.clone()) {
            Ok(true) => info!("Hit-test source {} active", event.request_id),
            Ok(false) => debug!("Ignoring stale hit-test source resolution {}", event.request_id),
            Err(err) => error!("{err}; placement stays in scanning for this session"),
        }
    }
}

/// Runs the driver over every frame received since the last update and
/// forwards results to placement before the frame is rendered.
pub fn drive_xr_frames(
    mut frames: EventReader<XrFrame>,
    mut session: ResMut<HitTestSession>,
    mut requests: ResMut<PendingSourceRequests>,
    mut controller: ResMut<PlacementController>,
    mut transitions: EventWriter<PlacementTransition>,
) {
    for frame in frames.read() {
        let FrameOutcome::Results(results) = on_frame(&mut session, frame, &mut *requests) else {
            continue;
        };
        let space = session.result_space();
        if let Some(transition) = controller.update_from_hit_results(&results, space) {
            transitions.write(transition);
        }
    }
}
