//! Platform AR session plumbing.
//!
//! The platform (the host page's WebXR session, or the desktop preview on
//! native builds) delivers [`XrMessage`]s. They become Bevy events that the
//! [`session_driver`] turns into hit-test requests and per-frame placement
//! updates.

/// Desktop stand-in for the platform on native builds.
#[cfg(not(target_arch = "wasm32"))]
pub mod desktop;

/// Frame, pose and session event types shared with the platform bridges.
pub mod frame;


/// Per-frame driver: requests the source, forwards results to placement.
pub mod session_driver;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::engine::camera::apply_viewer_pose;
use crate::engine::core::app_state::{AppState, ViewerSet};
use crate::tools::interaction::SelectGesture;
use frame::{HitTestSourceResolved, XrFrame, XrSessionEvent};
use hit_test::HitTestSession;
use session_driver::{
    PendingSourceRequests, drive_xr_frames, handle_session_events, handle_source_resolutions,
};

/// Anything a platform bridge can hand to the viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum XrMessage {
    SessionStarted,
    SessionEnded,
    Frame(XrFrame),
    SourceResolved(HitTestSourceResolved),
    Select,
}

/// Writes platform messages into the matching Bevy events.
#[derive(SystemParam)]
pub struct XrInbox<'w> {
    frames: EventWriter<'w, XrFrame>,
    sessions: EventWriter<'w, XrSessionEvent>,
    resolutions: EventWriter<'w, HitTestSourceResolved>,
    selects: EventWriter<'w, SelectGesture>,
}

impl XrInbox<'_> {
    pub fn deliver(&mut self, message: XrMessage) {
        match message {
            XrMessage::SessionStarted => {
                self.sessions.write(XrSessionEvent::Started);
            }
            XrMessage::SessionEnded => {
                self.sessions.write(XrSessionEvent::Ended);
            }
            XrMessage::Frame(frame) => {
                self.frames.write(frame);
            }
            XrMessage::SourceResolved(resolved) => {
                self.resolutions.write(resolved);
            }
            XrMessage::Select => {
                self.selects.write(SelectGesture);
            }
        }
    }
}

pub struct XrPlugin;

impl Plugin for XrPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HitTestSession>()
            .init_resource::<PendingSourceRequests>()
            .add_event::<XrFrame>()
            .add_event::<XrSessionEvent>()
            .add_event::<HitTestSourceResolved>()
            // Session lifecycle is tracked even while loading or failed.
            .add_systems(
                Update,
                (handle_session_events, handle_source_resolutions)
                    .chain()
                    .in_set(ViewerSet::Session),
            )
            .add_systems(
                Update,
                (
                    apply_viewer_pose,
                    drive_xr_frames.run_if(in_state(AppState::Running)),
                )
                    .in_set(ViewerSet::Frames),
            );
    }
}
