use bevy::prelude::*;

use crate::engine::loading::progress::{LoadingProgress, LoadingStage};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
    /// Manifest or scene failed to load. Nothing is ever placed.
    LoadFailed,
}

/// Per-update ordering of the viewer's systems.
///
/// Host messages land first, then session lifecycle, then frames (so a
/// frame's hit results are applied before it renders), then select input
/// against that frame, then entity sync, then outbound notifications.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerSet {
    Inbox,
    Session,
    Frames,
    Input,
    SceneSync,
    Outbox,
}

pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.stage == LoadingStage::Ready {
        info!("→ Scene ready, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

pub fn transition_to_load_failed(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.failed {
        error!("→ Loading failed, transitioning to LoadFailed state");
        next_state.set(AppState::LoadFailed);
    }
}
