use bevy::prelude::*;
use bevy::window::{CompositeAlphaMode, PresentMode};

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        use constants::path::CANVAS_SELECTOR;

        // The canvas sits over the camera feed, so it must composite
        // with a transparent clear colour.
        Window {
            canvas: Some(CANVAS_SELECTOR.into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            transparent: true,
            composite_alpha_mode: CompositeAlphaMode::PreMultiplied,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "AR Viewer (desktop preview)".into(),
            composite_alpha_mode: CompositeAlphaMode::Auto,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
