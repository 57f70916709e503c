use bevy::color::Color;

/// Outer radius of the reticle ring, metres.
pub const RETICLE_OUTER_RADIUS: f32 = 0.1;

/// Inner radius of the reticle ring, metres.
pub const RETICLE_INNER_RADIUS: f32 = 0.075;

pub const RETICLE_COLOUR: Color = Color::srgb(1.0, 1.0, 1.0);

/// Intensity of the directional light that shades placed content.
pub const SCENE_LIGHT_ILLUMINANCE: f32 = 4_000.0;
