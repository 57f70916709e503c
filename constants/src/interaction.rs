/// Interactive sub-objects looked up by name when the manifest lists none.
pub const DEFAULT_TARGET_NAMES: &[&str] = &["Button", "Door", "Lamp"];

/// Ray start distance from the camera, in metres.
pub const RAY_NEAR: f32 = 0.01;

/// Ray end distance from the camera, in metres. Covers a room-scale scene.
pub const RAY_FAR: f32 = 50.0;

/// Default turn rate for the `spin` interaction.
pub const DEFAULT_SPIN_RADIANS_PER_SECOND: f32 = std::f32::consts::PI;

/// Default scale multiplier for the `pop` interaction.
pub const DEFAULT_POP_FACTOR: f32 = 1.25;
