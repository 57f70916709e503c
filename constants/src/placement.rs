/// Uniform scale applied to the placed root when the manifest omits one.
pub const DEFAULT_AUTHOR_SCALE: f32 = 0.25;

/// Below this horizontal distance (metres) the viewer is considered to be
/// standing on the placement point and the root keeps its identity yaw.
pub const MIN_FACING_DISTANCE: f32 = 1.0e-4;

/// Height of the desktop preview ground plane.
pub const DESKTOP_GROUND_HEIGHT: f32 = 0.0;

/// Starting pose of the desktop preview camera.
pub const DESKTOP_CAMERA_POSITION: [f32; 3] = [0.0, 1.6, 2.5];
