/// Asset-relative location of the viewer manifest.
pub const MANIFEST_PATH: &str = "manifest.json";

/// Scene loaded when the manifest does not name one.
pub const DEFAULT_SCENE_PATH: &str = "scenes/scene.glb";

/// Canvas selector the wasm build renders into.
pub const CANVAS_SELECTOR: &str = "#ar-viewer";
