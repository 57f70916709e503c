//! Compiled-in defaults shared across the AR viewer workspace.
//!
//! Values here are fallbacks: the viewer manifest overrides anything it
//! names, and the defaults apply to everything it leaves out.

pub mod interaction;
pub mod path;
pub mod placement;
pub mod render_settings;
