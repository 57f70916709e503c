//! Browser AR viewer: finds a real surface through platform hit testing,
//! places a glTF scene on it, then lets select gestures pick objects in it.

pub mod engine;
pub mod error;
pub mod rpc;
pub mod tools;
pub mod xr;

pub use engine::core::app_setup::create_app;
pub use error::{ArViewerError, Result};
