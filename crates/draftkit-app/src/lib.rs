//! Draftkit headless shell.
//!
//! Replays JSON gesture scripts through a [`draftkit_core::Canvas`] and
//! reports the resulting drawing.

pub mod script;

pub use script::{ReplayError, ReplayReport, ReplayResult, Script, ScriptEvent, replay};
