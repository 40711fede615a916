//! Audio output.
//!
//! The controller only talks to the `AudioEngine` / `AudioHandle` traits;
//! `RodioEngine` is the implementation used at runtime.

mod engine;
mod output;

pub use engine::{AudioEngine, AudioHandle, EngineError, SystemEvent};
pub use output::RodioEngine;
