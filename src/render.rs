//! Rendering subsystem: the render loop state machine and the terminal UI.

pub mod service;
pub mod ui;

pub use service::RenderLoopState;
