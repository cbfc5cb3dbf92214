//! Input subsystem: raw terminal polling and key bindings.

pub mod raw;
pub mod service;

pub use raw::ScrollDirection;
pub use service::{InputAction, InputService, InputState, InputStateMachine};
