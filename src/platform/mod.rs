//! Platform abstraction layer
//!
//! Handles window-system differences for:
//! - Input events (key codes → held state and one-shot edges)

pub mod input;

pub use input::{InputState, Key};
