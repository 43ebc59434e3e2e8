//! Platform abstraction layer
//!
//! Host event handlers write into an input state; the game loop reads one
//! snapshot per simulation tick. Nothing here depends on the browser, so the
//! native runner and tests share it.

pub mod input;

pub use input::{InputSource, Key, KeyboardState};
