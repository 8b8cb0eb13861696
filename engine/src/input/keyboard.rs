//! Keyboard Input Module
//!
//! Generic key codes for the playground, independent of the windowing system.
//! The binary translates winit key events into these before handing them to
//! the engine.

/// Keys the playground reacts to. Everything else maps to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Drive keys
    W,
    A,
    S,
    D,
    Space,

    // Control-panel actions
    Digit1,
    Digit2,
    R,

    Escape,

    /// Catch-all for unhandled keys
    Unknown,
}
