//! Crossterm frontend: key bindings and a character-cell renderer.

pub mod input;
pub mod render;

pub use input::Bindings;
pub use render::TerminalRenderer;
