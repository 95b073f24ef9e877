//! Client terminal UI.

mod board;
mod input;
mod render;

pub use render::render;
