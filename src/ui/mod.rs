//! Rendering.

mod render;
pub mod style;

pub use render::render;
