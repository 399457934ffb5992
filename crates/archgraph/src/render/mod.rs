//! Renderer implementations

pub mod dot;
mod graphviz;

pub use dot::to_dot;
pub use graphviz::GraphvizRenderer;
