//! Core abstractions for describing diagrams
//!
//! The builder accumulates nodes, edges and clusters into an immutable
//! [`Diagram`], which is then handed to a [`Renderer`].

mod builder;
mod config;
mod diagram;
mod error;
pub mod logging;
mod renderer;
mod types;

pub use builder::*;
pub use config::*;
pub use diagram::*;
pub use error::*;
pub use logging::*;
pub use renderer::*;
pub use types::*;
