//! archgraph - architecture diagrams as typed Rust code
//!
//! Declare typed nodes, directed edges and named clusters through an
//! explicit builder, then hand the finished description to a renderer.
//! Layout is left to Graphviz.
//!
//! # Quick Start
//!
//! ```rust
//! use archgraph::prelude::*;
//!
//! let mut builder = DiagramBuilder::new("web tier", Direction::LeftRight, false);
//! let internet = builder.node(NodeKind::Internet, "Internet");
//! let web0 = builder.node(NodeKind::Server, "web0");
//! let web1 = builder.node(NodeKind::Server, "web1");
//! builder.connect(internet, web0)?;
//! builder.connect(internet, web1)?;
//!
//! let diagram = builder.finish();
//! assert_eq!(diagram.node_count(), 3);
//! assert_eq!(diagram.edge_count(), 2);
//! assert_eq!(diagram.filename(), "web_tier");
//! # Ok::<(), DiagramError>(())
//! ```
//!
//! # Rendering
//!
//! ```rust,no_run
//! use archgraph::prelude::*;
//!
//! let renderer = GraphvizRenderer::new(RenderConfig::new("out", OutputFormat::Svg));
//! let outcome = archgraph::catalog::load_balanced_droplets()?.render(&renderer)?;
//! println!("{:?}", outcome.path);
//! # Ok::<(), DiagramError>(())
//! ```

pub mod catalog;
pub mod core;
pub mod render;

pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        ClusterScope, Declare, Diagram, DiagramBuilder, DiagramError, DiagramOptions, Direction,
        NodeHandle, NodeKind, OutputFormat, RenderConfig, RenderOutcome, Renderer,
    };
    pub use crate::render::GraphvizRenderer;
}

/// Render a built-in diagram by name with the given config
///
/// # Example
/// ```rust
/// use archgraph::{render_catalog, OutputFormat, RenderConfig};
///
/// let dir = tempfile::tempdir().unwrap();
/// let config = RenderConfig::new(dir.path(), OutputFormat::Dot);
/// let outcome = render_catalog("multiple-droplets", &config).unwrap();
/// assert!(outcome.path.unwrap().ends_with("creating_multiple_droplets_with_terraform.dot"));
/// ```
pub fn render_catalog(name: &str, config: &RenderConfig) -> Result<RenderOutcome, DiagramError> {
    let entry = catalog::find(name)?;
    let renderer = render::GraphvizRenderer::new(config.clone());
    entry.build()?.render(&renderer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_catalog_unknown_name() {
        let config = RenderConfig::default();
        let result = render_catalog("nope", &config);
        assert!(matches!(result, Err(DiagramError::UnknownDiagram { .. })));
    }
}
