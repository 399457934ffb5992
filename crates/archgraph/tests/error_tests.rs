//! Tests for core error types

use archgraph::core::{DiagramError, Direction, OutputFormat};
use archgraph::prelude::*;

#[test]
fn test_unknown_node_error() {
    let mut other = DiagramBuilder::new("other", Direction::LeftRight, false);
    let handle = other.node(NodeKind::Server, "web0");

    let error = DiagramError::unknown_node(handle, "main");
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Unknown node"));
    assert!(error_msg.contains(&handle.to_string()));
    assert!(error_msg.contains("'main'"));
}

#[test]
fn test_render_error() {
    let error = DiagramError::render_error("Graphviz crashed");
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Render error"));
    assert!(error_msg.contains("Graphviz crashed"));
    assert!(error.is_render_error());
}

#[test]
fn test_invalid_direction() {
    let error = "sideways".parse::<Direction>().unwrap_err();
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Invalid direction"));
    assert!(error_msg.contains("sideways"));
}

#[test]
fn test_unknown_format() {
    let error = "tiff".parse::<OutputFormat>().unwrap_err();
    assert!(matches!(error, DiagramError::UnknownFormat { ref value } if value == "tiff"));
}

#[test]
fn test_unknown_diagram() {
    let error = archgraph::catalog::find("mesh").unwrap_err();
    assert_eq!(error.to_string(), "Unknown diagram: mesh");
}
