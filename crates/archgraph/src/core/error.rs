//! Core error types for building and rendering diagrams

use std::path::PathBuf;

use thiserror::Error;

use crate::core::NodeHandle;

/// Errors raised while declaring or rendering a diagram
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Unknown node: {handle} was not declared in diagram '{diagram}'")]
    UnknownNode { handle: NodeHandle, diagram: String },

    #[error("Render error: {message}")]
    RenderError {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Invalid direction: {value} (expected TB, BT, LR or RL)")]
    InvalidDirection { value: String },

    #[error("Unknown output format: {value}")]
    UnknownFormat { value: String },

    #[error("Unknown diagram: {name}")]
    UnknownDiagram { name: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create an unknown node error for a handle rejected by `diagram`
    pub fn unknown_node(handle: NodeHandle, diagram: impl Into<String>) -> Self {
        Self::UnknownNode {
            handle,
            diagram: diagram.into(),
        }
    }

    /// Create a render error not tied to a particular file
    pub fn render_error(message: impl Into<String>) -> Self {
        Self::RenderError {
            message: message.into(),
            path: None,
        }
    }

    /// Create a render error for a failure involving `path`
    pub fn render_error_at(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::RenderError {
            message: format!("{}: {}", path.display(), message.into()),
            path: Some(path),
        }
    }

    /// Returns true if this error came from the rendering collaborator
    pub fn is_render_error(&self) -> bool {
        matches!(self, Self::RenderError { .. })
    }
}
