//! Core renderer trait
//!
//! A renderer is the external collaborator that turns a finished
//! [`Diagram`] into an artifact. Layout and icon drawing happen on the
//! renderer's side; the core only hands over the description.

use std::path::PathBuf;

use crate::core::{Diagram, DiagramError, OutputFormat};

/// Result of a successful render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    /// Path of the written artifact, if the renderer wrote one
    pub path: Option<PathBuf>,
    /// Format the artifact was produced in
    pub format: OutputFormat,
}

impl RenderOutcome {
    pub fn written(path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            path: Some(path.into()),
            format,
        }
    }

    /// An outcome for renderers that keep the result in memory
    pub fn in_memory(format: OutputFormat) -> Self {
        Self { path: None, format }
    }
}

/// Core trait for diagram renderers
///
/// Implementations receive the whole description at once and either produce
/// their artifact or report a [`DiagramError::RenderError`].
pub trait Renderer {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Lay out and write the diagram
    fn render(&self, diagram: &Diagram) -> Result<RenderOutcome, DiagramError>;
}
