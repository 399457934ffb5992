//! Graphviz-backed renderer
//!
//! Writes DOT or JSON directly, and for image formats pipes the DOT source
//! into the `dot` executable to lay it out. Layout itself is entirely
//! Graphviz's business.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, info, span, warn, Level};

use crate::core::{Diagram, DiagramError, OutputFormat, RenderConfig, RenderOutcome, Renderer};
use crate::render::dot::to_dot;

/// Renderer that produces files through Graphviz
#[derive(Debug, Clone, Default)]
pub struct GraphvizRenderer {
    config: RenderConfig,
}

impl GraphvizRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn write_file(path: &Path, contents: &str) -> Result<(), DiagramError> {
        fs::write(path, contents).map_err(|e| DiagramError::render_error_at(e.to_string(), path))
    }

    fn run_dot(
        &self,
        source: &str,
        target: &Path,
        format: OutputFormat,
    ) -> Result<(), DiagramError> {
        debug!(
            binary = %self.config.dot_binary.display(),
            target = %target.display(),
            "Running Graphviz"
        );

        let spawn_error = |e: io::Error| {
            DiagramError::render_error_at(
                format!(
                    "failed to run Graphviz '{}': {}",
                    self.config.dot_binary.display(),
                    e
                ),
                target,
            )
        };

        let mut child = Command::new(&self.config.dot_binary)
            .arg(format!("-T{}", format.extension()))
            .arg("-o")
            .arg(target)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // Graphviz reads the DOT source from stdin; the pipe closes when dropped
        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(source.as_bytes()) {
                Ok(()) => {}
                // The exit status below decides whether this matters
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    debug!("Graphviz closed stdin early");
                }
                Err(e) => return Err(spawn_error(e)),
            }
        }

        let output = child.wait_with_output().map_err(spawn_error)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DiagramError::render_error_at(
                format!("Graphviz exited with {}: {}", output.status, stderr.trim()),
                target,
            ));
        }
        Ok(())
    }
}

impl Renderer for GraphvizRenderer {
    fn name(&self) -> &'static str {
        "graphviz"
    }

    fn render(&self, diagram: &Diagram) -> Result<RenderOutcome, DiagramError> {
        let format = self.config.format;
        let render_span = span!(Level::DEBUG, "graphviz", format = %format);
        let _enter = render_span.enter();

        let target = self.config.artifact_path(diagram.filename(), format);

        match format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(diagram)
                    .map_err(|e| DiagramError::render_error(e.to_string()))?;
                Self::write_file(&target, &json)?;
            }
            format if format.needs_layout() => {
                self.run_dot(&to_dot(diagram), &target, format)?;
            }
            _ => {
                Self::write_file(&target, &to_dot(diagram))?;
            }
        }

        info!(path = %target.display(), "Wrote diagram artifact");

        if diagram.show() {
            open_artifact(&target);
        }

        Ok(RenderOutcome::written(target, format))
    }
}

/// Ask the platform viewer to open `path`; failures are only logged
fn open_artifact(path: &Path) {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else {
        Command::new("xdg-open")
    };

    match command.arg(path).spawn() {
        Ok(_) => debug!(path = %path.display(), "Opened artifact"),
        Err(e) => warn!(path = %path.display(), error = %e, "Could not open artifact"),
    }
}
