//! Render configuration
//!
//! Settings come from code, from `ARCHGRAPH_*` environment variables via
//! [`RenderConfig::from_env`], or from CLI flags layered on top.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

use crate::core::DiagramError;

/// Environment variable for the output directory
pub const OUTPUT_DIR_ENV: &str = "ARCHGRAPH_OUTPUT_DIR";
/// Environment variable for the output format
pub const FORMAT_ENV: &str = "ARCHGRAPH_FORMAT";
/// Environment variable for the Graphviz `dot` executable
pub const DOT_BINARY_ENV: &str = "ARCHGRAPH_DOT";

/// Artifact formats a diagram can be rendered to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpg,
    Svg,
    Pdf,
    /// Graphviz source, no layout performed
    Dot,
    /// The diagram description as JSON
    Json,
}

impl OutputFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["png", "jpg", "svg", "pdf", "dot", "json"]
    }

    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Dot => "dot",
            OutputFormat::Json => "json",
        }
    }

    /// Returns true if producing this format requires running Graphviz
    pub fn needs_layout(&self) -> bool {
        matches!(
            self,
            OutputFormat::Png | OutputFormat::Jpg | OutputFormat::Svg | OutputFormat::Pdf
        )
    }
}

impl FromStr for OutputFormat {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpg),
            "svg" => Ok(OutputFormat::Svg),
            "pdf" => Ok(OutputFormat::Pdf),
            "dot" | "gv" => Ok(OutputFormat::Dot),
            "json" => Ok(OutputFormat::Json),
            _ => Err(DiagramError::UnknownFormat {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Where and how rendered artifacts are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    /// Graphviz executable, looked up on `PATH` when not absolute
    pub dot_binary: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            format: OutputFormat::default(),
            dot_binary: PathBuf::from("dot"),
        }
    }
}

impl RenderConfig {
    pub fn new(output_dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
            ..Default::default()
        }
    }

    /// Build a config from `ARCHGRAPH_*` environment variables
    ///
    /// Unset variables keep their defaults. An unparseable format is logged
    /// and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var(OUTPUT_DIR_ENV) {
            config.output_dir = PathBuf::from(dir);
        }
        if let Ok(value) = std::env::var(FORMAT_ENV) {
            match value.parse() {
                Ok(format) => config.format = format,
                Err(e) => warn!(variable = FORMAT_ENV, error = %e, "Ignoring invalid format"),
            }
        }
        if let Ok(binary) = std::env::var(DOT_BINARY_ENV) {
            config.dot_binary = PathBuf::from(binary);
        }

        config
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_dot_binary(mut self, dot_binary: impl Into<PathBuf>) -> Self {
        self.dot_binary = dot_binary.into();
        self
    }

    /// Full artifact path for an output filename (without extension)
    pub fn artifact_path(&self, filename: &str, format: OutputFormat) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", filename, format.extension()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("png").unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_str("JPEG").unwrap(), OutputFormat::Jpg);
        assert_eq!(OutputFormat::from_str("Svg").unwrap(), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_str("gv").unwrap(), OutputFormat::Dot);
        assert!(OutputFormat::from_str("bmp").is_err());
    }

    #[test]
    fn test_output_format_variants_parse() {
        for name in OutputFormat::variants() {
            let format = OutputFormat::from_str(name).unwrap();
            assert_eq!(format.to_string(), *name);
        }
    }

    #[test]
    fn test_needs_layout() {
        assert!(OutputFormat::Png.needs_layout());
        assert!(OutputFormat::Pdf.needs_layout());
        assert!(!OutputFormat::Dot.needs_layout());
        assert!(!OutputFormat::Json.needs_layout());
    }

    #[test]
    fn test_artifact_path() {
        let config = RenderConfig::new("/tmp/diagrams", OutputFormat::Svg);
        assert_eq!(
            config.artifact_path("web_tier", OutputFormat::Svg),
            PathBuf::from("/tmp/diagrams/web_tier.svg")
        );
    }

    #[test]
    fn test_builder_methods() {
        let config = RenderConfig::default()
            .with_output_dir("out")
            .with_format(OutputFormat::Dot)
            .with_dot_binary("/usr/local/bin/dot");
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.format, OutputFormat::Dot);
        assert_eq!(config.dot_binary, PathBuf::from("/usr/local/bin/dot"));
    }
}
