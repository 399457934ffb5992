//! Command-line interface for the archgraph utility
//!
//! Renders, lists and describes the built-in architecture diagrams.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;

use archgraph::catalog;
use archgraph::core::logging::init_logging;
use archgraph::core::ClusterId;
use archgraph::prelude::*;

/// archgraph - render architecture diagrams declared in Rust
#[derive(Parser)]
#[command(name = "archgraph")]
#[command(about = "Render the built-in architecture diagrams with Graphviz")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormatChoice::Compact, global = true)]
    pub log_format: LogFormatChoice,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormatChoice {
    Compact,
    Pretty,
    Json,
}

impl LogFormatChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormatChoice::Compact => "compact",
            LogFormatChoice::Pretty => "pretty",
            LogFormatChoice::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a built-in diagram through Graphviz
    Render {
        /// Diagram to render (see `archgraph list`)
        #[arg(required_unless_present = "all")]
        name: Option<String>,

        /// Render every built-in diagram
        #[arg(long, conflicts_with = "name")]
        all: bool,

        /// Directory the artifact is written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Artifact format
        #[arg(short, long, value_enum)]
        format: Option<FormatChoice>,

        /// Open the artifact once written
        #[arg(long)]
        show: bool,

        /// Path to the Graphviz `dot` executable
        #[arg(long)]
        dot_binary: Option<PathBuf>,
    },

    /// List the built-in diagrams
    List {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the nodes, clusters and edges of a built-in diagram
    Describe {
        /// Diagram to describe
        name: String,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Supported artifact formats
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum FormatChoice {
    Png,
    Jpg,
    Svg,
    Pdf,
    Dot,
    Json,
}

impl From<FormatChoice> for OutputFormat {
    fn from(value: FormatChoice) -> Self {
        match value {
            FormatChoice::Png => OutputFormat::Png,
            FormatChoice::Jpg => OutputFormat::Jpg,
            FormatChoice::Svg => OutputFormat::Svg,
            FormatChoice::Pdf => OutputFormat::Pdf,
            FormatChoice::Dot => OutputFormat::Dot,
            FormatChoice::Json => OutputFormat::Json,
        }
    }
}

#[derive(Serialize)]
struct ListedDiagram {
    name: &'static str,
    title: &'static str,
    filename: String,
}

/// Main CLI application
pub struct ArchgraphApp {
    config: RenderConfig,
}

impl ArchgraphApp {
    /// Create an application using `ARCHGRAPH_*` environment settings
    pub fn new() -> Self {
        Self::with_config(RenderConfig::from_env())
    }

    /// Create an application with a base render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over CLI defaults
        let log_level = std::env::var(archgraph::core::logging::LOG_LEVEL_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());
        let log_format = std::env::var(archgraph::core::logging::LOG_FORMAT_ENV)
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level), Some(&log_format)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("archgraph v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Render {
                name,
                all,
                output_dir,
                format,
                show,
                dot_binary,
            } => {
                let config = self.build_config(output_dir, format, dot_binary);
                let names: Vec<&str> = if all {
                    catalog::entries().iter().map(|e| e.name).collect()
                } else {
                    let name = name.as_deref().ok_or_else(|| anyhow!("No diagram name given"))?;
                    vec![name]
                };
                for name in names {
                    let path = self.render_command(name, &config, show, cli.verbose)?;
                    if let Some(path) = path {
                        println!("{}", path.display());
                    }
                }
                Ok(())
            }
            Commands::List { json } => {
                print!("{}", self.list_command(json)?);
                Ok(())
            }
            Commands::Describe { name, json } => {
                print!("{}", self.describe_command(&name, json)?);
                Ok(())
            }
        }
    }

    /// Layer CLI flags over the base config
    fn build_config(
        &self,
        output_dir: Option<PathBuf>,
        format: Option<FormatChoice>,
        dot_binary: Option<PathBuf>,
    ) -> RenderConfig {
        let mut config = self.config.clone();
        if let Some(dir) = output_dir {
            config = config.with_output_dir(dir);
        }
        if let Some(format) = format {
            config = config.with_format(format.into());
        }
        if let Some(binary) = dot_binary {
            config = config.with_dot_binary(binary);
        }
        config
    }

    /// Build and render one catalog diagram, returning the artifact path
    pub fn render_command(
        &self,
        name: &str,
        config: &RenderConfig,
        show: bool,
        verbose: bool,
    ) -> Result<Option<PathBuf>> {
        let entry = catalog::find(name)?;
        let diagram = entry
            .build_with_show(show)
            .with_context(|| format!("Failed to build diagram '{}'", name))?;

        if verbose {
            eprintln!(
                "Built '{}': {} nodes, {} edges, {} clusters",
                diagram.title(),
                diagram.node_count(),
                diagram.edge_count(),
                diagram.cluster_count()
            );
        }

        let renderer = GraphvizRenderer::new(config.clone());
        let outcome = diagram.render(&renderer)?;
        info!(name, format = %outcome.format, "Rendered catalog diagram");
        Ok(outcome.path)
    }

    /// Format the catalog listing
    pub fn list_command(&self, json: bool) -> Result<String> {
        let listed: Vec<ListedDiagram> = catalog::entries()
            .iter()
            .map(|entry| ListedDiagram {
                name: entry.name,
                title: entry.title,
                filename: archgraph::core::default_filename(entry.title),
            })
            .collect();

        if json {
            let value = serde_json::json!({
                "diagrams": listed,
                "total": listed.len(),
            });
            return Ok(format!("{}\n", serde_json::to_string_pretty(&value)?));
        }

        let mut out = String::from("Built-in diagrams:\n");
        for item in &listed {
            out.push_str(&format!("  {:<20} {}\n", item.name, item.title));
        }
        out.push_str(&format!("\nTotal: {} diagrams\n", listed.len()));
        Ok(out)
    }

    /// Format a description of one catalog diagram
    pub fn describe_command(&self, name: &str, json: bool) -> Result<String> {
        let diagram = catalog::find(name)?.build()?;

        if json {
            return Ok(format!("{}\n", serde_json::to_string_pretty(&diagram)?));
        }
        describe_diagram(&diagram)
    }
}

impl Default for ArchgraphApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain-text outline of a diagram, clusters indented by depth
fn describe_diagram(diagram: &Diagram) -> Result<String> {
    let mut out = format!(
        "{} ({}, {} nodes, {} edges, {} clusters)\n",
        diagram.title(),
        diagram.direction(),
        diagram.node_count(),
        diagram.edge_count(),
        diagram.cluster_count()
    );
    for (_, node) in diagram.top_level_nodes() {
        out.push_str(&format!("  {} [{}]\n", node.label, node.kind));
    }
    for (id, _) in diagram.child_clusters(None) {
        describe_cluster(&mut out, diagram, id, 1);
    }
    for edge in diagram.edges() {
        let source = label_of(diagram, edge.source)?;
        let target = label_of(diagram, edge.target)?;
        out.push_str(&format!("  {} -> {}\n", source, target));
    }
    Ok(out)
}

fn describe_cluster(out: &mut String, diagram: &Diagram, id: ClusterId, indent: usize) {
    let pad = "  ".repeat(indent);
    out.push_str(&format!("{}cluster {}\n", pad, diagram.clusters()[id.index()].name));
    for (_, node) in diagram.members(id) {
        out.push_str(&format!("{}  {} [{}]\n", pad, node.label, node.kind));
    }
    for (child, _) in diagram.child_clusters(Some(id)) {
        describe_cluster(out, diagram, child, indent + 1);
    }
}

fn label_of(diagram: &Diagram, handle: NodeHandle) -> Result<&str> {
    diagram
        .node(handle)
        .map(|node| node.label.as_str())
        .ok_or_else(|| anyhow!("Edge references unknown node {}", handle))
}
