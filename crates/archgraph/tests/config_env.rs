//! Environment overrides for render configuration
//!
//! Kept in one test so the variables are never mutated concurrently.

use std::env;
use std::path::PathBuf;

use archgraph::core::{DOT_BINARY_ENV, FORMAT_ENV, OUTPUT_DIR_ENV};
use archgraph::prelude::*;

fn clear_env() {
    env::remove_var(OUTPUT_DIR_ENV);
    env::remove_var(FORMAT_ENV);
    env::remove_var(DOT_BINARY_ENV);
}

#[test]
fn test_render_config_from_env() {
    clear_env();
    let config = RenderConfig::from_env();
    assert_eq!(config.output_dir, PathBuf::from("."));
    assert_eq!(config.format, OutputFormat::Png);
    assert_eq!(config.dot_binary, PathBuf::from("dot"));

    env::set_var(OUTPUT_DIR_ENV, "/tmp/archgraph-out");
    env::set_var(FORMAT_ENV, "SVG");
    env::set_var(DOT_BINARY_ENV, "/opt/graphviz/bin/dot");
    let config = RenderConfig::from_env();
    assert_eq!(config.output_dir, PathBuf::from("/tmp/archgraph-out"));
    assert_eq!(config.format, OutputFormat::Svg);
    assert_eq!(config.dot_binary, PathBuf::from("/opt/graphviz/bin/dot"));

    // An invalid format is ignored; the other overrides still apply
    env::set_var(FORMAT_ENV, "bmp");
    let config = RenderConfig::from_env();
    assert_eq!(config.format, OutputFormat::Png);
    assert_eq!(config.output_dir, PathBuf::from("/tmp/archgraph-out"));

    clear_env();
    assert_eq!(RenderConfig::from_env().format, OutputFormat::Png);
}
