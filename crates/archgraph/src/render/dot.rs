//! Graphviz DOT emission
//!
//! Turns a [`Diagram`] into DOT source. Attribute values follow the look of
//! the classic diagrams-as-code output: rounded boxes, orthogonal splines,
//! and pastel cluster backgrounds that cycle with nesting depth.

use std::fmt::Write;

use crate::core::{ClusterId, Diagram};

const FONT_NAME: &str = "Sans-Serif";
const FONT_COLOR: &str = "#2D3436";
const EDGE_COLOR: &str = "#7B8894";
const CLUSTER_PEN_COLOR: &str = "#AEB6BE";

/// Cluster background colours, indexed by depth modulo the palette length
pub const CLUSTER_BG_COLORS: [&str; 4] = ["#E5F5FD", "#EBF3E7", "#ECE8F6", "#FDF7E3"];

/// Quote and escape a string for use as a DOT ID
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => {}
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

fn node_id(index: usize) -> String {
    format!("n{}", index)
}

/// Render a diagram as DOT source
///
/// Nodes are emitted inside the cluster they were declared in; edges are
/// always emitted at the top level so that Graphviz never pulls a node into
/// a cluster just because an edge was declared there.
pub fn to_dot(diagram: &Diagram) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "digraph {} {{", quote(diagram.title()));
    let _ = writeln!(out, "  graph [");
    let _ = writeln!(out, "    label={}", quote(diagram.title()));
    let _ = writeln!(out, "    rankdir={}", diagram.direction());
    let _ = writeln!(out, "    fontname={}", quote(FONT_NAME));
    let _ = writeln!(out, "    fontsize=15");
    let _ = writeln!(out, "    fontcolor={}", quote(FONT_COLOR));
    let _ = writeln!(out, "    pad=2.0");
    let _ = writeln!(out, "    splines=ortho");
    let _ = writeln!(out, "    nodesep=0.60");
    let _ = writeln!(out, "    ranksep=0.75");
    let _ = writeln!(out, "  ];");
    let _ = writeln!(
        out,
        "  node [shape=box, style=rounded, fixedsize=true, width=1.4, height=1.4, labelloc=b, \
         imagescale=true, fontname={}, fontsize=13, fontcolor={}];",
        quote(FONT_NAME),
        quote(FONT_COLOR)
    );
    let _ = writeln!(out, "  edge [color={}];", quote(EDGE_COLOR));

    for (handle, node) in diagram.top_level_nodes() {
        write_node(
            &mut out,
            1,
            handle.index(),
            &node.label,
            &node.kind.qualified_name(),
        );
    }

    for (id, _) in diagram.child_clusters(None) {
        write_cluster(&mut out, diagram, id, 1);
    }

    for edge in diagram.edges() {
        let _ = write!(
            out,
            "  {} -> {}",
            node_id(edge.source.index()),
            node_id(edge.target.index())
        );
        if let Some(label) = &edge.label {
            let _ = write!(out, " [label={}]", quote(label));
        }
        let _ = writeln!(out, ";");
    }

    let _ = writeln!(out, "}}");
    out
}

fn write_node(out: &mut String, indent: usize, index: usize, label: &str, tooltip: &str) {
    let _ = writeln!(
        out,
        "{}{} [label={}, tooltip={}];",
        "  ".repeat(indent),
        node_id(index),
        quote(label),
        quote(tooltip)
    );
}

fn write_cluster(out: &mut String, diagram: &Diagram, id: ClusterId, indent: usize) {
    let cluster = &diagram.clusters()[id.index()];
    let pad = "  ".repeat(indent);
    let bg = CLUSTER_BG_COLORS[cluster.depth % CLUSTER_BG_COLORS.len()];

    // Graphviz only draws subgraphs whose name starts with "cluster"; the
    // index keeps same-named clusters apart
    let _ = writeln!(
        out,
        "{}subgraph {} {{",
        pad,
        quote(&format!("cluster_{}_{}", id.index(), cluster.name))
    );
    let _ = writeln!(
        out,
        "{}  graph [label={}, labeljust=l, pencolor={}, bgcolor={}, style=rounded, \
         fontname={}, fontsize=12];",
        pad,
        quote(&cluster.name),
        quote(CLUSTER_PEN_COLOR),
        quote(bg),
        quote(FONT_NAME)
    );

    for (handle, node) in diagram.members(id) {
        write_node(
            out,
            indent + 1,
            handle.index(),
            &node.label,
            &node.kind.qualified_name(),
        );
    }
    for (child, _) in diagram.child_clusters(Some(id)) {
        write_cluster(out, diagram, child, indent + 1);
    }

    let _ = writeln!(out, "{}}}", pad);
}
