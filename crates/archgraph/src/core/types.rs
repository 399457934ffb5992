//! Core type definitions for diagram descriptions
//!
//! This module contains the fundamental types used throughout archgraph:
//! node kinds, layout direction, handles, and the node/edge/cluster records.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Serialize, Serializer};

use crate::core::DiagramError;

/// Kinds of architecture nodes that can be declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// The public internet
    Internet,
    /// A compute host (droplet, VM, bare metal)
    Server,
    /// A network load balancer
    LoadBalancer,
    /// Infrastructure-as-code tooling
    Terraform,
    /// A human operator or client
    User,
}

impl NodeKind {
    /// All node kinds, in declaration order
    pub fn all() -> &'static [NodeKind] {
        &[
            NodeKind::Internet,
            NodeKind::Server,
            NodeKind::LoadBalancer,
            NodeKind::Terraform,
            NodeKind::User,
        ]
    }

    /// Provider and category this kind belongs to, e.g. `onprem.compute`
    pub fn category(&self) -> &'static str {
        match self {
            NodeKind::Internet => "onprem.network",
            NodeKind::Server => "onprem.compute",
            NodeKind::LoadBalancer => "oci.network",
            NodeKind::Terraform => "onprem.iac",
            NodeKind::User => "onprem.client",
        }
    }

    /// Fully qualified name, e.g. `onprem.compute.Server`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.category(), self)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Internet => write!(f, "Internet"),
            NodeKind::Server => write!(f, "Server"),
            NodeKind::LoadBalancer => write!(f, "LoadBalancer"),
            NodeKind::Terraform => write!(f, "Terraform"),
            NodeKind::User => write!(f, "User"),
        }
    }
}

/// Layout direction handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
pub enum Direction {
    /// Top to bottom (TB or TD)
    TopBottom,
    /// Bottom to top (BT)
    BottomTop,
    /// Left to right (LR)
    #[default]
    LeftRight,
    /// Right to left (RL)
    RightLeft,
}

impl FromStr for Direction {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TB" | "TD" => Ok(Direction::TopBottom),
            "BT" => Ok(Direction::BottomTop),
            "LR" => Ok(Direction::LeftRight),
            "RL" => Ok(Direction::RightLeft),
            _ => Err(DiagramError::InvalidDirection {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::TopBottom => write!(f, "TB"),
            Direction::BottomTop => write!(f, "BT"),
            Direction::LeftRight => write!(f, "LR"),
            Direction::RightLeft => write!(f, "RL"),
        }
    }
}

static NEXT_DIAGRAM_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one diagram build
///
/// Every builder draws a fresh id, so handles can never be confused across
/// diagrams even when their indices coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagramId(u64);

impl DiagramId {
    pub(crate) fn next() -> Self {
        Self(NEXT_DIAGRAM_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DiagramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.0)
    }
}

/// Handle to a declared node, valid only inside the diagram that issued it
///
/// Serializes as the bare node index; the diagram id is process-local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    pub(crate) diagram: DiagramId,
    pub(crate) index: usize,
}

impl NodeHandle {
    /// Diagram this handle belongs to
    pub fn diagram(&self) -> DiagramId {
        self.diagram
    }

    /// Position of the node in declaration order
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Serialize for NodeHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.index as u64)
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/n{}", self.diagram, self.index)
    }
}

/// Index of a cluster within its diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ClusterId(pub(crate) usize);

impl ClusterId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A declared node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeData {
    pub kind: NodeKind,
    pub label: String,
    /// Innermost cluster open at declaration time
    pub cluster: Option<ClusterId>,
}

/// A directed edge between two declared nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeData {
    pub source: NodeHandle,
    pub target: NodeHandle,
    pub label: Option<String>,
    /// Cluster the edge was declared in; has no effect on rendering
    pub declared_in: Option<ClusterId>,
}

/// A named visual grouping of nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterData {
    pub name: String,
    pub parent: Option<ClusterId>,
    /// Nesting depth, 0 for top-level clusters
    pub depth: usize,
}
