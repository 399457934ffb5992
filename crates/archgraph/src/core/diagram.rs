//! Finished diagram descriptions
//!
//! A [`Diagram`] is produced once by [`DiagramBuilder::finish`] and never
//! mutated afterwards. Renderers only ever see this type.
//!
//! [`DiagramBuilder::finish`]: crate::core::DiagramBuilder::finish

use serde::Serialize;
use tracing::{info, span, Level};

use crate::core::{
    ClusterData, ClusterId, DiagramError, DiagramId, Direction, EdgeData, NodeData, NodeHandle,
    RenderOutcome, Renderer,
};

/// Derive the default output filename from a diagram title
///
/// Splits on whitespace, joins with `_` and lowercases. A blank title
/// falls back to [`FALLBACK_FILENAME`].
///
/// ```rust
/// use archgraph::core::default_filename;
///
/// assert_eq!(
///     default_filename("Load balanced application on droplets"),
///     "load_balanced_application_on_droplets"
/// );
/// ```
pub fn default_filename(title: &str) -> String {
    let filename = title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();
    if filename.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        filename
    }
}

/// Output filename used when a title has no visible characters
pub const FALLBACK_FILENAME: &str = "diagram";

/// A complete, immutable architecture diagram
#[derive(Debug, Clone, Serialize)]
pub struct Diagram {
    #[serde(skip)]
    pub(crate) id: DiagramId,
    pub(crate) title: String,
    pub(crate) direction: Direction,
    pub(crate) show: bool,
    pub(crate) filename: String,
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) edges: Vec<EdgeData>,
    pub(crate) clusters: Vec<ClusterData>,
}

impl Diagram {
    pub fn id(&self) -> DiagramId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether the rendered artifact should be opened once written
    pub fn show(&self) -> bool {
        self.show
    }

    /// Output filename without extension
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn nodes(&self) -> &[NodeData] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeData] {
        &self.edges
    }

    pub fn clusters(&self) -> &[ClusterData] {
        &self.clusters
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Look up a node by handle, `None` if the handle belongs elsewhere
    pub fn node(&self, handle: NodeHandle) -> Option<&NodeData> {
        if handle.diagram != self.id {
            return None;
        }
        self.nodes.get(handle.index)
    }

    /// Handles of every node in declaration order
    pub fn handles(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        (0..self.nodes.len()).map(move |index| NodeHandle {
            diagram: self.id,
            index,
        })
    }

    /// Nodes declared directly inside `cluster` (not in its children)
    pub fn members(
        &self,
        cluster: ClusterId,
    ) -> impl Iterator<Item = (NodeHandle, &NodeData)> + '_ {
        self.handles()
            .zip(self.nodes.iter())
            .filter(move |(_, node)| node.cluster == Some(cluster))
    }

    /// Nodes declared outside of any cluster
    pub fn top_level_nodes(&self) -> impl Iterator<Item = (NodeHandle, &NodeData)> + '_ {
        self.handles()
            .zip(self.nodes.iter())
            .filter(|(_, node)| node.cluster.is_none())
    }

    /// Clusters whose parent is `parent` (`None` for top-level clusters)
    pub fn child_clusters(
        &self,
        parent: Option<ClusterId>,
    ) -> impl Iterator<Item = (ClusterId, &ClusterData)> + '_ {
        self.clusters
            .iter()
            .enumerate()
            .filter(move |(_, cluster)| cluster.parent == parent)
            .map(|(index, cluster)| (ClusterId(index), cluster))
    }

    /// Hand this diagram to a renderer
    pub fn render<R: Renderer + ?Sized>(
        &self,
        renderer: &R,
    ) -> Result<RenderOutcome, DiagramError> {
        let render_span = span!(
            Level::INFO,
            "render_diagram",
            title = %self.title,
            renderer = renderer.name()
        );
        let _enter = render_span.enter();

        let outcome = renderer.render(self)?;
        info!(
            format = %outcome.format,
            path = ?outcome.path,
            "Diagram rendered"
        );
        Ok(outcome)
    }
}
