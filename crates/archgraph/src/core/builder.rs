//! Diagram description builder
//!
//! A [`DiagramBuilder`] is an explicit build context: every node, edge and
//! cluster is declared through it (or through a [`ClusterScope`] borrowed
//! from it), and nothing is shared between builders. Clusters are RAII
//! guards, so a cluster is closed on every exit path, including early
//! returns through `?`.
//!
//! ```rust
//! use archgraph::prelude::*;
//!
//! let mut builder = DiagramBuilder::new("web tier", Direction::LeftRight, false);
//! let internet = builder.node(NodeKind::Internet, "Internet");
//!
//! let web = {
//!     let mut cloud = builder.cluster("cloud");
//!     let web = cloud.node(NodeKind::Server, "web0");
//!     cloud.connect(internet, web)?;
//!     web
//! };
//!
//! let diagram = builder.finish();
//! assert_eq!(diagram.node_count(), 2);
//! assert_eq!(diagram.edge_count(), 1);
//! assert_eq!(diagram.cluster_count(), 1);
//! assert!(diagram.node(web).is_some());
//! # Ok::<(), archgraph::core::DiagramError>(())
//! ```

use tracing::{debug, info, trace, warn};

use crate::core::{
    default_filename, ClusterData, ClusterId, Diagram, DiagramError, DiagramId, Direction,
    EdgeData, NodeData, NodeHandle, NodeKind, RenderOutcome, Renderer,
};

/// Options accepted when opening a diagram
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramOptions {
    pub direction: Direction,
    /// Open the artifact after rendering
    pub show: bool,
    /// Output filename without extension; derived from the title when `None`
    pub filename: Option<String>,
}

impl DiagramOptions {
    pub fn new(direction: Direction, show: bool) -> Self {
        Self {
            direction,
            show,
            filename: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// Build context for one diagram
#[derive(Debug)]
pub struct DiagramBuilder {
    id: DiagramId,
    title: String,
    options: DiagramOptions,
    nodes: Vec<NodeData>,
    edges: Vec<EdgeData>,
    clusters: Vec<ClusterData>,
    /// Stack of clusters whose scope guard is still alive
    open_clusters: Vec<ClusterId>,
}

impl DiagramBuilder {
    /// Open a new diagram
    pub fn new(title: impl Into<String>, direction: Direction, show: bool) -> Self {
        Self::with_options(title, DiagramOptions::new(direction, show))
    }

    /// Open a new diagram with full options
    pub fn with_options(title: impl Into<String>, options: DiagramOptions) -> Self {
        let id = DiagramId::next();
        let title = title.into();
        debug!(
            diagram = %id,
            title = %title,
            direction = %options.direction,
            "Opened diagram"
        );
        Self {
            id,
            title,
            options,
            nodes: Vec::new(),
            edges: Vec::new(),
            clusters: Vec::new(),
            open_clusters: Vec::new(),
        }
    }

    pub fn id(&self) -> DiagramId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
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

    /// Number of cluster scopes currently open
    pub fn open_cluster_count(&self) -> usize {
        self.open_clusters.len()
    }

    /// Returns true if `handle` was issued by this builder
    pub fn contains(&self, handle: NodeHandle) -> bool {
        handle.diagram == self.id && handle.index < self.nodes.len()
    }

    /// Finalize the description without rendering it
    pub fn finish(self) -> Diagram {
        if !self.open_clusters.is_empty() {
            warn!(
                diagram = %self.id,
                open = self.open_clusters.len(),
                "Finishing with clusters that were never closed"
            );
        }

        let filename = self
            .options
            .filename
            .clone()
            .unwrap_or_else(|| default_filename(&self.title));

        info!(
            diagram = %self.id,
            title = %self.title,
            node_count = self.nodes.len(),
            edge_count = self.edges.len(),
            cluster_count = self.clusters.len(),
            "Diagram description complete"
        );

        Diagram {
            id: self.id,
            title: self.title,
            direction: self.options.direction,
            show: self.options.show,
            filename,
            nodes: self.nodes,
            edges: self.edges,
            clusters: self.clusters,
        }
    }

    /// Finalize the description and hand it to `renderer`
    ///
    /// Whatever error the renderer reports is returned unchanged.
    pub fn end<R: Renderer + ?Sized>(self, renderer: &R) -> Result<RenderOutcome, DiagramError> {
        self.finish().render(renderer)
    }

    fn declare_node(
        &mut self,
        kind: NodeKind,
        label: String,
        cluster: Option<ClusterId>,
    ) -> NodeHandle {
        let handle = NodeHandle {
            diagram: self.id,
            index: self.nodes.len(),
        };
        trace!(
            node = %handle,
            kind = %kind,
            label = %label,
            cluster = ?cluster.map(|c| c.index()),
            "Declared node"
        );
        self.nodes.push(NodeData {
            kind,
            label,
            cluster,
        });
        handle
    }

    fn check_handle(&self, handle: NodeHandle) -> Result<(), DiagramError> {
        if self.contains(handle) {
            Ok(())
        } else {
            debug!(node = %handle, diagram = %self.id, "Rejected foreign node handle");
            Err(DiagramError::unknown_node(handle, self.title.clone()))
        }
    }

    fn add_edge(
        &mut self,
        source: NodeHandle,
        target: NodeHandle,
        label: Option<String>,
        declared_in: Option<ClusterId>,
    ) -> Result<(), DiagramError> {
        self.check_handle(source)?;
        self.check_handle(target)?;

        trace!(source = %source, target = %target, label = ?label, "Connected nodes");
        self.edges.push(EdgeData {
            source,
            target,
            label,
            declared_in,
        });
        Ok(())
    }

    fn open_cluster(&mut self, name: String, parent: Option<ClusterId>) -> ClusterScope<'_> {
        let id = ClusterId(self.clusters.len());
        let depth = parent.map_or(0, |p| self.clusters[p.0].depth + 1);
        debug!(cluster = %name, depth, "Opened cluster");

        self.clusters.push(ClusterData {
            name,
            parent,
            depth,
        });
        self.open_clusters.push(id);

        ClusterScope { builder: self, id }
    }

    fn close_cluster(&mut self, id: ClusterId) {
        // A forgotten inner scope leaves stale entries above `id`
        if let Some(position) = self.open_clusters.iter().rposition(|open| *open == id) {
            self.open_clusters.truncate(position);
        }
        debug!(cluster = %self.clusters[id.0].name, "Closed cluster");
    }
}

/// A named cluster, open until the guard is dropped
///
/// Nodes and edges declared through the scope belong to the cluster.
#[derive(Debug)]
pub struct ClusterScope<'a> {
    builder: &'a mut DiagramBuilder,
    id: ClusterId,
}

impl ClusterScope<'_> {
    pub fn id(&self) -> ClusterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.builder.clusters[self.id.0].name
    }

    /// Close the cluster explicitly; equivalent to dropping the guard
    pub fn close(self) {}
}

impl Drop for ClusterScope<'_> {
    fn drop(&mut self) {
        self.builder.close_cluster(self.id);
    }
}

mod private {
    pub trait Sealed {}

    impl Sealed for super::DiagramBuilder {}
    impl Sealed for super::ClusterScope<'_> {}
}

/// Declaration operations shared by diagrams and clusters
///
/// Implemented by [`DiagramBuilder`] (top level) and [`ClusterScope`]
/// (inside a cluster). The trait is sealed.
pub trait Declare: private::Sealed {
    #[doc(hidden)]
    fn context(&mut self) -> (&mut DiagramBuilder, Option<ClusterId>);

    /// Declare a node and return its handle
    fn node(&mut self, kind: NodeKind, label: impl Into<String>) -> NodeHandle {
        let (builder, cluster) = self.context();
        builder.declare_node(kind, label.into(), cluster)
    }

    /// Record a directed edge `source -> target`
    ///
    /// Fails with [`DiagramError::UnknownNode`] if either handle was not
    /// issued by this diagram.
    fn connect(&mut self, source: NodeHandle, target: NodeHandle) -> Result<(), DiagramError> {
        let (builder, cluster) = self.context();
        builder.add_edge(source, target, None, cluster)
    }

    /// Record a directed edge carrying a label
    fn connect_labeled(
        &mut self,
        source: NodeHandle,
        target: NodeHandle,
        label: impl Into<String>,
    ) -> Result<(), DiagramError> {
        let (builder, cluster) = self.context();
        builder.add_edge(source, target, Some(label.into()), cluster)
    }

    /// Connect consecutive handles: `[a, b, c]` records `a -> b` and `b -> c`
    ///
    /// Every handle is checked before any edge is recorded.
    fn connect_chain(&mut self, chain: &[NodeHandle]) -> Result<(), DiagramError> {
        let (builder, cluster) = self.context();
        for &handle in chain {
            builder.check_handle(handle)?;
        }
        for pair in chain.windows(2) {
            builder.add_edge(pair[0], pair[1], None, cluster)?;
        }
        Ok(())
    }

    /// Connect one source to each of `targets`
    ///
    /// Every handle is checked before any edge is recorded.
    fn connect_fan_out(
        &mut self,
        source: NodeHandle,
        targets: &[NodeHandle],
    ) -> Result<(), DiagramError> {
        let (builder, cluster) = self.context();
        builder.check_handle(source)?;
        for &target in targets {
            builder.check_handle(target)?;
        }
        for &target in targets {
            builder.add_edge(source, target, None, cluster)?;
        }
        Ok(())
    }

    /// Open a cluster nested in the current scope
    fn cluster(&mut self, name: impl Into<String>) -> ClusterScope<'_> {
        let (builder, parent) = self.context();
        builder.open_cluster(name.into(), parent)
    }

    /// Run `f` inside a nested cluster
    ///
    /// The cluster is closed when `f` returns, whether it succeeded or not.
    fn with_cluster<T, F>(&mut self, name: impl Into<String>, f: F) -> Result<T, DiagramError>
    where
        F: FnOnce(&mut ClusterScope<'_>) -> Result<T, DiagramError>,
    {
        let mut scope = self.cluster(name);
        let result = f(&mut scope);
        drop(scope);
        result
    }
}

impl Declare for DiagramBuilder {
    fn context(&mut self) -> (&mut DiagramBuilder, Option<ClusterId>) {
        (self, None)
    }
}

impl Declare for ClusterScope<'_> {
    fn context(&mut self) -> (&mut DiagramBuilder, Option<ClusterId>) {
        (&mut *self.builder, Some(self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nodes_get_sequential_handles() {
        let mut builder = DiagramBuilder::new("test", Direction::LeftRight, false);
        let a = builder.node(NodeKind::Server, "a");
        let b = builder.node(NodeKind::Server, "b");
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(a.diagram(), builder.id());
    }

    #[test]
    fn test_duplicate_labels_get_distinct_handles() {
        let mut builder = DiagramBuilder::new("test", Direction::LeftRight, false);
        let a = builder.node(NodeKind::Server, "web");
        let b = builder.node(NodeKind::Server, "web");
        assert_ne!(a, b);
        assert_eq!(builder.node_count(), 2);
    }

    #[test]
    fn test_cluster_membership() {
        let mut builder = DiagramBuilder::new("test", Direction::LeftRight, false);
        let outside = builder.node(NodeKind::Internet, "Internet");
        let inside = {
            let mut scope = builder.cluster("home");
            assert_eq!(scope.name(), "home");
            scope.node(NodeKind::User, "you")
        };
        assert_eq!(builder.open_cluster_count(), 0);

        let diagram = builder.finish();
        assert_eq!(diagram.node(outside).unwrap().cluster, None);
        assert_eq!(diagram.node(inside).unwrap().cluster, Some(ClusterId(0)));
    }

    #[test]
    fn test_nested_clusters_track_parent_and_depth() {
        let mut builder = DiagramBuilder::new("test", Direction::TopBottom, false);
        {
            let mut region = builder.cluster("region");
            region.node(NodeKind::LoadBalancer, "lb");
            {
                let mut vpc = region.cluster("vpc");
                vpc.node(NodeKind::Server, "web0");
            }
            region.node(NodeKind::Server, "bastion");
        }

        let diagram = builder.finish();
        let clusters = diagram.clusters();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].parent, None);
        assert_eq!(clusters[0].depth, 0);
        assert_eq!(clusters[1].parent, Some(ClusterId(0)));
        assert_eq!(clusters[1].depth, 1);
        assert_eq!(diagram.members(ClusterId(0)).count(), 2);
        assert_eq!(diagram.members(ClusterId(1)).count(), 1);
    }

    #[test]
    fn test_edges_record_declaring_cluster() {
        let mut builder = DiagramBuilder::new("test", Direction::LeftRight, false);
        let internet = builder.node(NodeKind::Internet, "Internet");
        builder
            .with_cluster("cloud", |cloud| {
                let web = cloud.node(NodeKind::Server, "web0");
                cloud.connect(internet, web)
            })
            .unwrap();

        let diagram = builder.finish();
        assert_eq!(diagram.edges()[0].declared_in, Some(ClusterId(0)));
    }

    #[test]
    fn test_connect_chain_rejects_before_recording() {
        let mut other = DiagramBuilder::new("other", Direction::LeftRight, false);
        let foreign = other.node(NodeKind::Server, "x");

        let mut builder = DiagramBuilder::new("test", Direction::LeftRight, false);
        let a = builder.node(NodeKind::User, "a");
        let b = builder.node(NodeKind::Terraform, "b");

        let result = builder.connect_chain(&[a, b, foreign]);
        assert!(matches!(result, Err(DiagramError::UnknownNode { .. })));
        assert_eq!(builder.edge_count(), 0);
    }

    #[test]
    fn test_connect_fan_out() {
        let mut builder = DiagramBuilder::new("test", Direction::LeftRight, false);
        let lb = builder.node(NodeKind::LoadBalancer, "lb");
        let web0 = builder.node(NodeKind::Server, "web0");
        let web1 = builder.node(NodeKind::Server, "web1");
        builder.connect_fan_out(lb, &[web0, web1]).unwrap();

        let diagram = builder.finish();
        let targets: Vec<_> = diagram.edges().iter().map(|e| e.target).collect();
        assert_eq!(targets, vec![web0, web1]);
        assert!(diagram.edges().iter().all(|e| e.source == lb));
    }

    #[test]
    fn test_filename_override() {
        let options = DiagramOptions::new(Direction::LeftRight, false).with_filename("custom");
        let diagram = DiagramBuilder::with_options("Some Title", options).finish();
        assert_eq!(diagram.filename(), "custom");
    }

    #[test]
    fn test_filename_defaults_to_title() {
        let diagram = DiagramBuilder::new("Some Title", Direction::LeftRight, true).finish();
        assert_eq!(diagram.filename(), "some_title");
        assert!(diagram.show());
    }

    #[test]
    fn test_forgotten_scope_does_not_poison_builder() {
        let mut builder = DiagramBuilder::new("test", Direction::LeftRight, false);
        {
            let mut outer = builder.cluster("outer");
            let inner = outer.cluster("inner");
            std::mem::forget(inner);
            outer.node(NodeKind::Server, "web0");
        }
        assert_eq!(builder.open_cluster_count(), 0);

        std::mem::forget(builder.cluster("leaked"));
        let next = builder.cluster("next");
        assert_eq!(next.id(), ClusterId(3));
        drop(next);

        let diagram = builder.finish();
        assert_eq!(diagram.cluster_count(), 4);
        assert_eq!(diagram.clusters()[3].depth, 0);
        assert_eq!(diagram.clusters()[3].parent, None);
    }
}
