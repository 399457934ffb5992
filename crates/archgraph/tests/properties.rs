//! Property tests for the builder

use archgraph::core::default_filename;
use archgraph::prelude::*;
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = NodeKind> {
    prop::sample::select(NodeKind::all().to_vec())
}

proptest! {
    /// Connecting freshly declared nodes never fails
    #[test]
    fn prop_declared_nodes_always_connect(
        nodes in prop::collection::vec((kind_strategy(), "[a-z0-9-]{1,12}"), 1..12),
        pairs in prop::collection::vec(
            (any::<prop::sample::Index>(), any::<prop::sample::Index>()),
            0..24,
        ),
    ) {
        let mut builder = DiagramBuilder::new("prop", Direction::LeftRight, false);
        let handles: Vec<NodeHandle> = nodes
            .iter()
            .map(|(kind, label)| builder.node(*kind, label.as_str()))
            .collect();

        for (source, target) in &pairs {
            let source = handles[source.index(handles.len())];
            let target = handles[target.index(handles.len())];
            prop_assert!(builder.connect(source, target).is_ok());
        }

        let diagram = builder.finish();
        prop_assert_eq!(diagram.node_count(), nodes.len());
        prop_assert_eq!(diagram.edge_count(), pairs.len());
    }

    /// Handles never cross diagram boundaries
    #[test]
    fn prop_foreign_handles_rejected(count in 1usize..8) {
        let mut first = DiagramBuilder::new("first", Direction::LeftRight, false);
        let foreign: Vec<NodeHandle> = (0..count)
            .map(|i| first.node(NodeKind::Server, format!("web{}", i)))
            .collect();

        let mut second = DiagramBuilder::new("second", Direction::LeftRight, false);
        let local: Vec<NodeHandle> = (0..count)
            .map(|i| second.node(NodeKind::Server, format!("web{}", i)))
            .collect();

        for (f, l) in foreign.iter().zip(&local) {
            prop_assert_eq!(f.index(), l.index());
            prop_assert!(second.connect(*f, *l).is_err());
            prop_assert!(second.connect(*l, *f).is_err());
        }
        prop_assert_eq!(second.edge_count(), 0);
    }

    /// Filenames are lowercase and contain no whitespace
    #[test]
    fn prop_default_filename_normalized(title in "[A-Za-z ]{0,40}") {
        let filename = default_filename(&title);
        prop_assert!(!filename.chars().any(char::is_whitespace));
        prop_assert_eq!(filename.clone(), filename.to_lowercase());
        prop_assert!(!filename.starts_with('_'));
        prop_assert!(!filename.ends_with('_'));
        prop_assert!(!filename.contains("__"));
    }

    /// Every cluster opened through a scope is closed afterwards
    #[test]
    fn prop_clusters_always_close(depth in 1usize..6, fail_at in 0usize..6) {
        fn nest(
            scope: &mut ClusterScope<'_>,
            remaining: usize,
            fail_at: usize,
        ) -> Result<(), DiagramError> {
            scope.node(NodeKind::Server, format!("level{}", remaining));
            if remaining == fail_at {
                return Err(DiagramError::render_error("stop"));
            }
            if remaining == 0 {
                return Ok(());
            }
            let mut child = scope.cluster(format!("c{}", remaining));
            nest(&mut child, remaining - 1, fail_at)
        }

        let mut builder = DiagramBuilder::new("deep", Direction::TopBottom, false);
        let _ = builder.with_cluster("root", |root| nest(root, depth, fail_at));
        prop_assert_eq!(builder.open_cluster_count(), 0);

        let diagram = builder.finish();
        for (index, cluster) in diagram.clusters().iter().enumerate() {
            prop_assert_eq!(cluster.depth, index);
        }
    }
}
