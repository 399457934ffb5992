//! Built-in architecture diagrams
//!
//! Each entry pairs a stable CLI name with the function that declares the
//! diagram.

mod droplets;

pub use droplets::{
    load_balanced_droplets, multiple_droplets, LOAD_BALANCED_TITLE, MULTIPLE_DROPLETS_TITLE,
};

use crate::core::{Diagram, DiagramError};

/// A named, buildable diagram
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub title: &'static str,
    build: fn(bool) -> Result<Diagram, DiagramError>,
}

impl CatalogEntry {
    /// Declare the diagram and return its finished description
    pub fn build(&self) -> Result<Diagram, DiagramError> {
        (self.build)(false)
    }

    /// Declare the diagram with its `show` flag set to `show`
    pub fn build_with_show(&self, show: bool) -> Result<Diagram, DiagramError> {
        (self.build)(show)
    }
}

const ENTRIES: &[CatalogEntry] = &[
    CatalogEntry {
        name: "multiple-droplets",
        title: MULTIPLE_DROPLETS_TITLE,
        build: droplets::build_multiple_droplets,
    },
    CatalogEntry {
        name: "load-balanced",
        title: LOAD_BALANCED_TITLE,
        build: droplets::build_load_balanced_droplets,
    },
];

/// All built-in diagrams
pub fn entries() -> &'static [CatalogEntry] {
    ENTRIES
}

/// Look up a diagram by its CLI name
pub fn find(name: &str) -> Result<&'static CatalogEntry, DiagramError> {
    ENTRIES
        .iter()
        .find(|entry| entry.name == name)
        .ok_or_else(|| DiagramError::UnknownDiagram {
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_known_entries() {
        assert_eq!(find("load-balanced").unwrap().title, LOAD_BALANCED_TITLE);
        assert_eq!(
            find("multiple-droplets").unwrap().title,
            MULTIPLE_DROPLETS_TITLE
        );
    }

    #[test]
    fn test_find_unknown_entry() {
        let error = find("kubernetes").unwrap_err();
        assert!(error.to_string().contains("kubernetes"));
    }

    #[test]
    fn test_entry_titles_match_built_diagrams() {
        for entry in entries() {
            assert_eq!(entry.build().unwrap().title(), entry.title);
        }
    }

    #[test]
    fn test_build_with_show() {
        let entry = find("load-balanced").unwrap();
        assert!(!entry.build().unwrap().show());

        let shown = entry.build_with_show(true).unwrap();
        assert!(shown.show());
        assert_eq!(shown.edge_count(), 5);
        assert_eq!(shown.cluster_count(), 2);
    }
}
