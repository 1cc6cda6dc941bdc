//! Diagnostic projection of a Document into a petgraph DiGraph.
//!
//! The entity graph is allowed to be cyclic; the layout pipeline never
//! consumes this view. It exists for structure queries (is the input really
//! cyclic?) and DOT export for debugging.

use std::collections::HashMap;

use petgraph::algo::is_cyclic_directed;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};

use super::{ArrowDirection, Document, NodeRef};

/// Directed incidence view: one petgraph node per entity, an edge per
/// participant slot (link → argument for `Outgoing`, argument → link for
/// `Incoming`) and one per trigger (trigger → link).
pub struct GraphView {
    pub digraph: DiGraph<String, ()>,
    /// Maps entity identity → petgraph NodeIndex.
    pub node_index: HashMap<NodeRef, NodeIndex>,
}

impl GraphView {
    pub fn from_document(doc: &Document) -> Self {
        let mut digraph: DiGraph<String, ()> = DiGraph::new();
        let mut node_index: HashMap<NodeRef, NodeIndex> = HashMap::new();

        for (i, word) in doc.words.iter().enumerate() {
            let idx = digraph.add_node(word.label.clone());
            node_index.insert(NodeRef::Word(super::WordId(i)), idx);
        }
        for (i, link) in doc.links.iter().enumerate() {
            let idx = digraph.add_node(link.label.clone());
            node_index.insert(NodeRef::Link(super::LinkId(i)), idx);
        }

        for (i, link) in doc.links.iter().enumerate() {
            let lidx = node_index[&NodeRef::Link(super::LinkId(i))];
            if let Some(t) = link.trigger {
                digraph.add_edge(node_index[&NodeRef::Word(t)], lidx, ());
            }
            for (slot, &arg) in link.arguments.iter().enumerate() {
                let aidx = node_index[&arg];
                match link.directions.get(slot) {
                    Some(ArrowDirection::Incoming) => {
                        digraph.add_edge(aidx, lidx, ());
                    }
                    _ => {
                        digraph.add_edge(lidx, aidx, ());
                    }
                }
            }
        }

        Self {
            digraph,
            node_index,
        }
    }

    /// Returns true if the entity graph contains a directed cycle.
    pub fn is_cyclic(&self) -> bool {
        is_cyclic_directed(&self.digraph)
    }

    /// Graphviz DOT rendering of the entity graph.
    pub fn to_dot(&self) -> String {
        format!("{:?}", Dot::with_config(&self.digraph, &[Config::EdgeNoLabel]))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
