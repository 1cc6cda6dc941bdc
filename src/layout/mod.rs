//! Layout engine — full layout passes and ownership of the rendered groups.
//!
//! `layout()` is the stateless path: build a top-link hierarchy, flatten it,
//! assign offsets, and hand back a flat `LayoutResult`. `rebuild()` and
//! `graft()` maintain the live scene as a list of independently laid-out
//! groups joined by anchor positions.

pub mod graft;
pub mod layers;
pub mod measure;
pub mod types;

pub use graft::{Anchor, Group, IncomingRef};
pub use measure::{MonospaceMeasure, TextMeasure};
pub use types::{EdgeKind, LayoutEdge, LayoutResult, PlacedNode};

use log::debug;

use crate::config::LayoutConfig;
use crate::document::{Document, NodeRef};
use crate::error::LayoutError;
use crate::hierarchy::{HierId, Hierarchy, HierarchyBuilder};

/// Flatten a hierarchy depth-first into the node order the layer assigner
/// expects, collecting typed edges along the way. At each node the
/// sibling-group arguments come before the node's own children.
pub fn flatten(h: &Hierarchy) -> (Vec<HierId>, Vec<LayoutEdge>) {
    let mut nodes = Vec::with_capacity(h.len());
    let mut edges = Vec::new();
    walk(h, h.root, &mut nodes, &mut edges);
    (nodes, edges)
}

fn walk(h: &Hierarchy, id: HierId, nodes: &mut Vec<HierId>, edges: &mut Vec<LayoutEdge>) {
    nodes.push(id);
    for group in &h[id].siblings {
        for &arg in &group.args {
            walk(h, arg, nodes, edges);
            edges.push(LayoutEdge {
                kind: EdgeKind::Sibling,
                label: Some(group.reltype.clone()),
                source: id,
                target: arg,
            });
        }
    }
    for &child in &h[id].children {
        walk(h, child, nodes, edges);
        edges.push(LayoutEdge {
            kind: EdgeKind::Child,
            label: None,
            source: id,
            target: child,
        });
    }
}

pub struct LayoutEngine<M: TextMeasure> {
    config: LayoutConfig,
    measure: M,
    groups: Vec<Group>,
}

impl<M: TextMeasure> LayoutEngine<M> {
    pub fn new(config: LayoutConfig, measure: M) -> Self {
        Self {
            config,
            measure,
            groups: Vec::new(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// The live scene: one primary group plus any grafted groups.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// One full, stateless layout pass from `root` over top links and
    /// coreference groups. Carries no state across calls: the same document
    /// and root always produce the same result.
    pub fn layout(&self, doc: &Document, root: NodeRef) -> Result<LayoutResult, LayoutError> {
        let builder = HierarchyBuilder::new(doc, &self.config);
        let mut h = builder.build_top(root);
        let (order, edges) = flatten(&h);
        let (max_width, layer_count) = self.place(&mut h, &order)?;
        let nodes = order
            .iter()
            .map(|&id| {
                let n = &h[id];
                PlacedNode {
                    id,
                    node: n.node,
                    kind: n.kind,
                    label: n.label.clone(),
                    depth: n.depth,
                    offset: n.offset,
                    y: n.y,
                    width: n.width,
                    receives_arrow: n.receives_arrow,
                }
            })
            .collect();
        debug!(
            "layout from {root:?}: {} nodes, {} edges, {layer_count} layers",
            order.len(),
            edges.len()
        );
        Ok(LayoutResult {
            nodes,
            edges,
            max_width,
            layer_count,
        })
    }

    /// Full-rebuild path for the live scene: discards every group and lays
    /// out a fresh primary-variant tree as the single primary group.
    pub fn rebuild(&mut self, doc: &Document, root: NodeRef) -> Result<(), LayoutError> {
        let builder = HierarchyBuilder::new(doc, &self.config);
        let mut tree = builder.build(root);
        self.place_tree(&mut tree)?;
        self.groups = vec![Group {
            index: 0,
            tree,
            anchor: None,
            offset: 0.0,
        }];
        Ok(())
    }

    /// Flatten, assign offsets, and set per-layer y coordinates on a tree
    /// that owns its own coordinate origin.
    fn place_tree(&self, tree: &mut Hierarchy) -> Result<f64, LayoutError> {
        let (order, _) = flatten(tree);
        let (max_width, _) = self.place(tree, &order)?;
        Ok(max_width)
    }

    fn place(&self, h: &mut Hierarchy, order: &[HierId]) -> Result<(f64, usize), LayoutError> {
        let layer_list = layers::build_layers(h, order);
        let max_width = layers::assign(h, &layer_list, &self.measure, &self.config)?;
        for &id in order {
            h[id].y = h[id].depth as f64 * self.config.row_height;
        }
        Ok((max_width, layer_list.len()))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ArrowDirection, WordId};

    fn eats_doc() -> (Document, WordId) {
        // "cat eats fish": one trigger link over two argument words
        let mut doc = Document::new();
        let cat = doc.add_word("cat");
        let eats = doc.add_word("eats");
        let fish = doc.add_word("fish");
        doc.add_link(
            "eats",
            Some(eats),
            None,
            true,
            vec![
                (NodeRef::Word(cat), ArrowDirection::Outgoing),
                (NodeRef::Word(fish), ArrowDirection::Outgoing),
            ],
        );
        (doc, eats)
    }

    fn engine() -> LayoutEngine<MonospaceMeasure> {
        LayoutEngine::new(LayoutConfig::default(), MonospaceMeasure::new(10.0))
    }

    #[test]
    fn test_flatten_siblings_before_children() {
        let mut doc = Document::new();
        let a = doc.add_word("a");
        let b = doc.add_word("b");
        doc.add_link(
            "coref",
            None,
            Some("Coref".into()),
            true,
            vec![
                (NodeRef::Word(a), ArrowDirection::Outgoing),
                (NodeRef::Word(b), ArrowDirection::Outgoing),
            ],
        );
        let t = doc.add_word("runs");
        doc.add_link(
            "runs",
            Some(a),
            None,
            true,
            vec![(NodeRef::Word(t), ArrowDirection::Outgoing)],
        );
        let cfg = LayoutConfig::default();
        let h = HierarchyBuilder::new(&doc, &cfg).build_top(NodeRef::Word(a));
        let (order, edges) = flatten(&h);
        // root, then its coreference argument, then the triggered link subtree
        assert_eq!(h[order[0]].node, NodeRef::Word(a));
        assert_eq!(h[order[1]].node, NodeRef::Word(b));
        assert_eq!(edges[0].kind, EdgeKind::Sibling);
        assert_eq!(edges[0].label.as_deref(), Some("Coref"));
        assert!(edges.iter().any(|e| e.kind == EdgeKind::Child));
    }

    #[test]
    fn test_layout_rows_by_depth() {
        let (doc, eats) = eats_doc();
        let e = engine();
        let res = e.layout(&doc, NodeRef::Word(eats)).unwrap();
        for n in &res.nodes {
            assert_eq!(n.y, n.depth as f64 * 50.0);
        }
        assert_eq!(res.layer_count, 3);
    }

    #[test]
    fn test_layout_no_overlap_within_layer() {
        let (doc, eats) = eats_doc();
        let e = engine();
        let res = e.layout(&doc, NodeRef::Word(eats)).unwrap();
        for depth in 0..res.layer_count {
            let mut layer: Vec<&PlacedNode> =
                res.nodes.iter().filter(|n| n.depth == depth).collect();
            layer.sort_by(|a, b| a.offset.total_cmp(&b.offset));
            for pair in layer.windows(2) {
                let gap = pair[1].offset - pair[0].offset;
                assert!(gap >= pair[0].width / 2.0 + pair[1].width / 2.0 + 20.0 - 1e-9);
            }
        }
    }

    #[test]
    fn test_layout_is_deterministic_and_idempotent() {
        let (doc, eats) = eats_doc();
        let e = engine();
        let a = e.layout(&doc, NodeRef::Word(eats)).unwrap();
        let b = e.layout(&doc, NodeRef::Word(eats)).unwrap();
        assert_eq!(a.nodes.len(), b.nodes.len());
        for (x, y) in a.nodes.iter().zip(b.nodes.iter()) {
            assert_eq!(x.node, y.node);
            assert_eq!(x.offset, y.offset);
            assert_eq!(x.depth, y.depth);
        }
        assert_eq!(a.max_width, b.max_width);
    }

    #[test]
    fn test_rebuild_creates_primary_group() {
        let (doc, eats) = eats_doc();
        let mut e = engine();
        e.rebuild(&doc, NodeRef::Word(eats)).unwrap();
        let groups = e.groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].index, 0);
        assert!(groups[0].anchor.is_none());
        assert_eq!(groups[0].offset, 0.0);
        assert_eq!(groups[0].tree[groups[0].tree.root].node, NodeRef::Word(eats));
    }
}
