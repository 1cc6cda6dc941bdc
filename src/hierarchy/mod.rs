//! Rooted tree of entity occurrences, stored as an index arena.
//!
//! A `Hierarchy` is rebuilt from scratch on every full layout pass and every
//! graft; the same underlying entity may occur several times (once per path
//! it was reached over). Geometry fields live on the occurrence and are
//! written by the layer assigner and, for grafted trees, by the rigid
//! translation.

pub mod walker;

pub use walker::HierarchyBuilder;

use crate::document::{LinkId, NodeRef};

/// Index of a node within its Hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HierId(pub usize);

/// Entity kind tag of an occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Word,
    Link,
}

/// A sibling/coreference group attached to a node: a relation label plus
/// the argument occurrences it joins to the node, all on the node's layer.
#[derive(Debug, Clone, Default)]
pub struct SiblingGroup {
    pub reltype: String,
    pub args: Vec<HierId>,
}

/// One occurrence of an entity in the tree.
#[derive(Debug, Clone)]
pub struct HierarchyNode {
    pub node: NodeRef,
    pub depth: usize,
    pub label: String,
    pub kind: NodeKind,
    pub parent: Option<HierId>,
    pub children: Vec<HierId>,
    /// Links pointing into this node that were excluded from the tree; shown
    /// only as affordances, promotable via graft.
    pub incoming: Vec<LinkId>,
    /// True when the incident arrow at this occurrence points inward.
    pub receives_arrow: bool,
    pub siblings: Vec<SiblingGroup>,
    /// Horizontal position, written by the layer assigner.
    pub offset: f64,
    /// Vertical position, written by the layout engine.
    pub y: f64,
    /// Measured label width, written by the layer assigner.
    pub width: f64,
}

impl HierarchyNode {
    pub fn new(node: NodeRef, depth: usize, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            node,
            depth,
            label: label.into(),
            kind,
            parent: None,
            children: Vec::new(),
            incoming: Vec::new(),
            receives_arrow: false,
            siblings: Vec::new(),
            offset: 0.0,
            y: 0.0,
            width: 0.0,
        }
    }
}

/// Index arena of occurrences with a designated root.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    pub nodes: Vec<HierarchyNode>,
    pub root: HierId,
}

impl Hierarchy {
    /// Create a hierarchy containing just the given root node.
    pub fn with_root(root: HierarchyNode) -> Self {
        Self {
            nodes: vec![root],
            root: HierId(0),
        }
    }

    pub fn push(&mut self, node: HierarchyNode) -> HierId {
        let id = HierId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: HierId) -> &HierarchyNode {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: HierId) -> &mut HierarchyNode {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first preorder over `from` and its child-descendants. Sibling
    /// groups are not followed; grafted-tree translation and rendering both
    /// operate on child structure only.
    pub fn descendants(&self, from: HierId) -> Vec<HierId> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            out.push(id);
            for &child in self.get(id).children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// First occurrence (depth-first preorder from `from`) of the given
    /// underlying entity, matched by identity.
    pub fn find_by_entity(&self, from: HierId, entity: NodeRef) -> Option<HierId> {
        self.descendants(from)
            .into_iter()
            .find(|&id| self.get(id).node == entity)
    }

    /// Remove `child` from `parent`'s child list. The occurrence stays in
    /// the arena but is no longer reachable from the root.
    pub fn detach_child(&mut self, parent: HierId, child: HierId) {
        let children = &mut self.get_mut(parent).children;
        if let Some(pos) = children.iter().position(|&c| c == child) {
            children.remove(pos);
        }
        self.get_mut(child).parent = None;
    }
}

impl std::ops::Index<HierId> for Hierarchy {
    type Output = HierarchyNode;
    fn index(&self, id: HierId) -> &HierarchyNode {
        self.get(id)
    }
}

impl std::ops::IndexMut<HierId> for Hierarchy {
    fn index_mut(&mut self, id: HierId) -> &mut HierarchyNode {
        self.get_mut(id)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
