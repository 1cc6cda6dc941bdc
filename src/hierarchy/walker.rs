//! Recursive discovery of entity occurrences, producing a Hierarchy.
//!
//! Two traversal variants share the depth bound and the storage-order
//! determinism guarantee:
//!
//! * [`HierarchyBuilder::build`] — classifies each incident link as a forward
//!   tree edge or an excluded incoming reference, and expands link
//!   participants. Used for the live scene and for graft subtrees.
//! * [`HierarchyBuilder::build_top`] — walks only `top` links, splitting them
//!   into trigger children and same-layer coreference sibling groups. Has no
//!   incoming concept.

use log::{debug, trace};

use super::{HierId, Hierarchy, HierarchyNode, NodeKind, SiblingGroup};
use crate::config::{ArrowFallback, LayoutConfig};
use crate::document::{ArrowDirection, Document, LinkId, NodeRef};

pub struct HierarchyBuilder<'a> {
    doc: &'a Document,
    config: &'a LayoutConfig,
}

impl<'a> HierarchyBuilder<'a> {
    pub fn new(doc: &'a Document, config: &'a LayoutConfig) -> Self {
        Self { doc, config }
    }

    fn occurrence(&self, node: NodeRef, depth: usize) -> HierarchyNode {
        let kind = match node {
            NodeRef::Word(_) => NodeKind::Word,
            NodeRef::Link(_) => NodeKind::Link,
        };
        HierarchyNode::new(node, depth, self.doc.label(node), kind)
    }

    // ─── Primary variant: incoming-edge classification ───────────────────────

    /// Build the tree rooted at `root`, recording excluded incoming links on
    /// each occurrence.
    pub fn build(&self, root: NodeRef) -> Hierarchy {
        let mut h = Hierarchy::with_root(self.occurrence(root, 0));
        let root_id = h.root;
        self.grow(&mut h, root_id, None);
        debug!("built hierarchy from {root:?}: {} occurrences", h.len());
        h
    }

    /// True when `link` should be excluded from `node`'s children and
    /// recorded as an incoming reference instead: `node` is absent from the
    /// link's argument list, or its arrow points inward. A direction list
    /// too short to cover `node` falls through to the configured policy.
    fn is_incoming(&self, link: LinkId, node: NodeRef) -> bool {
        let l = self.doc.link(link);
        match l.arguments.iter().position(|&a| a == node) {
            None => true,
            Some(i) => match l.directions.get(i) {
                Some(ArrowDirection::Incoming) => true,
                Some(ArrowDirection::Outgoing) => false,
                None => self.config.arrow_fallback == ArrowFallback::Incoming,
            },
        }
    }

    fn grow(&self, h: &mut Hierarchy, id: HierId, source: Option<NodeRef>) {
        let node = h[id].node;
        let depth = h[id].depth;
        if depth >= self.config.max_depth {
            return;
        }

        for &lid in self.doc.links_of(node) {
            if source == Some(NodeRef::Link(lid)) {
                continue;
            }
            if self.is_incoming(lid, node) {
                trace!("{node:?}: link {lid:?} classified incoming");
                h[id].incoming.push(lid);
                continue;
            }
            let child = h.push(self.occurrence(NodeRef::Link(lid), depth + 1));
            h[child].parent = Some(id);
            h[id].children.push(child);
            self.grow(h, child, Some(node));
        }

        // a Link occurrence also expands its participants
        if let NodeRef::Link(lid) = node {
            let args: Vec<(NodeRef, Option<ArrowDirection>)> = {
                let l = self.doc.link(lid);
                l.arguments
                    .iter()
                    .enumerate()
                    .map(|(i, &a)| (a, l.directions.get(i).copied()))
                    .collect()
            };
            for (arg, dir) in args {
                if source == Some(arg) {
                    continue;
                }
                let child = h.push(self.occurrence(arg, depth + 1));
                if dir == Some(ArrowDirection::Incoming) {
                    h[child].receives_arrow = true;
                }
                h[child].parent = Some(id);
                h[id].children.push(child);
                self.grow(h, child, Some(node));
            }
        }
    }

    // ─── Secondary variant: top links and coreference groups ─────────────────

    /// Build the tree rooted at `root` over `top` links only. Trigger-less
    /// top links become sibling groups whose arguments sit on the same layer
    /// as the node; a Word's children are the top links it triggers; a
    /// Link's children are its arguments.
    pub fn build_top(&self, root: NodeRef) -> Hierarchy {
        let mut h = Hierarchy::with_root(self.occurrence(root, 0));
        let root_id = h.root;
        let mut chain = Vec::new();
        self.grow_top(&mut h, root_id, &mut chain);
        debug!("built top hierarchy from {root:?}: {} occurrences", h.len());
        h
    }

    /// `chain` holds the entities along the current same-layer coreference
    /// expansion; an argument already on the chain is not re-expanded, which
    /// bounds coreference recursion (depth alone cannot, since coreference
    /// arguments stay on their node's layer).
    fn grow_top(&self, h: &mut Hierarchy, id: HierId, chain: &mut Vec<NodeRef>) {
        let node = h[id].node;
        let depth = h[id].depth;
        if depth >= self.config.max_depth {
            return;
        }
        chain.push(node);

        let top: Vec<LinkId> = self
            .doc
            .links_of(node)
            .iter()
            .copied()
            .filter(|&l| self.doc.link(l).top)
            .collect();

        for &lid in &top {
            let (reltype, args): (String, Vec<NodeRef>) = {
                let l = self.doc.link(lid);
                if l.trigger.is_some() {
                    continue;
                }
                (
                    l.reltype.clone().unwrap_or_default(),
                    l.arguments
                        .iter()
                        .copied()
                        .filter(|a| !chain.contains(a))
                        .collect(),
                )
            };
            let mut members = Vec::with_capacity(args.len());
            for arg in args {
                let arg_id = h.push(self.occurrence(arg, depth));
                self.grow_top(h, arg_id, chain);
                members.push(arg_id);
            }
            h[id].siblings.push(SiblingGroup {
                reltype,
                args: members,
            });
        }

        chain.pop();

        let children: Vec<NodeRef> = match node {
            NodeRef::Word(w) => top
                .iter()
                .copied()
                .filter(|&l| self.doc.link(l).trigger == Some(w))
                .map(NodeRef::Link)
                .collect(),
            NodeRef::Link(l) => self.doc.link(l).arguments.clone(),
        };
        for arg in children {
            let child = h.push(self.occurrence(arg, depth + 1));
            h[child].parent = Some(id);
            h[id].children.push(child);
            // child subtrees start their own coreference chain
            let mut fresh = Vec::new();
            self.grow_top(h, child, &mut fresh);
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
