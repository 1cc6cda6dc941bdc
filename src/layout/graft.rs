//! Incremental grafting: promote an excluded incoming link into a freshly
//! laid-out subtree spliced onto the live scene at its anchor.
//!
//! Each group owns its tree and coordinates outright; groups are joined only
//! by anchor-position lookups, so a graft never moves a node in any other
//! group.

use log::debug;

use super::{LayoutEngine, TextMeasure};
use crate::document::{Document, LinkId, NodeRef};
use crate::error::LayoutError;
use crate::hierarchy::{HierId, Hierarchy, HierarchyBuilder};

/// Position of a live anchor node: which group, which occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub group: usize,
    pub node: HierId,
}

/// One independently laid-out tree in the scene. `anchor` is `None` exactly
/// for the primary group; a grafted group keeps the anchor it was spliced
/// onto and renders a dashed edge from its root to that anchor.
#[derive(Debug, Clone)]
pub struct Group {
    pub index: usize,
    pub tree: Hierarchy,
    pub anchor: Option<Anchor>,
    pub offset: f64,
}

/// An incoming affordance the interaction sink asks to promote: the
/// excluded link, and the occurrence holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomingRef {
    pub node: LinkId,
    pub group: usize,
    pub anchor: HierId,
}

impl<M: TextMeasure> LayoutEngine<M> {
    /// Splice the subtree reachable from an incoming link onto the live
    /// scene. The fresh subtree is laid out at its own origin, then rigidly
    /// translated so its occurrence of the anchor entity coincides with the
    /// live anchor; that occurrence is detached to avoid a double render,
    /// and the promoted link leaves the anchor's incoming list.
    ///
    /// Fails with a consistency error, leaving all groups untouched, when
    /// the entity model changed between discovery and graft: the anchor no
    /// longer lists the link, or the link's subtree no longer reaches the
    /// anchor entity.
    pub fn graft(&mut self, doc: &Document, at: IncomingRef) -> Result<(), LayoutError> {
        let inconsistent = || LayoutError::AnchorNotFound { link: at.node };

        let group = self
            .groups
            .get(at.group)
            .ok_or(LayoutError::UnknownGroup(at.group))?;
        let lineage = group.index;
        let group_offset = group.offset;
        let live = group
            .tree
            .nodes
            .get(at.anchor.0)
            .ok_or_else(inconsistent)?;
        let anchor_entity = live.node;
        let incoming_pos = live
            .incoming
            .iter()
            .position(|&l| l == at.node)
            .ok_or_else(inconsistent)?;
        let (anchor_offset, anchor_y) = (live.offset, live.y);

        // fresh subtree rooted at the promoted link, own coordinate origin
        let builder = HierarchyBuilder::new(doc, &self.config);
        let mut fresh = builder.build(NodeRef::Link(at.node));
        self.place_tree(&mut fresh)?;

        // the anchor must by construction reappear inside its own subtree
        let root = fresh.root;
        let occurrence = fresh
            .find_by_entity(root, anchor_entity)
            .ok_or_else(inconsistent)?;
        let parent = fresh[occurrence].parent.ok_or_else(inconsistent)?;
        fresh.detach_child(parent, occurrence);

        // rigid translation onto the live anchor; the detached occurrence
        // rides along, landing exactly on the anchor it duplicates
        let dx = anchor_offset - fresh[occurrence].offset;
        let dy = anchor_y - fresh[occurrence].y;
        for node in fresh.nodes.iter_mut() {
            node.offset += dx;
            node.y += dy;
        }
        debug!(
            "grafted {:?} at {anchor_entity:?}: translated by ({dx}, {dy})",
            at.node
        );

        // all checks passed; now mutate the live scene
        self.groups[at.group].tree[at.anchor]
            .incoming
            .remove(incoming_pos);

        let anchor = Anchor {
            group: at.group,
            node: at.anchor,
        };
        let group = Group {
            index: lineage,
            tree: fresh,
            anchor: Some(anchor),
            offset: group_offset,
        };
        // re-grafting the same link at the same anchor replaces its group
        let existing = self.groups.iter().position(|g| {
            g.anchor == Some(anchor) && g.tree[g.tree.root].node == NodeRef::Link(at.node)
        });
        match existing {
            Some(slot) => self.groups[slot] = group,
            None => self.groups.push(group),
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
