//! Per-layer horizontal offset assignment.
//!
//! Bottom-up two-pass placement over depth layers, deepest first: parents
//! center over their children, then left-to-right collisions are resolved by
//! shifting whole subtrees. A variant of classic layered tree drawing
//! adapted to variable-width labels and a second edge class (coreference
//! siblings) that demands a wider gap.

use log::debug;

use super::measure::TextMeasure;
use crate::config::LayoutConfig;
use crate::error::MeasureError;
use crate::hierarchy::{HierId, Hierarchy};

/// Group a flattened node order into depth layers, preserving the flatten
/// order inside each layer. That order is what the collision pass walks
/// left to right.
pub fn build_layers(h: &Hierarchy, order: &[HierId]) -> Vec<Vec<HierId>> {
    let mut layers: Vec<Vec<HierId>> = Vec::new();
    for &id in order {
        let depth = h[id].depth;
        if layers.len() <= depth {
            layers.resize_with(depth + 1, Vec::new);
        }
        layers[depth].push(id);
    }
    layers
}

/// Shift a subtree (and, below the shift root, its sibling-group members)
/// rightward by `dx`. The node that triggered a collision is shifted as the
/// `is_root` of the shift: its own sibling groups sit in the same layer and
/// are moved by the caller's layer sweep, not here.
fn shift_subtree(h: &mut Hierarchy, id: HierId, dx: f64, is_root: bool, max_width: &mut f64) {
    h[id].offset += dx;
    if h[id].offset > *max_width {
        *max_width = h[id].offset;
    }
    if !is_root {
        let member_ids: Vec<HierId> = h[id]
            .siblings
            .iter()
            .flat_map(|g| g.args.iter().copied())
            .collect();
        for member in member_ids {
            shift_subtree(h, member, dx, false, max_width);
        }
    }
    let children: Vec<HierId> = h[id].children.clone();
    for child in children {
        shift_subtree(h, child, dx, false, max_width);
    }
}

/// Assign `offset` and `width` to every node, one layer at a time from the
/// deepest up. Returns the rightmost offset seen (for centering).
///
/// Pass 1 gives each node an initial offset: midpoint of its first and last
/// child, else its left neighbor's offset (collapsed, to be separated in
/// pass 2), else 0. Pass 2 measures widths and pushes every colliding
/// subtree (and everything right of it) rightward until the required gap
/// holds. The gap is `sibling_separation` when the left neighbor is joined
/// to the node by a coreference group, `child_separation` otherwise.
pub fn assign(
    h: &mut Hierarchy,
    layers: &[Vec<HierId>],
    measure: &dyn TextMeasure,
    config: &LayoutConfig,
) -> Result<f64, MeasureError> {
    let mut max_width = 0.0_f64;

    for layer in layers.iter().rev() {
        for (j, &id) in layer.iter().enumerate() {
            let offset = match (h[id].children.first(), h[id].children.last()) {
                (Some(&first), Some(&last)) => (h[first].offset + h[last].offset) / 2.0,
                _ if j > 0 => h[layer[j - 1]].offset,
                _ => 0.0,
            };
            h[id].offset = offset;
        }

        for (j, &id) in layer.iter().enumerate() {
            let width = measure.width(&h[id].label)?;
            h[id].width = width;
            if j > 0 {
                let prev = layer[j - 1];
                let separation = if h[prev].siblings.iter().any(|g| g.args.contains(&id)) {
                    config.sibling_separation
                } else {
                    config.child_separation
                };
                let dx = h[prev].offset + h[prev].width / 2.0 + width / 2.0 - h[id].offset
                    + separation;
                if dx > 0.0 {
                    for &right in &layer[j..] {
                        shift_subtree(h, right, dx, true, &mut max_width);
                    }
                }
            }
            if h[id].offset > max_width {
                max_width = h[id].offset;
            }
        }
    }

    debug!(
        "assigned offsets across {} layers, max width {max_width}",
        layers.len()
    );
    Ok(max_width)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
