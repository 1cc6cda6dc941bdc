//! SVG render sink.
//!
//! Two entry points: `render_groups` draws the live scene (per-group trees,
//! dashed graft edges, dashed incoming-affordance hooks), `render_result`
//! draws a single stateless layout pass (child curves plus square-bracket
//! sibling edges).

use std::collections::HashMap;

use crate::document::Document;
use crate::hierarchy::HierId;
use crate::layout::{EdgeKind, Group, LayoutResult};

// ── Constants ────────────────────────────────────────────────────────────────

const FONT_SIZE: i32 = 12;
const FONT_FAMILY: &str = "monospace";
const PADDING: f64 = 40.0;
const CURVE_OFFSET: f64 = 20.0;
const HOOK_DX: f64 = 30.0;
const HOOK_STEP: f64 = 15.0;

const EDGE_STROKE: &str = r#"stroke="grey" stroke-width="1" fill="none""#;
const DASHED_STROKE: &str = r#"stroke="grey" stroke-width="1" fill="none" stroke-dasharray="2 2""#;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn font() -> String {
    format!(r#"font-family="{FONT_FAMILY}" font-size="{FONT_SIZE}""#)
}

fn text(x: f64, y: f64, label: &str) -> String {
    format!(
        r#"<text x="{x}" y="{y}" text-anchor="middle" {}>{}</text>"#,
        font(),
        escape(label)
    )
}

fn child_curve(x1: f64, y1: f64, x2: f64, y2: f64) -> String {
    format!(
        r#"<path d="M{x1},{} C{x1},{} {x2},{} {x2},{}" {EDGE_STROKE}/>"#,
        y1 + 5.0,
        y1 + 25.0,
        y2 - 40.0,
        y2 - 15.0
    )
}

fn document_bounds(points: impl Iterator<Item = (f64, f64)>) -> (f64, f64, f64, f64) {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for (x, y) in points {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if min_x > max_x {
        (0.0, 0.0, 0.0, 0.0)
    } else {
        (min_x, max_x, min_y, max_y)
    }
}

fn svg_open(bounds: (f64, f64, f64, f64)) -> String {
    let (min_x, max_x, min_y, max_y) = bounds;
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
        min_x - PADDING,
        min_y - PADDING,
        max_x - min_x + 2.0 * PADDING,
        max_y - min_y + 2.0 * PADDING
    )
}

// ── Scene rendering ──────────────────────────────────────────────────────────

/// Render the live scene: every group's tree, a dashed edge from each
/// grafted group's root back to its anchor, and dashed hooks for the
/// incoming affordances still waiting to be promoted.
pub fn render_groups(doc: &Document, groups: &[Group]) -> String {
    let mut all_points: Vec<(f64, f64)> = Vec::new();
    for group in groups {
        for id in group.tree.descendants(group.tree.root) {
            let n = &group.tree[id];
            all_points.push((n.offset + group.offset, n.y));
        }
    }

    let mut out = svg_open(document_bounds(all_points.into_iter()));
    for group in groups {
        let tree = &group.tree;
        let ids = tree.descendants(tree.root);
        out.push_str(&format!(
            r#"<g transform="translate({},0)">"#,
            group.offset
        ));

        for &id in &ids {
            let n = &tree[id];
            for &child in &n.children {
                let c = &tree[child];
                out.push_str(&child_curve(n.offset, n.y, c.offset, c.y));
            }
        }

        if let Some(anchor) = group.anchor {
            if let Some(owner) = groups.get(anchor.group) {
                let a = &owner.tree[anchor.node];
                let root = &tree[tree.root];
                out.push_str(&format!(
                    r#"<path class="graft" d="M{},{} C{},{} {},{} {},{}" {DASHED_STROKE}/>"#,
                    root.offset,
                    root.y,
                    root.offset - CURVE_OFFSET,
                    root.y,
                    a.offset + CURVE_OFFSET,
                    a.y,
                    a.offset,
                    a.y
                ));
            }
        }

        for &id in &ids {
            let n = &tree[id];
            out.push_str(&text(n.offset, n.y, &n.label));
            for (i, &link) in n.incoming.iter().enumerate() {
                let hx = n.offset - HOOK_DX;
                let hy = n.y - HOOK_STEP * i as f64 - 25.0;
                out.push_str(&format!(
                    r#"<path class="incoming" d="M{hx},{hy} C{},{hy} {},{} {},{}" {DASHED_STROKE}/>"#,
                    n.offset - 5.0,
                    n.offset,
                    n.y - 10.0,
                    n.offset,
                    n.y - 5.0
                ));
                out.push_str(&text(hx, hy, doc.label(crate::document::NodeRef::Link(link))));
            }
        }

        out.push_str("</g>");
    }
    out.push_str("</svg>");
    out
}

// ── Single-pass rendering ────────────────────────────────────────────────────

/// Render one stateless layout pass: child curves, square-bracket sibling
/// edges, and node labels.
pub fn render_result(result: &LayoutResult) -> String {
    let by_id: HashMap<HierId, usize> = result
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id, i))
        .collect();

    let mut out = svg_open(document_bounds(
        result.nodes.iter().map(|n| (n.offset, n.y)),
    ));

    for edge in &result.edges {
        let (Some(&s), Some(&t)) = (by_id.get(&edge.source), by_id.get(&edge.target)) else {
            continue;
        };
        let (s, t) = (&result.nodes[s], &result.nodes[t]);
        match edge.kind {
            EdgeKind::Child => {
                out.push_str(&child_curve(s.offset, s.y, t.offset, t.y));
            }
            EdgeKind::Sibling => {
                // square bracket below the layer, spanning the gap
                let (x1, x2) = if t.offset > s.offset {
                    (s.offset + s.width / 2.0, t.offset - t.width / 2.0)
                } else {
                    (t.offset + t.width / 2.0, s.offset - s.width / 2.0)
                };
                out.push_str(&format!(
                    r#"<path class="sibling" d="M{},{} v7 h{} v-7" {EDGE_STROKE}/>"#,
                    x1 - 10.0,
                    s.y + 5.0,
                    x2 - x1 + 20.0
                ));
            }
        }
    }

    for n in &result.nodes {
        out.push_str(&text(n.offset, n.y, &n.label));
    }
    out.push_str("</svg>");
    out
}

// ─── Tests ───────────────────────────────────────────────────────────────────
