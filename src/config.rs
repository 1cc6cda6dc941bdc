//! Configuration for the tree layout pipeline.

/// Classification policy for a link whose arrow-direction list is shorter
/// than its argument list (malformed entity data).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrowFallback {
    /// Treat the link as an ordinary forward child (permissive).
    #[default]
    Forward,
    /// Treat the link as incoming (excluded from the tree).
    Incoming,
}

/// Tunables for traversal and layout.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Maximum traversal depth from the selected root. Nodes at this depth
    /// become leaves even if the underlying graph continues.
    pub max_depth: usize,
    /// Horizontal gap between adjacent subtrees in a layer.
    pub child_separation: f64,
    /// Wider gap used when the previous node in the layer is joined to the
    /// current one by a sibling/coreference edge.
    pub sibling_separation: f64,
    /// Vertical distance between consecutive depth layers.
    pub row_height: f64,
    /// What to do when a link's direction data does not cover a participant.
    pub arrow_fallback: ArrowFallback,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_depth: 20,
            child_separation: 20.0,
            sibling_separation: 50.0,
            row_height: 50.0,
            arrow_fallback: ArrowFallback::default(),
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
