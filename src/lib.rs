//! annotree — Word/Link annotation graphs rendered as collision-free
//! rooted trees.
//!
//! Converts a cyclic, directed graph of Word and Link entities into a
//! rooted visual tree, lays the tree out so no two labels overlap, and
//! supports incremental grafts: promoting a previously excluded incoming
//! link into its own positioned subtree without moving anything else.
//!
//! Public API: [`render_scene`] for the one-call path, or compose
//! [`standoff::parse`], [`layout::LayoutEngine`], and [`svg`] directly.

pub mod config;
pub mod document;
pub mod error;
pub mod hierarchy;
pub mod layout;
pub mod standoff;
pub mod svg;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{ArrowFallback, LayoutConfig};
pub use error::Error;

/// Parse standoff notation, lay out the tree rooted at `root_id`, and
/// render the scene to SVG.
pub fn render_scene(src: &str, root_id: &str, max_depth: Option<usize>) -> Result<String, Error> {
    let parsed = standoff::parse(src)?;
    let root = *parsed
        .ids
        .get(root_id)
        .ok_or_else(|| Error::UnknownId(root_id.to_string()))?;

    let mut config = LayoutConfig::default();
    if let Some(depth) = max_depth {
        config.max_depth = depth;
    }

    let mut engine = layout::LayoutEngine::new(config, layout::MonospaceMeasure::default());
    engine.rebuild(&parsed.doc, root)?;
    Ok(svg::render_groups(&parsed.doc, engine.groups()))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
