//! WASM bindings for annotree.
//!
//! Exposes `render` and `renderWithOptions` to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

/// Lay out the scene rooted at `root` and return it as an SVG string.
#[wasm_bindgen]
pub fn render(src: &str, root: &str) -> Result<String, JsError> {
    crate::render_scene(src, root, None).map_err(|e| JsError::new(&e.to_string()))
}

/// Same as `render` with an explicit traversal depth bound.
#[wasm_bindgen(js_name = "renderWithOptions")]
pub fn render_with_options(src: &str, root: &str, max_depth: usize) -> Result<String, JsError> {
    crate::render_scene(src, root, Some(max_depth)).map_err(|e| JsError::new(&e.to_string()))
}
