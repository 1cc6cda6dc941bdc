//! Error types for parsing, measurement, and layout.

use thiserror::Error;

use crate::document::LinkId;

/// Error from the standoff notation parser. Lines are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// The text-measurement collaborator could not produce a width.
///
/// Layout treats this as fatal: there is no default-width fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("text measurement failed: {0}")]
pub struct MeasureError(pub String);

/// Errors surfaced by the layout engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error(transparent)]
    Measure(#[from] MeasureError),

    /// A graft reference named a group index that does not exist.
    #[error("no group with index {0}")]
    UnknownGroup(usize),

    /// A graft could not find the anchor entity inside the freshly built
    /// subtree, or the anchor no longer lists the grafted link as incoming.
    /// Indicates the entity model changed between discovery and graft; the
    /// graft is aborted and prior state left untouched.
    #[error("graft of {link:?} is inconsistent with the live scene")]
    AnchorNotFound { link: LinkId },
}

/// Top-level error for the convenience API (parse + layout in one call).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// A caller-supplied entity id is not declared in the document.
    #[error("unknown id '{0}'")]
    UnknownId(String),
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let e = ParseError::new(3, "unknown id 'w9'");
        assert_eq!(e.to_string(), "line 3: unknown id 'w9'");
    }

    #[test]
    fn test_measure_error_wraps_into_layout_error() {
        let e: LayoutError = MeasureError("font not loaded".into()).into();
        assert_eq!(e.to_string(), "text measurement failed: font not loaded");
    }

    #[test]
    fn test_unknown_group_display() {
        let e = LayoutError::UnknownGroup(4);
        assert_eq!(e.to_string(), "no group with index 4");
    }
}
