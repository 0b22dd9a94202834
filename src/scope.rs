//! Containing-scope lookup.
//!
//! Given a position in a Python document, find the name of the innermost
//! enclosing class.  Used when a workspace-symbol hit for a method carries
//! no container hint of its own.

use tower_lsp::lsp_types::{Position, Url};

use crate::capability::PythonTooling;
use crate::types::ForeignSymbolKind;

/// Name of the first class-kind outline symbol whose declared range
/// brackets `position`, or `None` when the outline is unavailable.
///
/// Outline ranges are whole-declaration ranges, so a line-only comparison
/// is enough; the column is ignored.
pub async fn enclosing_class_name(
    tooling: &dyn PythonTooling,
    uri: &Url,
    position: Position,
) -> Option<String> {
    tooling
        .document_symbols(uri)
        .await
        .into_iter()
        .find(|symbol| {
            symbol.kind == ForeignSymbolKind::Class
                && symbol.range.start.line <= position.line
                && position.line <= symbol.range.end.line
        })
        .map(|symbol| symbol.name)
}
