//! Python symbol resolution.
//!
//! Resolves a dot-free reference name against the Python workspace symbol
//! index.  Top-level functions are kept outright; methods are kept only
//! when their enclosing class descends from `appeldryck.Context` — a
//! method on an unrelated class that happens to share the reference's name
//! is a false positive, not a navigation target.

use tower_lsp::lsp_types::Location;

use crate::ancestry;
use crate::capability::{PythonTooling, Workspace};
use crate::scope;
use crate::types::ForeignSymbolKind;

/// All Python definition locations the reference `name` may denote.
///
/// Matches come back in the index's own order; no ranking or deduplication
/// is applied, so duplicate locations from the index pass through as-is.
pub async fn resolve_python_symbols(
    tooling: &dyn PythonTooling,
    workspace: &dyn Workspace,
    name: &str,
) -> Vec<Location> {
    let matches = tooling.workspace_symbols(name).await;
    let mut locations = Vec::new();

    for symbol in matches {
        // The index may return prefix or fuzzy matches; only exact names
        // are candidates.
        if symbol.name != name {
            continue;
        }

        match symbol.kind {
            ForeignSymbolKind::Function => locations.push(symbol.location),
            ForeignSymbolKind::Method => {
                // Prefer the index's own container hint; fall back to a
                // scan of the defining document's outline.
                let class_name = match symbol.container_name {
                    Some(ref container) => Some(container.clone()),
                    None => {
                        scope::enclosing_class_name(
                            tooling,
                            &symbol.location.uri,
                            symbol.location.range.start,
                        )
                        .await
                    }
                };

                let Some(class_name) = class_name else {
                    tracing::debug!(symbol = name, "method match without a class, skipped");
                    continue;
                };

                if ancestry::is_descendant_of_base(
                    tooling,
                    workspace,
                    &symbol.location.uri,
                    &class_name,
                )
                .await
                {
                    locations.push(symbol.location);
                } else {
                    tracing::debug!(
                        symbol = name,
                        class = %class_name,
                        "enclosing class is not a Context descendant, skipped"
                    );
                }
            }
            ForeignSymbolKind::Class => {}
        }
    }

    locations
}
