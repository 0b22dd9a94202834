//! Local template file resolution.
//!
//! A reference like `◊greet` can point at a sibling template file.  For a
//! given name the resolver tries `{name}.{ext}` and then the
//! underscore-prefixed `_{name}.{ext}` variant (the convention for "private"
//! partial templates) in each of three scopes, first hit wins:
//!
//!   1. the document's own directory
//!   2. the parent directory
//!   3. a workspace-wide recursive search
//!
//! The scope/variant ordering is observable behavior, not a tuning choice:
//! a plain file in the current directory must win over an underscore file
//! next to it, and both outrank any parent or workspace match.

use std::path::Path;

use tower_lsp::lsp_types::Url;

use crate::capability::Workspace;

/// Resolve `name` to a template file URI, or `None` when no candidate
/// exists in any scope.
///
/// `name` comes from the tokenizer, whose character classes already exclude
/// path separators; no further sanitization happens here.
pub async fn resolve_template(
    workspace: &dyn Workspace,
    name: &str,
    start_dir: &Path,
    extension: &str,
) -> Option<Url> {
    let variants = [
        format!("{name}.{extension}"),
        format!("_{name}.{extension}"),
    ];

    let mut scopes: Vec<&Path> = vec![start_dir];
    if let Some(parent) = start_dir.parent() {
        scopes.push(parent);
    }

    for dir in scopes {
        for variant in &variants {
            let candidate = dir.join(variant);
            if workspace.file_exists(&candidate).await {
                return Url::from_file_path(&candidate).ok();
            }
        }
    }

    // Fall back to a workspace-wide search, one result per variant.
    for variant in &variants {
        let hits = workspace.find_files(&format!("**/{variant}"), 1).await;
        if let Some(hit) = hits.into_iter().next() {
            return Some(hit);
        }
    }

    None
}
