//! Goto-definition resolution.
//!
//! Given a cursor position in a template document this module:
//!   1. Extracts the lozenge reference under the cursor.
//!   2. Tries to resolve it as a sibling template file.
//!   3. For dot-free names only, falls back to the Python symbol index.
//!
//! The first non-empty stage wins.  Every failure degrades to an empty
//! result, never an error.

use tower_lsp::lsp_types::{Location, Position, Range, Url};

use crate::Backend;
use crate::locate;
use crate::symbols;
use crate::token;

impl Backend {
    /// Handle a "go to definition" request.
    ///
    /// Returns every location the reference under the cursor may denote,
    /// or an empty vector when nothing resolves.
    pub async fn provide_definition(
        &self,
        uri: &Url,
        content: &str,
        position: Position,
    ) -> Vec<Location> {
        let Some(line) = content.lines().nth(position.line as usize) else {
            return Vec::new();
        };
        let Some(reference) = token::extract_reference(line, position.character) else {
            return Vec::new();
        };

        tracing::debug!(name = %reference.name, form = ?reference.form, "resolving reference");

        let settings = self.settings();

        // 1. Template files take priority over Python symbols.
        if let Ok(path) = uri.to_file_path()
            && let Some(dir) = path.parent()
            && let Some(target) = locate::resolve_template(
                self.workspace(),
                &reference.name,
                dir,
                &settings.template_extension,
            )
            .await
        {
            // File references never carry an in-file target position; jump
            // to the start of the file.
            return vec![Location {
                uri: target,
                range: Range::default(),
            }];
        }

        // 2. Dotted names are file references by convention — never
        //    reinterpret them as Python identifiers, even when no file
        //    was found.
        if reference.name.contains('.') || !settings.python_lookup {
            return Vec::new();
        }

        symbols::resolve_python_symbols(self.tooling(), self.workspace(), &reference.name).await
    }
}
