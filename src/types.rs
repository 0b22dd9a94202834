//! Data types used throughout the DryckLSP server.
//!
//! This module contains the "model" structs and enums that represent a
//! reference under the cursor, the normalized shapes returned by the Python
//! tooling capabilities, and the server settings.

use serde::Deserialize;
use tower_lsp::lsp_types::{Location, Position, Range, Url};

/// Simple name of the class that qualifies a Python method as a navigation
/// target: page methods must inherit from `appeldryck.Context`.
pub const BASE_CLASS_NAME: &str = "Context";

/// Substring that must appear in the base class's defining file path.
/// Distinguishes the real `appeldryck.Context` from unrelated classes that
/// happen to share the name.
pub const BASE_PATH_MARKER: &str = "appeldryck";

/// Which surface form of the lozenge reference matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceForm {
    /// `◊(name.with.dots)` — the only form that allows dotted names.
    Parenthesized,
    /// `◊name: argument` — the argument is not part of the token.
    Colon,
    /// `◊name` or `◊name{...}`.
    Bare,
}

/// The lozenge-prefixed reference under the cursor.
///
/// `start` and `end` are column offsets within one line, counted in Unicode
/// scalar values.  The span runs from the marker through the last character
/// of the reference, and containment is inclusive at both ends so that a
/// cursor sitting exactly on the trailing edge still resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceToken {
    /// The referenced name. Contains dots only in the parenthesized form.
    pub name: String,
    /// Which pattern produced this token.
    pub form: ReferenceForm,
    /// Column of the marker character.
    pub start: u32,
    /// Column just past the last character of the span.
    pub end: u32,
}

/// Kind of a Python symbol as reported by the tooling capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignSymbolKind {
    Function,
    Method,
    Class,
}

/// One hit from a workspace-wide symbol query, normalized before filtering.
#[derive(Debug, Clone)]
pub struct SymbolMatch {
    /// The symbol's own name (the index may return over-broad matches, so
    /// this is re-checked against the query).
    pub name: String,
    pub kind: ForeignSymbolKind,
    pub location: Location,
    /// The enclosing scope's name when the index supplies one, e.g. the
    /// class a method is defined in.
    pub container_name: Option<String>,
}

/// One entry of a document's outline.
#[derive(Debug, Clone)]
pub struct OutlineSymbol {
    pub name: String,
    pub kind: ForeignSymbolKind,
    /// Whole-declaration range (header through end of body).
    pub range: Range,
    /// Position of the declared name itself.
    pub selection: Position,
}

/// Opaque handle to a class produced by the type-hierarchy capability.
///
/// Two handles denote the same class when their `(uri, name)` pairs are
/// equal; handle identity itself carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyItem {
    pub name: String,
    pub uri: Url,
    pub position: Position,
}

/// Server settings, deserialized from the client's `initializationOptions`.
/// Missing or malformed options silently fall back to defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// File extension of template files, without the leading dot.
    pub template_extension: String,
    /// When false, references never resolve into the Python codebase.
    pub python_lookup: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template_extension: "dryck".to_string(),
            python_lookup: true,
        }
    }
}
