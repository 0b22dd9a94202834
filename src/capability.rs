//! Capability traits required from the server's collaborators.
//!
//! The resolution core never touches the filesystem or the Python codebase
//! directly; everything goes through these two traits.  The production
//! server wires in [`crate::workspace::FsWorkspace`] and
//! [`crate::python::PythonIndex`]; tests wire in fixtures.  Every capability
//! is best-effort: an empty reply means "no match", never an error.

use std::path::Path;

use async_trait::async_trait;
use tower_lsp::lsp_types::{Location, Position, Url};

use crate::types::{HierarchyItem, OutlineSymbol, SymbolMatch};

/// File-level access to the template workspace.
#[async_trait]
pub trait Workspace: Send + Sync {
    /// Whether a regular file exists at `path`.
    async fn file_exists(&self, path: &Path) -> bool;

    /// Recursive workspace search for files matching `glob`, returning at
    /// most `max_results` hits.
    async fn find_files(&self, glob: &str, max_results: usize) -> Vec<Url>;

    /// Full text of the file behind `uri`, or `None` if it cannot be read.
    async fn read_file(&self, uri: &Url) -> Option<String>;
}

/// Semantic queries against the Python codebase.
///
/// These mirror what Python language tooling exposes; the core only
/// orchestrates them and never parses Python itself (beyond the single
/// declaration-header heuristic in the ancestry fallback).
#[async_trait]
pub trait PythonTooling: Send + Sync {
    /// Workspace-wide symbol query.  Implementations may return over-broad
    /// matches; callers filter by exact name.
    async fn workspace_symbols(&self, name: &str) -> Vec<SymbolMatch>;

    /// Outline symbols of one document.
    async fn document_symbols(&self, uri: &Url) -> Vec<OutlineSymbol>;

    /// Hierarchy handles for the declaration at `position`.
    ///
    /// Returns `None` when the type-hierarchy capability itself is
    /// unavailable (or produced nothing usable), which selects the
    /// definition-chasing ancestry fallback for the whole query.
    async fn prepare_type_hierarchy(
        &self,
        uri: &Url,
        position: Position,
    ) -> Option<Vec<HierarchyItem>>;

    /// Direct supertypes of a hierarchy handle.
    async fn supertypes(&self, item: &HierarchyItem) -> Vec<HierarchyItem>;

    /// Definition location(s) of the identifier at `position`.  Used only
    /// by the ancestry fallback when no type hierarchy is available.
    async fn goto_definition(&self, uri: &Url, position: Position) -> Vec<Location>;
}
