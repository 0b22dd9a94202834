#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use tower_lsp::lsp_types::*;

use dryck_lsp::capability::{PythonTooling, Workspace};
use dryck_lsp::types::{ForeignSymbolKind, HierarchyItem, OutlineSymbol, SymbolMatch};

/// Helper: create a temp workspace populated with fixture files.
pub fn create_workspace(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    for (rel_path, content) in files {
        let full = dir.path().join(rel_path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("failed to create dirs");
        }
        std::fs::write(&full, content).expect("failed to write fixture file");
    }
    dir
}

pub fn file_url(path: &Path) -> Url {
    Url::from_file_path(path).expect("absolute fixture path")
}

pub fn location(uri: &Url, line: u32, character: u32) -> Location {
    Location {
        uri: uri.clone(),
        range: Range {
            start: Position { line, character },
            end: Position { line, character },
        },
    }
}

pub fn hierarchy_item(name: &str, uri: &Url, line: u32) -> HierarchyItem {
    HierarchyItem {
        name: name.to_string(),
        uri: uri.clone(),
        position: Position { line, character: 0 },
    }
}

pub fn class_outline(name: &str, start_line: u32, end_line: u32, selection: Position) -> OutlineSymbol {
    OutlineSymbol {
        name: name.to_string(),
        kind: ForeignSymbolKind::Class,
        range: Range {
            start: Position {
                line: start_line,
                character: 0,
            },
            end: Position {
                line: end_line,
                character: 0,
            },
        },
        selection,
    }
}

pub fn function_symbol(name: &str, location: Location) -> SymbolMatch {
    SymbolMatch {
        name: name.to_string(),
        kind: ForeignSymbolKind::Function,
        location,
        container_name: None,
    }
}

pub fn method_symbol(name: &str, location: Location, container: Option<&str>) -> SymbolMatch {
    SymbolMatch {
        name: name.to_string(),
        kind: ForeignSymbolKind::Method,
        location,
        container_name: container.map(str::to_string),
    }
}

/// A workspace with no files at all; for tests that never touch it.
pub struct NullWorkspace;

#[async_trait]
impl Workspace for NullWorkspace {
    async fn file_exists(&self, _path: &Path) -> bool {
        false
    }

    async fn find_files(&self, _glob: &str, _max_results: usize) -> Vec<Url> {
        Vec::new()
    }

    async fn read_file(&self, _uri: &Url) -> Option<String> {
        None
    }
}

/// Canned Python tooling.  Fill in the public fields, then hand it to the
/// code under test.  Call counters let tests assert how much work a walk
/// performed.
#[derive(Default)]
pub struct MockTooling {
    /// Replies to every workspace-symbol query, unfiltered — the resolver
    /// is responsible for exact-name filtering.
    pub symbols: Vec<SymbolMatch>,
    /// Outline per URI string.
    pub outlines: HashMap<String, Vec<OutlineSymbol>>,
    /// Hierarchy roots keyed by `(uri, line)` of the prepare position.
    /// `None` models the capability being absent entirely.
    pub hierarchy: Option<HashMap<(String, u32), Vec<HierarchyItem>>>,
    /// Supertype edges keyed by node name.
    pub supertype_edges: HashMap<String, Vec<HierarchyItem>>,
    /// Jump-to-definition replies keyed by `(uri, line, character)`.
    pub definitions: HashMap<(String, u32, u32), Vec<Location>>,
    pub supertype_calls: AtomicUsize,
    pub goto_calls: AtomicUsize,
}

#[async_trait]
impl PythonTooling for MockTooling {
    async fn workspace_symbols(&self, _name: &str) -> Vec<SymbolMatch> {
        self.symbols.clone()
    }

    async fn document_symbols(&self, uri: &Url) -> Vec<OutlineSymbol> {
        self.outlines
            .get(uri.as_str())
            .cloned()
            .unwrap_or_default()
    }

    async fn prepare_type_hierarchy(
        &self,
        uri: &Url,
        position: Position,
    ) -> Option<Vec<HierarchyItem>> {
        self.hierarchy.as_ref().map(|roots| {
            roots
                .get(&(uri.to_string(), position.line))
                .cloned()
                .unwrap_or_default()
        })
    }

    async fn supertypes(&self, item: &HierarchyItem) -> Vec<HierarchyItem> {
        self.supertype_calls.fetch_add(1, Ordering::SeqCst);
        self.supertype_edges
            .get(&item.name)
            .cloned()
            .unwrap_or_default()
    }

    async fn goto_definition(&self, uri: &Url, position: Position) -> Vec<Location> {
        self.goto_calls.fetch_add(1, Ordering::SeqCst);
        self.definitions
            .get(&(uri.to_string(), position.line, position.character))
            .cloned()
            .unwrap_or_default()
    }
}
