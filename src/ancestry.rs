//! Class ancestry resolution.
//!
//! Determines whether a Python class transitively inherits from the
//! well-known base `appeldryck.Context`.  Two strategies exist:
//!
//!   - **Hierarchy walk** (preferred): breadth-first search over the type
//!     hierarchy capability's supertype edges.  BFS confirms shallow
//!     ancestry — the common case — with a minimal number of calls and
//!     needs no explicit depth bound.
//!   - **Definition chasing** (fallback): parse the class's declaration
//!     header line, follow jump-to-definition on each listed base, and
//!     recurse.  Used when the hierarchy capability is absent or produced
//!     nothing usable for this class.
//!
//! The strategy is selected once per top-level query; definition chasing
//! never calls back into the hierarchy walk.  Both walks deduplicate
//! visited classes by `(uri, name)` so cyclic or diamond-shaped
//! inheritance declarations terminate.

use std::collections::{HashSet, VecDeque};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tower_lsp::lsp_types::{Position, Url};

use crate::capability::{PythonTooling, Workspace};
use crate::token::char_column;
use crate::types::{BASE_CLASS_NAME, BASE_PATH_MARKER, ForeignSymbolKind, HierarchyItem};

/// One ancestry check.  Implementations are interchangeable; which one runs
/// is decided by [`select_strategy`] based on capability availability.
#[async_trait]
trait AncestryStrategy: Send + Sync {
    async fn descends_from_base(&self, class_uri: &Url, class_name: &str) -> bool;
}

/// Whether `class_name`, defined in `class_uri`, transitively inherits from
/// the well-known base.
///
/// Fails closed: any missing capability, unreadable file, or malformed
/// declaration header yields `false`, never an error.
pub async fn is_descendant_of_base(
    tooling: &dyn PythonTooling,
    workspace: &dyn Workspace,
    class_uri: &Url,
    class_name: &str,
) -> bool {
    let strategy = select_strategy(tooling, workspace, class_uri, class_name).await;
    strategy.descends_from_base(class_uri, class_name).await
}

/// Probe the type-hierarchy capability once and pick the strategy for the
/// whole query.  The hierarchy walk requires both an outline symbol for the
/// class (to get a definition position) and usable roots from the prepare
/// call; anything less selects definition chasing.
async fn select_strategy<'a>(
    tooling: &'a dyn PythonTooling,
    workspace: &'a dyn Workspace,
    class_uri: &Url,
    class_name: &str,
) -> Box<dyn AncestryStrategy + 'a> {
    if let Some(position) = class_definition_position(tooling, class_uri, class_name).await
        && let Some(roots) = tooling.prepare_type_hierarchy(class_uri, position).await
        && !roots.is_empty()
    {
        tracing::debug!(class = class_name, "ancestry check via type hierarchy");
        return Box::new(HierarchyWalk { tooling, roots });
    }

    tracing::debug!(class = class_name, "ancestry check via definition chasing");
    Box::new(DefinitionChase { tooling, workspace })
}

/// Position of the class's own declared name, from the document outline.
async fn class_definition_position(
    tooling: &dyn PythonTooling,
    uri: &Url,
    class_name: &str,
) -> Option<Position> {
    tooling
        .document_symbols(uri)
        .await
        .into_iter()
        .find(|symbol| symbol.kind == ForeignSymbolKind::Class && symbol.name == class_name)
        .map(|symbol| symbol.selection)
}

/// Whether a hierarchy node is the well-known base: matched by simple name
/// plus a substring of its defining file's path, so that unrelated classes
/// sharing the name don't count.
fn is_base_item(item: &HierarchyItem) -> bool {
    item.name == BASE_CLASS_NAME && item.uri.path().contains(BASE_PATH_MARKER)
}

// ─── Strategy A: hierarchy walk ─────────────────────────────────────────────

struct HierarchyWalk<'a> {
    tooling: &'a dyn PythonTooling,
    /// Roots produced by the capability probe in [`select_strategy`].
    roots: Vec<HierarchyItem>,
}

#[async_trait]
impl AncestryStrategy for HierarchyWalk<'_> {
    async fn descends_from_base(&self, _class_uri: &Url, class_name: &str) -> bool {
        let mut queue: VecDeque<HierarchyItem> = self.roots.iter().cloned().collect();
        let mut visited: HashSet<(String, String)> = HashSet::new();

        while let Some(item) = queue.pop_front() {
            if !visited.insert((item.uri.to_string(), item.name.clone())) {
                continue;
            }

            if is_base_item(&item) {
                tracing::debug!(class = class_name, via = %item.name, "base reached");
                return true;
            }

            for supertype in self.tooling.supertypes(&item).await {
                queue.push_back(supertype);
            }
        }

        false
    }
}

// ─── Strategy B: definition chasing ─────────────────────────────────────────

struct DefinitionChase<'a> {
    tooling: &'a dyn PythonTooling,
    workspace: &'a dyn Workspace,
}

#[async_trait]
impl AncestryStrategy for DefinitionChase<'_> {
    async fn descends_from_base(&self, class_uri: &Url, class_name: &str) -> bool {
        // Explicit work stack + visited set rather than recursion, so the
        // walk stays bounded on cyclic or diamond inheritance declarations.
        let mut visited: HashSet<(String, String)> = HashSet::new();
        let mut pending: Vec<(Url, String)> = vec![(class_uri.clone(), class_name.to_string())];

        while let Some((uri, name)) = pending.pop() {
            if !visited.insert((uri.to_string(), name.clone())) {
                continue;
            }

            let Some(source) = self.workspace.read_file(&uri).await else {
                continue;
            };
            let Some((line_index, line)) = find_class_header(&source, &name) else {
                continue;
            };

            for base in parse_base_list(line) {
                // The universal root never leads to the well-known base.
                if base.name == "object" {
                    continue;
                }

                // A dotted reference such as `pkg.Base` resolves via
                // jump-to-definition at its last segment, not at the start.
                let position = Position {
                    line: line_index as u32,
                    character: base.last_segment_column,
                };

                for location in self.tooling.goto_definition(&uri, position).await {
                    if location.uri.path().contains(BASE_PATH_MARKER) {
                        tracing::debug!(class = %name, base = %base.name, "base reached");
                        return true;
                    }
                    let simple = base.name.rsplit('.').next().unwrap_or(&base.name);
                    pending.push((location.uri, simple.to_string()));
                }
            }
        }

        false
    }
}

/// A base-class entry from a declaration header's parenthesized list.
struct BaseRef {
    /// The raw name as written, possibly dotted (`pkg.Base`).
    name: String,
    /// Column (Unicode scalar values) of the name's last dot-separated
    /// segment within the header line.
    last_segment_column: u32,
}

/// Find the line declaring `class <name>` in `source`.
///
/// This is intentionally a shallow, single-line heuristic; multi-line class
/// headers are out of scope and terminate the branch with "not found".
fn find_class_header<'a>(source: &'a str, class_name: &str) -> Option<(usize, &'a str)> {
    let header = Regex::new(&format!(
        r"^\s*class\s+{}\b",
        regex::escape(class_name)
    ))
    .ok()?;

    source
        .lines()
        .enumerate()
        .find(|(_, line)| header.is_match(line))
}

/// Extract the base-class list from a declaration header line.
///
/// No parenthesis means no bases (the search for that branch ends there).
/// Entries that are not plain or dotted identifiers — keyword arguments
/// like `metaclass=...`, subscripted generics — are skipped.
fn parse_base_list(line: &str) -> Vec<BaseRef> {
    static BASE_NAME: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*$").expect("valid regex")
    });

    let Some(open) = line.find('(') else {
        return Vec::new();
    };
    let Some(close) = line[open..].find(')').map(|rel| open + rel) else {
        return Vec::new();
    };

    let inner = &line[open + 1..close];
    let mut bases = Vec::new();
    let mut offset = open + 1;

    for part in inner.split(',') {
        let trimmed = part.trim();
        let part_start = offset + (part.len() - part.trim_start().len());
        offset += part.len() + 1;

        if trimmed.is_empty() || !BASE_NAME.is_match(trimmed) {
            continue;
        }

        let segment_offset = trimmed.rfind('.').map(|dot| dot + 1).unwrap_or(0);
        bases.push(BaseRef {
            name: trimmed.to_string(),
            last_segment_column: char_column(line, part_start + segment_offset),
        });
    }

    bases
}
