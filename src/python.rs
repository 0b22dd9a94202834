//! Line-level Python index backing the [`PythonTooling`] capabilities.
//!
//! The server does not parse Python.  This index scans workspace `.py`
//! files with two line regexes (`class` and `def` declarations) and tracks
//! indentation to attribute methods to their enclosing classes — enough to
//! answer workspace-symbol, outline, and jump-to-definition queries for
//! the resolver's needs.  It deliberately reports the type-hierarchy
//! capability as absent, so ancestry checks against this index always use
//! the definition-chasing fallback.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tower_lsp::lsp_types::{Location, Position, Range, Url};

use crate::capability::PythonTooling;
use crate::token::char_column;
use crate::types::{ForeignSymbolKind, HierarchyItem, OutlineSymbol, SymbolMatch};

static CLASS_DECL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)class\s+([A-Za-z_][A-Za-z0-9_]*)").expect("valid regex"));

static DEF_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)(?:async\s+)?def\s+([A-Za-z_][A-Za-z0-9_]*)").expect("valid regex")
});

/// Regex-level Python symbol index over the workspace.
pub struct PythonIndex {
    root: Arc<Mutex<Option<PathBuf>>>,
}

impl PythonIndex {
    /// Share the workspace root with the rest of the server.
    pub fn new(root: Arc<Mutex<Option<PathBuf>>>) -> Self {
        Self { root }
    }

    /// Fixed-root constructor for tests.
    pub fn rooted(root: PathBuf) -> Self {
        Self {
            root: Arc::new(Mutex::new(Some(root))),
        }
    }

    fn root_dir(&self) -> Option<PathBuf> {
        self.root.lock().ok().and_then(|guard| guard.clone())
    }
}

/// One declaration found by the line scan.
#[derive(Debug, Clone)]
struct Declaration {
    name: String,
    kind: ForeignSymbolKind,
    /// Line of the declaration header.
    line: u32,
    /// Column of the declared name on that line.
    name_column: u32,
    /// Last line of the declaration's body (for classes; declarations
    /// without a tracked body end on their own header line).
    end_line: u32,
    /// Innermost enclosing class, when any.
    container: Option<String>,
}

impl Declaration {
    fn name_range(&self) -> Range {
        Range {
            start: Position {
                line: self.line,
                character: self.name_column,
            },
            end: Position {
                line: self.line,
                character: self.name_column + self.name.chars().count() as u32,
            },
        }
    }

    fn declaration_range(&self) -> Range {
        Range {
            start: Position {
                line: self.line,
                character: 0,
            },
            end: Position {
                line: self.end_line,
                character: 0,
            },
        }
    }
}

/// Scan one file's source for `class` and `def` declarations.
///
/// Indentation decides nesting: a class stays "open" until the next code
/// line at its own indent or less, and a `def` inside an open class is a
/// method.  Blank and comment lines never close a class body.
fn scan(source: &str) -> Vec<Declaration> {
    let mut declarations: Vec<Declaration> = Vec::new();
    // (indent, index into declarations) for each open class.
    let mut open_classes: Vec<(usize, usize)> = Vec::new();
    let mut last_code_line: u32 = 0;

    for (index, line) in source.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let indent = line.len() - trimmed.len();

        while let Some(&(class_indent, declaration_index)) = open_classes.last() {
            if indent <= class_indent {
                declarations[declaration_index].end_line = last_code_line;
                open_classes.pop();
            } else {
                break;
            }
        }

        if let Some(caps) = CLASS_DECL.captures(line) {
            if let Some(name) = caps.get(2) {
                let container = open_classes
                    .last()
                    .map(|&(_, i)| declarations[i].name.clone());
                declarations.push(Declaration {
                    name: name.as_str().to_string(),
                    kind: ForeignSymbolKind::Class,
                    line: index as u32,
                    name_column: char_column(line, name.start()),
                    end_line: index as u32,
                    container,
                });
                open_classes.push((indent, declarations.len() - 1));
            }
        } else if let Some(caps) = DEF_DECL.captures(line)
            && let Some(name) = caps.get(2)
        {
            let container = open_classes
                .last()
                .map(|&(_, i)| declarations[i].name.clone());
            let kind = if container.is_some() {
                ForeignSymbolKind::Method
            } else {
                ForeignSymbolKind::Function
            };
            declarations.push(Declaration {
                name: name.as_str().to_string(),
                kind,
                line: index as u32,
                name_column: char_column(line, name.start()),
                end_line: index as u32,
                container,
            });
        }

        last_code_line = index as u32;
    }

    for &(_, declaration_index) in &open_classes {
        declarations[declaration_index].end_line = last_code_line;
    }

    declarations
}

/// All `.py` files under `root`, honoring ignore files.
fn python_files(root: &Path) -> Vec<PathBuf> {
    ignore::WalkBuilder::new(root)
        .build()
        .flatten()
        .filter(|entry| {
            entry.file_type().is_some_and(|kind| kind.is_file())
                && entry.path().extension().is_some_and(|ext| ext == "py")
        })
        .map(|entry| entry.into_path())
        .collect()
}

/// The identifier segment at `column`, expanded over `[A-Za-z0-9_]` in both
/// directions.  Dots are boundaries, so the cursor on the last segment of
/// `pkg.Base` yields `Base`.
fn identifier_at(line: &str, column: u32) -> Option<String> {
    let chars: Vec<char> = line.chars().collect();
    let position = (column as usize).min(chars.len());

    let is_word = |c: char| c.is_alphanumeric() || c == '_';

    let mut start = position;
    while start > 0 && is_word(chars[start - 1]) {
        start -= 1;
    }
    let mut end = position;
    while end < chars.len() && is_word(chars[end]) {
        end += 1;
    }

    if start < end {
        Some(chars[start..end].iter().collect())
    } else {
        None
    }
}

#[async_trait]
impl PythonTooling for PythonIndex {
    async fn workspace_symbols(&self, name: &str) -> Vec<SymbolMatch> {
        let Some(root) = self.root_dir() else {
            return Vec::new();
        };
        let name = name.to_string();

        tokio::task::spawn_blocking(move || {
            let mut matches = Vec::new();
            for path in python_files(&root) {
                let Ok(source) = std::fs::read_to_string(&path) else {
                    continue;
                };
                let Ok(uri) = Url::from_file_path(&path) else {
                    continue;
                };
                for declaration in scan(&source) {
                    if declaration.name != name {
                        continue;
                    }
                    matches.push(SymbolMatch {
                        name: declaration.name.clone(),
                        kind: declaration.kind,
                        location: Location {
                            uri: uri.clone(),
                            range: declaration.name_range(),
                        },
                        container_name: declaration.container.clone(),
                    });
                }
            }
            matches
        })
        .await
        .unwrap_or_default()
    }

    async fn document_symbols(&self, uri: &Url) -> Vec<OutlineSymbol> {
        let Ok(path) = uri.to_file_path() else {
            return Vec::new();
        };
        let Ok(source) = tokio::fs::read_to_string(&path).await else {
            return Vec::new();
        };

        scan(&source)
            .into_iter()
            .map(|declaration| OutlineSymbol {
                range: declaration.declaration_range(),
                selection: declaration.name_range().start,
                name: declaration.name,
                kind: declaration.kind,
            })
            .collect()
    }

    async fn prepare_type_hierarchy(
        &self,
        _uri: &Url,
        _position: Position,
    ) -> Option<Vec<HierarchyItem>> {
        // No hierarchy provider of our own; ancestry checks fall back to
        // definition chasing.
        None
    }

    async fn supertypes(&self, _item: &HierarchyItem) -> Vec<HierarchyItem> {
        Vec::new()
    }

    async fn goto_definition(&self, uri: &Url, position: Position) -> Vec<Location> {
        let Ok(path) = uri.to_file_path() else {
            return Vec::new();
        };
        let Ok(source) = tokio::fs::read_to_string(&path).await else {
            return Vec::new();
        };
        let Some(line) = source.lines().nth(position.line as usize) else {
            return Vec::new();
        };
        let Some(word) = identifier_at(line, position.character) else {
            return Vec::new();
        };

        let Some(root) = self.root_dir() else {
            return Vec::new();
        };

        tokio::task::spawn_blocking(move || {
            let mut classes = Vec::new();
            let mut others = Vec::new();
            for path in python_files(&root) {
                let Ok(source) = std::fs::read_to_string(&path) else {
                    continue;
                };
                let Ok(uri) = Url::from_file_path(&path) else {
                    continue;
                };
                for declaration in scan(&source) {
                    if declaration.name != word {
                        continue;
                    }
                    let location = Location {
                        uri: uri.clone(),
                        range: declaration.name_range(),
                    };
                    if declaration.kind == ForeignSymbolKind::Class {
                        classes.push(location);
                    } else {
                        others.push(location);
                    }
                }
            }
            // Base names in a class header are classes; prefer those.
            if classes.is_empty() { others } else { classes }
        })
        .await
        .unwrap_or_default()
    }
}
