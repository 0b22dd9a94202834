//! Filesystem-backed [`Workspace`] implementation.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tower_lsp::lsp_types::Url;

use crate::capability::Workspace;

/// Workspace access over the real filesystem, rooted at the directory the
/// client handed us during `initialize`.
pub struct FsWorkspace {
    root: Arc<Mutex<Option<PathBuf>>>,
}

impl FsWorkspace {
    /// Share the workspace root with the rest of the server; the root is
    /// filled in once `initialize` arrives.
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

#[async_trait]
impl Workspace for FsWorkspace {
    async fn file_exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    async fn find_files(&self, glob: &str, max_results: usize) -> Vec<Url> {
        let Some(root) = self.root_dir() else {
            return Vec::new();
        };

        // Every pattern used by the resolver is `**/filename`, so matching
        // on the final path component is sufficient.
        let file_name = glob.rsplit('/').next().unwrap_or(glob).to_string();

        tokio::task::spawn_blocking(move || {
            let mut hits = Vec::new();
            for entry in ignore::WalkBuilder::new(&root).build().flatten() {
                if entry.file_type().is_some_and(|kind| kind.is_file())
                    && entry.file_name().to_string_lossy() == file_name
                    && let Ok(uri) = Url::from_file_path(entry.path())
                {
                    hits.push(uri);
                    if hits.len() >= max_results {
                        break;
                    }
                }
            }
            hits
        })
        .await
        .unwrap_or_default()
    }

    async fn read_file(&self, uri: &Url) -> Option<String> {
        let path = uri.to_file_path().ok()?;
        tokio::fs::read_to_string(path).await.ok()
    }
}
