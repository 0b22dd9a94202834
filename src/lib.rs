//! DryckLSP — language server for the appeldryck template dialect.
//!
//! Template documents embed cross-references through a lozenge marker:
//! `◊greet` renders the sibling template `greet.dryck`, while `◊render`
//! may call a Python page function or a method of an `appeldryck.Context`
//! subclass.  This server resolves "go to definition" for those
//! references, across two name spaces:
//!
//!   - the template file-naming convention (plain and underscore-prefixed
//!     variants, searched current dir → parent dir → workspace), and
//!   - the Python codebase, via injected tooling capabilities (workspace
//!     symbols, outlines, type hierarchy, jump-to-definition).
//!
//! All Python semantic analysis is delegated to those capabilities; the
//! server only orchestrates them and fails closed to "no result".

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tower_lsp::Client;
use tower_lsp::lsp_types::MessageType;

pub mod ancestry;
pub mod capability;
pub mod locate;
pub mod python;
mod resolve;
pub mod scope;
mod server;
pub mod symbols;
pub mod token;
pub mod types;
pub mod workspace;

use capability::{PythonTooling, Workspace};
use python::PythonIndex;
use types::Settings;
use workspace::FsWorkspace;

pub struct Backend {
    name: String,
    version: String,
    /// Full text of currently open documents, keyed by URI string.
    open_files: Arc<Mutex<HashMap<String, String>>>,
    /// Workspace root captured from the `initialize` request; shared with
    /// the filesystem-backed capability implementations.
    workspace_root: Arc<Mutex<Option<PathBuf>>>,
    /// Settings from the client's `initializationOptions`.
    settings: Arc<Mutex<Settings>>,
    workspace: Arc<dyn Workspace>,
    tooling: Arc<dyn PythonTooling>,
    client: Option<Client>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        let workspace_root: Arc<Mutex<Option<PathBuf>>> = Arc::new(Mutex::new(None));
        Self {
            name: "DryckLSP".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            open_files: Arc::new(Mutex::new(HashMap::new())),
            settings: Arc::new(Mutex::new(Settings::default())),
            workspace: Arc::new(FsWorkspace::new(Arc::clone(&workspace_root))),
            tooling: Arc::new(PythonIndex::new(Arc::clone(&workspace_root))),
            workspace_root,
            client: Some(client),
        }
    }

    /// Test constructor: no client, caller-supplied capabilities.
    pub fn new_test(workspace: Arc<dyn Workspace>, tooling: Arc<dyn PythonTooling>) -> Self {
        Self {
            name: "DryckLSP".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            open_files: Arc::new(Mutex::new(HashMap::new())),
            workspace_root: Arc::new(Mutex::new(None)),
            settings: Arc::new(Mutex::new(Settings::default())),
            workspace,
            tooling,
            client: None,
        }
    }

    pub(crate) fn workspace(&self) -> &dyn Workspace {
        self.workspace.as_ref()
    }

    pub(crate) fn tooling(&self) -> &dyn PythonTooling {
        self.tooling.as_ref()
    }

    pub(crate) fn settings(&self) -> Settings {
        self.settings
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub(crate) async fn log(&self, typ: MessageType, message: String) {
        if let Some(client) = &self.client {
            client.log_message(typ, message).await;
        }
    }
}
