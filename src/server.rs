//! LSP server trait implementation.
//!
//! This module contains the `impl LanguageServer for Backend` block, which
//! handles all LSP protocol messages (initialize, didOpen, didChange,
//! didClose, goto definition).

use tower_lsp::LanguageServer;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;

use crate::Backend;
use crate::types::Settings;

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        // Capture the workspace root for the filesystem-backed capabilities.
        #[allow(deprecated)]
        let workspace_root = params
            .root_uri
            .as_ref()
            .and_then(|uri| uri.to_file_path().ok());

        if let Some(root) = workspace_root
            && let Ok(mut guard) = self.workspace_root.lock()
        {
            *guard = Some(root);
        }

        // Settings come in through initializationOptions; anything missing
        // or malformed falls back to defaults.
        if let Some(options) = params.initialization_options
            && let Ok(settings) = serde_json::from_value::<Settings>(options)
            && let Ok(mut guard) = self.settings.lock()
        {
            *guard = settings;
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                definition_provider: Some(OneOf::Left(true)),
                ..ServerCapabilities::default()
            },
            server_info: Some(ServerInfo {
                name: self.name.clone(),
                version: Some(self.version.clone()),
            }),
            offset_encoding: None,
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.log(MessageType::INFO, "DryckLSP initialized!".to_string())
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        let uri = doc.uri.to_string();

        if let Ok(mut files) = self.open_files.lock() {
            files.insert(uri.clone(), doc.text);
        }

        self.log(MessageType::INFO, format!("Opened file: {}", uri))
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.to_string();

        // Full sync: the first change is the whole document.
        if let Some(change) = params.content_changes.first()
            && let Ok(mut files) = self.open_files.lock()
        {
            files.insert(uri, change.text.clone());
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri.to_string();

        if let Ok(mut files) = self.open_files.lock() {
            files.remove(&uri);
        }

        self.log(MessageType::INFO, format!("Closed file: {}", uri))
            .await;
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        // Prefer the open-document text; fall back to disk for documents
        // the client never opened.
        let content = self
            .open_files
            .lock()
            .ok()
            .and_then(|files| files.get(uri.as_str()).cloned());
        let content = match content {
            Some(content) => content,
            None => match self.workspace().read_file(&uri).await {
                Some(content) => content,
                None => return Ok(None),
            },
        };

        let mut locations = self.provide_definition(&uri, &content, position).await;

        Ok(match locations.len() {
            0 => None,
            1 => locations.pop().map(GotoDefinitionResponse::Scalar),
            _ => Some(GotoDefinitionResponse::Array(locations)),
        })
    }
}
