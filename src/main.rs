use clap::Parser;
use tower_lsp::{LspService, Server};

use dryck_lsp::Backend;

/// Language server for the appeldryck template dialect.
#[derive(Parser)]
#[command(name = "dryck-lsp", version)]
struct Args {
    /// Communicate over stdio.  This is the only supported transport; the
    /// flag is accepted because many editors pass it unconditionally.
    #[arg(long)]
    stdio: bool,
}

#[tokio::main]
async fn main() {
    // stdout carries the LSP transport, so diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.stdio {
        tracing::debug!("--stdio accepted (stdio is the only transport)");
    }

    let (service, socket) = LspService::new(Backend::new);
    Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
        .serve(service)
        .await;
}
